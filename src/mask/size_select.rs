// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Size-select composer: one handler chosen by length or token count

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::policy::{MaskHandler, MaskPolicy, SeparableHandler};
use super::splitter::{separable_builder, SeparableAttrs};

/// Picks a single handler for the whole input
///
/// Without a separator the size is the character count of the input. With a
/// separator it is the number of tokens, and the selected handler masks the
/// original unsplit input into a single output unit. When nothing is
/// selected the tokens pass through and are rejoined.
///
/// # Example
/// ```
/// use mask_rust::mask::{factory, MaskHandler, SizeSelectPolicy};
///
/// let name = SizeSelectPolicy::new()
///     .add_handler(factory::reserve_left(1), [2, 3])
///     .add_handler(factory::reserve_left(2), [4]);
/// assert_eq!(name.handle("李白"), "李*");
/// assert_eq!(name.handle("司马相如弟弟"), "司马****");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SizeSelectPolicy {
    handler_of_size: BTreeMap<usize, MaskPolicy>,
    default_handler: Option<Box<MaskPolicy>>,
    separable: SeparableAttrs,
}

impl SizeSelectPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to each of `sizes`
    pub fn add_handler<S>(mut self, handler: impl Into<MaskPolicy>, sizes: S) -> Self
    where
        S: IntoIterator<Item = usize>,
    {
        let handler = handler.into();
        for size in sizes {
            self.handler_of_size.insert(size, handler.clone());
        }
        self
    }

    /// Handler used when no registered size fits
    pub fn with_default_handler(mut self, handler: impl Into<MaskPolicy>) -> Self {
        self.default_handler = Some(Box::new(handler.into()));
        self
    }

    pub fn handler_of_size(&self) -> &BTreeMap<usize, MaskPolicy> {
        &self.handler_of_size
    }

    pub fn default_handler(&self) -> Option<&MaskPolicy> {
        self.default_handler.as_deref()
    }

    /// Handler under the greatest size `<= count`, else the default handler
    pub fn match_handler(&self, count: usize) -> Option<&MaskPolicy> {
        self.handler_of_size
            .range(..=count)
            .next_back()
            .map(|(_, handler)| handler)
            .or(self.default_handler.as_deref())
    }
}

separable_builder!(SizeSelectPolicy);

impl SeparableHandler for SizeSelectPolicy {
    fn attrs(&self) -> &SeparableAttrs {
        &self.separable
    }

    fn mask_whole<'a>(&'a self, src: &'a str) -> Cow<'a, str> {
        match self.match_handler(src.chars().count()) {
            Some(handler) => Cow::Owned(handler.handle(src)),
            None => Cow::Borrowed(src),
        }
    }

    fn mask_tokens<'a>(&'a self, src: &'a str, tokens: Vec<&'a str>) -> Vec<Cow<'a, str>> {
        match self.match_handler(tokens.len()) {
            Some(handler) => vec![Cow::Owned(handler.handle(src))],
            None => tokens.into_iter().map(Cow::Borrowed).collect(),
        }
    }
}

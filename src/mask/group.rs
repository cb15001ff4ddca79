// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Group composer: one handler per token position

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::policy::{MaskHandler, MaskPolicy, SeparableHandler};
use super::splitter::{separable_builder, SeparableAttrs};

/// Per-position dispatch over split tokens
///
/// Handler sequences are keyed by token count. For an input split into
/// `count` tokens, the sequence with the greatest key `<= count` is used and
/// token `i` goes to its handler `i`. Positions without a handler fall back to
/// the default handler, or pass through unchanged when there is none.
///
/// Without a separator the input counts as a single token.
///
/// # Example
/// ```
/// use mask_rust::mask::{factory, GroupPolicy, MaskHandler};
///
/// // sizes 3: [h1, h2, h3] and 5: [h4..h8]; 6 tokens use the size-5 set
/// let group = GroupPolicy::new(".")
///     .add_handlers(vec![factory::mask_all(); 3])
///     .add_handlers_at(5, vec![factory::reserve_left(1); 5]);
/// assert_eq!(group.handle("ab.cd.ef"), "**.**.**");
/// assert_eq!(group.handle("ab.cd.ef.gh.ij.kl"), "a*.c*.e*.g*.i*.kl");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GroupPolicy {
    handlers_of_size: BTreeMap<usize, Vec<Option<MaskPolicy>>>,
    default_handler: Option<Box<MaskPolicy>>,
    separable: SeparableAttrs,
}

impl GroupPolicy {
    /// Group splitting on `separator`
    pub fn new(separator: impl Into<String>) -> Self {
        Self::default().with_separator(separator)
    }

    /// Group without a separator
    pub fn unseparated() -> Self {
        Self::default()
    }

    /// Register `handlers` for inputs of at least `handlers.len()` tokens
    pub fn add_handlers<I, H>(self, handlers: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<MaskPolicy>,
    {
        let slots: Vec<Option<MaskPolicy>> =
            handlers.into_iter().map(|h| Some(h.into())).collect();
        let size = slots.len();
        self.add_slots_at(size, slots)
    }

    /// Register `handlers` for inputs of at least `size` tokens
    pub fn add_handlers_at<I, H>(self, size: usize, handlers: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<MaskPolicy>,
    {
        let slots = handlers.into_iter().map(|h| Some(h.into())).collect();
        self.add_slots_at(size, slots)
    }

    /// Register a sequence that may leave positions empty
    pub fn add_slots_at(mut self, size: usize, slots: Vec<Option<MaskPolicy>>) -> Self {
        self.handlers_of_size.insert(size, slots);
        self
    }

    /// Handler for positions without a registered handler
    pub fn with_default_handler(mut self, handler: impl Into<MaskPolicy>) -> Self {
        self.default_handler = Some(Box::new(handler.into()));
        self
    }

    pub fn handlers_of_size(&self) -> &BTreeMap<usize, Vec<Option<MaskPolicy>>> {
        &self.handlers_of_size
    }

    pub fn default_handler(&self) -> Option<&MaskPolicy> {
        self.default_handler.as_deref()
    }

    /// Sequence registered under the greatest size `<= count`
    pub fn match_handlers(&self, count: usize) -> Option<&[Option<MaskPolicy>]> {
        self.handlers_of_size
            .range(..=count)
            .next_back()
            .map(|(_, slots)| slots.as_slice())
    }

    fn handler_at<'a>(
        &'a self,
        slots: Option<&'a [Option<MaskPolicy>]>,
        idx: usize,
    ) -> Option<&'a MaskPolicy> {
        slots
            .and_then(|slots| slots.get(idx))
            .and_then(Option::as_ref)
            .or(self.default_handler.as_deref())
    }
}

separable_builder!(GroupPolicy);

fn apply<'a>(handler: Option<&MaskPolicy>, src: &'a str) -> Cow<'a, str> {
    match handler {
        Some(handler) => Cow::Owned(handler.handle(src)),
        None => Cow::Borrowed(src),
    }
}

impl SeparableHandler for GroupPolicy {
    fn attrs(&self) -> &SeparableAttrs {
        &self.separable
    }

    fn mask_whole<'a>(&'a self, src: &'a str) -> Cow<'a, str> {
        let handler = self.handler_at(self.match_handlers(1), 0);
        apply(handler, src)
    }

    fn mask_tokens<'a>(&'a self, _src: &'a str, tokens: Vec<&'a str>) -> Vec<Cow<'a, str>> {
        let slots = self.match_handlers(tokens.len());
        tokens
            .into_iter()
            .enumerate()
            .map(|(idx, token)| apply(self.handler_at(slots, idx), token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::factory;

    fn sized_group() -> GroupPolicy {
        GroupPolicy::new(".")
            .add_handlers([
                factory::mask_all_fixed(1).with_mask_str("a"),
                factory::mask_all_fixed(1).with_mask_str("b"),
                factory::mask_all_fixed(1).with_mask_str("c"),
            ])
            .add_handlers_at(5, (0..5).map(|_| factory::mask_all_fixed(1).with_mask_str("#")))
    }

    #[test]
    fn test_match_picks_greatest_size_not_above_count() {
        let group = sized_group();
        assert_eq!(group.match_handlers(6).map(<[_]>::len), Some(5));
        assert_eq!(group.match_handlers(5).map(<[_]>::len), Some(5));
        assert_eq!(group.match_handlers(4).map(<[_]>::len), Some(3));
        assert_eq!(group.match_handlers(3).map(<[_]>::len), Some(3));
        assert!(group.match_handlers(1).is_none());
    }

    #[test]
    fn test_dispatch_by_position() {
        let group = sized_group();
        assert_eq!(group.handle("x.y.z"), "a.b.c");
        assert_eq!(group.handle("w.x.y.z"), "a.b.c.z");
        assert_eq!(group.handle("1.2.3.4.5.6"), "#.#.#.#.#.6");
    }

    #[test]
    fn test_no_match_uses_default_or_passes_through() {
        let group = sized_group();
        assert_eq!(group.handle("x.y"), "x.y");

        let group = sized_group().with_default_handler(factory::mask_all());
        assert_eq!(group.handle("xx.y"), "**.*");
        assert_eq!(group.handle("1.2.3.4.5.66"), "#.#.#.#.#.**");
    }

    #[test]
    fn test_empty_slot_falls_back_to_default() {
        let group = GroupPolicy::new("-")
            .add_slots_at(2, vec![None, Some(factory::mask_all().into())])
            .with_default_handler(factory::reserve_left(1));
        assert_eq!(group.handle("abc-def"), "a**-***");
    }

    #[test]
    fn test_unseparated_uses_first_handler() {
        let group = GroupPolicy::unseparated().add_handlers([factory::reserve_left(1)]);
        assert_eq!(group.handle("abc"), "a**");

        let fallback = GroupPolicy::unseparated()
            .add_handlers_at(2, [factory::mask_all(), factory::mask_all()])
            .with_default_handler(factory::mask_number());
        assert_eq!(fallback.handle("a1b2"), "a*b*");

        assert_eq!(GroupPolicy::unseparated().handle("abc"), "abc");
    }

    #[test]
    fn test_email_left_side() {
        let group = GroupPolicy::new("@").add_handlers([factory::reserve_left(1)]);
        assert_eq!(group.handle("abcdef@sina.com"), "a*****@sina.com");
    }

    #[test]
    fn test_later_registration_replaces_size() {
        let group = GroupPolicy::new(",")
            .add_handlers([factory::mask_all()])
            .add_handlers([factory::reserve_left(1)]);
        assert_eq!(group.handlers_of_size().len(), 1);
        assert_eq!(group.handle("abc"), "a**");
    }
}

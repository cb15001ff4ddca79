// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Leaf maskers: edge geometry and character-class masking

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::iter;

use super::error::{MaskError, Result};
use super::policy::SeparableHandler;
use super::splitter::{char_units, separable_builder, SeparableAttrs};

/// Default mask string
pub const DEFAULT_MASK_STR: &str = "*";

/// Default mask length, `<= 0` tracks the length of the masked region
pub const DEFAULT_MASK_LENGTH: i32 = -1;

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]").expect("valid digit pattern"));
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+").expect("valid digit pattern"));
static LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new("[A-Za-z]").expect("valid letter pattern"));
static LETTER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[A-Za-z]+").expect("valid letter pattern"));

/// Left/right sizes of an edge masker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeSpan {
    pub left: usize,
    pub right: usize,
}

impl EdgeSpan {
    /// Checked constructor; negative sizes are rejected
    pub fn new(left: i32, right: i32) -> Result<Self> {
        let left = usize::try_from(left).map_err(|_| {
            MaskError::InvalidParameter(format!("leftSize must not be negative, got {}", left))
        })?;
        let right = usize::try_from(right).map_err(|_| {
            MaskError::InvalidParameter(format!("rightSize must not be negative, got {}", right))
        })?;
        Ok(Self { left, right })
    }

    pub const fn sized(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    fn total(&self) -> usize {
        self.left.saturating_add(self.right)
    }
}

/// Character classes recognised by the class maskers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    Letter,
}

impl CharClass {
    fn single(&self) -> &'static Regex {
        match self {
            CharClass::Digit => &DIGIT,
            CharClass::Letter => &LETTER,
        }
    }

    fn run(&self) -> &'static Regex {
        match self {
            CharClass::Digit => &DIGIT_RUN,
            CharClass::Letter => &LETTER_RUN,
        }
    }
}

/// Leaf masking algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Reserve the edges, mask the middle
    Inner(EdgeSpan),
    /// Mask the edges, reserve the middle
    Outer(EdgeSpan),
    /// Decorate both edges, keep the source intact
    AppendOuter(EdgeSpan),
    /// Mask ASCII digits only
    Number,
    /// Mask ASCII letters only
    Letter,
}

/// Reserve `span.left` leading and `span.right` trailing units and mask the rest.
///
/// Once the reserved regions would meet, the whole input becomes `fixed`
/// (or `units.len()`) mask units.
pub fn mask_inner<'a>(
    units: &[&'a str],
    span: EdgeSpan,
    mask: &'a str,
    fixed: Option<usize>,
) -> Vec<&'a str> {
    let total = units.len();
    if span.total() >= total {
        return vec![mask; fixed.unwrap_or(total)];
    }

    let width = fixed.unwrap_or(total - span.total());
    let mut out = Vec::with_capacity(span.total() + width);
    out.extend_from_slice(&units[..span.left]);
    out.extend(iter::repeat(mask).take(width));
    out.extend_from_slice(&units[total - span.right..]);
    out
}

/// Mask `span.left` leading and `span.right` trailing units and reserve the middle.
///
/// A fixed width replaces each non-empty edge block; an empty edge stays empty.
pub fn mask_outer<'a>(
    units: &[&'a str],
    span: EdgeSpan,
    mask: &'a str,
    fixed: Option<usize>,
) -> Vec<&'a str> {
    let total = units.len();
    if span.total() >= total {
        return vec![mask; fixed.unwrap_or(total)];
    }

    let edge_width = |size: usize| match fixed {
        Some(width) if size > 0 => width,
        _ => size,
    };
    let left_width = edge_width(span.left);
    let right_width = edge_width(span.right);

    let mut out = Vec::with_capacity(total - span.total() + left_width + right_width);
    out.extend(iter::repeat(mask).take(left_width));
    out.extend_from_slice(&units[span.left..total - span.right]);
    out.extend(iter::repeat(mask).take(right_width));
    out
}

/// Wrap `src` in `span.left` and `span.right` copies of `mask`.
pub fn append_outer(src: &str, span: EdgeSpan, mask: &str) -> String {
    let mut out = String::with_capacity(src.len() + mask.len() * span.total());
    out.push_str(&mask.repeat(span.left));
    out.push_str(src);
    out.push_str(&mask.repeat(span.right));
    out
}

/// Mask every character of `class` in `src`.
///
/// With `mask_length < 1` each matching character becomes one `mask`;
/// otherwise each maximal run collapses to `mask_length` copies of `mask`.
pub fn mask_class<'a>(src: &'a str, class: CharClass, mask: &str, mask_length: i32) -> Cow<'a, str> {
    if mask_length < 1 {
        return class.single().replace_all(src, NoExpand(mask));
    }
    let run_mask = mask.repeat(mask_length as usize);
    class.run().replace_all(src, NoExpand(run_mask.as_str()))
}

/// Leaf policy node: one masking algorithm plus mask string/length
///
/// # Example
/// ```
/// use mask_rust::mask::{ItemPolicy, MaskHandler};
///
/// let phone = ItemPolicy::inner(3, 4).unwrap();
/// assert_eq!(phone.handle("13755556666"), "137****6666");
/// ```
#[derive(Debug, Clone)]
pub struct ItemPolicy {
    kind: ItemKind,
    mask_str: String,
    mask_length: i32,
    separable: SeparableAttrs,
}

impl ItemPolicy {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            mask_str: DEFAULT_MASK_STR.to_string(),
            mask_length: DEFAULT_MASK_LENGTH,
            separable: SeparableAttrs::default(),
        }
    }

    /// Reserve `left_size`/`right_size` edges and mask the middle
    pub fn inner(left_size: i32, right_size: i32) -> Result<Self> {
        Ok(Self::new(ItemKind::Inner(EdgeSpan::new(left_size, right_size)?)))
    }

    /// Mask `left_size`/`right_size` edges and reserve the middle
    pub fn outer(left_size: i32, right_size: i32) -> Result<Self> {
        Ok(Self::new(ItemKind::Outer(EdgeSpan::new(left_size, right_size)?)))
    }

    /// Prepend/append mask strings without removing anything
    pub fn append_outer(left_size: i32, right_size: i32) -> Result<Self> {
        Ok(Self::new(ItemKind::AppendOuter(EdgeSpan::new(
            left_size, right_size,
        )?)))
    }

    pub fn number() -> Self {
        Self::new(ItemKind::Number)
    }

    pub fn letter() -> Self {
        Self::new(ItemKind::Letter)
    }

    pub fn with_mask_str(mut self, mask_str: impl Into<String>) -> Self {
        self.mask_str = mask_str.into();
        self
    }

    /// `<= 0` tracks the source length, `> 0` emits exactly that many mask strings
    pub fn with_mask_length(mut self, mask_length: i32) -> Self {
        self.mask_length = mask_length;
        self
    }

    pub fn with_mask(self, mask_str: impl Into<String>, mask_length: i32) -> Self {
        self.with_mask_str(mask_str).with_mask_length(mask_length)
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn mask_str(&self) -> &str {
        &self.mask_str
    }

    pub fn mask_length(&self) -> i32 {
        self.mask_length
    }

    fn fixed_length(&self) -> Option<usize> {
        (self.mask_length > 0).then_some(self.mask_length as usize)
    }

    /// Mask one string with this node's algorithm
    fn mask_one<'a>(&'a self, src: &'a str) -> Cow<'a, str> {
        match self.kind {
            ItemKind::Inner(span) => {
                let units = char_units(src);
                Cow::Owned(mask_inner(&units, span, &self.mask_str, self.fixed_length()).concat())
            }
            ItemKind::Outer(span) => {
                let units = char_units(src);
                Cow::Owned(mask_outer(&units, span, &self.mask_str, self.fixed_length()).concat())
            }
            ItemKind::AppendOuter(span) => Cow::Owned(append_outer(src, span, &self.mask_str)),
            ItemKind::Number => mask_class(src, CharClass::Digit, &self.mask_str, self.mask_length),
            ItemKind::Letter => mask_class(src, CharClass::Letter, &self.mask_str, self.mask_length),
        }
    }
}

separable_builder!(ItemPolicy);

impl SeparableHandler for ItemPolicy {
    fn attrs(&self) -> &SeparableAttrs {
        &self.separable
    }

    fn mask_whole<'a>(&'a self, src: &'a str) -> Cow<'a, str> {
        self.mask_one(src)
    }

    // Inner/Outer treat each token as one unit; the rest mask tokens one by one
    fn mask_tokens<'a>(&'a self, _src: &'a str, tokens: Vec<&'a str>) -> Vec<Cow<'a, str>> {
        match self.kind {
            ItemKind::Inner(span) => mask_inner(&tokens, span, &self.mask_str, self.fixed_length())
                .into_iter()
                .map(Cow::Borrowed)
                .collect(),
            ItemKind::Outer(span) => mask_outer(&tokens, span, &self.mask_str, self.fixed_length())
                .into_iter()
                .map(Cow::Borrowed)
                .collect(),
            _ => tokens.into_iter().map(|token| self.mask_one(token)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::MaskHandler;

    #[test]
    fn test_negative_sizes_rejected() {
        assert!(matches!(
            ItemPolicy::inner(-1, 0),
            Err(MaskError::InvalidParameter(_))
        ));
        assert!(matches!(
            ItemPolicy::outer(0, -2),
            Err(MaskError::InvalidParameter(_))
        ));
        assert!(matches!(
            ItemPolicy::append_outer(-1, -1),
            Err(MaskError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_inner_phone() {
        let policy = ItemPolicy::inner(3, 4).unwrap();
        assert_eq!(policy.handle("13755556666"), "137****6666");
    }

    #[test]
    fn test_inner_overlap_masks_everything() {
        let policy = ItemPolicy::inner(1, 2).unwrap();
        assert_eq!(policy.handle("abcd"), "a*cd");
        assert_eq!(policy.handle("abc"), "***");
        assert_eq!(policy.handle(""), "");
    }

    #[test]
    fn test_inner_fixed_length() {
        let policy = ItemPolicy::inner(1, 1).unwrap().with_mask_length(2);
        assert_eq!(policy.handle("abcdef"), "a**f");
        assert_eq!(policy.handle("ab"), "**");
    }

    #[test]
    fn test_outer_examples() {
        let policy = ItemPolicy::outer(1, 2).unwrap();
        assert_eq!(policy.handle("abcd"), "*b**");
        assert_eq!(policy.handle("abc"), "***");

        let margin = ItemPolicy::outer(2, 2).unwrap();
        assert_eq!(margin.handle("abcdef"), "**cd**");
    }

    #[test]
    fn test_outer_fixed_length_skips_empty_edge() {
        let policy = ItemPolicy::outer(2, 0).unwrap().with_mask_length(1);
        assert_eq!(policy.handle("abcdef"), "*cdef");
    }

    #[test]
    fn test_outer_fixed_length_when_edges_overlap() {
        let policy = ItemPolicy::outer(1, 2).unwrap().with_mask_length(3);
        assert_eq!(policy.handle("ab"), "***");
        assert_eq!(policy.handle("abc"), "***");
        assert_eq!(policy.handle("abcd"), "***b***");
    }

    #[test]
    fn test_append_outer_ignores_mask_length() {
        let policy = ItemPolicy::append_outer(1, 2)
            .unwrap()
            .with_mask_length(5);
        assert_eq!(policy.handle("b"), "*b**");
        assert_eq!(policy.handle("abc"), "*abc**");
    }

    #[test]
    fn test_mask_number() {
        assert_eq!(ItemPolicy::number().handle("他的年龄35岁"), "他的年龄**岁");
        assert_eq!(
            ItemPolicy::number().with_mask_length(1).handle("a123b45"),
            "a*b*"
        );
    }

    #[test]
    fn test_mask_letter() {
        assert_eq!(
            ItemPolicy::letter().handle("35到45岁是人生的golden年龄"),
            "35到45岁是人生的******年龄"
        );
    }

    #[test]
    fn test_mask_str_is_literal() {
        let policy = ItemPolicy::number().with_mask_str("$0");
        assert_eq!(policy.handle("a1"), "a$0");
    }

    #[test]
    fn test_tokens_are_units_for_inner() {
        let policy = ItemPolicy::inner(0, 0).unwrap().with_separator(".");
        assert_eq!(policy.handle("qiang.shao"), "*.*");

        let policy = ItemPolicy::inner(1, 1).unwrap().with_separator("-");
        assert_eq!(policy.handle("a-b-c-d"), "a-*-*-d");
    }

    #[test]
    fn test_tokens_for_outer_with_fixed_mask() {
        let policy = ItemPolicy::outer(1, 0)
            .unwrap()
            .with_separator(".")
            .with_mask_str("^_^");
        assert_eq!(policy.handle("sina.com"), "^_^.com");
    }

    #[test]
    fn test_tokens_masked_one_by_one_for_classes() {
        let policy = ItemPolicy::letter()
            .with_mask_length(1)
            .with_separator(" ")
            .with_output_delimiter("/");
        assert_eq!(policy.handle("ab1 cd2"), "*1/*2");
    }
}

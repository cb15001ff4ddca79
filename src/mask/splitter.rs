// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Token splitting and the separator attributes shared by every policy node

use once_cell::sync::OnceCell;

/// Split `src` into the char-sized slices it is made of.
pub fn char_units(src: &str) -> Vec<&str> {
    src.char_indices()
        .map(|(idx, ch)| &src[idx..idx + ch.len_utf8()])
        .collect()
}

/// Split `src` on a literal separator.
///
/// Returns `None` when no separator is configured; callers then treat the
/// whole string as a single unit. A positive `limit` caps the number of
/// segments (the last one keeps the unsplit remainder), anything else splits
/// without bound. Unbounded splits keep empty segments, so joining the result
/// with `separator` gives back `src`.
///
/// An empty separator splits into single characters.
pub fn split<'a>(src: &'a str, separator: Option<&str>, limit: i32) -> Option<Vec<&'a str>> {
    let separator = separator?;

    if separator.is_empty() {
        return Some(split_chars(src, limit));
    }

    let tokens = if limit > 0 {
        src.splitn(limit as usize, separator).collect()
    } else {
        src.split(separator).collect()
    };
    Some(tokens)
}

fn split_chars(src: &str, limit: i32) -> Vec<&str> {
    if src.is_empty() {
        return vec![src];
    }

    let mut units = char_units(src);
    if limit > 0 && units.len() > limit as usize {
        let head = limit as usize - 1;
        let cut: usize = units[..head].iter().map(|unit| unit.len()).sum();
        units.truncate(head);
        units.push(&src[cut..]);
    }
    units
}

/// Separator configuration attached to every policy node
///
/// The output delimiter falls back to the separator the first time it is
/// needed and stays fixed from then on.
#[derive(Debug, Clone, Default)]
pub struct SeparableAttrs {
    separator: Option<String>,
    separate_limit: i32,
    output_delimiter: OnceCell<String>,
}

impl SeparableAttrs {
    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    /// Maximum number of tokens, `<= 0` means unlimited
    pub fn separate_limit(&self) -> i32 {
        self.separate_limit
    }

    /// Explicit or already-resolved output delimiter
    pub fn output_delimiter(&self) -> Option<&str> {
        self.output_delimiter.get().map(String::as_str)
    }

    pub(crate) fn set_separator(&mut self, separator: Option<String>) {
        self.separator = separator;
    }

    pub(crate) fn set_separate_limit(&mut self, limit: i32) {
        self.separate_limit = limit;
    }

    pub(crate) fn set_output_delimiter(&mut self, delimiter: String) {
        self.output_delimiter = OnceCell::with_value(delimiter);
    }

    /// Tokenize `src`, or `None` in whole-string mode
    pub fn tokenize<'a>(&self, src: &'a str) -> Option<Vec<&'a str>> {
        split(src, self.separator(), self.separate_limit)
    }

    /// Delimiter used to join masked tokens
    pub fn delimiter(&self) -> &str {
        self.output_delimiter
            .get_or_init(|| self.separator.clone().unwrap_or_default())
    }
}

/// Builder methods for the separator attributes of a policy node type.
///
/// The type must own a `separable: SeparableAttrs` field.
macro_rules! separable_builder {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Split the input on `separator` before masking
                pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
                    self.separable.set_separator(Some(separator.into()));
                    self
                }

                /// Split on `separator` into at most `limit` tokens
                pub fn with_separator_limit(mut self, separator: impl Into<String>, limit: i32) -> Self {
                    self.separable.set_separator(Some(separator.into()));
                    self.separable.set_separate_limit(limit);
                    self
                }

                pub fn with_separate_limit(mut self, limit: i32) -> Self {
                    self.separable.set_separate_limit(limit);
                    self
                }

                /// Join masked tokens with `delimiter` instead of the separator
                pub fn with_output_delimiter(mut self, delimiter: impl Into<String>) -> Self {
                    self.separable.set_output_delimiter(delimiter.into());
                    self
                }

                pub fn separable(&self) -> &$crate::mask::splitter::SeparableAttrs {
                    &self.separable
                }

                pub(crate) fn with_separable(
                    mut self,
                    separable: $crate::mask::splitter::SeparableAttrs,
                ) -> Self {
                    self.separable = separable;
                    self
                }
            }
        )+
    };
}

pub(crate) use separable_builder;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_without_separator() {
        assert_eq!(split("a@b", None, 0), None);
    }

    #[test]
    fn test_split_literal_metacharacters() {
        assert_eq!(split("a.b.c", Some("."), 0).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split("a|b", Some("|"), 0).unwrap(), vec!["a", "b"]);
        assert_eq!(split("a.*b", Some(".*"), 0).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_split_with_limit() {
        assert_eq!(
            split("a.b.c.d", Some("."), 2).unwrap(),
            vec!["a", "b.c.d"]
        );
        assert_eq!(split("a.b", Some("."), 5).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_unbounded_split_is_lossless() {
        let src = ".a..b.";
        let tokens = split(src, Some("."), -1).unwrap();
        assert_eq!(tokens, vec!["", "a", "", "b", ""]);
        assert_eq!(tokens.join("."), src);
    }

    #[test]
    fn test_split_empty_source() {
        assert_eq!(split("", Some("@"), 0).unwrap(), vec![""]);
        assert_eq!(split("", Some(""), 0).unwrap(), vec![""]);
    }

    #[test]
    fn test_split_empty_separator_into_chars() {
        assert_eq!(split("李白ab", Some(""), 0).unwrap(), vec!["李", "白", "a", "b"]);
        assert_eq!(split("abcd", Some(""), 2).unwrap(), vec!["a", "bcd"]);
    }

    #[test]
    fn test_char_units_multibyte() {
        assert_eq!(char_units("王昌龄"), vec!["王", "昌", "龄"]);
        assert!(char_units("").is_empty());
    }

    #[test]
    fn test_delimiter_defaults_to_separator_once() {
        let mut attrs = SeparableAttrs::default();
        attrs.set_separator(Some("@".to_string()));
        assert_eq!(attrs.output_delimiter(), None);
        assert_eq!(attrs.delimiter(), "@");

        // resolved delimiter is fixed after first use
        attrs.set_separator(Some(".".to_string()));
        assert_eq!(attrs.delimiter(), "@");
        assert_eq!(attrs.output_delimiter(), Some("@"));
    }

    #[test]
    fn test_explicit_output_delimiter() {
        let mut attrs = SeparableAttrs::default();
        attrs.set_separator(Some(",".to_string()));
        attrs.set_output_delimiter(" | ".to_string());
        assert_eq!(attrs.delimiter(), " | ");
    }
}

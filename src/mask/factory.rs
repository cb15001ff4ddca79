// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Preset constructors for common masking policies

use super::error::Result;
use super::group::GroupPolicy;
use super::item::{EdgeSpan, ItemKind, ItemPolicy};
use super::policy::MaskPolicy;
use super::size_select::SizeSelectPolicy;

fn inner(left: usize, right: usize) -> ItemPolicy {
    ItemPolicy::new(ItemKind::Inner(EdgeSpan::sized(left, right)))
}

fn outer(left: usize, right: usize) -> ItemPolicy {
    ItemPolicy::new(ItemKind::Outer(EdgeSpan::sized(left, right)))
}

/// Decode a policy tree from config JSON
pub fn from_config(json: &str) -> Result<MaskPolicy> {
    MaskPolicy::from_config(json)
}

/// `abcd` -> `abcd`
pub fn ignore() -> MaskPolicy {
    MaskPolicy::ignore()
}

/// `abcd` -> `****`
pub fn mask_all() -> ItemPolicy {
    inner(0, 0)
}

/// Exactly `mask_length` mask strings whatever the input length
///
/// Lengths past `i32::MAX` saturate.
pub fn mask_all_fixed(mask_length: usize) -> ItemPolicy {
    mask_all().with_mask_length(i32::try_from(mask_length).unwrap_or(i32::MAX))
}

/// `abcd` -> ``
pub fn hide_all() -> ItemPolicy {
    mask_all_fixed(1).with_mask_str("")
}

/// `mask_inner(1, 2)`: `abcd` -> `a*cd`, `abc` -> `***`
pub fn mask_inner(left_size: usize, right_size: usize) -> ItemPolicy {
    inner(left_size, right_size)
}

/// `mask_outer(1, 2)`: `abcd` -> `*b**`, `abc` -> `***`
pub fn mask_outer(left_size: usize, right_size: usize) -> ItemPolicy {
    outer(left_size, right_size)
}

/// `mask_margin(2)`: `abcdef` -> `**cd**`
pub fn mask_margin(size: usize) -> ItemPolicy {
    outer(size, size)
}

/// `mask_left(2)`: `abcdef` -> `**cdef`
pub fn mask_left(size: usize) -> ItemPolicy {
    outer(size, 0)
}

/// `mask_right(2)`: `abcdef` -> `abcd**`
pub fn mask_right(size: usize) -> ItemPolicy {
    outer(0, size)
}

/// `mask_append(1, 2)`: `abc` -> `*abc**`
pub fn mask_append(left_size: usize, right_size: usize) -> ItemPolicy {
    ItemPolicy::new(ItemKind::AppendOuter(EdgeSpan::sized(left_size, right_size)))
}

pub fn mask_margin_append(size: usize) -> ItemPolicy {
    mask_append(size, size)
}

pub fn mask_left_append(size: usize) -> ItemPolicy {
    mask_append(size, 0)
}

pub fn mask_right_append(size: usize) -> ItemPolicy {
    mask_append(0, size)
}

/// Keep both edges, mask the middle
pub fn reserve_outer(left_size: usize, right_size: usize) -> ItemPolicy {
    inner(left_size, right_size)
}

/// Keep the middle, mask both edges
pub fn reserve_inner(left_size: usize, right_size: usize) -> ItemPolicy {
    outer(left_size, right_size)
}

pub fn reserve_margin(size: usize) -> ItemPolicy {
    reserve_outer(size, size)
}

/// `reserve_left(1)`: `abcd` -> `a***`
pub fn reserve_left(size: usize) -> ItemPolicy {
    reserve_outer(size, 0)
}

/// `reserve_right(1)`: `abcd` -> `***d`
pub fn reserve_right(size: usize) -> ItemPolicy {
    reserve_outer(0, size)
}

pub fn mask_number() -> ItemPolicy {
    ItemPolicy::number()
}

pub fn mask_number_with(mask_str: impl Into<String>) -> ItemPolicy {
    mask_number().with_mask_str(mask_str)
}

pub fn mask_letter() -> ItemPolicy {
    ItemPolicy::letter()
}

pub fn mask_letter_with(mask_str: impl Into<String>) -> ItemPolicy {
    mask_letter().with_mask_str(mask_str)
}

pub fn group(separator: impl Into<String>) -> GroupPolicy {
    GroupPolicy::new(separator)
}

pub fn group_limited(separator: impl Into<String>, limit: i32) -> GroupPolicy {
    GroupPolicy::new(separator).with_separate_limit(limit)
}

pub fn size_selector() -> SizeSelectPolicy {
    SizeSelectPolicy::new()
}

pub fn size_selector_separated(separator: impl Into<String>) -> SizeSelectPolicy {
    SizeSelectPolicy::new().with_separator(separator)
}

// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Mask policies - Rust Implementation
//
// Composable masking of display-safe PII:
// - Leaf maskers reserving or masking edges, or masking character classes
// - Group and size-select composers over separator-split tokens
// - Config codec with short, stable node tags

pub mod config;
pub mod error;
pub mod factory;
pub mod group;
pub mod item;
pub mod policy;
pub mod size_select;
pub mod splitter;

#[cfg(feature = "python")]
pub mod bindings;

#[cfg(feature = "python")]
pub use bindings::MaskHandlerRust;
pub use config::{ConfigCodec, MaskTag};
pub use error::{MaskError, Result};
pub use group::GroupPolicy;
pub use item::{CharClass, EdgeSpan, ItemKind, ItemPolicy};
pub use policy::{CustomPolicy, IgnorePolicy, MaskHandler, MaskPolicy};
pub use size_select::SizeSelectPolicy;
pub use splitter::SeparableAttrs;

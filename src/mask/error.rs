// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Error types for mask policies and the config codec

use thiserror::Error;

/// Errors raised while building, encoding or decoding mask policies
#[derive(Debug, Error)]
pub enum MaskError {
    /// Negative left/right size passed to an edge masker
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Policy node has no registry tag and cannot be encoded
    #[error("Unregistered policy variant: {0}")]
    UnregisteredVariant(String),

    /// Malformed config document
    #[error("Config parse error: {0}")]
    ConfigParse(String),
}

impl From<serde_json::Error> for MaskError {
    fn from(err: serde_json::Error) -> Self {
        MaskError::ConfigParse(err.to_string())
    }
}

/// Result type for mask operations
pub type Result<T> = std::result::Result<T, MaskError>;

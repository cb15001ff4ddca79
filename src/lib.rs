// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Declarative masking policies for display-safe PII
// Optional PyO3 bindings behind the `python` feature

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod mask;

/// Python module: mask_rust
///
/// Config-driven masking policies for phone numbers, emails, names and
/// other PII that must stay recognisable but unreadable.
///
/// # Examples
///
/// ```python
/// from mask_rust import MaskHandlerRust
///
/// # Keep the first character before '@', keep the domain
/// config = """
/// {
///     "@class": "MASK_GROUP",
///     "separator": "@",
///     "handlersOfSize": {"1": [{"@class": "MASK_INNER", "leftSize": 1}]}
/// }
/// """
/// handler = MaskHandlerRust(config)
///
/// print(handler.handle("abcdef@sina.com"))  # "a*****@sina.com"
/// ```
#[cfg(feature = "python")]
#[pymodule]
fn mask_rust(m: &Bound<'_, pyo3::types::PyModule>) -> PyResult<()> {
    m.add_class::<mask::MaskHandlerRust>()?;

    // Module metadata
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add(
        "__doc__",
        "Composable, declarative masking policies for display-safe PII",
    )?;

    Ok(())
}

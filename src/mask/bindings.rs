// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Python bindings for config-driven mask policies

use pyo3::prelude::*;

use super::config::ConfigCodec;
use super::policy::{MaskHandler, MaskPolicy};

/// Mask policy exposed to Python
///
/// # Example (Python)
/// ```python
/// from mask_rust import MaskHandlerRust
///
/// config = '{"@class": "MASK_INNER", "leftSize": 3, "rightSize": 4}'
/// handler = MaskHandlerRust(config)
///
/// print(handler.handle("13755556666"))  # "137****6666"
/// print(handler.to_config())
/// ```
#[pyclass]
pub struct MaskHandlerRust {
    policy: MaskPolicy,
}

#[pymethods]
impl MaskHandlerRust {
    /// Create a handler from a config JSON document
    ///
    /// # Arguments
    /// * `config_json` - Document produced by `to_config()` or written by hand
    #[new]
    pub fn new(config_json: &str) -> PyResult<Self> {
        let policy = MaskPolicy::from_config(config_json).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid config: {}", e))
        })?;
        Ok(Self { policy })
    }

    /// Mask a single string
    pub fn handle(&self, src: &str) -> String {
        self.policy.handle(src)
    }

    /// Mask each string of a list
    pub fn handle_many(&self, items: Vec<String>) -> Vec<String> {
        items.iter().map(|item| self.policy.handle(item)).collect()
    }

    /// Serialize the policy back to config JSON
    #[pyo3(signature = (pretty = false))]
    pub fn to_config(&self, pretty: bool) -> PyResult<String> {
        ConfigCodec::new()
            .with_pretty(pretty)
            .encode(&self.policy)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
    }
}

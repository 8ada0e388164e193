// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Lumora client SDK.
//!
//! Layered loading (defaults < system < user < local < env) via Figment,
//! strict models that reject unknown keys, and semantic validation.

#![allow(clippy::result_large_err)]

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ApiConfig, LogConfig, LumoraConfig, SessionConfig, StorageScope};
pub use validation::validate;

use lumora_core::LumoraError;

/// Load from a TOML string and validate in one step.
pub fn load_and_validate_str(toml_content: &str) -> Result<LumoraConfig, LumoraError> {
    let config =
        load_config_from_str(toml_content).map_err(|e| LumoraError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

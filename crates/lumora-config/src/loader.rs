// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lumora.toml` > `~/.config/lumora/lumora.toml` > `/etc/lumora/lumora.toml`
//! with environment variable overrides via `LUMORA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LumoraConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lumora/lumora.toml` (system-wide)
/// 3. `~/.config/lumora/lumora.toml` (user XDG config)
/// 4. `./lumora.toml` (local directory)
/// 5. `LUMORA_*` environment variables
pub fn load_config() -> Result<LumoraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumoraConfig::default()))
        .merge(Toml::file("/etc/lumora/lumora.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lumora/lumora.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lumora.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<LumoraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumoraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LumoraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LumoraConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that keys containing
/// underscores stay intact: `LUMORA_API_BASE_URL` must map to
/// `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("LUMORA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: LUMORA_API_BASE_URL -> "api_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("session_", "session.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}

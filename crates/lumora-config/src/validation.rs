// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic validation applied after deserialization.
//!
//! Figment catches shape errors (unknown fields, type mismatches); this
//! module catches values that deserialize fine but cannot work at runtime.

use lumora_core::LumoraError;

use crate::model::LumoraConfig;

/// Validates a loaded configuration.
pub fn validate(config: &LumoraConfig) -> Result<(), LumoraError> {
    if config.api.base_url.trim().is_empty() {
        return Err(LumoraError::Config("api.base_url must not be empty".into()));
    }
    if !config.api.base_url.starts_with("http://") && !config.api.base_url.starts_with("https://") {
        return Err(LumoraError::Config(format!(
            "api.base_url must be an http(s) URL, got {:?}",
            config.api.base_url
        )));
    }
    if config.api.timeout_secs == 0 {
        return Err(LumoraError::Config("api.timeout_secs must be at least 1".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LumoraConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&LumoraConfig::default()).is_ok());
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let mut config = LumoraConfig::default();
        config.api.base_url = "  ".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let mut config = LumoraConfig::default();
        config.api.base_url = "ftp://example.com".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = LumoraConfig::default();
        config.api.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }
}

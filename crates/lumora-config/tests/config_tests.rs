// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Lumora configuration system.

use lumora_config::model::{LumoraConfig, StorageScope};
use lumora_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_lumora_config() {
    let toml = r#"
[api]
base_url = "https://content.example.com"
timeout_secs = 30

[session]
scope = "ephemeral"
credential_path = "/tmp/cred.json"

[log]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.api.base_url, "https://content.example.com");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.session.scope, StorageScope::Ephemeral);
    assert_eq!(config.session.credential_path.as_deref(), Some("/tmp/cred.json"));
    assert_eq!(config.log.level, "debug");
}

/// Unknown field in [api] section is rejected.
#[test]
fn unknown_field_in_api_produces_error() {
    let toml = r#"
[api]
base_ulr = "http://localhost"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ulr"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.api.base_url, "http://localhost:8080");
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.session.scope, StorageScope::Persistent);
    assert!(config.session.credential_path.is_none());
    assert_eq!(config.log.level, "info");
}

/// Environment variable LUMORA_API_BASE_URL overrides api.base_url in TOML.
#[test]
fn env_var_overrides_api_base_url() {
    // Build the Figment directly so the env var is scoped to this test.
    use figment::providers::{Format, Serialized, Toml};
    use figment::{Figment, Jail};

    Jail::expect_with(|jail| {
        jail.set_env("LUMORA_API_BASE_URL", "https://override.example.com");

        let config: LumoraConfig = Figment::new()
            .merge(Serialized::defaults(LumoraConfig::default()))
            .merge(Toml::string("[api]\nbase_url = \"http://from-toml\""))
            .merge(
                figment::providers::Env::prefixed("LUMORA_")
                    .map(|key| key.as_str().replacen("api_", "api.", 1).into()),
            )
            .extract()?;

        assert_eq!(config.api.base_url, "https://override.example.com");
        Ok(())
    });
}

/// An invalid scope value is rejected at deserialization.
#[test]
fn invalid_scope_value_is_rejected() {
    let toml = r#"
[session]
scope = "forever"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Semantic validation catches a bad URL scheme that deserializes fine.
#[test]
fn load_and_validate_rejects_bad_scheme() {
    let toml = r#"
[api]
base_url = "ws://content.example.com"
"#;
    let err = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(err.to_string().contains("http(s)"), "got: {err}");
}

#![allow(clippy::unwrap_used)]
// Config file loading and saving against a temporary directory.

use pretty_assertions::assert_eq;

use ktalk_config::{Config, ConfigError, Profile, load_config_from, save_config_to};

const SAMPLE: &str = r#"
default_profile = "work"

[defaults]
timeout = 45

[profiles.work]
tenant = "acme"
api_key_env = "ACME_TALK_KEY"

[profiles.onprem]
tenant = "internal"
base_url = "https://talk.corp.example/api"
api_key = "plain-key"
timeout = 10
"#;

#[test]
fn test_load_profiles_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, SAMPLE).unwrap();

    let config = load_config_from(&path).unwrap();

    assert_eq!(config.default_profile.as_deref(), Some("work"));
    assert_eq!(config.defaults.timeout, 45);
    assert_eq!(config.profiles.len(), 2);

    let (name, work) = config.profile(None).unwrap();
    assert_eq!(name, "work");
    assert_eq!(work.tenant, "acme");
    assert_eq!(work.api_key_env.as_deref(), Some("ACME_TALK_KEY"));
    assert_eq!(work.base_url, None);

    let (_, onprem) = config.profile(Some("onprem")).unwrap();
    assert_eq!(
        onprem.base_url.as_deref(),
        Some("https://talk.corp.example/api")
    );
    assert_eq!(onprem.timeout, Some(10));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.default_profile.as_deref(), Some("default"));
    assert_eq!(config.defaults.timeout, 30);
    assert!(config.profiles.is_empty());
}

#[test]
fn test_profile_missing_tenant_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[profiles.broken]\napi_key = \"k\"\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)), "got: {err:?}");
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.profiles.insert(
        "default".into(),
        Profile {
            tenant: "acme".into(),
            timeout: Some(15),
            ..Profile::default()
        },
    );

    save_config_to(&config, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded, config);
}

//! Profile configuration for Kontur Talk clients.
//!
//! TOML profiles, API key resolution (env + keyring + plaintext), and
//! translation into a ready [`ktalk_api::TalkClient`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use ktalk_api::{TalkClient, TransportConfig};

/// Keyring service name; entries are stored as `{profile}/api-key`.
pub const KEYRING_SERVICE: &str = "ktalk";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] ktalk_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named explicitly.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named tenant profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name, falling back to `default_profile`.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");

        self.profiles
            .get(name)
            .map(|profile| (name.to_owned(), profile))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// A named tenant profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Space subdomain, as in `{tenant}.ktalk.ru`.
    pub tenant: String,

    /// Explicit API root; overrides the URL derived from `tenant`.
    pub base_url: Option<String>,

    /// API key (plaintext; prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,
}

impl Profile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tenant.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "tenant".into(),
                reason: "must not be empty".into(),
            });
        }

        if let Some(ref base_url) = self.base_url {
            url::Url::parse(base_url).map_err(|e| ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("invalid URL '{base_url}': {e}"),
            })?;
        }

        Ok(())
    }

    /// Transport settings with the profile timeout over the global default.
    pub fn transport_config(&self, defaults: &Defaults) -> TransportConfig {
        let secs = self.timeout.unwrap_or(defaults.timeout);
        TransportConfig::default().with_timeout(Duration::from_secs(secs))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("ru", "kontur", "ktalk").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ktalk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical path plus `KTALK_*` environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` plus `KTALK_*` environment.
///
/// A missing file yields the defaults. Nested keys use a double
/// underscore: `KTALK_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("KTALK_").split("__"));

    let config: Config = figment.extract()?;
    debug!(profiles = config.profiles.len(), "config loaded");
    Ok(config)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the profile's API key: env var, then keyring, then plaintext.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_api_key_with(
        profile,
        profile_name,
        |var| std::env::var(var).ok(),
        keyring_api_key,
    )
}

fn resolve_api_key_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(val) = profile.api_key_env.as_deref().and_then(&env) {
        debug!(profile = profile_name, "API key from environment");
        return Ok(SecretString::from(val));
    }

    // 2. System keyring
    if let Some(secret) = keyring(profile_name) {
        debug!(profile = profile_name, "API key from keyring");
        return Ok(SecretString::from(secret));
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

fn keyring_api_key(profile_name: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key")).ok()?;
    entry.get_password().ok()
}

/// Store an API key in the system keyring for `profile_name`.
pub fn store_api_key(profile_name: &str, api_key: &SecretString) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key"))?;
    entry.set_password(api_key.expose_secret())?;
    debug!(profile = profile_name, "API key stored in keyring");
    Ok(())
}

// ── Client construction ─────────────────────────────────────────────

/// Build a client from a profile, resolving its API key.
pub fn profile_to_client(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<TalkClient, ConfigError> {
    profile.validate()?;
    let api_key = resolve_api_key(profile, profile_name)?;
    client_with_key(profile, &api_key, defaults)
}

/// Load the config and build a client for `profile_name` (or the default).
pub fn build_client(profile_name: Option<&str>) -> Result<TalkClient, ConfigError> {
    let config = load_config()?;
    let (name, profile) = config.profile(profile_name)?;
    debug!(profile = %name, tenant = %profile.tenant, "building client");
    profile_to_client(profile, &name, &config.defaults)
}

fn client_with_key(
    profile: &Profile,
    api_key: &SecretString,
    defaults: &Defaults,
) -> Result<TalkClient, ConfigError> {
    let transport = profile.transport_config(defaults);
    let client = match profile.base_url.as_deref() {
        Some(base_url) => TalkClient::with_base_url(base_url, api_key, &transport)?,
        None => TalkClient::with_config(&profile.tenant, api_key, &transport)?,
    };
    Ok(client)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn profile(tenant: &str) -> Profile {
        Profile {
            tenant: tenant.into(),
            ..Profile::default()
        }
    }

    fn no_lookup(_: &str) -> Option<String> {
        None
    }

    // ── Credential chain ────────────────────────────────────────────

    #[test]
    fn env_var_wins_over_keyring_and_plaintext() {
        let profile = Profile {
            api_key: Some("plain".into()),
            api_key_env: Some("TALK_KEY".into()),
            ..profile("acme")
        };

        let key = resolve_api_key_with(
            &profile,
            "work",
            |var| (var == "TALK_KEY").then(|| "from-env".to_owned()),
            |_| Some("from-keyring".to_owned()),
        )
        .unwrap();

        assert_eq!(key.expose_secret(), "from-env");
    }

    #[test]
    fn keyring_is_keyed_by_profile_name() {
        let profile = Profile {
            api_key: Some("plain".into()),
            api_key_env: Some("UNSET_VAR".into()),
            ..profile("acme")
        };

        let key = resolve_api_key_with(&profile, "work", no_lookup, |name| {
            (name == "work").then(|| "from-keyring".to_owned())
        })
        .unwrap();

        assert_eq!(key.expose_secret(), "from-keyring");
    }

    #[test]
    fn plaintext_is_last_resort() {
        let profile = Profile {
            api_key: Some("plain".into()),
            ..profile("acme")
        };

        let key = resolve_api_key_with(&profile, "work", no_lookup, no_lookup).unwrap();
        assert_eq!(key.expose_secret(), "plain");
    }

    #[test]
    fn missing_credentials_name_the_profile() {
        let err = resolve_api_key_with(&profile("acme"), "work", no_lookup, no_lookup).unwrap_err();

        assert!(
            matches!(err, ConfigError::NoCredentials { ref profile } if profile == "work"),
            "got: {err:?}"
        );
    }

    // ── Validation ──────────────────────────────────────────────────

    #[test]
    fn blank_tenant_is_rejected() {
        let err = profile("  ").validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "tenant"),
            "got: {err:?}"
        );
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let profile = Profile {
            base_url: Some("not a url".into()),
            ..profile("acme")
        };
        let err = profile.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"),
            "got: {err:?}"
        );
    }

    // ── Client construction ─────────────────────────────────────────

    #[test]
    fn client_targets_tenant_domain() {
        let key = SecretString::from("secret");
        let client = client_with_key(&profile("acme"), &key, &Defaults::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://acme.ktalk.ru/api");
    }

    #[test]
    fn base_url_overrides_tenant() {
        let profile = Profile {
            base_url: Some("https://talk.example.com/api".into()),
            ..profile("acme")
        };
        let key = SecretString::from("secret");
        let client = client_with_key(&profile, &key, &Defaults::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://talk.example.com/api");
    }

    #[test]
    fn profile_timeout_overrides_default() {
        let defaults = Defaults { timeout: 30 };
        let fast = Profile {
            timeout: Some(5),
            ..profile("acme")
        };

        assert_eq!(
            fast.transport_config(&defaults).timeout,
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            profile("acme").transport_config(&defaults).timeout,
            Some(Duration::from_secs(30))
        );
    }

    // ── Profile lookup ──────────────────────────────────────────────

    #[test]
    fn profile_lookup_falls_back_to_default_profile() {
        let mut config = Config {
            default_profile: Some("work".into()),
            ..Config::default()
        };
        config.profiles.insert("work".into(), profile("acme"));

        let (name, found) = config.profile(None).unwrap();
        assert_eq!(name, "work");
        assert_eq!(found.tenant, "acme");

        let err = config.profile(Some("home")).unwrap_err();
        assert!(
            matches!(err, ConfigError::UnknownProfile { ref profile } if profile == "home"),
            "got: {err:?}"
        );
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "fastpay-agent-receipt";
const KEYCHAIN_SERVICE: &str = "com.fastpayet.agent-receipt";

/// Keychain entry holding the agent's API bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// "mock" | "fastpay"
    #[serde(default = "default_gateway_kind")]
    pub kind: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            kind: default_gateway_kind(),
            base_url: default_base_url(),
        }
    }
}

fn default_gateway_kind() -> String {
    "fastpay".to_string()
}

fn default_base_url() -> String {
    "https://us-central1-fpserverapp.cloudfunctions.net/api".to_string()
}

pub fn load() -> Result<AppConfig> {
    let cfg: AppConfig = confy::load(APP_NAME, None).context("Failed to load app config")?;
    Ok(cfg)
}

pub fn store(cfg: &AppConfig) -> Result<()> {
    confy::store(APP_NAME, None, cfg).context("Failed to store app config")?;
    Ok(())
}

/// Store a secret in the OS keychain
pub fn store_secret(key: &str, value: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, key)?;
    entry.set_password(value)?;
    Ok(())
}

/// Retrieve a secret from the OS keychain
pub fn get_secret(key: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, key)?;
    let password = entry.get_password()?;
    Ok(password)
}

/// Delete a secret from the OS keychain
pub fn delete_secret(key: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, key)?;
    entry.delete_password()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_production_api() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.kind, "fastpay");
        assert!(cfg.api.base_url.starts_with("https://"));
        assert!(!cfg.api.base_url.ends_with('/'));
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let cfg: AppConfig = serde_json::from_str(r#"{"api": {"kind": "mock"}}"#).unwrap();
        assert_eq!(cfg.api.kind, "mock");
        assert_eq!(cfg.api.base_url, default_base_url());
    }
}

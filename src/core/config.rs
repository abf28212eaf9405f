//! Runtime settings, stored as `config.json` in the application data directory.

use std::{
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::BinderError;
use crate::{
    catalog::VariantPolicy,
    persistence,
};

pub const CONFIG_FILE: &str = "config.json";

/// Settings for the catalog client and the variant filter.
///
/// Missing fields fall back to the defaults below, so a partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BinderConfig {
    pub api_base_url: String,

    /// Courtesy pause between consecutive page requests.
    pub page_delay_ms: u64,

    pub request_timeout_secs: u64,

    pub user_agent: String,

    /// `"suffix"` (drop `b`..`z` suffixed collector numbers), `"keep_all"`,
    /// or a regex whose match excludes a collector number.
    pub variant_policy: String,

    pub default_set_code: String,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.scryfall.com".to_string(),
            page_delay_ms: 100,
            request_timeout_secs: 30,
            user_agent: concat!("binder-layout/", env!("CARGO_PKG_VERSION")).to_string(),
            variant_policy: "suffix".to_string(),
            default_set_code: "FIN".to_string(),
        }
    }
}

impl BinderConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn variant_policy(&self) -> Result<VariantPolicy, BinderError> {
        VariantPolicy::from_setting(&self.variant_policy)
    }

    pub fn validate(&self) -> Result<(), BinderError> {
        if self.api_base_url.trim().is_empty() {
            return Err(BinderError::InvalidConfig("api_base_url must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(BinderError::InvalidConfig("request_timeout_secs must be > 0".to_string()));
        }
        self.variant_policy()?;
        Ok(())
    }

    pub fn load() -> Self {
        let config: Self = persistence::load_json_or_default(CONFIG_FILE);
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}. Using defaults.", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    /// Validates and writes the config file, returning where it went.
    pub fn save(&self) -> Result<PathBuf, BinderError> {
        self.validate()?;
        persistence::save_json(self, CONFIG_FILE)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), BinderError> {
        self.validate()?;
        persistence::save_json_at(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BinderConfig =
            serde_json::from_str(r#"{ "page_delay_ms": 250, "variant_policy": "keep_all" }"#)
                .unwrap();
        assert_eq!(config.page_delay(), Duration::from_millis(250));
        assert_eq!(config.api_base_url, "https://api.scryfall.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(matches!(config.variant_policy().unwrap(), VariantPolicy::KeepAll));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_to_writes_valid_config_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let config = BinderConfig { default_set_code: "DMU".to_string(), ..BinderConfig::default() };
        config.save_to(&path).unwrap();
        let loaded: BinderConfig = persistence::load_json_at(&path).unwrap();
        assert_eq!(loaded, config);

        let bad = BinderConfig { request_timeout_secs: 0, ..BinderConfig::default() };
        let other = dir.path().join("bad.json");
        assert!(matches!(bad.save_to(&other), Err(BinderError::InvalidConfig(_))));
        assert!(!other.exists());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_timeout = BinderConfig { request_timeout_secs: 0, ..BinderConfig::default() };
        assert!(matches!(zero_timeout.validate(), Err(BinderError::InvalidConfig(_))));

        let empty_url = BinderConfig { api_base_url: "  ".to_string(), ..BinderConfig::default() };
        assert!(matches!(empty_url.validate(), Err(BinderError::InvalidConfig(_))));

        let bad_regex = BinderConfig { variant_policy: "[b-".to_string(), ..BinderConfig::default() };
        assert!(matches!(bad_regex.validate(), Err(BinderError::Regex(_))));
    }
}

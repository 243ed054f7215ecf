use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::debug;

pub const OMDB_API_KEY_VAR: &str = "OMDB_API_KEY";
pub const EXCHANGE_API_KEY_VAR: &str = "EXCHANGE_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OmdbProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for OmdbProviderConfig {
    fn default() -> Self {
        OmdbProviderConfig {
            base_url: "http://www.omdbapi.com".to_string(),
            api_key: None,
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for ExchangeRateProviderConfig {
    fn default() -> Self {
        ExchangeRateProviderConfig {
            base_url: "https://v6.exchangerate-api.com/v6".to_string(),
            api_key: None,
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub omdb: OmdbProviderConfig,
    #[serde(default)]
    pub exchange_rate: ExchangeRateProviderConfig,
}

fn default_recent_limit() -> usize {
    5
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Loads the default config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "bollyinfo", "bollyinfo")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Replaces API keys with `OMDB_API_KEY` / `EXCHANGE_API_KEY` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let from_env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = from_env(OMDB_API_KEY_VAR) {
            debug!("Using OMDb API key from {OMDB_API_KEY_VAR}");
            self.providers.omdb.api_key = Some(key);
        }
        if let Some(key) = from_env(EXCHANGE_API_KEY_VAR) {
            debug!("Using exchange rate API key from {EXCHANGE_API_KEY_VAR}");
            self.providers.exchange_rate.api_key = Some(key);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  omdb:
    base_url: "http://example.com/omdb"
    api_key: "omdb-key"
  exchange_rate:
    base_url: "http://example.com/rates"
    cache_ttl_secs: 60
history:
  recent_limit: 3
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.omdb.base_url, "http://example.com/omdb");
        assert_eq!(config.providers.omdb.api_key.as_deref(), Some("omdb-key"));
        assert_eq!(
            config.providers.exchange_rate.base_url,
            "http://example.com/rates"
        );
        assert!(config.providers.exchange_rate.api_key.is_none());
        assert_eq!(config.providers.exchange_rate.cache_ttl_secs, 60);
        assert_eq!(config.history.recent_limit, 3);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.providers.omdb.base_url, "http://www.omdbapi.com");
        assert_eq!(
            config.providers.exchange_rate.base_url,
            "https://v6.exchangerate-api.com/v6"
        );
        assert_eq!(config.providers.exchange_rate.cache_ttl_secs, 3600);
        assert_eq!(config.history.recent_limit, 5);
    }

    #[test]
    fn test_env_overrides_api_keys() {
        let vars: HashMap<&str, &str> = [
            (OMDB_API_KEY_VAR, "from-env"),
            (EXCHANGE_API_KEY_VAR, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.providers.exchange_rate.api_key = Some("from-file".to_string());
        let config = config.with_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.providers.omdb.api_key.as_deref(), Some("from-env"));
        // Blank variables do not clobber the file value
        assert_eq!(
            config.providers.exchange_rate.api_key.as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/definitely/not/here/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}

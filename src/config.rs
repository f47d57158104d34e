// Configuration for the pricing provider, the trip store and the planner

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const AMADEUS_API_KEY_VAR: &str = "AMADEUS_API_KEY";
pub const AMADEUS_BASE_URL_VAR: &str = "AMADEUS_BASE_URL";
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

// Live price provider settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    // "client_id:client_secret"; lookups fail with a configuration error without it
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://test.api.amadeus.com".to_string(),
            api_key: None,
            timeout_ms: 8000,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var(AMADEUS_BASE_URL_VAR) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        config.api_key = env::var(AMADEUS_API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());
        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Splits the key into client id and secret.
    pub fn credentials(&self) -> Result<(String, String), ConfigError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar(AMADEUS_API_KEY_VAR))?;
        match key.split_once(':') {
            Some((id, secret)) if !id.is_empty() && !secret.is_empty() => {
                Ok((id.to_string(), secret.to_string()))
            }
            _ => Err(ConfigError::InvalidValue {
                name: AMADEUS_API_KEY_VAR,
                reason: "expected client_id:client_secret".to_string(),
            }),
        }
    }
}

// Saved-trip backend settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub anon_key: String,
    pub table: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(SUPABASE_URL_VAR)
            .map_err(|_| ConfigError::MissingVar(SUPABASE_URL_VAR))?;
        let anon_key = env::var(SUPABASE_ANON_KEY_VAR)
            .map_err(|_| ConfigError::MissingVar(SUPABASE_ANON_KEY_VAR))?;
        if !base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue {
                name: SUPABASE_URL_VAR,
                reason: format!("not an http(s) url: {base_url}"),
            });
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            table: "saved_trips".to_string(),
        })
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub provider: ProviderConfig,
    pub live_prices_enabled: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            live_prices_enabled: true,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Self {
        Self {
            provider: ProviderConfig::from_env(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_split() {
        let config = ProviderConfig {
            api_key: Some("abc:xyz".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.credentials().unwrap(),
            ("abc".to_string(), "xyz".to_string())
        );
    }

    #[test]
    fn test_missing_or_malformed_credentials() {
        let config = ProviderConfig::default();
        assert_eq!(
            config.credentials(),
            Err(ConfigError::MissingVar(AMADEUS_API_KEY_VAR))
        );

        let config = ProviderConfig {
            api_key: Some("no-separator".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.credentials(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert!(config.live_prices_enabled);
        assert_eq!(config.provider.timeout(), Duration::from_secs(8));
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn test_table_url() {
        let config = StoreConfig {
            base_url: "https://project.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            table: "saved_trips".to_string(),
        };
        assert_eq!(
            config.table_url(),
            "https://project.supabase.co/rest/v1/saved_trips"
        );
    }
}

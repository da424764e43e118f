use crate::error::{IamportError, IamportResult};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.iamport.kr";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Iamport client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IamportConfig {
    /// REST API key issued by Iamport
    #[serde(default)]
    pub api_key: String,
    /// REST API secret issued by Iamport
    #[serde(default)]
    pub api_secret: String,
    /// API base URL (defaults to https://api.iamport.kr)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IamportConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl IamportConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Default::default()
        }
    }

    /// Load config from `IAMPORT_*` environment variables.
    ///
    /// Credentials may be absent here; the client reports them missing on
    /// the first call that needs a token.
    pub fn from_env() -> IamportResult<Self> {
        let config: IamportConfig = config::Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(config::Environment::with_prefix("IAMPORT"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> IamportResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(IamportError::config_error("IAMPORT_BASE_URL cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(IamportError::config_error(
                "IAMPORT_TIMEOUT_SECS must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iamport_config_default() {
        let config = IamportConfig::default();
        assert_eq!(config.base_url, "https://api.iamport.kr");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_empty());
        assert!(config.api_secret.is_empty());
    }

    #[test]
    fn test_new_keeps_defaults() {
        let config = IamportConfig::new("key", "secret");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = IamportConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_validate_rejects_blank_base_url() {
        let config = IamportConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Default validation window for ownership challenges, in seconds.
pub const DEFAULT_VALIDATION_WINDOW_SECS: u64 = 300;

/// Default domain tag appended to every challenge token.
pub const DEFAULT_DOMAIN_TAG: &str = "starRegistery";

/// Default payload data of the genesis block.
pub const DEFAULT_GENESIS_DATA: &str = "Genesis Block";

/// Configuration for the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// How long a challenge stays valid. A claim submitted exactly at the
    /// boundary is accepted.
    pub validation_window_secs: u64,
    /// Trailing component of every challenge token.
    pub domain_tag: String,
    /// Data recorded in the genesis block.
    pub genesis_data: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            validation_window_secs: DEFAULT_VALIDATION_WINDOW_SECS,
            domain_tag: DEFAULT_DOMAIN_TAG.to_string(),
            genesis_data: DEFAULT_GENESIS_DATA.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.validation_window_secs, 300);
        assert_eq!(config.domain_tag, "starRegistery");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"validation_window_secs": 60}"#).unwrap();
        assert_eq!(config.validation_window_secs, 60);
        assert_eq!(config.genesis_data, DEFAULT_GENESIS_DATA);
    }
}

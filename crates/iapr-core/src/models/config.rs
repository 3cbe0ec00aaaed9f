//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IaprError, Result};

/// Main configuration for the iapr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IaprConfig {
    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch sync configuration.
    pub sync: SyncConfig,
}

/// Receipt extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// App name used when a receipt names no application.
    pub unknown_app_name: String,

    /// App name used for store receipts that omit the application row.
    pub samsung_default_app_name: String,

    /// Currency symbol used when formatting totals.
    pub currency_symbol: String,

    /// Run the currency scan when a lockup receipt yields no items.
    pub fallback_on_empty_apple: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            unknown_app_name: "알 수 없음".to_string(),
            samsung_default_app_name: "Samsung 앱".to_string(),
            currency_symbol: "₩".to_string(),
            fallback_on_empty_apple: true,
        }
    }
}

/// Batch sync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How many months back the default sync window reaches.
    pub lookback_months: u32,

    /// Number of parallel workers for batch parsing.
    pub jobs: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lookback_months: 3,
            jobs: 4,
        }
    }
}

impl IaprConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.currency_symbol.trim().is_empty() {
            return Err(IaprError::Config("currency_symbol must not be empty".to_string()));
        }
        if self.sync.jobs == 0 {
            return Err(IaprError::Config("sync.jobs must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: IaprConfig =
            serde_json::from_str(r#"{ "sync": { "jobs": 8 } }"#).unwrap();

        assert_eq!(config.sync.jobs, 8);
        assert_eq!(config.sync.lookback_months, 3);
        assert_eq!(config.extraction.currency_symbol, "₩");
        assert!(config.extraction.fallback_on_empty_apple);
    }

    #[test]
    fn test_validate_rejects_zero_jobs() {
        let mut config = IaprConfig::default();
        config.sync.jobs = 0;
        assert!(matches!(config.validate(), Err(IaprError::Config(_))));
    }
}

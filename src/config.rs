//! Bot configuration
//!
//! Loaded from a YAML file at startup. A missing or unreadable file
//! means defaults, so a fresh checkout starts without ceremony.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where the configuration lives on disk
pub const CONFIG_FILE: &str = "data/config.yaml";

/// Bot configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Directory holding one `<service>.txt` stock file per service
    pub stock_dir: String,
    /// Channel the `gen` command may be used in
    pub gen_channel_id: Option<u64>,
    /// Seconds a user waits between successful dispenses
    pub cooldown_secs: u64,
    /// Whether configuration problems are reported in-channel
    pub send_error_messages: bool,
    /// Embed colour for successful outcomes
    pub success_color: u32,
    /// Embed colour for rejected requests and errors
    pub error_color: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            stock_dir: "stock".to_string(),
            gen_channel_id: None,
            cooldown_secs: 300,
            send_error_messages: true,
            success_color: 0x0057_F287,
            error_color: 0x00ED_4245,
        }
    }
}

impl BotConfig {
    /// Load the configuration from [`CONFIG_FILE`].
    ///
    /// Falls back to defaults when the file is absent; a file that
    /// exists but does not parse is reported and also ignored.
    pub async fn load() -> Self {
        match tokio::fs::read_to_string(CONFIG_FILE).await {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    warn!("Could not parse {CONFIG_FILE}: {err}; using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save the configuration to [`CONFIG_FILE`].
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The data directory cannot be created
    /// - The configuration cannot be serialized to YAML
    /// - The YAML data cannot be written to the config file
    pub async fn save(&self) -> Result<(), crate::Error> {
        if let Some(parent) = std::path::Path::new(CONFIG_FILE).parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let yaml = serde_yaml::to_string(self)?;
        tokio::fs::write(CONFIG_FILE, yaml).await?;
        Ok(())
    }

    /// Cooldown window as a duration.
    #[must_use]
    pub fn cooldown(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cooldown_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.stock_dir, "stock");
        assert!(config.gen_channel_id.is_none());
        assert_eq!(config.cooldown_secs, 300);
        assert!(config.send_error_messages);
    }

    #[test]
    fn test_config_serialization() {
        let config = BotConfig {
            stock_dir: "inventory".to_string(),
            gen_channel_id: Some(1234),
            cooldown_secs: 60,
            send_error_messages: false,
            ..Default::default()
        };

        let serialized = serde_yaml::to_string(&config).expect("Failed to serialize");
        assert!(serialized.contains("stock_dir: inventory"));
        assert!(serialized.contains("gen_channel_id: 1234"));
        assert!(serialized.contains("cooldown_secs: 60"));

        let deserialized: BotConfig =
            serde_yaml::from_str(&serialized).expect("Failed to deserialize");
        assert_eq!(deserialized.stock_dir, "inventory");
        assert_eq!(deserialized.gen_channel_id, Some(1234));
        assert_eq!(deserialized.cooldown_secs, 60);
        assert!(!deserialized.send_error_messages);
    }

    #[test]
    fn test_partial_config_fills_in_defaults() {
        let deserialized: BotConfig =
            serde_yaml::from_str("gen_channel_id: 42\n").expect("Failed to deserialize");
        assert_eq!(deserialized.gen_channel_id, Some(42));
        assert_eq!(deserialized.stock_dir, "stock");
        assert_eq!(deserialized.cooldown_secs, 300);
    }

    #[test]
    fn test_cooldown_duration() {
        let config = BotConfig {
            cooldown_secs: 90,
            ..Default::default()
        };
        assert_eq!(config.cooldown(), std::time::Duration::from_secs(90));
    }
}

// Portal configuration: notification timings and credential policy

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub notifications: NotificationTimings,
    pub credentials: CredentialPolicy,
}

// Timers driving a single notification through its lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationTimings {
    // Delay before a freshly appended message becomes visible
    pub show_delay_ms: u64,
    // Measured from creation, not from becoming visible
    pub display_ms: u64,
    // Delay between hiding a message and removing its element
    pub fade_out_ms: u64,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            show_delay_ms: 10,
            display_ms: 5000,
            fade_out_ms: 500,
        }
    }
}

impl NotificationTimings {
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialPolicy {
    pub min_email_len: usize,
    pub min_password_len: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_email_len: 5,
            min_password_len: 8,
        }
    }
}

impl PortalConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PortalConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notifications.display_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notifications.display_ms".to_string(),
                reason: "display duration must be greater than zero".to_string(),
            });
        }
        if self.credentials.min_password_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "credentials.min_password_len".to_string(),
                reason: "minimum password length must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_timings() {
        let config = PortalConfig::default();
        assert_eq!(config.notifications.show_delay(), Duration::from_millis(10));
        assert_eq!(config.notifications.display(), Duration::from_millis(5000));
        assert_eq!(config.notifications.fade_out(), Duration::from_millis(500));
        assert_eq!(config.credentials.min_email_len, 5);
        assert_eq!(config.credentials.min_password_len, 8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "notifications": { "display_ms": 2000 } }"#;
        let config = PortalConfig::from_json_str(json).unwrap();

        assert_eq!(config.notifications.display_ms, 2000);
        assert_eq!(config.notifications.show_delay_ms, 10);
        assert_eq!(config.credentials, CredentialPolicy::default());
    }

    #[test]
    fn test_rejects_zero_display_duration() {
        let json = r#"{ "notifications": { "display_ms": 0 } }"#;
        let result = PortalConfig::from_json_str(json);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = PortalConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::JsonParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = PortalConfig::from_file("does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}

//! Support escalation configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Support escalation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SupportConfig {
    /// Advisory poll interval for thread message freshness, in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl SupportConfig {
    /// Validate support configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_secs == 0 || self.poll_interval_secs > 3600 {
            return Err(ValidationError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_poll_interval_is_valid() {
        assert!(SupportConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_interval_fails_validation() {
        let config = SupportConfig {
            poll_interval_secs: 0,
        };
        assert!(config.validate().is_err());
    }
}

use serde::Deserialize;

/// Lockout configuration validation error
#[derive(Debug, thiserror::Error)]
#[error("Lockout configuration error: {message}")]
pub struct LockoutValidationError {
    pub message: String,
}

/// Account lockout configuration for the login route.
///
/// After `threshold` consecutive failed logins within the rolling window an
/// identifier is locked out until `window_minutes` have elapsed since the
/// first failure of that window.
#[derive(Debug, Clone, Deserialize)]
pub struct LockoutSettings {
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,
}

fn default_threshold() -> u32 {
    5
}

fn default_window_minutes() -> i64 {
    15
}

impl Default for LockoutSettings {
    fn default() -> Self {
        LockoutSettings {
            threshold: default_threshold(),
            window_minutes: default_window_minutes(),
        }
    }
}

impl LockoutSettings {
    pub fn validate(&self) -> Result<(), LockoutValidationError> {
        if self.threshold == 0 {
            return Err(LockoutValidationError {
                message: "threshold must be greater than 0".to_string(),
            });
        }

        if self.window_minutes <= 0 {
            return Err(LockoutValidationError {
                message: format!(
                    "window_minutes must be greater than 0, got {}",
                    self.window_minutes
                ),
            });
        }

        Ok(())
    }

    /// The rolling lockout window as a duration
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.window_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = LockoutSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.threshold, 5);
        assert_eq!(settings.window_minutes, 15);
    }

    #[test]
    fn test_zero_threshold_invalid() {
        let settings = LockoutSettings {
            threshold: 0,
            window_minutes: 15,
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_nonpositive_window_invalid() {
        let settings = LockoutSettings {
            threshold: 5,
            window_minutes: 0,
        };
        assert!(settings.validate().is_err());

        let settings = LockoutSettings {
            threshold: 5,
            window_minutes: -3,
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_window_duration() {
        let settings = LockoutSettings::default();
        assert_eq!(settings.window(), chrono::Duration::minutes(15));
    }
}

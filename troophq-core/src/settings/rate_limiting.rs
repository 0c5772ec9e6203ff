use serde::Deserialize;

/// Rate limiting configuration validation error
#[derive(Debug, thiserror::Error)]
#[error("Rate limiting configuration error: {message}")]
pub struct RateLimitingValidationError {
    pub message: String,
}

/// Request-rate limiting for the API.
///
/// This is a plain fixed-window limiter on request volume and is independent
/// of the account lockout tracking, which counts failed credentials only.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RateLimitingConfig {
    /// Global enable/disable switch for all rate limiting
    #[serde(default)]
    pub enabled: bool,

    /// Rate limits for the public login endpoint, keyed by client IP
    #[serde(default)]
    pub login: TierConfig,

    /// Rate limits for authenticated API endpoints, keyed by session token
    #[serde(default)]
    pub authenticated: TierConfig,
}

impl RateLimitingConfig {
    pub fn validate(&self) -> Result<(), RateLimitingValidationError> {
        if !self.enabled {
            return Ok(());
        }

        self.login
            .validate()
            .map_err(|e| RateLimitingValidationError {
                message: format!("login: {}", e.message),
            })?;

        self.authenticated
            .validate()
            .map_err(|e| RateLimitingValidationError {
                message: format!("authenticated: {}", e.message),
            })?;

        Ok(())
    }
}

/// Configuration for a single rate limiting tier
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TierConfig {
    /// Maximum requests per minute
    #[serde(default)]
    pub requests_per_minute: u64,

    /// Maximum requests in a short burst
    #[serde(default)]
    pub burst_size: u32,
}

impl TierConfig {
    /// A tier with a zero request rate is treated as disabled
    pub fn is_enabled(&self) -> bool {
        self.requests_per_minute > 0
    }

    pub fn validate(&self) -> Result<(), RateLimitingValidationError> {
        if self.requests_per_minute == 0 && self.burst_size > 0 {
            return Err(RateLimitingValidationError {
                message: "burst_size must be 0 when requests_per_minute is 0".to_string(),
            });
        }

        if self.requests_per_minute > 0 && self.burst_size == 0 {
            return Err(RateLimitingValidationError {
                message: "burst_size must be greater than 0 when the tier is enabled".to_string(),
            });
        }

        if self.burst_size as u64 > self.requests_per_minute {
            return Err(RateLimitingValidationError {
                message: format!(
                    "burst_size ({}) should not exceed requests_per_minute ({})",
                    self.burst_size, self.requests_per_minute
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_config_valid() {
        let config = TierConfig {
            requests_per_minute: 60,
            burst_size: 10,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tier_config_disabled_valid() {
        let config = TierConfig {
            requests_per_minute: 0,
            burst_size: 0,
        };
        assert!(config.validate().is_ok());
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_tier_config_burst_without_rate_invalid() {
        let config = TierConfig {
            requests_per_minute: 0,
            burst_size: 10,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tier_config_rate_without_burst_invalid() {
        let config = TierConfig {
            requests_per_minute: 60,
            burst_size: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_config_skips_tier_validation() {
        let config = RateLimitingConfig {
            enabled: false,
            login: TierConfig {
                requests_per_minute: 0,
                burst_size: 999,
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_config_validates_all_tiers() {
        let config = RateLimitingConfig {
            enabled: true,
            login: TierConfig {
                requests_per_minute: 60,
                burst_size: 10,
            },
            authenticated: TierConfig {
                requests_per_minute: 600,
                burst_size: 100,
            },
        };
        assert!(config.validate().is_ok());
    }
}

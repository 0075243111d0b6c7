//! Startup configuration for the reconciliation loop
//!
//! Loaded once at process start and immutable afterwards. Validation runs
//! before any network activity; a rejected configuration never reaches the
//! scheduler.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Tick period used when none is configured (one hour)
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Smallest accepted tick period
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Immutable process-lifetime configuration
#[derive(Clone)]
pub struct Config {
    /// API access token for the DNS provider
    pub token: String,

    /// Domain (zone) holding the record
    pub domain: String,

    /// Record name to keep pointed at the current public IP
    pub record_name: String,

    /// Tick period for the scheduler
    pub interval: Duration,
}

impl Config {
    /// Create a configuration with the default one-hour interval
    pub fn new(
        token: impl Into<String>,
        domain: impl Into<String>,
        record_name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            domain: domain.into(),
            record_name: record_name.into(),
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Set the tick period
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Validate the configuration
    ///
    /// Every rejection names the offending field, so a misconfigured
    /// process can be fixed from the error message alone.
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::config("token is required"));
        }

        if self.domain.is_empty() {
            return Err(Error::config("domain is required"));
        }

        if self.record_name.is_empty() {
            return Err(Error::config("name is required"));
        }

        if self.interval < MIN_INTERVAL {
            return Err(Error::config(format!(
                "interval must be at least 1s, got {:?}",
                self.interval
            )));
        }

        Ok(())
    }
}

// The token never appears in Debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<REDACTED>")
            .field("domain", &self.domain)
            .field("record_name", &self.record_name)
            .field("interval", &self.interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> Config {
        Config::new("do-token", "example.com", "home")
    }

    #[test]
    fn accepts_complete_config() {
        assert!(complete_config().validate().is_ok());
    }

    #[test]
    fn default_interval_is_one_hour() {
        assert_eq!(complete_config().interval, Duration::from_secs(3600));
    }

    #[test]
    fn rejects_missing_token() {
        let config = Config::new("", "example.com", "home");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token"), "got: {err}");
    }

    #[test]
    fn rejects_missing_domain() {
        let config = Config::new("do-token", "", "home");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("domain"), "got: {err}");
    }

    #[test]
    fn rejects_missing_name() {
        let config = Config::new("do-token", "example.com", "");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("name"), "got: {err}");
    }

    #[test]
    fn rejects_sub_second_interval() {
        let config = complete_config().with_interval(Duration::from_millis(999));
        assert!(config.validate().is_err());

        let config = complete_config().with_interval(Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", complete_config());
        assert!(!rendered.contains("do-token"));
        assert!(rendered.contains("<REDACTED>"));
    }
}

//! Network client settings

use std::time::Duration;

use super::validation::{ConfigDefaults, ConfigResult, ConfigValidator, Validator};

/// Settings for the default network transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deadline for a whole request, applied when the request sets none.
    /// `None` disables it.
    pub timeout: Option<Duration>,
    /// Deadline for establishing a connection.
    pub connect_timeout: Duration,
    /// `User-Agent` sent when a request does not set one.
    pub user_agent: String,
    /// Redirects followed before giving up.
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(ConfigDefaults::DEFAULT_TIMEOUT),
            connect_timeout: ConfigDefaults::DEFAULT_CONNECT_TIMEOUT,
            user_agent: ConfigDefaults::DEFAULT_USER_AGENT.to_string(),
            max_redirects: ConfigDefaults::DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl ClientConfig {
    /// Set the whole-request deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect deadline.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the default `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set how many redirects are followed.
    #[must_use]
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

impl Validator for ClientConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(timeout) = self.timeout {
            ConfigValidator::validate_timeout(timeout, "timeout")?;
        }
        ConfigValidator::validate_timeout(self.connect_timeout, "connect_timeout")?;
        ConfigValidator::validate_user_agent(&self.user_agent)?;
        ConfigValidator::validate_range(self.max_redirects, 0, 100, "max_redirects")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationError;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.user_agent.starts_with("reqflow/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn no_timeout_is_allowed() {
        assert!(ClientConfig::default().timeout(None).validate().is_ok());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(matches!(
            ClientConfig::default().timeout(Some(Duration::ZERO)).validate(),
            Err(ConfigurationError::InvalidTimeout(_))
        ));
        assert!(matches!(
            ClientConfig::default().connect_timeout(Duration::from_secs(7200)).validate(),
            Err(ConfigurationError::InvalidTimeout(_))
        ));
        assert!(matches!(
            ClientConfig::default().user_agent("").validate(),
            Err(ConfigurationError::InvalidParameter(_))
        ));
        assert!(matches!(
            ClientConfig::default().user_agent("x".repeat(1001)).validate(),
            Err(ConfigurationError::InvalidParameter(_))
        ));
        assert!(matches!(
            ClientConfig::default().max_redirects(101).validate(),
            Err(ConfigurationError::InvalidParameter(_))
        ));
    }
}

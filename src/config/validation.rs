//! Configuration validation.
//!
//! Semantic checks on a parsed config (serde handles the syntactic
//! layer). Returns all errors, not just the first, so one edit cycle
//! can fix everything.

use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration. Pure function; runs before the config is
/// accepted into the system.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("'{}' is not a valid socket address", config.listener.bind_address),
        });
    }

    if config.fred.base_url.is_empty() {
        errors.push(ValidationError {
            field: "fred.base_url",
            message: "must not be empty".to_string(),
        });
    } else if !config.fred.base_url.starts_with("http") {
        errors.push(ValidationError {
            field: "fred.base_url",
            message: format!("'{}' is not an http(s) URL", config.fred.base_url),
        });
    }

    if config.fred.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "fred.timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError {
            field: "cache.ttl_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.auth.enabled && config.auth.token_file.is_empty() {
        errors.push(ValidationError {
            field: "auth.token_file",
            message: "must be set when auth is enabled".to_string(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "'{}' is not a valid socket address",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.cache.ttl_secs = 0;
        config.fred.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "cache.ttl_secs"));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = AppConfig::default();
        config.fred.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "fred.base_url");
    }

    #[test]
    fn token_file_only_required_when_auth_enabled() {
        let mut config = AppConfig::default();
        config.auth.token_file = String::new();
        assert!(validate_config(&config).is_err());

        config.auth.enabled = false;
        assert!(validate_config(&config).is_ok());
    }
}

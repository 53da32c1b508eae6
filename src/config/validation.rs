use crate::config::types::{
    Config, CrawlerConfig, FilterConfig, ProxyConfig, UserAgentConfig, VerificationConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// A non-positive page budget is valid and means "visit nothing".
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_proxy_config(&config.proxy)?;
    validate_verification_config(&config.verification)?;
    validate_filter_config(&config.filters)?;

    if config.output.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.link_cap < 1 {
        return Err(ConfigError::Validation(format!(
            "link_cap must be >= 1, got {}",
            config.link_cap
        )));
    }

    if config.max_body_bytes < 1 {
        return Err(ConfigError::Validation(
            "max_body_bytes must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_proxy_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Proxy endpoint '{}' must use HTTP or HTTPS",
            config.endpoint
        )));
    }

    if config.api_key_env.is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_verification_config(config: &VerificationConfig) -> Result<(), ConfigError> {
    if config.dns_timeout_secs < 1 || config.smtp_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "verification timeouts must be >= 1 second".to_string(),
        ));
    }

    if config.helo_domain.is_empty() {
        return Err(ConfigError::Validation(
            "helo_domain cannot be empty".to_string(),
        ));
    }

    validate_email(&config.sender)?;
    Ok(())
}

fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    for path in &config.contact_paths {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "contact path '{}' must start with '/'",
                path
            )));
        }
    }

    for entry in &config.denylist {
        validate_email(entry)?;
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation("email cannot be empty".to_string()));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

use crate::config::types::{Config, CrawlerConfig, PitchConfig, PlacesConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_places_config(&config.places)?;
    validate_pitch_config(&config.pitch)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_chars < 1 {
        return Err(ConfigError::Validation(format!(
            "max_chars must be >= 1, got {}",
            config.max_chars
        )));
    }

    if config.request_timeout < 1 || config.request_timeout > 120 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be between 1 and 120 seconds, got {}",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Header values must be visible ASCII
    if !config
        .user_agent
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control())
    {
        return Err(ConfigError::Validation(format!(
            "user_agent must contain only printable ASCII, got '{}'",
            config.user_agent
        )));
    }

    Ok(())
}

/// Validates places provider configuration
fn validate_places_config(config: &PlacesConfig) -> Result<(), ConfigError> {
    validate_env_var_name(&config.api_key_env)?;
    validate_base_url(&config.base_url, "places")?;

    if config.max_result_pages < 1 || config.max_result_pages > 5 {
        return Err(ConfigError::Validation(format!(
            "max_result_pages must be between 1 and 5, got {}",
            config.max_result_pages
        )));
    }

    if config.search_radius == 0 {
        return Err(ConfigError::Validation(
            "search_radius must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates pitch service configuration
fn validate_pitch_config(config: &PitchConfig) -> Result<(), ConfigError> {
    validate_env_var_name(&config.api_key_env)?;
    validate_base_url(&config.base_url, "pitch")?;

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "temperature must be between 0.0 and 2.0, got {}",
            config.temperature
        )));
    }

    if config.max_tokens < 1 {
        return Err(ConfigError::Validation(
            "max_tokens must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates an API root URL
fn validate_base_url(base_url: &str, section: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} base_url: {}", section, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} base_url '{}' must use HTTP or HTTPS",
            section, base_url
        )));
    }

    Ok(())
}

/// Validates the name of an environment variable holding a credential
fn validate_env_var_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::Validation(format!(
            "api_key_env must contain only letters, digits and underscores, got '{}'",
            name
        )));
    }

    Ok(())
}

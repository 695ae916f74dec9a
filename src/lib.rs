//! Leadline: small-business lead generation and outreach
//!
//! This crate finds businesses through a places API, crawls their websites
//! for contact emails and representative text, and drafts a pitch email for
//! each lead through a language-model endpoint.
//!
//! The core is the site crawler in [`crawler`]: a bounded, contact-first
//! crawl over a single host that harvests email addresses from several
//! independent channels.

pub mod config;
pub mod crawler;
pub mod lead;
pub mod places;
pub mod pitch;
pub mod url;

use thiserror::Error;

/// Main error type for Leadline operations
#[derive(Debug, Error)]
pub enum LeadlineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Places API error: {0}")]
    Places(#[from] places::PlacesError),

    #[error("Pitch generation error: {0}")]
    Pitch(#[from] pitch::PitchError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Leadline operations
pub type Result<T> = std::result::Result<T, LeadlineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, SiteCrawler};
pub use lead::Lead;
pub use crate::url::{extract_domain, is_internal, LinkPriority};

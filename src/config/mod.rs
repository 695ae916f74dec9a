//! Configuration module for Leadline
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and resolving API credentials from the environment.
//!
//! # Example
//!
//! ```no_run
//! use leadline::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("leadline.toml")).unwrap();
//! println!("Crawler page budget: {}", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, PitchConfig, PlacesConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config, resolve_credential};

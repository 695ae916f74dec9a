use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Leadline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub places: PlacesConfig,
    #[serde(default)]
    pub pitch: PitchConfig,
}

/// Site crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of distinct pages fetched per site
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum number of characters returned by a text crawl
    #[serde(rename = "max-chars")]
    pub max_chars: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Pause after each follow-up page fetch (milliseconds)
    #[serde(rename = "politeness-delay")]
    pub politeness_delay: u64,
}

impl CrawlerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            max_chars: 5000,
            request_timeout: 8,
            politeness_delay: 500,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// User-Agent header sent with every page request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Places/geocoding provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Environment variable holding the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API root, e.g. "https://maps.googleapis.com/maps/api"
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Nearby search radius (meters)
    #[serde(rename = "search-radius")]
    pub search_radius: u32,

    /// Number of nearby-search result pages fetched per location
    #[serde(rename = "max-result-pages")]
    pub max_result_pages: u32,

    /// Wait before reusing a pagination token (milliseconds)
    #[serde(rename = "page-token-delay")]
    pub page_token_delay: u64,

    /// Maximum number of leads processed per run
    #[serde(rename = "lead-limit")]
    pub lead_limit: usize,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
            search_radius: 20_000,
            max_result_pages: 3,
            page_token_delay: 2000,
            lead_limit: 50,
        }
    }
}

/// Language-model pitch service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Environment variable holding the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// OpenAI-compatible API root
    #[serde(rename = "base-url")]
    pub base_url: String,

    pub model: String,

    pub temperature: f32,

    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Optional prompt template file; the built-in template is used otherwise
    #[serde(rename = "template-path")]
    pub template_path: Option<String>,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.7,
            max_tokens: 300,
            template_path: None,
        }
    }
}

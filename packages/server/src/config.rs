use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3051;

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "o3-mini";
const DEFAULT_FIRECRAWL_BASE_URL: &str = "https://api.firecrawl.dev/v1";
const DEFAULT_CONCURRENCY: usize = 2;
const DEFAULT_CONTEXT_SIZE: usize = 128_000;

/// Where search results come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchProvider {
    Firecrawl {
        api_key: Option<String>,
        base_url: String,
    },
    Tavily {
        api_key: String,
    },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_endpoint: String,
    pub model: String,
    pub search: SearchProvider,
    pub concurrency: usize,
    pub context_size: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port.trim().parse().context("PORT must be a valid number")?,
            None => DEFAULT_PORT,
        };

        let openai_api_key = var("OPENAI_KEY")
            .or_else(|| var("OPENAI_API_KEY"))
            .context("OPENAI_KEY (or OPENAI_API_KEY) must be set")?;

        let firecrawl_base_url = var("FIRECRAWL_BASE_URL");
        let search = match (var("FIRECRAWL_KEY"), var("TAVILY_API_KEY")) {
            (Some(key), _) => SearchProvider::Firecrawl {
                api_key: Some(key),
                base_url: firecrawl_base_url
                    .unwrap_or_else(|| DEFAULT_FIRECRAWL_BASE_URL.to_string()),
            },
            (None, Some(key)) => SearchProvider::Tavily { api_key: key },
            // Self-hosted Firecrawl does not need a key
            (None, None) => SearchProvider::Firecrawl {
                api_key: None,
                base_url: firecrawl_base_url.context(
                    "FIRECRAWL_KEY, TAVILY_API_KEY or FIRECRAWL_BASE_URL must be set",
                )?,
            },
        };

        let concurrency = match var("FIRECRAWL_CONCURRENCY") {
            Some(value) => value
                .trim()
                .parse()
                .context("FIRECRAWL_CONCURRENCY must be a valid number")?,
            None => DEFAULT_CONCURRENCY,
        };

        let context_size = match var("CONTEXT_SIZE") {
            Some(value) => value
                .trim()
                .parse()
                .context("CONTEXT_SIZE must be a valid number")?,
            None => DEFAULT_CONTEXT_SIZE,
        };

        Ok(Self {
            port,
            openai_api_key,
            openai_endpoint: var("OPENAI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string()),
            model: var("CUSTOM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            search,
            concurrency,
            context_size,
        })
    }
}

// web_app/config.rs - Client configuration
//
// Page sizes, freshness windows and the retry budget for the listing views.
// The browser bundle cannot read the environment at runtime, so the API base
// URL is baked in at compile time. The server may override the defaults from
// the environment (after dotenv has loaded .env) and hands the overridable
// part to the browser as `ClientSettings` in a meta tag of the page head.

use std::env;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path of the listing endpoint, relative to `api_base`
pub const PRODUCTS_PATH: &str = "/api/products";

/// `name` of the meta tag carrying the server's `ClientSettings` as JSON
pub const SETTINGS_META_NAME: &str = "product-listing-settings";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Origin of the listing endpoint; empty means same origin
    pub api_base: String,
    pub table_page_size: u32,
    pub scroll_page_size: u32,
    pub table_stale_time: Duration,
    pub scroll_stale_time: Duration,
    /// How long an unused cache entry survives before garbage collection
    pub gc_time: Duration,
    /// Automatic retries after a failed request
    pub retry: u32,
    /// Distance from the document end that triggers the next scroll page
    pub scroll_threshold_px: f64,
}

/// The environment-overridable part of a [`ClientConfig`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub api_base: String,
    pub table_page_size: u32,
    pub scroll_page_size: u32,
    pub retry: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: option_env!("PRODUCTS_API_URL").unwrap_or("").to_string(),
            table_page_size: 10,
            scroll_page_size: 20,
            table_stale_time: Duration::seconds(30),
            scroll_stale_time: Duration::seconds(60),
            gc_time: Duration::minutes(5),
            retry: 1,
            scroll_threshold_px: 300.0,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `PRODUCTS_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("PRODUCTS_API_URL") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(size) = parse_u32(&lookup, "PRODUCTS_TABLE_PAGE_SIZE")? {
            config.table_page_size = size;
        }
        if let Some(size) = parse_u32(&lookup, "PRODUCTS_SCROLL_PAGE_SIZE")? {
            config.scroll_page_size = size;
        }
        if let Some(retry) = parse_u32(&lookup, "PRODUCTS_RETRY")? {
            config.retry = retry;
        }

        config.validate()?;
        tracing::debug!(?config, "Loaded client configuration");
        Ok(config)
    }

    pub fn settings(&self) -> ClientSettings {
        ClientSettings {
            api_base: self.api_base.clone(),
            table_page_size: self.table_page_size,
            scroll_page_size: self.scroll_page_size,
            retry: self.retry,
        }
    }

    /// This configuration with `settings` applied on top
    pub fn with_settings(mut self, settings: ClientSettings) -> Result<Self, ConfigError> {
        self.api_base = settings.api_base;
        self.table_page_size = settings.table_page_size;
        self.scroll_page_size = settings.scroll_page_size;
        self.retry = settings.retry;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_page_size == 0 {
            return Err(ConfigError::Zero("PRODUCTS_TABLE_PAGE_SIZE"));
        }
        if self.scroll_page_size == 0 {
            return Err(ConfigError::Zero("PRODUCTS_SCROLL_PAGE_SIZE"));
        }
        Ok(())
    }
}

fn parse_u32<F>(lookup: &F, name: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

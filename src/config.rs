use crate::error::LookupError;
use crate::fetch::HttpSource;
use crate::sprite::SpriteLoader;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upstream connection settings. The base URL is injectable so tests can
/// point the service at a local stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    fn client(&self) -> Result<reqwest::Client, LookupError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(LookupError::Client)
    }

    pub fn http_source(&self) -> Result<HttpSource, LookupError> {
        Ok(HttpSource::with_client(self.client()?, &self.base_url))
    }

    pub fn sprite_loader(&self) -> Result<SpriteLoader, LookupError> {
        Ok(SpriteLoader::with_client(self.client()?))
    }
}

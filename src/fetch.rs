//! Upstream access for `GET {base}/pokemon/{identifier}/`.

use crate::error::LookupError;
use crate::models::ApiPokemon;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Where lookups get their raw payloads from.
///
/// `Ok(None)` means the upstream has no such resource; every other failure
/// is an `Err`.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn fetch_pokemon(&self, identifier: &str) -> Result<Option<ApiPokemon>, LookupError>;
}

/// PokeAPI-compatible HTTP source.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The identifier is interpolated verbatim; name vs. id resolution is
    /// left to the upstream. URL syntax in it is not escaped, so `#` starts a
    /// fragment and `?` a query string when the request is sent.
    pub fn pokemon_url(&self, identifier: &str) -> String {
        format!("{}/pokemon/{}/", self.base_url, identifier)
    }
}

#[async_trait]
impl PokemonSource for HttpSource {
    async fn fetch_pokemon(&self, identifier: &str) -> Result<Option<ApiPokemon>, LookupError> {
        let url = self.pokemon_url(identifier);
        debug!(%url, "fetching pokemon");

        let res = self.client.get(&url).send().await?;
        let status = res.status();
        debug!(%url, status = status.as_u16(), "upstream responded");
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        let payload = serde_json::from_slice::<ApiPokemon>(&body)?;
        Ok(Some(payload))
    }
}

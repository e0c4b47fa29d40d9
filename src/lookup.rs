use crate::fetch::PokemonSource;
use crate::models::{LookupQuery, LookupResult, PokemonRecord, Variant};
use crate::session::Outcome;
use crate::sprite::SpriteLoader;
use tracing::{info, warn};

/// Resolves a raw identifier into a display record or a typed failure.
///
/// Stateless between calls: one upstream request per non-empty lookup, no
/// caching and no retry.
pub struct LookupService<S> {
    source: S,
}

impl<S: PokemonSource> LookupService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn lookup(&self, identifier: &str, variant: Variant) -> LookupResult {
        if identifier.is_empty() {
            return LookupResult::NotFound;
        }

        match self.source.fetch_pokemon(identifier).await {
            Ok(Some(payload)) => {
                let record = PokemonRecord::from_payload(payload, variant);
                info!(identifier, id = record.id, variant = variant.label(), "pokemon found");
                LookupResult::Found(record)
            }
            Ok(None) => {
                info!(identifier, "pokemon not found");
                LookupResult::NotFound
            }
            Err(err) => {
                warn!(identifier, error = %err, "lookup failed");
                LookupResult::TransportError(err)
            }
        }
    }

    pub async fn run(&self, query: &LookupQuery) -> LookupResult {
        self.lookup(&query.identifier, query.variant).await
    }

    /// Run `query` and, when a sprite URL came back, download the sprite.
    /// A failed sprite download leaves the result untouched.
    pub async fn resolve(&self, query: LookupQuery, sprites: Option<&SpriteLoader>) -> Outcome {
        let result = self.run(&query).await;
        let sprite_url = result.record().and_then(|r| r.sprite_url.as_deref());
        let sprite = match (sprites, sprite_url) {
            (Some(loader), Some(url)) => match loader.load(url).await {
                Ok(thumb) => Some(thumb),
                Err(err) => {
                    warn!(%url, error = %err, "sprite unavailable");
                    None
                }
            },
            _ => None,
        };
        Outcome {
            query,
            result,
            sprite,
        }
    }
}

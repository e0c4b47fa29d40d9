//! Pokémon lookup against a PokeAPI-compatible upstream.
//!
//! [`LookupService`] turns a raw identifier plus a sprite [`Variant`] into a
//! [`LookupResult`]; [`LookupSession`] sequences lookups for interactive
//! callers so only the newest result is ever shown.

pub mod config;
pub mod error;
pub mod fetch;
pub mod lookup;
pub mod models;
pub mod session;
pub mod sprite;
pub mod utils;

pub use config::Config;
pub use error::LookupError;
pub use fetch::{HttpSource, PokemonSource};
pub use lookup::LookupService;
pub use models::{AbilityEntry, LookupQuery, LookupResult, PokemonRecord, Variant};
pub use session::{LookupSession, Outcome, Ticket, ViewState};
pub use sprite::{SpriteLoader, SpriteThumb};
pub use utils::capitalize_first;

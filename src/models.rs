use crate::error::LookupError;
use crate::utils::capitalize_first;
use serde::{Deserialize, Serialize};

/// Which front sprite a lookup should resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Normal,
    Shiny,
}

impl Variant {
    pub fn toggled(self) -> Self {
        match self {
            Variant::Normal => Variant::Shiny,
            Variant::Shiny => Variant::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Variant::Normal => "Normal",
            Variant::Shiny => "Shiny",
        }
    }
}

/// One user-triggered request: what to look up and which sprite to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub identifier: String,
    pub variant: Variant,
}

impl LookupQuery {
    pub fn new(identifier: impl Into<String>, variant: Variant) -> Self {
        Self {
            identifier: identifier.into(),
            variant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityEntry {
    pub name: String,
    pub is_hidden: bool,
}

/// Normalized display record built from one upstream payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonRecord {
    pub id: u32,
    /// Raw name as returned upstream (lowercase for PokeAPI).
    pub name: String,
    pub height_decimetres: u32,
    pub weight_hectograms: u32,
    pub sprite_url: Option<String>,
    pub abilities: Vec<AbilityEntry>,
}

impl PokemonRecord {
    /// Map a raw payload into a record, picking the sprite for `variant`.
    pub fn from_payload(payload: ApiPokemon, variant: Variant) -> Self {
        let sprite_url = match variant {
            Variant::Normal => payload.sprites.front_default,
            Variant::Shiny => payload.sprites.front_shiny,
        };
        let abilities = payload
            .abilities
            .into_iter()
            .map(|slot| AbilityEntry {
                name: slot.ability.name,
                is_hidden: slot.is_hidden,
            })
            .collect();

        Self {
            id: payload.id,
            name: payload.name,
            height_decimetres: payload.height,
            weight_hectograms: payload.weight,
            sprite_url,
            abilities,
        }
    }

    pub fn display_name(&self) -> String {
        capitalize_first(&self.name)
    }
}

/// Outcome of a single lookup. There is no partial variant.
#[derive(Debug)]
pub enum LookupResult {
    Found(PokemonRecord),
    NotFound,
    TransportError(LookupError),
}

impl LookupResult {
    pub fn record(&self) -> Option<&PokemonRecord> {
        match self {
            LookupResult::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }
}

// Upstream schema for `GET /pokemon/{id}/`. Only the fields we display are
// declared; everything else in the document is ignored.

#[derive(Debug, Deserialize, Clone)]
pub struct ApiPokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// Sprite fields are nullable upstream; a missing object means no sprites.
    #[serde(default)]
    pub sprites: ApiSprites,
    pub abilities: Vec<ApiAbilitySlot>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiAbilitySlot {
    pub ability: ApiNamedResource,
    pub is_hidden: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiNamedResource {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pikachu() -> ApiPokemon {
        serde_json::from_value(json!({
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "base_experience": 112,
            "sprites": { "front_default": "url1", "front_shiny": "url2", "back_default": "url3" },
            "abilities": [
                { "ability": { "name": "static", "url": "x" }, "is_hidden": false, "slot": 1 },
                { "ability": { "name": "lightning-rod", "url": "y" }, "is_hidden": true, "slot": 3 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn maps_normal_sprite_and_scalars() {
        let record = PokemonRecord::from_payload(pikachu(), Variant::Normal);
        assert_eq!(
            record,
            PokemonRecord {
                id: 25,
                name: "pikachu".to_string(),
                height_decimetres: 4,
                weight_hectograms: 60,
                sprite_url: Some("url1".to_string()),
                abilities: vec![
                    AbilityEntry {
                        name: "static".to_string(),
                        is_hidden: false
                    },
                    AbilityEntry {
                        name: "lightning-rod".to_string(),
                        is_hidden: true
                    },
                ],
            }
        );
        assert_eq!(record.display_name(), "Pikachu");
    }

    #[test]
    fn shiny_only_changes_sprite() {
        let normal = PokemonRecord::from_payload(pikachu(), Variant::Normal);
        let shiny = PokemonRecord::from_payload(pikachu(), Variant::Shiny);
        assert_eq!(shiny.sprite_url.as_deref(), Some("url2"));
        assert_eq!(
            PokemonRecord {
                sprite_url: None,
                ..normal
            },
            PokemonRecord {
                sprite_url: None,
                ..shiny
            }
        );
    }

    #[test]
    fn null_or_missing_sprites_are_absent() {
        let payload: ApiPokemon = serde_json::from_value(json!({
            "id": 10001,
            "name": "deoxys-attack",
            "height": 17,
            "weight": 608,
            "sprites": { "front_default": null, "front_shiny": null },
            "abilities": []
        }))
        .unwrap();
        let record = PokemonRecord::from_payload(payload, Variant::Shiny);
        assert_eq!(record.sprite_url, None);
        assert!(record.abilities.is_empty());

        let no_sprites: ApiPokemon = serde_json::from_value(json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "abilities": []
        }))
        .unwrap();
        assert_eq!(
            PokemonRecord::from_payload(no_sprites, Variant::Normal).sprite_url,
            None
        );
    }

    #[test]
    fn incomplete_payloads_do_not_decode() {
        let bare = serde_json::from_value::<ApiPokemon>(json!({ "id": 1, "name": "bulbasaur" }));
        assert!(bare.is_err());

        let no_hidden_flag = serde_json::from_value::<ApiPokemon>(json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "abilities": [{ "ability": { "name": "overgrow" } }]
        }));
        assert!(no_hidden_flag.is_err());
    }

    #[test]
    fn ability_order_is_preserved() {
        let payload: ApiPokemon = serde_json::from_value(json!({
            "id": 6,
            "name": "charizard",
            "height": 17,
            "weight": 905,
            "sprites": {},
            "abilities": [
                { "ability": { "name": "solar-power" }, "is_hidden": true },
                { "ability": { "name": "blaze" }, "is_hidden": false },
                { "ability": { "name": "aardvark" }, "is_hidden": false }
            ]
        }))
        .unwrap();
        let names: Vec<_> = PokemonRecord::from_payload(payload, Variant::Normal)
            .abilities
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["solar-power", "blaze", "aardvark"]);
    }

    #[test]
    fn variant_toggles() {
        assert_eq!(Variant::default(), Variant::Normal);
        assert_eq!(Variant::Normal.toggled(), Variant::Shiny);
        assert_eq!(Variant::Shiny.toggled(), Variant::Normal);
    }
}

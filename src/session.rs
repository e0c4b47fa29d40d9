//! Request sequencing for an interactive front end.
//!
//! Every lookup the UI starts gets a ticket from a monotonically increasing
//! counter. A finished lookup is applied only if its ticket is still the
//! latest, so a slow, superseded response can never overwrite a newer one.
//! The displayed state is a single value that each applied completion
//! replaces wholesale.

use crate::models::{LookupQuery, LookupResult, Variant};
use crate::sprite::SpriteThumb;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Everything one completed lookup produced.
#[derive(Debug)]
pub struct Outcome {
    pub query: LookupQuery,
    pub result: LookupResult,
    pub sprite: Option<SpriteThumb>,
}

#[derive(Debug, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading(LookupQuery),
    Ready(Outcome),
}

#[derive(Debug, Default)]
pub struct LookupSession {
    last_issued: u64,
    variant: Variant,
    view: ViewState,
}

impl LookupSession {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading(_))
    }

    /// Query for `identifier` with the session's current variant.
    pub fn query_for(&self, identifier: &str) -> LookupQuery {
        LookupQuery::new(identifier, self.variant)
    }

    /// Start a lookup. Any ticket issued earlier becomes stale.
    pub fn begin(&mut self, query: LookupQuery) -> Ticket {
        self.last_issued += 1;
        debug!(seq = self.last_issued, identifier = %query.identifier, "lookup started");
        self.view = ViewState::Loading(query);
        Ticket(self.last_issued)
    }

    /// Apply a finished lookup if `ticket` is the most recent one.
    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) -> bool {
        if ticket.0 != self.last_issued {
            debug!(
                seq = ticket.0,
                latest = self.last_issued,
                "dropping stale lookup result"
            );
            return false;
        }
        self.view = ViewState::Ready(outcome);
        true
    }

    /// Flip the sprite variant. When a Pokémon is on screen, returns the
    /// query that re-fetches it with the new variant; the caller runs it.
    pub fn toggle_variant(&mut self) -> Option<LookupQuery> {
        self.variant = self.variant.toggled();
        match &self.view {
            ViewState::Ready(Outcome {
                result: LookupResult::Found(record),
                ..
            }) => Some(LookupQuery::new(record.name.clone(), self.variant)),
            // A lookup in flight was issued with the old variant; reissue it.
            ViewState::Loading(query) => {
                Some(LookupQuery::new(query.identifier.clone(), self.variant))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PokemonRecord;

    fn record(name: &str) -> PokemonRecord {
        PokemonRecord {
            id: 1,
            name: name.to_string(),
            height_decimetres: 7,
            weight_hectograms: 69,
            sprite_url: None,
            abilities: vec![],
        }
    }

    fn found(query: LookupQuery, name: &str) -> Outcome {
        Outcome {
            query,
            result: LookupResult::Found(record(name)),
            sprite: None,
        }
    }

    #[test]
    fn begin_switches_to_loading() {
        let mut session = LookupSession::default();
        assert!(matches!(session.view(), ViewState::Idle));
        let t = session.begin(session.query_for("bulbasaur"));
        assert_eq!(t.seq(), 1);
        assert!(session.is_loading());
    }

    #[test]
    fn latest_completion_is_applied() {
        let mut session = LookupSession::default();
        let q = session.query_for("bulbasaur");
        let t = session.begin(q.clone());
        assert!(session.complete(t, found(q, "bulbasaur")));
        match session.view() {
            ViewState::Ready(outcome) => {
                assert_eq!(outcome.result.record().map(|r| r.name.as_str()), Some("bulbasaur"))
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut session = LookupSession::default();
        let first_q = session.query_for("bulbasaur");
        let first = session.begin(first_q.clone());
        let second_q = session.query_for("charmander");
        let second = session.begin(second_q.clone());
        assert!(first < second);

        // The newer lookup finishes first, then the old one arrives late.
        assert!(session.complete(second, found(second_q, "charmander")));
        assert!(!session.complete(first, found(first_q, "bulbasaur")));

        let shown = match session.view() {
            ViewState::Ready(outcome) => outcome.result.record().map(|r| r.name.clone()),
            _ => None,
        };
        assert_eq!(shown.as_deref(), Some("charmander"));
    }

    #[test]
    fn completion_replaces_previous_outcome_entirely() {
        let mut session = LookupSession::default();
        let q = session.query_for("pikachu");
        let t = session.begin(q.clone());
        session.complete(t, found(q, "pikachu"));

        let q = session.query_for("missingno");
        let t = session.begin(q.clone());
        session.complete(
            t,
            Outcome {
                query: q,
                result: LookupResult::NotFound,
                sprite: None,
            },
        );
        match session.view() {
            ViewState::Ready(outcome) => {
                assert!(matches!(outcome.result, LookupResult::NotFound));
                assert!(outcome.sprite.is_none());
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn toggle_refetches_displayed_pokemon_by_name() {
        let mut session = LookupSession::default();
        let q = session.query_for("25");
        let t = session.begin(q.clone());
        session.complete(t, found(q, "pikachu"));

        let requery = session.toggle_variant();
        assert_eq!(session.variant(), Variant::Shiny);
        assert_eq!(requery, Some(LookupQuery::new("pikachu", Variant::Shiny)));
    }

    #[test]
    fn toggle_without_pokemon_only_flips_variant() {
        let mut session = LookupSession::new(Variant::Shiny);
        assert_eq!(session.toggle_variant(), None);
        assert_eq!(session.variant(), Variant::Normal);

        let q = session.query_for("nope");
        let t = session.begin(q.clone());
        session.complete(
            t,
            Outcome {
                query: q,
                result: LookupResult::NotFound,
                sprite: None,
            },
        );
        assert_eq!(session.toggle_variant(), None);
    }

    #[test]
    fn toggle_while_loading_reissues_pending_query() {
        let mut session = LookupSession::default();
        let q = session.query_for("eevee");
        let stale = session.begin(q);
        let requery = session.toggle_variant().unwrap();
        assert_eq!(requery, LookupQuery::new("eevee", Variant::Shiny));
        let fresh = session.begin(requery);
        assert!(!session.complete(
            stale,
            found(LookupQuery::new("eevee", Variant::Normal), "eevee")
        ));
        assert!(session.complete(fresh, found(LookupQuery::new("eevee", Variant::Shiny), "eevee")));
    }
}

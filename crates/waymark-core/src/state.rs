//! Sync state machine shared by all Waymark clients.
//!
//! [`SyncState`] is the in-memory snapshot of the travel log for one session;
//! [`Action`] names every transition, and [`reduce`] is the only place a
//! transition happens. The reducer is a pure function `(state, action) -> state`
//! with no side effects, so every consumer observes fully-settled snapshots.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{countries_of, City, CityId, CountrySummary};

/// In-memory snapshot of the travel log for one session.
///
/// Created with [`SyncState::default`] when the session starts and dropped
/// with it; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    /// Visited cities, in store return order
    pub cities: Vec<City>,
    /// City currently selected for detail view
    pub current_city: Option<City>,
    /// True strictly while an operation is in flight
    pub is_loading: bool,
    /// Last failure message; empty when none. Only overwritten, never
    /// explicitly cleared.
    pub error: String,
}

impl SyncState {
    /// Distinct countries of the visited cities, in first-visit order.
    #[must_use]
    pub fn countries(&self) -> Vec<CountrySummary> {
        countries_of(&self.cities)
    }

    /// Id of the currently selected city, if any.
    #[must_use]
    pub fn current_city_id(&self) -> Option<CityId> {
        self.current_city.as_ref().map(|city| city.id)
    }
}

/// A state transition.
///
/// The serialized form tags each action with its kind string, which is what
/// dispatch logs and replay files carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum Action {
    /// An operation started
    #[serde(rename = "loading")]
    Loading,
    /// The full collection was fetched
    #[serde(rename = "cities/loaded")]
    CitiesLoaded(Vec<City>),
    /// A single city was fetched for detail view
    #[serde(rename = "city/loaded")]
    CityLoaded(City),
    /// A city was persisted and assigned an id
    #[serde(rename = "city/created")]
    CityCreated(City),
    /// A city was deleted from the store
    #[serde(rename = "city/deleted")]
    CityDeleted(CityId),
    /// An operation failed; payload is the consumer-facing message
    #[serde(rename = "rejected")]
    Rejected(String),
}

const KNOWN_KINDS: [&str; 6] = [
    "loading",
    "cities/loaded",
    "city/loaded",
    "city/created",
    "city/deleted",
    "rejected",
];

impl Action {
    /// The kind tag this action serializes under.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::CitiesLoaded(_) => "cities/loaded",
            Self::CityLoaded(_) => "city/loaded",
            Self::CityCreated(_) => "city/created",
            Self::CityDeleted(_) => "city/deleted",
            Self::Rejected(_) => "rejected",
        }
    }

    /// Parse a serialized action, failing fast on an unrecognized kind.
    ///
    /// An unknown kind is a programmer error (a producer/reducer mismatch),
    /// surfaced as [`Error::UnknownAction`] rather than folded into a generic
    /// decode failure.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        match serde_json::from_value::<Self>(value.clone()) {
            Ok(action) => Ok(action),
            Err(decode) => {
                if let Some(kind) = value.get("kind").and_then(serde_json::Value::as_str) {
                    if !KNOWN_KINDS.contains(&kind) {
                        return Err(Error::UnknownAction { kind: kind.to_string() });
                    }
                }
                Err(decode.into())
            }
        }
    }
}

/// Apply one action to a state, producing the successor state.
///
/// Total over the action set. Each arm touches only the fields its transition
/// names; in particular `error` survives success paths untouched.
#[must_use]
pub fn reduce(state: SyncState, action: Action) -> SyncState {
    match action {
        Action::Loading => SyncState { is_loading: true, ..state },
        Action::CitiesLoaded(cities) => SyncState { is_loading: false, cities, ..state },
        Action::CityLoaded(city) => SyncState {
            is_loading: false,
            current_city: Some(city),
            ..state
        },
        Action::CityCreated(city) => {
            let mut next = state;
            next.cities.push(city.clone());
            next.current_city = Some(city);
            next.is_loading = false;
            next
        }
        Action::CityDeleted(id) => {
            let mut next = state;
            next.cities.retain(|city| city.id != id);
            next.current_city = None;
            next.is_loading = false;
            next
        }
        Action::Rejected(message) => SyncState {
            is_loading: false,
            error: message,
            ..state
        },
    }
}

//! City model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unique identifier for a city, assigned by the remote store.
///
/// Ids are opaque to clients; equality is numeric, which is what the
/// stale-selection guard compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(i64);

impl CityId {
    /// Wrap a raw store-assigned id
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value of this id
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Geographic coordinates of a visited city
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// A visited city in the travel log.
///
/// Records are immutable once created; the store supports create and delete
/// only. Wire field names follow the remote collection (`cityName`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Store-assigned identifier
    pub id: CityId,
    /// City name
    #[serde(rename = "cityName")]
    pub name: String,
    /// Country the city belongs to
    pub country: String,
    /// Flag emoji for the country
    pub emoji: String,
    /// Map coordinates
    pub position: Position,
    /// Visit date
    pub date: DateTime<Utc>,
    /// Free-form trip notes
    #[serde(default)]
    pub notes: String,
}

/// City attributes not yet persisted; the store assigns the id on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDraft {
    #[serde(rename = "cityName")]
    pub name: String,
    pub country: String,
    pub emoji: String,
    pub position: Position,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

impl CityDraft {
    /// Promote this draft to a full record with its store-assigned id.
    #[must_use]
    pub fn into_city(self, id: CityId) -> City {
        City {
            id,
            name: self.name,
            country: self.country,
            emoji: self.emoji,
            position: self.position,
            date: self.date,
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "cityName": "Lisbon",
            "country": "Portugal",
            "emoji": "🇵🇹",
            "date": "2027-10-31T15:59:59.138Z",
            "notes": "My favorite city so far!",
            "position": { "lat": 38.727881642324164, "lng": -9.140900099907554 },
            "id": 73930385
        }"#
    }

    #[test]
    fn test_city_id_parse() {
        let id: CityId = " 73930385 ".parse().unwrap();
        assert_eq!(id, CityId::new(73_930_385));
        assert_eq!(id.to_string(), "73930385");
    }

    #[test]
    fn test_city_id_parse_rejects_garbage() {
        assert!("city-1".parse::<CityId>().is_err());
        assert!("".parse::<CityId>().is_err());
    }

    #[test]
    fn test_city_wire_format_round_trip() {
        let city: City = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(city.name, "Lisbon");
        assert_eq!(city.id, CityId::new(73_930_385));
        assert_eq!(city.emoji, "🇵🇹");

        let encoded = serde_json::to_value(&city).unwrap();
        assert_eq!(encoded["cityName"], "Lisbon");
        assert!(encoded.get("name").is_none());
    }

    #[test]
    fn test_city_notes_default_to_empty() {
        let city: City = serde_json::from_str(
            r#"{
                "cityName": "Berlin",
                "country": "Germany",
                "emoji": "🇩🇪",
                "date": "2027-02-12T09:24:11.863Z",
                "position": { "lat": 52.53586782505711, "lng": 13.376933665713324 },
                "id": 98443197
            }"#,
        )
        .unwrap();
        assert_eq!(city.notes, "");
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let draft = CityDraft {
            name: "Porto".to_string(),
            country: "Portugal".to_string(),
            emoji: "🇵🇹".to_string(),
            position: Position { lat: 41.1579, lng: -8.6291 },
            date: "2027-07-21T09:00:00Z".parse().unwrap(),
            notes: String::new(),
        };
        let encoded = serde_json::to_value(&draft).unwrap();
        assert_eq!(encoded["cityName"], "Porto");
        assert!(encoded.get("id").is_none());
    }

    #[test]
    fn test_draft_into_city_keeps_attributes() {
        let draft = CityDraft {
            name: "Porto".to_string(),
            country: "Portugal".to_string(),
            emoji: "🇵🇹".to_string(),
            position: Position { lat: 41.1579, lng: -8.6291 },
            date: "2027-07-21T09:00:00Z".parse().unwrap(),
            notes: "Second stop".to_string(),
        };
        let city = draft.clone().into_city(CityId::new(3));
        assert_eq!(city.id, CityId::new(3));
        assert_eq!(city.name, draft.name);
        assert_eq!(city.notes, draft.notes);
    }
}

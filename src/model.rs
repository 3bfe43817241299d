//! Raw catalog records as received from the upstream API
//!
//! The upstream payload is untrusted: any field may be absent, null, or the
//! wrong shape. All leniency lives here, at the deserialization boundary —
//! downstream code (builder, aggregator) operates on trusted types and never
//! re-checks shapes. A list element that fails to deserialize is dropped
//! individually; the surrounding record survives.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single concert event from the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    /// Upstream numeric identifier, when the catalog assigns one
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Free-text venue string, typically "Venue, City (Country)"
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub participants: Vec<Participant>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub program: Vec<Piece>,
}

/// A performer or ensemble attached to an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub name: Option<String>,
    /// Free-text role, may embed an instrument as "<Role> - <Instrument>"
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// A programmed piece within an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Piece {
    #[serde(default)]
    pub piece_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub composers: Vec<String>,
    #[serde(default)]
    pub premiere_type: Option<String>,
}

/// Pagination block returned alongside an event page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub has_next: Option<bool>,
}

/// One page of the upstream event-list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsPage {
    #[serde(default, deserialize_with = "lenient_list")]
    pub events: Vec<RawEvent>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Deserialize a list field that may be null, absent, or contain malformed
/// elements. Null and absent become empty; malformed elements are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_lists_become_empty() {
        let event: RawEvent = serde_json::from_value(json!({
            "id": 7,
            "name": "Concierto",
            "participants": null,
            "program": null
        }))
        .unwrap();
        assert_eq!(event.id, Some(7));
        assert!(event.participants.is_empty());
        assert!(event.program.is_empty());
    }

    #[test]
    fn malformed_list_elements_are_skipped() {
        let event: RawEvent = serde_json::from_value(json!({
            "name": "Recital",
            "participants": [
                {"name": "Claudio Arrau", "activity": "Pianista - Piano"},
                null,
                "not an object",
                42
            ],
            "program": [
                {"piece_name": "Sonata", "composers": ["Beethoven", null]},
                []
            ]
        }))
        .unwrap();
        assert_eq!(event.participants.len(), 1);
        assert_eq!(event.participants[0].name.as_deref(), Some("Claudio Arrau"));
        assert_eq!(event.program.len(), 1);
        assert_eq!(event.program[0].composers, vec!["Beethoven"]);
    }

    #[test]
    fn page_tolerates_missing_pagination() {
        let page: EventsPage =
            serde_json::from_value(json!({"events": [{"name": "A"}]})).unwrap();
        assert_eq!(page.events.len(), 1);
        assert!(page.pagination.is_none());
    }

    #[test]
    fn malformed_events_are_dropped_per_record() {
        let page: EventsPage = serde_json::from_value(json!({
            "events": [{"name": "A"}, "bogus", {"name": "B"}]
        }))
        .unwrap();
        assert_eq!(page.events.len(), 2);
    }
}

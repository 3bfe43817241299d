//! Filter facets: deduplicated value lists derived from event data
//!
//! A facet is a named list of distinct `{id, name}` entries (all composers,
//! all cities, ...) that drives faceted filtering in consumers. Facets come
//! from two places: derived here by scanning raw events, or provided whole by
//! the upstream parameters endpoint. When both exist, a non-empty upstream
//! list wins outright per facet key — no element-level union.

use crate::extract;
use crate::graph::hash_id;
use crate::model::RawEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Facet keys shared with the upstream parameters endpoint.
pub mod keys {
    pub const COMPOSERS: &str = "composers";
    pub const PARTICIPANTS: &str = "participants";
    pub const CITIES: &str = "cities";
    pub const LOCATIONS: &str = "locations";
    pub const INSTRUMENTS: &str = "instruments";
    pub const EVENT_TYPES: &str = "event_types";
    pub const CYCLES: &str = "cycles";
    pub const PREMIERE_TYPES: &str = "premiere_types";
    pub const ACTIVITIES: &str = "activities";
    pub const GENDERS: &str = "genders";
}

/// The fixed years facet. Unlike the derived facets this is a contiguous
/// range defined by the catalog's coverage, not extracted from data.
pub const MIN_YEAR: i32 = 1945;
pub const MAX_YEAR: i32 = 1995;

/// The selectable year range, oldest first.
pub fn years() -> Vec<i32> {
    (MIN_YEAR..=MAX_YEAR).collect()
}

/// One entry in a facet list. `id` is the upstream identifier when the entry
/// came from the parameters endpoint, or a derived hash otherwise.
/// Uniqueness within a facet is by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetEntry {
    pub id: String,
    pub name: String,
}

impl FacetEntry {
    /// Entry with a derived id (hash of the name).
    pub fn derived(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: hash_id(&name),
            name,
        }
    }
}

/// Facet key → sorted, name-deduplicated entry list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetTable(BTreeMap<String, Vec<FacetEntry>>);

impl FacetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> &[FacetEntry] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Entry names for a facet, in list order.
    pub fn names(&self, key: &str) -> Vec<&str> {
        self.get(key).iter().map(|e| e.name.as_str()).collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, entries: Vec<FacetEntry>) {
        self.0.insert(key.into(), entries);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the upstream parameters payload, in either observed shape:
    /// direct `{key: [...]}` entries or nested
    /// `{parameters: [{name, values}]}`. Values may be plain strings or
    /// `{id, name}` objects. Unrecognized structure contributes nothing.
    pub fn from_upstream(raw: &Value) -> Self {
        let mut table = Self::new();

        if let Some(params) = raw.get("parameters").and_then(Value::as_array) {
            for param in params {
                let Some(name) = param.get("name").and_then(Value::as_str) else {
                    continue;
                };
                let entries = parse_entries(param.get("values"));
                table.insert(name, entries);
            }
            return table;
        }

        if let Some(object) = raw.as_object() {
            for (key, value) in object {
                if value.is_array() {
                    table.insert(key.clone(), parse_entries(Some(value)));
                }
            }
        }
        table
    }

    /// Merge upstream facets over extracted ones: per key, a non-empty
    /// upstream list replaces the derived list wholesale.
    pub fn merge(api: Self, extracted: Self) -> Self {
        let mut merged = extracted;
        for (key, entries) in api.0 {
            if !entries.is_empty() {
                merged.0.insert(key, entries);
            }
        }
        merged
    }
}

fn parse_entries(values: Option<&Value>) -> Vec<FacetEntry> {
    let mut by_name: BTreeMap<String, FacetEntry> = BTreeMap::new();
    let Some(values) = values.and_then(Value::as_array) else {
        return Vec::new();
    };
    for value in values {
        let entry = match value {
            Value::String(name) => {
                if extract::is_sentinel(name) {
                    continue;
                }
                FacetEntry::derived(name.trim())
            }
            Value::Object(obj) => {
                let Some(name) = obj.get("name").and_then(Value::as_str) else {
                    continue;
                };
                if extract::is_sentinel(name) {
                    continue;
                }
                let id = match obj.get("id") {
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::String(s)) => s.clone(),
                    _ => hash_id(name.trim()),
                };
                FacetEntry {
                    id,
                    name: name.trim().to_string(),
                }
            }
            _ => continue,
        };
        by_name.entry(entry.name.clone()).or_insert(entry);
    }
    by_name.into_values().collect()
}

/// Name-keyed accumulator for one facet. BTreeMap gives the sorted,
/// deduplicated output list directly.
#[derive(Default)]
struct Collector(BTreeMap<String, FacetEntry>);

impl Collector {
    fn add(&mut self, name: &str) {
        let name = name.trim();
        if extract::is_sentinel(name) {
            return;
        }
        self.0
            .entry(name.to_string())
            .or_insert_with(|| FacetEntry::derived(name));
    }

    fn add_opt(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            self.add(name);
        }
    }

    fn into_entries(self) -> Vec<FacetEntry> {
        self.0.into_values().collect()
    }
}

/// Scan events into per-facet value sets. Same traversal shape as the graph
/// builder, collecting names instead of nodes.
pub fn aggregate(events: &[RawEvent]) -> FacetTable {
    let mut composers = Collector::default();
    let mut participants = Collector::default();
    let mut cities = Collector::default();
    let mut locations = Collector::default();
    let mut instruments = Collector::default();
    let mut event_types = Collector::default();
    let mut cycles = Collector::default();
    let mut premiere_types = Collector::default();
    let mut activities = Collector::default();
    let mut genders = Collector::default();

    for event in events {
        for participant in &event.participants {
            participants.add_opt(participant.name.as_deref());
            genders.add_opt(participant.gender.as_deref());
            if let Some(activity) = participant.activity.as_deref() {
                activities.add(activity);
                if let Some(instrument) = extract::instrument(activity) {
                    instruments.add(&instrument);
                }
            }
        }

        if let Some(location) = event.location.as_deref() {
            cities.add_opt(extract::city_name(location).as_deref());
            locations.add_opt(extract::venue_name(location).as_deref());
        }

        event_types.add_opt(event.event_type.as_deref());
        cycles.add_opt(event.cycle.as_deref());

        for piece in &event.program {
            for composer in &piece.composers {
                composers.add(composer);
            }
            premiere_types.add_opt(piece.premiere_type.as_deref());
        }
    }

    let mut table = FacetTable::new();
    table.insert(keys::COMPOSERS, composers.into_entries());
    table.insert(keys::PARTICIPANTS, participants.into_entries());
    table.insert(keys::CITIES, cities.into_entries());
    table.insert(keys::LOCATIONS, locations.into_entries());
    table.insert(keys::INSTRUMENTS, instruments.into_entries());
    table.insert(keys::EVENT_TYPES, event_types.into_entries());
    table.insert(keys::CYCLES, cycles.into_entries());
    table.insert(keys::PREMIERE_TYPES, premiere_types.into_entries());
    table.insert(keys::ACTIVITIES, activities.into_entries());
    table.insert(keys::GENDERS, genders.into_entries());
    table
}

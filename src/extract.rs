//! Heuristic field extractors for composite free-text fields
//!
//! The catalog packs secondary entities into free text: the city inside a
//! location string, the instrument inside an activity string. These helpers
//! pull them out. All of them are total — malformed input degrades to `None`,
//! never an error.

/// Placeholder strings the catalog uses for "value intentionally absent".
/// Sentinels are never materialized as entities.
const SENTINELS: [&str; 2] = ["Ninguno", "Desconocido"];

/// True if the value is empty or one of the catalog's sentinel placeholders.
pub fn is_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || SENTINELS.contains(&trimmed)
}

/// Extract a city name from a free-text location string.
///
/// Recognizes two shapes:
/// - `"Venue, City (Country)"` — the segment between the first comma and the
///   opening parenthesis
/// - `"..., City"` — the last comma-separated segment
///
/// Anything else yields `None`: no recognized pattern, no entity.
pub fn city_name(location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }

    if location.contains(',') && location.contains('(') {
        let after_comma = location.splitn(2, ',').nth(1)?;
        let city = after_comma.split('(').next()?.trim();
        if city.is_empty() {
            return None;
        }
        return Some(city.to_string());
    }

    if location.contains(',') {
        let city = location.rsplit(',').next()?.trim();
        if city.is_empty() {
            return None;
        }
        return Some(city.to_string());
    }

    None
}

/// Extract an instrument from an activity string of the form
/// `"<Role> - <Instrument>"`.
///
/// Returns `None` when the separator is absent or the extracted value is the
/// `"Ninguno"` sentinel.
pub fn instrument(activity: &str) -> Option<String> {
    let (_, rest) = activity.split_once(" - ")?;
    let instrument = rest.trim();
    if is_sentinel(instrument) {
        return None;
    }
    Some(instrument.to_string())
}

/// Extract the venue name (the part before the first comma) from a location
/// string.
///
/// Feeds the `locations` facet, which deliberately lists venues
/// ("Teatro Municipal"), not full location strings — the full raw string is
/// the natural key of the optional location *node* instead (see
/// `BuildOptions::emit_location_nodes`). One venue therefore aggregates to a
/// single facet entry even when the catalog spells its city suffix
/// inconsistently.
pub fn venue_name(location: &str) -> Option<String> {
    let venue = match location.split_once(',') {
        Some((before, _)) => before.trim(),
        None => location.trim(),
    };
    if is_sentinel(venue) {
        return None;
    }
    Some(venue.to_string())
}

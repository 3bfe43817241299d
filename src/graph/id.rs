//! Deterministic node identifiers
//!
//! Entity identity is a pure function of the natural key (a name, a location
//! string): the same string always hashes to the same id, within a run and
//! across runs, so repeated ingestions of the same catalog produce diffable
//! graphs. The hash is a rolling 31-multiplier over codepoints, wrapped to 32
//! bits. Two distinct long strings may collide; that is an accepted
//! trade-off for a simple, language-portable function — entity names in this
//! domain are short and few enough that collisions have not been observed.

/// Hash a natural key to a stable decimal-string identifier.
///
/// Empty input maps to the fixed sentinel `"0"`.
pub fn hash_id(s: &str) -> String {
    if s.is_empty() {
        return "0".to_string();
    }
    hash_u32(s).to_string()
}

/// The raw 32-bit accumulator behind [`hash_id`].
///
/// Also used to derive deterministic default layout coordinates.
pub(crate) fn hash_u32(s: &str) -> u32 {
    let mut acc: u32 = 0;
    for c in s.chars() {
        acc = acc.wrapping_mul(31).wrapping_add(c as u32);
    }
    acc
}

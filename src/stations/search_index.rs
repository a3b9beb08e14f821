//! Substring and identifier-prefix search over station names.

use crate::types::station::Station;

/// Lower-cases `text`, turns everything outside `[a-z0-9]` and whitespace into a
/// space, collapses whitespace runs and trims.
///
/// Normalizing an already normalized string returns it unchanged.
///
/// # Examples
///
/// ```
/// use stationwx::normalize;
///
/// assert_eq!(normalize("  St. Louis (Downtown) "), "st louis downtown");
/// assert_eq!(normalize("st louis downtown"), "st louis downtown");
/// ```
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes every `( ... )` segment, each ending at the first `)` after its `(`.
/// An unclosed `(` is left in place.
fn strip_parenthesized(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Name without parenthesized qualifiers, normalized: `"City (Airport)"` → `"city"`.
pub fn alias(name: &str) -> String {
    normalize(&strip_parenthesized(name))
}

/// A station with its precomputed search keys.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndexEntry {
    pub station: Station,
    pub normalized_name: String,
    pub alias: String,
    pub id_lower: String,
}

impl SearchIndexEntry {
    pub fn new(station: Station) -> Self {
        Self {
            normalized_name: normalize(&station.station_name),
            alias: alias(&station.station_name),
            id_lower: station.station_id.to_lowercase(),
            station,
        }
    }

    /// `query` must already be normalized and non-empty.
    pub fn matches(&self, query: &str) -> bool {
        self.normalized_name.contains(query)
            || self.alias.contains(query)
            || self.id_lower.starts_with(query)
    }
}

/// Search keys for a whole station set, in directory order.
///
/// Built from a snapshot of the directory and never modified; build a new one
/// if the station set changes.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<SearchIndexEntry>,
    limit: usize,
}

impl SearchIndex {
    pub const DEFAULT_LIMIT: usize = 50;

    pub fn build(stations: &[Station]) -> Self {
        Self {
            entries: stations.iter().cloned().map(SearchIndexEntry::new).collect(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stations matching `text`, in directory order, at most `limit` of them.
    /// A query that normalizes to nothing matches nothing.
    pub fn query(&self, text: &str) -> Vec<&Station> {
        self.query_limited(text, self.limit)
    }

    pub fn query_limited(&self, text: &str, limit: usize) -> Vec<&Station> {
        let query = normalize(text);
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry.matches(&query))
            .map(|entry| &entry.station)
            .take(limit)
            .collect()
    }
}

//! Data model for the feed document.
//!
//! The feed is a JSON document with a top-level `items` array. Items are
//! immutable once loaded; a snapshot is only ever replaced wholesale, never
//! patched in place.

use serde::Deserialize;

/// Content kind tag carried by each feed item.
///
/// The wire format is open-ended: tags other than `game` and `post` must not
/// fail deserialization, so anything unrecognized maps to [`ItemKind::Other`]
/// and simply never matches a kind-specific bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ItemKind {
    Game,
    Post,
    #[default]
    Other,
}

impl From<String> for ItemKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "game" => ItemKind::Game,
            "post" => ItemKind::Post,
            _ => ItemKind::Other,
        }
    }
}

/// A single feed entry.
///
/// Only `id` and `title` are required by the wire format. Every other field
/// is optional and degrades gracefully rather than erroring: absent rank
/// keys sort as zero, and the renderer substitutes a placeholder thumbnail
/// and an inert anchor where those fields are missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: ItemKind,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Free-form display label, also used for tab bucket matching.
    #[serde(default)]
    pub category: String,
    /// Pre-formatted display string. Never parsed.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default, rename = "trendingScore")]
    pub trending_score: f64,
    #[serde(default, rename = "recommendedScore")]
    pub recommended_score: f64,
}

/// A complete feed snapshot.
///
/// Insertion order is irrelevant to output (every view re-sorts) but serves
/// as the tie-break for equal rank keys, so it is preserved as-is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Parse a feed document from raw bytes.
///
/// A document without an `items` field parses as an empty snapshot; that is
/// a valid (if useless) feed, not an error. Structurally invalid JSON or an
/// `items` entry of the wrong shape is an error, which callers recover from
/// by substituting the bundled sample snapshot.
pub fn parse_snapshot(bytes: &[u8]) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_slice(bytes)
}

//! Feed handling: data model, classification/ranking, HTTP retrieval, and
//! the bundled fallback snapshot.
//!
//! The module is organized into four submodules:
//!
//! - [`model`] - The feed document schema and its JSON parsing
//! - [`rank`] - Pure classification and ranking of items into section views
//! - [`loader`] - One-shot HTTP fetch with fallback substitution
//! - [`sample`] - The bundled snapshot used when the fetch fails

mod loader;
mod model;
mod rank;
mod sample;

pub use loader::{build_client, fetch_snapshot, load_feed, FetchError, LoadOutcome};
pub use model::{parse_snapshot, Item, ItemKind, Snapshot};
pub use rank::{
    derive_recommended, derive_tab_feed, derive_trending, derive_views, DerivedViews,
    SectionLabels, Tab, SECTION_CAP,
};
pub use sample::sample_snapshot;

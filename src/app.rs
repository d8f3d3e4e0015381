//! Application state and the event dispatcher.
//!
//! All mutable state lives in an explicit [`App`] struct and all control
//! flow arrives as explicit [`AppEvent`] values applied one at a time by
//! [`App::dispatch`]. Events are applied synchronously and sequentially;
//! there is no suspension point inside a dispatch, so no event ever
//! observes a half-applied snapshot.

use crate::feed::{derive_views, DerivedViews, SectionLabels, Snapshot, Tab};

/// Events consumed by the dispatcher.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Loader completion. Delivered exactly once per load; replaces the
    /// snapshot wholesale whether it came from the network or the bundled
    /// sample.
    FeedLoaded { snapshot: Snapshot, fallback: bool },
    /// A raw tab identifier reported by the outside world, which is not
    /// trusted to pre-validate it.
    TabSelected(String),
}

/// Application state: the current snapshot, the active tab, and the views
/// derived from that combination.
///
/// The views are re-derived on every dispatched event, including a
/// re-selection of the already-active tab. Derivation over a page-sized
/// snapshot is cheap; a suppressed re-render is not worth the staleness bug.
pub struct App {
    labels: SectionLabels,
    snapshot: Snapshot,
    current_tab: Tab,
    views: DerivedViews,
}

impl App {
    /// A fresh app: empty snapshot, `top` tab, empty views.
    pub fn new(labels: SectionLabels) -> Self {
        let mut app = Self {
            labels,
            snapshot: Snapshot::default(),
            current_tab: Tab::Top,
            views: DerivedViews::default(),
        };
        app.rederive();
        app
    }

    pub fn current_tab(&self) -> Tab {
        self.current_tab
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The section views consistent with the current snapshot and tab.
    pub fn views(&self) -> &DerivedViews {
        &self.views
    }

    /// Apply one event and re-derive all three views.
    pub fn dispatch(&mut self, event: AppEvent) {
        match event {
            AppEvent::FeedLoaded { snapshot, fallback } => {
                tracing::info!(
                    items = snapshot.items.len(),
                    fallback = fallback,
                    "feed snapshot applied"
                );
                // Single assignment: replacement is atomic with respect to
                // anything that renders after this dispatch returns.
                self.snapshot = snapshot;
            }
            AppEvent::TabSelected(raw) => {
                if Tab::parse(&raw).is_none() {
                    tracing::debug!(requested = %raw, "unknown tab identifier, using top");
                }
                self.current_tab = Tab::coerce(&raw);
            }
        }
        self.rederive();
    }

    fn rederive(&mut self) {
        self.views = derive_views(&self.snapshot.items, self.current_tab, &self.labels);
    }
}

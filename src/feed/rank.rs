//! Classification and ranking of feed items into ordered section views.
//!
//! Everything in this module is a pure function of a snapshot, the selected
//! tab, and the configured bucket labels. Views are freshly computed on
//! every call and never cached: recomputation is cheap and a stale view is
//! worse than a redundant one.
//!
//! Sorting is a stable descending sort on the tab's designated rank key.
//! Ties keep the snapshot's source order; there is no secondary key on id
//! or title.

use serde::Deserialize;

use super::model::{Item, ItemKind};

/// Hard cap applied to the trending and recommended rails after sorting.
/// Tab feeds are never truncated.
pub const SECTION_CAP: usize = 5;

// ============================================================================
// Tabs
// ============================================================================

/// The closed set of selectable tabs. Anything outside this set coerces to
/// [`Tab::Top`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Top,
    Game,
    Hobby,
    Article,
    Trending,
    Recommended,
}

impl Tab {
    /// All tabs in navigation order.
    pub const ALL: [Tab; 6] = [
        Tab::Top,
        Tab::Game,
        Tab::Hobby,
        Tab::Article,
        Tab::Trending,
        Tab::Recommended,
    ];

    /// Parse a raw identifier. `None` when the identifier is out of set.
    pub fn parse(raw: &str) -> Option<Tab> {
        match raw {
            "top" => Some(Tab::Top),
            "game" => Some(Tab::Game),
            "hobby" => Some(Tab::Hobby),
            "article" => Some(Tab::Article),
            "trending" => Some(Tab::Trending),
            "recommended" => Some(Tab::Recommended),
            _ => None,
        }
    }

    /// Coerce a raw identifier, falling back to [`Tab::Top`] for anything
    /// unrecognized. The outside world is not trusted to pre-validate.
    pub fn coerce(raw: &str) -> Tab {
        Tab::parse(raw).unwrap_or(Tab::Top)
    }

    /// Stable machine identifier, the inverse of [`Tab::parse`].
    pub fn id(self) -> &'static str {
        match self {
            Tab::Top => "top",
            Tab::Game => "game",
            Tab::Hobby => "hobby",
            Tab::Article => "article",
            Tab::Trending => "trending",
            Tab::Recommended => "recommended",
        }
    }

    /// Human-facing label for the tab navigation.
    pub fn display_name(self) -> &'static str {
        match self {
            Tab::Top => "Top",
            Tab::Game => "Games",
            Tab::Hobby => "Hobby",
            Tab::Article => "Articles",
            Tab::Trending => "Trending",
            Tab::Recommended => "Recommended",
        }
    }
}

// ============================================================================
// Bucket Labels
// ============================================================================

/// Category labels used for tab bucket matching.
///
/// The feed couples categories to display-language labels, so the exact
/// strings are configuration rather than literals baked into the classifier.
/// Matching is exact; there is no normalization or substring matching.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SectionLabels {
    pub game: String,
    pub hobby: String,
    pub article: String,
    pub announcement: String,
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self {
            game: "game".to_string(),
            hobby: "hobby".to_string(),
            article: "article".to_string(),
            announcement: "announcement".to_string(),
        }
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// The three section views derived from one snapshot + tab combination.
///
/// Each is an independent, freshly computed ordering; none aliases the
/// snapshot or another view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedViews {
    /// The main tab feed: filtered by the current tab, never truncated.
    pub feed: Vec<Item>,
    /// Trending rail: top [`SECTION_CAP`] by trending score.
    pub trending: Vec<Item>,
    /// Recommended rail: top [`SECTION_CAP`] by recommended score.
    pub recommended: Vec<Item>,
}

/// Derive all three views for the given tab.
pub fn derive_views(items: &[Item], tab: Tab, labels: &SectionLabels) -> DerivedViews {
    DerivedViews {
        feed: derive_tab_feed(items, tab, labels),
        trending: derive_trending(items),
        recommended: derive_recommended(items),
    }
}

/// Items belonging to `tab`, stably sorted descending by the tab's rank key.
///
/// Membership is non-exclusive: one item may appear in several tab feeds.
/// An empty result is a valid result, not an error.
pub fn derive_tab_feed(items: &[Item], tab: Tab, labels: &SectionLabels) -> Vec<Item> {
    match tab {
        Tab::Game => sorted_desc(
            collect_matching(items, |i| {
                i.kind == ItemKind::Game || i.category == labels.game
            }),
            |i| i.score,
        ),
        Tab::Hobby => sorted_desc(
            collect_matching(items, |i| i.category == labels.hobby),
            |i| i.score,
        ),
        Tab::Article => sorted_desc(
            collect_matching(items, |i| {
                i.kind == ItemKind::Post
                    || i.category == labels.article
                    || i.category == labels.announcement
            }),
            |i| i.score,
        ),
        Tab::Top => sorted_desc(items.to_vec(), |i| i.score),
        Tab::Trending => derive_trending(items),
        Tab::Recommended => derive_recommended(items),
    }
}

/// Top [`SECTION_CAP`] items by trending score, descending.
pub fn derive_trending(items: &[Item]) -> Vec<Item> {
    let mut view = sorted_desc(items.to_vec(), |i| i.trending_score);
    view.truncate(SECTION_CAP);
    view
}

/// Top [`SECTION_CAP`] items by recommended score, descending.
pub fn derive_recommended(items: &[Item]) -> Vec<Item> {
    let mut view = sorted_desc(items.to_vec(), |i| i.recommended_score);
    view.truncate(SECTION_CAP);
    view
}

fn collect_matching(items: &[Item], pred: impl Fn(&Item) -> bool) -> Vec<Item> {
    items.iter().filter(|i| pred(i)).cloned().collect()
}

/// Stable descending sort. `Vec::sort_by` is stable, so equal keys keep
/// their snapshot order.
fn sorted_desc(mut items: Vec<Item>, key: impl Fn(&Item) -> f64) -> Vec<Item> {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
    items
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: &str, kind: ItemKind, category: &str, score: f64) -> Item {
        Item {
            id: id.to_string(),
            kind,
            title: format!("Item {id}"),
            thumbnail: None,
            category: category.to_string(),
            time: String::new(),
            badge: None,
            url: None,
            score,
            trending_score: 0.0,
            recommended_score: 0.0,
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn labels() -> SectionLabels {
        SectionLabels::default()
    }

    #[test]
    fn test_tab_parse_round_trips() {
        for tab in Tab::ALL {
            assert_eq!(Tab::parse(tab.id()), Some(tab));
        }
    }

    #[test]
    fn test_tab_coerce_out_of_set_to_top() {
        assert_eq!(Tab::coerce("nonexistent"), Tab::Top);
        assert_eq!(Tab::coerce(""), Tab::Top);
        assert_eq!(Tab::coerce("TOP"), Tab::Top);
        assert_eq!(Tab::coerce("game "), Tab::Top);
        assert_eq!(Tab::coerce("game"), Tab::Game);
    }

    #[test]
    fn test_game_tab_matches_kind_or_category() {
        let items = vec![
            item("by-kind", ItemKind::Game, "arcade", 10.0),
            item("by-category", ItemKind::Other, "game", 20.0),
            item("neither", ItemKind::Post, "article", 30.0),
        ];

        let feed = derive_tab_feed(&items, Tab::Game, &labels());
        assert_eq!(ids(&feed), vec!["by-category", "by-kind"]);
    }

    #[test]
    fn test_hobby_tab_matches_category_only() {
        let items = vec![
            item("1", ItemKind::Game, "game", 50.0),
            item("2", ItemKind::Other, "hobby", 90.0),
        ];

        let feed = derive_tab_feed(&items, Tab::Hobby, &labels());
        assert_eq!(ids(&feed), vec!["2"]);
    }

    #[test]
    fn test_article_tab_matches_post_article_or_announcement() {
        let items = vec![
            item("post", ItemKind::Post, "misc", 10.0),
            item("article", ItemKind::Other, "article", 20.0),
            item("announcement", ItemKind::Other, "announcement", 30.0),
            item("game", ItemKind::Game, "game", 40.0),
        ];

        let feed = derive_tab_feed(&items, Tab::Article, &labels());
        assert_eq!(ids(&feed), vec!["announcement", "article", "post"]);
    }

    #[test]
    fn test_top_tab_is_unfiltered_and_score_sorted() {
        let items = vec![
            item("1", ItemKind::Other, "game", 50.0),
            item("2", ItemKind::Other, "hobby", 90.0),
        ];

        let feed = derive_tab_feed(&items, Tab::Top, &labels());
        assert_eq!(ids(&feed), vec!["2", "1"]);
    }

    #[test]
    fn test_missing_score_sorts_as_zero() {
        let items = vec![
            item("unscored", ItemKind::Other, "", 0.0),
            item("scored", ItemKind::Other, "", 1.0),
            item("also-unscored", ItemKind::Other, "", 0.0),
        ];

        let feed = derive_tab_feed(&items, Tab::Top, &labels());
        // Zero-scored items rank below score 1 and keep their relative order.
        assert_eq!(ids(&feed), vec!["scored", "unscored", "also-unscored"]);
    }

    #[test]
    fn test_ties_preserve_snapshot_order() {
        let items = vec![
            item("a", ItemKind::Other, "", 10.0),
            item("b", ItemKind::Other, "", 10.0),
            item("c", ItemKind::Other, "", 10.0),
        ];

        let feed = derive_tab_feed(&items, Tab::Top, &labels());
        assert_eq!(ids(&feed), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_trending_caps_at_five_by_trending_score() {
        let items: Vec<Item> = (0..7)
            .map(|n| {
                let mut i = item(&n.to_string(), ItemKind::Other, "", 100.0 - n as f64);
                i.trending_score = n as f64; // inverse of score
                i.recommended_score = 50.0;
                i
            })
            .collect();

        let trending = derive_trending(&items);
        // The five highest trending scores, descending, regardless of score.
        assert_eq!(ids(&trending), vec!["6", "5", "4", "3", "2"]);
    }

    #[test]
    fn test_recommended_caps_at_five_by_recommended_score() {
        let items: Vec<Item> = (0..6)
            .map(|n| {
                let mut i = item(&n.to_string(), ItemKind::Other, "", 0.0);
                i.recommended_score = n as f64;
                i
            })
            .collect();

        let recommended = derive_recommended(&items);
        assert_eq!(ids(&recommended), vec!["5", "4", "3", "2", "1"]);
    }

    #[test]
    fn test_rails_ignore_active_tab() {
        let items = vec![
            item("g", ItemKind::Game, "game", 10.0),
            item("h", ItemKind::Other, "hobby", 20.0),
        ];

        let on_game = derive_views(&items, Tab::Game, &labels());
        let on_hobby = derive_views(&items, Tab::Hobby, &labels());
        assert_eq!(on_game.trending, on_hobby.trending);
        assert_eq!(on_game.recommended, on_hobby.recommended);
    }

    #[test]
    fn test_trending_tab_feed_equals_trending_rail() {
        let items: Vec<Item> = (0..8)
            .map(|n| {
                let mut i = item(&n.to_string(), ItemKind::Other, "", 0.0);
                i.trending_score = (n * 3 % 7) as f64;
                i
            })
            .collect();

        let views = derive_views(&items, Tab::Trending, &labels());
        assert_eq!(views.feed, views.trending);
    }

    #[test]
    fn test_empty_snapshot_yields_empty_views() {
        let views = derive_views(&[], Tab::Top, &labels());
        assert!(views.feed.is_empty());
        assert!(views.trending.is_empty());
        assert!(views.recommended.is_empty());
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let items = vec![
            item("1", ItemKind::Game, "game", 50.0),
            item("2", ItemKind::Other, "hobby", 90.0),
            item("3", ItemKind::Post, "article", 70.0),
        ];

        let first = derive_views(&items, Tab::Article, &labels());
        let second = derive_views(&items, Tab::Article, &labels());
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_labels_rebind_buckets() {
        let labels = SectionLabels {
            game: "ゲーム".to_string(),
            hobby: "趣味".to_string(),
            article: "記事".to_string(),
            announcement: "お知らせ".to_string(),
        };
        let items = vec![
            item("1", ItemKind::Other, "ゲーム", 10.0),
            item("2", ItemKind::Other, "趣味", 20.0),
            item("3", ItemKind::Other, "お知らせ", 30.0),
        ];

        assert_eq!(ids(&derive_tab_feed(&items, Tab::Game, &labels)), vec!["1"]);
        assert_eq!(ids(&derive_tab_feed(&items, Tab::Hobby, &labels)), vec!["2"]);
        assert_eq!(
            ids(&derive_tab_feed(&items, Tab::Article, &labels)),
            vec!["3"]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_item() -> impl Strategy<Value = Item> {
            (
                "[a-z]{1,8}",
                prop_oneof![
                    Just(ItemKind::Game),
                    Just(ItemKind::Post),
                    Just(ItemKind::Other)
                ],
                prop_oneof![
                    Just("game".to_string()),
                    Just("hobby".to_string()),
                    Just("article".to_string()),
                    Just("announcement".to_string()),
                    Just("misc".to_string()),
                ],
                0u32..100,
                0u32..100,
                0u32..100,
            )
                .prop_map(|(id, kind, category, score, trending, recommended)| Item {
                    id,
                    kind,
                    title: "t".to_string(),
                    thumbnail: None,
                    category,
                    time: String::new(),
                    badge: None,
                    url: None,
                    score: score.into(),
                    trending_score: trending.into(),
                    recommended_score: recommended.into(),
                })
        }

        proptest! {
            #[test]
            fn rails_never_exceed_cap(items in proptest::collection::vec(arb_item(), 0..20)) {
                prop_assert!(derive_trending(&items).len() <= SECTION_CAP);
                prop_assert!(derive_recommended(&items).len() <= SECTION_CAP);
            }

            #[test]
            fn rails_are_sorted_descending(items in proptest::collection::vec(arb_item(), 0..20)) {
                let trending = derive_trending(&items);
                prop_assert!(trending.windows(2).all(|w| w[0].trending_score >= w[1].trending_score));
                let recommended = derive_recommended(&items);
                prop_assert!(recommended.windows(2).all(|w| w[0].recommended_score >= w[1].recommended_score));
            }

            #[test]
            fn tab_feed_has_no_false_members(items in proptest::collection::vec(arb_item(), 0..20)) {
                let labels = SectionLabels::default();
                let feed = derive_tab_feed(&items, Tab::Game, &labels);
                prop_assert!(feed.iter().all(|i| i.kind == ItemKind::Game || i.category == labels.game));

                let member_count = items
                    .iter()
                    .filter(|i| i.kind == ItemKind::Game || i.category == labels.game)
                    .count();
                prop_assert_eq!(feed.len(), member_count);
            }

            #[test]
            fn top_is_a_permutation(items in proptest::collection::vec(arb_item(), 0..20)) {
                let feed = derive_tab_feed(&items, Tab::Top, &SectionLabels::default());
                prop_assert_eq!(feed.len(), items.len());
            }

            #[test]
            fn derivation_is_deterministic(
                items in proptest::collection::vec(arb_item(), 0..20),
                raw_tab in "[a-z]{0,12}",
            ) {
                let labels = SectionLabels::default();
                let tab = Tab::coerce(&raw_tab);
                prop_assert_eq!(
                    derive_views(&items, tab, &labels),
                    derive_views(&items, tab, &labels)
                );
            }

            #[test]
            fn equal_keys_keep_source_order(items in proptest::collection::vec(arb_item(), 0..20)) {
                // Flatten every score to the same value: sorting must then be
                // the identity on the filtered sequence.
                let flat: Vec<Item> = items
                    .iter()
                    .cloned()
                    .map(|mut i| {
                        i.score = 7.0;
                        i
                    })
                    .collect();
                let feed = derive_tab_feed(&flat, Tab::Top, &SectionLabels::default());
                let expected: Vec<&str> = flat.iter().map(|i| i.id.as_str()).collect();
                let got: Vec<&str> = feed.iter().map(|i| i.id.as_str()).collect();
                prop_assert_eq!(got, expected);
            }
        }
    }
}

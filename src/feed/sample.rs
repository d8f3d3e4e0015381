//! Bundled sample feed.
//!
//! Substituted whenever the real feed document cannot be fetched or parsed,
//! so the page always renders something. Categories here use the default
//! [`SectionLabels`](super::SectionLabels) strings so the fallback snapshot
//! classifies the same way a healthy feed would.

use super::model::{Item, ItemKind, Snapshot};

/// Illustrative items shown when the feed document is unreachable or
/// malformed.
pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        items: vec![
            Item {
                id: "1".to_string(),
                kind: ItemKind::Game,
                title: "Old Maid (in progress)".to_string(),
                thumbnail: None,
                category: "game".to_string(),
                time: "1 hour ago".to_string(),
                badge: Some("NEW".to_string()),
                url: Some("./games/old-maid/".to_string()),
                score: 100.0,
                trending_score: 90.0,
                recommended_score: 85.0,
            },
            Item {
                id: "2".to_string(),
                kind: ItemKind::Post,
                title: "Development roadmap published".to_string(),
                thumbnail: None,
                category: "article".to_string(),
                time: "2 hours ago".to_string(),
                badge: None,
                url: Some("/roadmap.html".to_string()),
                score: 90.0,
                trending_score: 70.0,
                recommended_score: 80.0,
            },
            Item {
                id: "3".to_string(),
                kind: ItemKind::Post,
                title: "The site is now open".to_string(),
                thumbnail: None,
                category: "announcement".to_string(),
                time: "1 day ago".to_string(),
                badge: None,
                url: None,
                score: 80.0,
                trending_score: 50.0,
                recommended_score: 60.0,
            },
            Item {
                id: "4".to_string(),
                kind: ItemKind::Game,
                title: "Next game in planning".to_string(),
                thumbnail: None,
                category: "game".to_string(),
                time: "3 days ago".to_string(),
                badge: Some("Coming soon".to_string()),
                url: None,
                score: 70.0,
                trending_score: 40.0,
                recommended_score: 50.0,
            },
            Item {
                id: "5".to_string(),
                kind: ItemKind::Post,
                title: "Hobby log: music production".to_string(),
                thumbnail: None,
                category: "hobby".to_string(),
                time: "1 week ago".to_string(),
                badge: None,
                url: None,
                score: 60.0,
                trending_score: 30.0,
                recommended_score: 40.0,
            },
        ],
    }
}

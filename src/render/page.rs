//! Assembly of the home page document.
//!
//! The renderer iterates the derived views read-only and maps each item to
//! markup; it never feeds anything back into the classifier. Every
//! interpolated value passes through [`escape`], URLs included.
//!
//! Empty sections render an explicit "nothing here" paragraph, never an
//! empty container.

use crate::feed::{DerivedViews, Item, Tab};

use super::html::escape;

/// Shown in the main feed when the current tab filters to nothing.
const EMPTY_FEED: &str = "There is no content to show.";
/// Shown in the trending rail when the snapshot is empty.
const EMPTY_TRENDING: &str = "No trending items right now.";
/// Shown in the recommended rail when the snapshot is empty.
const EMPTY_RECOMMENDED: &str = "No recommended topics right now.";

/// Render the complete standalone home page for the given views and tab.
pub fn render_page(views: &DerivedViews, current_tab: Tab, page_title: &str) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\" />\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    out.push_str(&format!("<title>{}</title>\n", escape(page_title)));
    out.push_str("</head>\n<body>\n");

    out.push_str(&tab_nav(current_tab));

    out.push_str("<main class=\"home-grid\">\n");
    out.push_str(&section(
        "feed-items",
        "feed",
        &feed_markup(&views.feed),
    ));
    out.push_str(&section(
        "trending-items",
        "trending",
        &rail_markup(&views.trending, "trending-item", EMPTY_TRENDING),
    ));
    out.push_str(&section(
        "recommended-items",
        "recommended",
        &rail_markup(&views.recommended, "recommended-item", EMPTY_RECOMMENDED),
    ));
    out.push_str("</main>\n</body>\n</html>\n");

    out
}

/// Tab navigation: one button per tab in fixed order, the active one
/// carrying `class="tab active"` and `aria-selected="true"`.
fn tab_nav(current: Tab) -> String {
    let mut out = String::from("<nav class=\"category-tabs\" role=\"tablist\">\n");
    for tab in Tab::ALL {
        let active = tab == current;
        out.push_str(&format!(
            "<button class=\"{}\" role=\"tab\" data-tab=\"{}\" aria-selected=\"{}\">{}</button>\n",
            if active { "tab active" } else { "tab" },
            tab.id(),
            active,
            tab.display_name(),
        ));
    }
    out.push_str("</nav>\n");
    out
}

fn section(container_id: &str, class: &str, body: &str) -> String {
    format!(
        "<section class=\"{class}\"><div id=\"{container_id}\">\n{body}</div></section>\n"
    )
}

fn feed_markup(items: &[Item]) -> String {
    if items.is_empty() {
        return empty_message(EMPTY_FEED);
    }
    items.iter().map(feed_card).collect()
}

fn rail_markup(items: &[Item], class: &str, empty: &str) -> String {
    if items.is_empty() {
        return empty_message(empty);
    }
    items.iter().map(|i| row_item(i, class)).collect()
}

fn empty_message(text: &str) -> String {
    format!("<p class=\"meta\">{}</p>\n", escape(text))
}

/// A main-feed card: thumbnail (or placeholder), title, and a meta row of
/// category, time, and optional badge.
fn feed_card(item: &Item) -> String {
    let mut meta = String::new();
    if !item.category.is_empty() {
        meta.push_str(&format!("<span>{}</span>", escape(&item.category)));
    }
    if !item.time.is_empty() {
        meta.push_str(&format!("<span>{}</span>", escape(&item.time)));
    }
    if let Some(badge) = &item.badge {
        meta.push_str(&format!("<span class=\"badge\">{}</span>", escape(badge)));
    }

    format!(
        concat!(
            "<a class=\"feed-card\" href=\"{href}\">",
            "<div class=\"thumb-wrap\">{thumb}</div>",
            "<div class=\"body\">",
            "<h3 class=\"title\">{title}</h3>",
            "<div class=\"meta\">{meta}</div>",
            "</div></a>\n"
        ),
        href = href(item),
        thumb = thumbnail(item),
        title = escape(&item.title),
        meta = meta,
    )
}

/// A compact rail entry for the trending and recommended sections.
fn row_item(item: &Item, class: &str) -> String {
    format!(
        concat!(
            "<a class=\"{class}\" href=\"{href}\">",
            "{thumb}",
            "<div class=\"body\">",
            "<span class=\"title\">{title}</span>",
            "<div class=\"meta\">{category} · {time}</div>",
            "</div></a>\n"
        ),
        class = class,
        href = href(item),
        thumb = thumbnail(item),
        title = escape(&item.title),
        category = escape(&item.category),
        time = escape(&item.time),
    )
}

/// A missing url renders an inert anchor, not a broken one.
fn href(item: &Item) -> String {
    escape(item.url.as_deref().unwrap_or("#")).into_owned()
}

fn thumbnail(item: &Item) -> String {
    match &item.thumbnail {
        Some(src) => format!(
            "<img class=\"thumb\" src=\"{}\" alt=\"\" loading=\"lazy\" />",
            escape(src)
        ),
        None => "<div class=\"thumb thumb-placeholder\"></div>".to_string(),
    }
}

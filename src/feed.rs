use anyhow::{Result, anyhow};
use crate::models::{Event, FeedItem, FeedKind, FeedPage, FeedSources, Post, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Post,
    Event,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Post => "post",
            TypeFilter::Event => "event",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(TypeFilter::All),
            "post" => Some(TypeFilter::Post),
            "event" => Some(TypeFilter::Event),
            _ => None,
        }
    }

    fn accepts(&self, kind: FeedKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Post => kind == FeedKind::Post,
            TypeFilter::Event => kind == FeedKind::Event,
        }
    }
}

/// Merges posts and events into one feed, newest first.
/// The sort is stable: items with equal timestamps keep insertion order
/// (posts in input order, then events in input order).
pub fn merge_feed(posts: Vec<Post>, events: Vec<Event>) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = posts
        .into_iter()
        .map(FeedItem::from)
        .chain(events.into_iter().map(FeedItem::from))
        .collect();

    items.sort_by(|a, b| b.published.cmp(&a.published));
    items
}

/// Returns the `[offset, offset + limit)` page of the merged feed.
/// `total` counts the merged feed before slicing; `has_more` is true
/// exactly when `offset + limit < total`.
pub fn feed_page(posts: Vec<Post>, events: Vec<Event>, offset: usize, limit: usize) -> FeedPage {
    let merged = merge_feed(posts, events);
    let total = merged.len();
    let has_more = offset + limit < total;

    let items = merged
        .into_iter()
        .skip(offset)
        .take(limit)
        .collect();

    FeedPage { items, total, has_more }
}

/// Searches the merged feed. The type filter is applied first, then the
/// query; an empty or whitespace-only query matches everything of the
/// requested type. Results are unpaginated, newest first.
pub fn search_feed(
    posts: Vec<Post>,
    events: Vec<Event>,
    query: &str,
    filter: TypeFilter,
) -> SearchResult {
    let query = query.trim().to_lowercase();

    let mut items: Vec<FeedItem> = posts
        .into_iter()
        .map(FeedItem::from)
        .chain(events.into_iter().map(FeedItem::from))
        .filter(|item| filter.accepts(item.kind))
        .filter(|item| query.is_empty() || matches_query(item, &query))
        .collect();

    items.sort_by(|a, b| b.published.cmp(&a.published));

    let total = items.len();
    SearchResult { items, total }
}

// Case-insensitive substring match; `needle` is already lower-cased.
fn matches_query(item: &FeedItem, needle: &str) -> bool {
    if item.title.to_lowercase().contains(needle)
        || item.short_description.to_lowercase().contains(needle)
    {
        return true;
    }

    if let Some(ref long) = item.long_description {
        if long.to_lowercase().contains(needle) {
            return true;
        }
    }

    if let Some(ref address) = item.address {
        if address.to_lowercase().contains(needle) {
            return true;
        }
    }

    false
}

/// Folds the two source fetch outcomes into one feed input. One failed
/// source degrades to a warning and the surviving items; both failing is
/// an error for the whole feed.
pub fn collect_sources(
    posts: Result<Vec<Post>>,
    events: Result<Vec<Event>>,
) -> Result<FeedSources> {
    match (posts, events) {
        (Ok(posts), Ok(events)) => Ok(FeedSources {
            posts,
            events,
            warnings: Vec::new(),
        }),
        (Ok(posts), Err(e)) => Ok(FeedSources {
            posts,
            events: Vec::new(),
            warnings: vec![format!("events unavailable: {}", e)],
        }),
        (Err(e), Ok(events)) => Ok(FeedSources {
            posts: Vec::new(),
            events,
            warnings: vec![format!("posts unavailable: {}", e)],
        }),
        (Err(posts_err), Err(events_err)) => Err(anyhow!(
            "both feed sources failed: posts: {}; events: {}",
            posts_err,
            events_err
        )),
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod feed_tests;

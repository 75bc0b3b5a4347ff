//! Free-text search across posts and gallery items.
//!
//! ## Matching
//!
//! The query is lower-cased and matched as a plain substring. A post matches
//! when its title or excerpt contains the query; a gallery item when its title
//! or description does. No trimming, tokenizing, accent folding or scoring:
//! `" "` is a real query and matches anything containing a space.
//!
//! ## Ordering
//!
//! All blog matches in store order, then all gallery matches in store order.
//! The two id spaces are independent, so there is nothing to deduplicate.
//!
//! ## Scale
//!
//! Every query is a direct scan of both collections. Collections are a few
//! dozen records at most; an index would cost more than it saves.

use crate::store::ContentStore;
use crate::types::{ContentKind, ContentRef, GalleryItem, Post};
use serde::Serialize;
use tracing::debug;

/// One match, tagged with the collection it came from.
///
/// Serializes as the record's fields plus `"type": "blog" | "gallery"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult<'a> {
    Blog(&'a Post),
    Gallery(&'a GalleryItem),
}

impl<'a> SearchResult<'a> {
    pub fn kind(&self) -> ContentKind {
        match self {
            SearchResult::Blog(_) => ContentKind::Blog,
            SearchResult::Gallery(_) => ContentKind::Gallery,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            SearchResult::Blog(p) => p.id,
            SearchResult::Gallery(g) => g.id,
        }
    }

    pub fn title(&self) -> &'a str {
        match self {
            SearchResult::Blog(p) => &p.title,
            SearchResult::Gallery(g) => &g.title,
        }
    }

    /// Excerpt for posts, description for gallery items.
    pub fn summary(&self) -> &'a str {
        match self {
            SearchResult::Blog(p) => &p.excerpt,
            SearchResult::Gallery(g) => &g.description,
        }
    }

    pub fn content_ref(&self) -> ContentRef {
        ContentRef {
            kind: self.kind(),
            id: self.id(),
        }
    }
}

/// Search state as the result panel sees it.
///
/// `Idle` (nothing typed) and `Results(vec![])` (typed, nothing matched) are
/// different: only the latter shows a "no results" message.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    Idle,
    Results(Vec<SearchResult<'a>>),
}

impl<'a> SearchOutcome<'a> {
    pub fn results(&self) -> &[SearchResult<'a>] {
        match self {
            SearchOutcome::Idle => &[],
            SearchOutcome::Results(r) => r,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SearchOutcome::Idle)
    }
}

/// Search both collections for `query`.
///
/// An empty query returns no results.
pub fn search<'a>(query: &str, store: &'a ContentStore) -> Vec<SearchResult<'a>> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let blog = store
        .posts()
        .iter()
        .filter(|p| contains(&p.title, &needle) || contains(&p.excerpt, &needle))
        .map(SearchResult::Blog);

    let gallery = store
        .gallery_items()
        .iter()
        .filter(|g| contains(&g.title, &needle) || contains(&g.description, &needle))
        .map(SearchResult::Gallery);

    let results: Vec<_> = blog.chain(gallery).collect();
    debug!(query, matches = results.len(), "search");
    results
}

/// Like [`search`], but keeps "nothing typed" apart from "nothing found".
pub fn search_outcome<'a>(query: &str, store: &'a ContentStore) -> SearchOutcome<'a> {
    if query.is_empty() {
        SearchOutcome::Idle
    } else {
        SearchOutcome::Results(search(query, store))
    }
}

fn contains(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}

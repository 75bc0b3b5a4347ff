//! The content store: the two read-only collections everything else reads.
//!
//! A store is built once, before any filtering or searching happens, and is
//! never mutated afterwards. There are three ways to get one:
//!
//! - [`ContentStore::sample`]: the dataset compiled into the binary from
//!   `data/content.toml`.
//! - [`ContentStore::load`] / [`ContentStore::from_toml_str`]: a content file
//!   with the same shape.
//! - [`ContentStore::empty`]: what callers use before a load has finished.
//!   The engines treat it as two empty collections.
//!
//! ## File format
//!
//! ```toml
//! [[posts]]
//! id = 1
//! title = "Intro to Sockets"
//! category = "java"
//! date = "12/10/2025"
//! excerpt = "Short summary"
//! content = "Long body, markdown or HTML"
//! image = "image/img1.jpg"
//!
//! [[gallery]]
//! id = 1
//! title = "Portrait"
//! description = "<b>Genre:</b> Portrait"
//! image = "image/img12.jpg"
//! ```
//!
//! Either array may be omitted. Unknown keys are rejected.

use crate::types::{ContentKind, ContentRef, GalleryItem, Post};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const SAMPLE_CONTENT: &str = include_str!("../data/content.toml");

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid content: {0}")]
    Invalid(String),
}

/// Immutable holder of all posts and gallery items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentStore {
    posts: Vec<Post>,
    gallery: Vec<GalleryItem>,
}

/// A record resolved from a [`ContentRef`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    Post(&'a Post),
    Gallery(&'a GalleryItem),
}

impl Entry<'_> {
    pub fn title(&self) -> &str {
        match self {
            Entry::Post(p) => &p.title,
            Entry::Gallery(g) => &g.title,
        }
    }

    pub fn image(&self) -> &str {
        match self {
            Entry::Post(p) => &p.image,
            Entry::Gallery(g) => &g.image,
        }
    }
}

impl ContentStore {
    /// A store with no content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a store from already-constructed collections, validating them.
    pub fn new(posts: Vec<Post>, gallery: Vec<GalleryItem>) -> Result<Self, StoreError> {
        let store = Self { posts, gallery };
        store.validate()?;
        Ok(store)
    }

    /// The dataset embedded in the binary.
    pub fn sample() -> Self {
        Self::from_toml_str(SAMPLE_CONTENT).expect("embedded sample content must parse")
    }

    /// Parse and validate a content file's text.
    pub fn from_toml_str(content: &str) -> Result<Self, StoreError> {
        let store: ContentStore = toml::from_str(content)?;
        store.validate()?;
        debug!(
            posts = store.posts.len(),
            gallery = store.gallery.len(),
            "parsed content"
        );
        Ok(store)
    }

    /// Read a content file from disk.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        let store = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            posts = store.posts.len(),
            gallery = store.gallery.len(),
            "loaded content store"
        );
        Ok(store)
    }

    /// Posts in insertion order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Gallery items in insertion order.
    pub fn gallery_items(&self) -> &[GalleryItem] {
        &self.gallery
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.gallery.is_empty()
    }

    pub fn post(&self, id: u32) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn gallery_item(&self, id: u32) -> Option<&GalleryItem> {
        self.gallery.iter().find(|g| g.id == id)
    }

    /// Resolve a click or selection to its record.
    pub fn resolve(&self, target: ContentRef) -> Option<Entry<'_>> {
        match target.kind {
            ContentKind::Blog => self.post(target.id).map(Entry::Post),
            ContentKind::Gallery => self.gallery_item(target.id).map(Entry::Gallery),
        }
    }

    /// Distinct post categories, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.posts
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    fn validate(&self) -> Result<(), StoreError> {
        let mut post_ids = HashSet::new();
        for post in &self.posts {
            check_record(ContentKind::Blog, post.id, &post.title)?;
            if post.category.trim().is_empty() {
                return Err(StoreError::Invalid(format!(
                    "post {} has an empty category",
                    post.id
                )));
            }
            if !post_ids.insert(post.id) {
                return Err(StoreError::Invalid(format!("duplicate post id {}", post.id)));
            }
        }

        let mut gallery_ids = HashSet::new();
        for item in &self.gallery {
            check_record(ContentKind::Gallery, item.id, &item.title)?;
            if !gallery_ids.insert(item.id) {
                return Err(StoreError::Invalid(format!(
                    "duplicate gallery id {}",
                    item.id
                )));
            }
        }
        Ok(())
    }
}

fn check_record(kind: ContentKind, id: u32, title: &str) -> Result<(), StoreError> {
    if id == 0 {
        return Err(StoreError::Invalid(format!("{kind} id must be positive")));
    }
    if title.trim().is_empty() {
        return Err(StoreError::Invalid(format!("{kind} {id} has an empty title")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gallery, post, write_content};
    use tempfile::TempDir;

    #[test]
    fn sample_has_nine_posts_and_seven_gallery_items() {
        let store = ContentStore::sample();
        assert_eq!(store.posts().len(), 9);
        assert_eq!(store.gallery_items().len(), 7);
    }

    #[test]
    fn sample_embedded_content_parses() {
        ContentStore::from_toml_str(SAMPLE_CONTENT).unwrap();
    }

    #[test]
    fn sample_preserves_insertion_order() {
        let store = ContentStore::sample();
        let post_ids: Vec<u32> = store.posts().iter().map(|p| p.id).collect();
        assert_eq!(post_ids, (1..=9).collect::<Vec<_>>());
        let gallery_ids: Vec<u32> = store.gallery_items().iter().map(|g| g.id).collect();
        assert_eq!(gallery_ids, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn sample_categories_in_first_appearance_order() {
        let store = ContentStore::sample();
        assert_eq!(store.categories(), vec!["java", "javascript"]);
    }

    #[test]
    fn empty_store_has_no_content() {
        let store = ContentStore::empty();
        assert!(store.is_empty());
        assert!(store.posts().is_empty());
        assert!(store.gallery_items().is_empty());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let store = ContentStore::from_toml_str(
            r#"
[[gallery]]
id = 1
title = "Only gallery"
description = "d"
image = "a.jpg"
"#,
        )
        .unwrap();
        assert!(store.posts().is_empty());
        assert_eq!(store.gallery_items().len(), 1);
    }

    #[test]
    fn unknown_top_level_key_rejected() {
        let result = ContentStore::from_toml_str("videos = []");
        assert!(matches!(result, Err(StoreError::Toml(_))));
    }

    #[test]
    fn duplicate_post_id_rejected() {
        let result = ContentStore::new(vec![post(1, "java", "A"), post(1, "java", "B")], vec![]);
        assert!(matches!(result, Err(StoreError::Invalid(_))));
    }

    #[test]
    fn duplicate_gallery_id_rejected() {
        let result = ContentStore::new(vec![], vec![gallery(2, "A", ""), gallery(2, "B", "")]);
        assert!(matches!(result, Err(StoreError::Invalid(_))));
    }

    #[test]
    fn same_id_across_collections_allowed() {
        let store = ContentStore::new(vec![post(1, "java", "A")], vec![gallery(1, "B", "")]).unwrap();
        assert_eq!(store.post(1).unwrap().title, "A");
        assert_eq!(store.gallery_item(1).unwrap().title, "B");
    }

    #[test]
    fn zero_id_rejected() {
        let result = ContentStore::new(vec![post(0, "java", "A")], vec![]);
        assert!(matches!(result, Err(StoreError::Invalid(_))));
    }

    #[test]
    fn empty_title_rejected() {
        let result = ContentStore::new(vec![], vec![gallery(1, "  ", "")]);
        assert!(matches!(result, Err(StoreError::Invalid(_))));
    }

    #[test]
    fn empty_category_rejected() {
        let result = ContentStore::new(vec![post(1, "", "A")], vec![]);
        assert!(matches!(result, Err(StoreError::Invalid(_))));
    }

    #[test]
    fn resolve_uses_kind_and_id() {
        let store = ContentStore::sample();
        let post = store.resolve(ContentRef::blog(6)).unwrap();
        assert!(post.title().starts_with("Fetch API"));
        let item = store.resolve(ContentRef::gallery(5)).unwrap();
        assert_eq!(item.title(), "Seascape");
        assert_eq!(item.image(), "image/img18.jpg");
    }

    #[test]
    fn resolve_unknown_id_is_none() {
        let store = ContentStore::sample();
        assert!(store.resolve(ContentRef::blog(42)).is_none());
        assert!(store.resolve(ContentRef::gallery(8)).is_none());
    }

    #[test]
    fn load_reads_file() {
        let (_tmp, path) = write_content(SAMPLE_CONTENT, None);
        let store = ContentStore::load(&path).unwrap();
        assert_eq!(store, ContentStore::sample());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = ContentStore::load(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}

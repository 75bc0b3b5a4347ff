//! Content records shared by the store, the engines and the renderer.
//!
//! Records are plain immutable values. The two collections have independent
//! id spaces: post 3 and gallery item 3 are unrelated, so anything that needs
//! to point at a record carries a [`ContentRef`] (kind plus id), never a bare id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Post {
    /// Stable identity assigned at authoring time, unique among posts.
    pub id: u32,
    pub title: String,
    /// Category token matched by the filter bar (e.g. `java`).
    pub category: String,
    /// Display-only date text. Never parsed or compared.
    pub date: String,
    /// Short summary shown on the card. Searched together with the title.
    pub excerpt: String,
    /// Long-form body (markdown, raw HTML passes through).
    pub content: String,
    /// Path of the cover image, relative to the assets directory.
    pub image: String,
}

/// A portfolio or certificate entry shown in the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryItem {
    /// Unique among gallery items only.
    pub id: u32,
    pub title: String,
    /// Rich text (inline HTML allowed). Searched together with the title.
    pub description: String,
    pub image: String,
}

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Blog,
    Gallery,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::Gallery => "gallery",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blog" | "post" => Ok(ContentKind::Blog),
            "gallery" => Ok(ContentKind::Gallery),
            other => Err(format!("unknown content kind '{other}' (expected blog or gallery)")),
        }
    }
}

/// Reference to one record: what a card or search result click carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: u32,
}

impl ContentRef {
    pub fn blog(id: u32) -> Self {
        Self {
            kind: ContentKind::Blog,
            id,
        }
    }

    pub fn gallery(id: u32) -> Self {
        Self {
            kind: ContentKind::Gallery,
            id,
        }
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

//! Shared test utilities for the folio test suite.
//!
//! Record builders keep test data short and readable; extractors turn engine
//! output into comparable values.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = ContentStore::new(
//!     vec![post(1, "java", "Sockets")],
//!     vec![gallery(1, "Portrait", "Natural light")],
//! ).unwrap();
//! assert_eq!(result_refs(&search("portrait", &store)), vec![ContentRef::gallery(1)]);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::search::SearchResult;
use crate::types::{ContentRef, GalleryItem, Post};

// =========================================================================
// Record builders
// =========================================================================

/// A post whose excerpt is `"Excerpt for {title}"`.
pub fn post(id: u32, category: &str, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        category: category.to_string(),
        date: "01/01/2025".to_string(),
        excerpt: format!("Excerpt for {title}"),
        content: format!("Body of {title}"),
        image: format!("image/post{id}.jpg"),
    }
}

pub fn gallery(id: u32, title: &str, description: &str) -> GalleryItem {
    GalleryItem {
        id,
        title: title.to_string(),
        description: description.to_string(),
        image: format!("image/gallery{id}.jpg"),
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Kind and id of every result, in order.
pub fn result_refs(results: &[SearchResult<'_>]) -> Vec<ContentRef> {
    results.iter().map(SearchResult::content_ref).collect()
}

// =========================================================================
// Filesystem
// =========================================================================

/// Write `content.toml` (and `config.toml` when given) into a fresh temp dir.
///
/// Returns the dir and the content file path.
pub fn write_content(content: &str, config: Option<&str>) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("content.toml");
    std::fs::write(&path, content).unwrap();
    if let Some(config) = config {
        std::fs::write(tmp.path().join("config.toml"), config).unwrap();
    }
    (tmp, path)
}

/// Read a generated file, panicking with its path on failure.
pub fn read_output(dir: &Path, rel: &str) -> String {
    let path = dir.join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

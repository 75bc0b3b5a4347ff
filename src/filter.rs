//! Category filtering for the blog and certificates grids.
//!
//! The filter bar offers three kinds of token:
//!
//! | Token | Post grid | Gallery grid | Visible posts |
//! |-------|-----------|--------------|---------------|
//! | `all` | shown | shown | every post |
//! | `certificates` | hidden | shown | posts whose category is literally `certificates` |
//! | anything else | shown | hidden | posts whose category equals the token |
//!
//! [`apply_filter`] is a pure function of the token and the store. The active
//! token itself is presentation state and lives in [`crate::session`].

use crate::store::ContentStore;
use crate::types::Post;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const ALL: &str = "all";
const CERTIFICATES: &str = "certificates";

/// A filter bar selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterToken {
    #[default]
    All,
    /// The gallery view.
    Certificates,
    Category(String),
}

impl FilterToken {
    /// Interpret a raw token. Matching is exact: `"All"` is a category.
    pub fn parse(raw: &str) -> Self {
        match raw {
            ALL => FilterToken::All,
            CERTIFICATES => FilterToken::Certificates,
            other => FilterToken::Category(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterToken::All => ALL,
            FilterToken::Certificates => CERTIFICATES,
            FilterToken::Category(c) => c,
        }
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterToken {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FilterToken::parse(s))
    }
}

impl From<&str> for FilterToken {
    fn from(raw: &str) -> Self {
        FilterToken::parse(raw)
    }
}

/// What the presentation layer should show for a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub show_post_container: bool,
    pub show_gallery_container: bool,
    pub visible_post_ids: BTreeSet<u32>,
}

impl FilterOutcome {
    pub fn is_post_visible(&self, id: u32) -> bool {
        self.visible_post_ids.contains(&id)
    }

    /// Visible posts in store order.
    pub fn visible_posts<'a>(&self, store: &'a ContentStore) -> Vec<&'a Post> {
        store
            .posts()
            .iter()
            .filter(|p| self.is_post_visible(p.id))
            .collect()
    }
}

/// Compute container and card visibility for `token`.
///
/// Total: a category no post carries yields an empty visible set.
pub fn apply_filter(token: &FilterToken, store: &ContentStore) -> FilterOutcome {
    let (show_post_container, show_gallery_container) = match token {
        FilterToken::All => (true, true),
        FilterToken::Certificates => (false, true),
        FilterToken::Category(_) => (true, false),
    };

    let visible_post_ids: BTreeSet<u32> = store
        .posts()
        .iter()
        .filter(|p| match token {
            FilterToken::All => true,
            other => p.category == other.as_str(),
        })
        .map(|p| p.id)
        .collect();

    debug!(
        token = %token,
        visible = visible_post_ids.len(),
        "applied filter"
    );

    FilterOutcome {
        show_post_container,
        show_gallery_container,
        visible_post_ids,
    }
}

//! Browsing state owned by the presentation layer.
//!
//! The page keeps three pieces of state: the active filter button, whether the
//! search overlay is open (and what has been typed), and which detail view is
//! showing. `Session` holds them explicitly and hands them to the pure engines
//! in [`crate::filter`] and [`crate::search`] as parameters.
//!
//! ```text
//!            open_search             set_query(q)
//!   Closed ──────────────▶ Open{""} ─────────────▶ Open{q}
//!     ▲                                              │
//!     └──────── close_search / select(result) ◀──────┘
//! ```
//!
//! Closing the overlay always clears the query, so reopening starts empty.

use crate::filter::{self, FilterOutcome, FilterToken};
use crate::search::{self, SearchOutcome};
use crate::store::{ContentStore, Entry};
use crate::types::ContentRef;
use tracing::debug;

/// Search overlay lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPanel {
    #[default]
    Closed,
    Open { query: String },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    active_filter: FilterToken,
    search: SearchPanel,
    detail: Option<ContentRef>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_filter(&self) -> &FilterToken {
        &self.active_filter
    }

    pub fn search_panel(&self) -> &SearchPanel {
        &self.search
    }

    /// The record whose detail view is open, if any.
    pub fn detail(&self) -> Option<ContentRef> {
        self.detail
    }

    /// Activate a filter button and compute what it shows.
    pub fn select_filter(&mut self, token: FilterToken, store: &ContentStore) -> FilterOutcome {
        let outcome = filter::apply_filter(&token, store);
        self.active_filter = token;
        outcome
    }

    /// Open the overlay with an empty query. Reopening keeps the current query.
    pub fn open_search(&mut self) {
        if self.search == SearchPanel::Closed {
            self.search = SearchPanel::Open {
                query: String::new(),
            };
        }
    }

    /// Update the query (opening the overlay if needed) and search.
    pub fn set_query<'a>(&mut self, query: &str, store: &'a ContentStore) -> SearchOutcome<'a> {
        self.search = SearchPanel::Open {
            query: query.to_string(),
        };
        search::search_outcome(query, store)
    }

    pub fn close_search(&mut self) {
        self.search = SearchPanel::Closed;
    }

    /// Open a record's detail view.
    ///
    /// Mirrors a card or result click: the search overlay closes and its query
    /// is cleared. Returns `None`, leaving the session unchanged, when the
    /// reference does not resolve.
    pub fn select<'a>(&mut self, target: ContentRef, store: &'a ContentStore) -> Option<Entry<'a>> {
        let entry = store.resolve(target)?;
        debug!(entry = %target, "opened detail");
        self.detail = Some(target);
        self.close_search();
        Some(entry)
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}

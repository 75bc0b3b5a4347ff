//! # Folio
//!
//! Content index, category filter and search engine for a personal blog and
//! photo portfolio, plus a static site renderer on top of them.
//!
//! # Architecture
//!
//! ```text
//! content.toml ──▶ ContentStore ──┬──▶ apply_filter(token)  ──▶ FilterOutcome ──┐
//!                  (read-only)    │                                            ├──▶ generate / output
//!                                 └──▶ search(query)        ──▶ [SearchResult] ──┘
//! ```
//!
//! The store is built once and never written again. The two engines are pure
//! functions of their input and the store: no globals, no hidden state. The
//! browsing state that a page would keep (active filter, search overlay,
//! open detail) is an explicit [`session::Session`] value.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Post`, `GalleryItem`, and `ContentRef` (kind + id) |
//! | [`store`] | The immutable content store: embedded sample, TOML loading, lookup |
//! | [`filter`] | Filter tokens and container/card visibility |
//! | [`search`] | Case-insensitive substring search over both collections |
//! | [`session`] | Presentation state: active filter, search overlay, selection |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`generate`] | Static HTML rendering using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Tagged Results
//!
//! Search merges two record shapes into one list. Each match is a
//! [`search::SearchResult`] variant borrowing the matched record, so callers
//! dispatch with `match` instead of comparing a `"type"` string. The
//! serialized form still carries `"type": "blog" | "gallery"` for browser code.
//!
//! ## Direct Scans
//!
//! Collections hold a few dozen records. Every query scans both in full,
//! lower-casing as it goes. No index, no precomputed fields.
//!
//! ## Independent Id Spaces
//!
//! Post ids and gallery ids are unique only within their own collection.
//! Anything that identifies a record uses [`types::ContentRef`].

pub mod config;
pub mod filter;
pub mod generate;
pub mod output;
pub mod search;
pub mod session;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

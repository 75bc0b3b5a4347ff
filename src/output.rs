//! CLI output formatting.
//!
//! # Entity Display Contract
//!
//! Every record is shown the same way in every command:
//!
//! 1. **Header line**: positional index, kind tag, title
//! 2. **Context lines**: indented details (category, date, summary, path)
//!
//! ```text
//! Posts
//! 001 [blog #1] Intro to Socket Programming in Java: Building Your First Cl...
//!     java · 12/10/2025
//!
//! Gallery
//! 001 [gallery #1] Environmental Portrait
//! ```
//!
//! ## Search
//!
//! ```text
//! 4 results for "portrait"
//! 001 [gallery #1] Environmental Portrait
//!     Genre: Environmental Portrait.Techniques: Natural, soft light (golde...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::filter::{FilterOutcome, FilterToken};
use crate::generate::BuildReport;
use crate::search::{SearchOutcome, SearchResult};
use crate::store::{ContentStore, Entry};
use crate::types::ContentKind;
use std::path::Path;

/// Shown when a non-empty query matched nothing.
pub const NO_RESULTS: &str = "No results found.";

/// Title width before truncation in list headers.
const TITLE_WIDTH: usize = 60;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `001 [blog #3] Title`
fn entity_header(index: usize, kind: ContentKind, id: u32, title: &str) -> String {
    format!(
        "{} [{} #{}] {}",
        format_index(index),
        kind,
        id,
        truncate_desc(title, TITLE_WIDTH)
    )
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn summary_line(summary: &str, preview_chars: usize) -> String {
    format!(
        "{}{}",
        indent(1),
        truncate_desc(strip_html_tags(summary).trim(), preview_chars)
    )
}

// ============================================================================
// Store listing
// ============================================================================

pub fn format_store(store: &ContentStore) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Posts".to_string());
    for (i, post) in store.posts().iter().enumerate() {
        lines.push(entity_header(i + 1, ContentKind::Blog, post.id, &post.title));
        lines.push(format!("{}{} · {}", indent(1), post.category, post.date));
    }

    lines.push(String::new());
    lines.push("Gallery".to_string());
    for (i, item) in store.gallery_items().iter().enumerate() {
        lines.push(entity_header(i + 1, ContentKind::Gallery, item.id, &item.title));
    }

    lines.push(String::new());
    lines.push(format!(
        "{} posts in {} categories, {} gallery items",
        store.posts().len(),
        store.categories().len(),
        store.gallery_items().len()
    ));
    lines
}

pub fn print_store(store: &ContentStore) {
    for line in format_store(store) {
        println!("{}", line);
    }
}

// ============================================================================
// Filter
// ============================================================================

fn shown(flag: bool) -> &'static str {
    if flag { "shown" } else { "hidden" }
}

pub fn format_filter(
    token: &FilterToken,
    outcome: &FilterOutcome,
    store: &ContentStore,
) -> Vec<String> {
    let mut lines = vec![
        format!("Filter: {}", token),
        format!("{}Post grid: {}", indent(1), shown(outcome.show_post_container)),
        format!(
            "{}Gallery grid: {}",
            indent(1),
            shown(outcome.show_gallery_container)
        ),
    ];

    if outcome.show_post_container {
        let posts = outcome.visible_posts(store);
        lines.push(String::new());
        lines.push(format!("Visible posts ({})", posts.len()));
        for (i, post) in posts.iter().enumerate() {
            lines.push(entity_header(i + 1, ContentKind::Blog, post.id, &post.title));
        }
    }
    if outcome.show_gallery_container {
        lines.push(String::new());
        lines.push(format!("Gallery items ({})", store.gallery_items().len()));
        for (i, item) in store.gallery_items().iter().enumerate() {
            lines.push(entity_header(i + 1, ContentKind::Gallery, item.id, &item.title));
        }
    }
    lines
}

pub fn print_filter(token: &FilterToken, outcome: &FilterOutcome, store: &ContentStore) {
    for line in format_filter(token, outcome, store) {
        println!("{}", line);
    }
}

// ============================================================================
// Search
// ============================================================================

/// Format search results. An idle search prints nothing.
pub fn format_search(
    query: &str,
    outcome: &SearchOutcome<'_>,
    preview_chars: usize,
) -> Vec<String> {
    let results = match outcome {
        SearchOutcome::Idle => return Vec::new(),
        SearchOutcome::Results(r) if r.is_empty() => return vec![NO_RESULTS.to_string()],
        SearchOutcome::Results(r) => r,
    };

    let noun = if results.len() == 1 { "result" } else { "results" };
    let mut lines = vec![format!("{} {} for \"{}\"", results.len(), noun, query)];
    for (i, result) in results.iter().enumerate() {
        lines.extend(format_result(i + 1, result, preview_chars));
    }
    lines
}

fn format_result(index: usize, result: &SearchResult<'_>, preview_chars: usize) -> Vec<String> {
    vec![
        entity_header(index, result.kind(), result.id(), result.title()),
        summary_line(result.summary(), preview_chars),
    ]
}

pub fn print_search(query: &str, outcome: &SearchOutcome<'_>, preview_chars: usize) {
    for line in format_search(query, outcome, preview_chars) {
        println!("{}", line);
    }
}

// ============================================================================
// Detail
// ============================================================================

/// Full record view for `show`. Rich text is shown with tags stripped.
pub fn format_entry(entry: &Entry<'_>) -> Vec<String> {
    match entry {
        Entry::Post(post) => {
            let mut lines = vec![
                post.title.clone(),
                format!("{}Category: {}", indent(1), post.category),
                format!("{}Date: {}", indent(1), post.date),
                format!("{}Image: {}", indent(1), post.image),
                String::new(),
                strip_html_tags(&post.excerpt),
                String::new(),
            ];
            lines.extend(post.content.lines().map(str::to_string));
            lines
        }
        Entry::Gallery(item) => {
            let mut lines = vec![
                item.title.clone(),
                format!("{}Image: {}", indent(1), item.image),
                String::new(),
            ];
            let text = strip_html_tags(&item.description.replace("<br>", "\n"));
            lines.extend(text.lines().map(str::to_string));
            lines
        }
    }
}

pub fn print_entry(entry: &Entry<'_>) {
    for line in format_entry(entry) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_report(report: &BuildReport, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (label, path)) in report.listings.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), label, path));
    }
    lines.push(format!("{}Stylesheet: {}", indent(1), report.stylesheet));
    if report.assets_copied > 0 {
        lines.push(format!("{}Assets: {} files", indent(1), report.assets_copied));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} listing pages, {} post pages, {} gallery pages in {}",
        report.listings.len(),
        report.post_pages,
        report.gallery_pages,
        output_dir.display()
    ));
    lines
}

pub fn print_build_report(report: &BuildReport, output_dir: &Path) {
    for line in format_build_report(report, output_dir) {
        println!("{}", line);
    }
}

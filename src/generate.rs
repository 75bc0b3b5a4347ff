//! Static HTML site generation.
//!
//! Renders the content store into a browsable site: card grids, one page per
//! filter button, a detail page per record (the "modal" content) and a search
//! index the overlay queries in the browser.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Filter "all": both grids
//! ├── filter/
//! │   ├── java.html              # Post grid, java posts only
//! │   ├── javascript.html
//! │   └── certificates.html      # Gallery grid only
//! ├── posts/
//! │   ├── 1.html                 # Post detail
//! │   └── ...
//! ├── gallery/
//! │   ├── 1.html                 # Gallery item detail
//! │   └── ...
//! ├── search-index.json          # Every record, tagged "blog" or "gallery"
//! ├── style.3f9a1c0b2e.css       # Base CSS + color variables, content-hashed
//! └── image/...                  # Copied from the assets directory
//! ```
//!
//! Each filter page is rendered from [`apply_filter`]: a hidden container is
//! omitted entirely, and so are hidden cards.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) with automatic escaping. Post bodies
//! and gallery descriptions are author-written rich text and are inserted
//! unescaped; post bodies go through pulldown-cmark first (raw HTML passes
//! through untouched).

use crate::config::{self, ConfigError, FilterButton, SiteConfig};
use crate::filter::{FilterOutcome, FilterToken, apply_filter};
use crate::search::SearchResult;
use crate::store::ContentStore;
use crate::types::{GalleryItem, Post};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What a build wrote, for CLI reporting.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Listing pages: `(label, path)` for the index and each filter page.
    pub listings: Vec<(String, String)>,
    pub post_pages: usize,
    pub gallery_pages: usize,
    /// File name of the fingerprinted stylesheet.
    pub stylesheet: String,
    pub assets_copied: usize,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/search.js");

/// Length of the content hash in the stylesheet name.
const FINGERPRINT_LEN: usize = 10;

pub fn generate(
    store: &ContentStore,
    config: &SiteConfig,
    assets_dir: Option<&Path>,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    config.validate()?;
    fs::create_dir_all(output_dir)?;
    let mut report = BuildReport::default();

    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    report.stylesheet = fingerprinted_name("style", "css", &css);
    fs::write(output_dir.join(&report.stylesheet), &css)?;
    let css_href = format!("/{}", report.stylesheet);

    // Listing pages: index for "all", one page per other filter button
    let index = render_listing(store, config, &FilterToken::All, &css_href);
    fs::write(output_dir.join("index.html"), index.into_string())?;
    info!("generated index.html");
    report
        .listings
        .push(("All".to_string(), "index.html".to_string()));

    let filter_dir = output_dir.join("filter");
    for button in &config.filters {
        let Some(slug) = button.page_slug() else {
            continue;
        };
        let token = FilterToken::parse(&button.token);
        fs::create_dir_all(&filter_dir)?;
        let rel = format!("filter/{slug}.html");
        let page = render_listing(store, config, &token, &css_href);
        fs::write(output_dir.join(&rel), page.into_string())?;
        info!(token = %token, "generated {rel}");
        report.listings.push((button.label.clone(), rel));
    }

    // Detail pages render independently; markdown conversion dominates.
    let post_pages: Vec<(String, String)> = store
        .posts()
        .par_iter()
        .map(|post| {
            (
                format!("{}.html", post.id),
                render_post_page(post, config, &css_href).into_string(),
            )
        })
        .collect();
    report.post_pages = write_pages(&output_dir.join("posts"), &post_pages)?;

    let gallery_pages: Vec<(String, String)> = store
        .gallery_items()
        .par_iter()
        .map(|item| {
            (
                format!("{}.html", item.id),
                render_gallery_page(item, config, &css_href).into_string(),
            )
        })
        .collect();
    report.gallery_pages = write_pages(&output_dir.join("gallery"), &gallery_pages)?;
    info!(
        posts = report.post_pages,
        gallery = report.gallery_pages,
        "generated detail pages"
    );

    let index_json = serde_json::to_string(&search_index(store))?;
    fs::write(output_dir.join("search-index.json"), index_json)?;

    if let Some(assets) = assets_dir.filter(|p| p.is_dir()) {
        report.assets_copied = copy_assets(assets, output_dir)?;
        info!(files = report.assets_copied, "copied assets");
    }

    info!("site generated at {}", output_dir.display());
    Ok(report)
}

/// Every record as a tagged search entry: posts first, then gallery items.
pub fn search_index(store: &ContentStore) -> Vec<SearchResult<'_>> {
    store
        .posts()
        .iter()
        .map(SearchResult::Blog)
        .chain(store.gallery_items().iter().map(SearchResult::Gallery))
        .collect()
}

/// `{stem}.{first hex digits of sha256(content)}.{ext}`
fn fingerprinted_name(stem: &str, ext: &str, content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("{stem}.{}.{ext}", &hex[..FINGERPRINT_LEN])
}

/// Where gallery detail pages link back to: the certificates page when the
/// filter bar has one, otherwise the index (which shows the gallery too).
fn gallery_back_href(config: &SiteConfig) -> String {
    config
        .filters
        .iter()
        .find(|b| FilterToken::parse(&b.token) == FilterToken::Certificates)
        .map(FilterButton::href)
        .unwrap_or_else(|| "/".to_string())
}

fn write_pages(dir: &Path, pages: &[(String, String)]) -> std::io::Result<usize> {
    if pages.is_empty() {
        return Ok(0);
    }
    fs::create_dir_all(dir)?;
    for (name, html) in pages {
        fs::write(dir.join(name), html)?;
    }
    Ok(pages.len())
}

fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(source, options);
    let mut body = String::new();
    md_html::push_html(&mut body, parser);
    body
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css_href: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(css_href);
            }
            body {
                (content)
            }
        }
    }
}

/// Site title on the left, search button on the right.
fn site_header(config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (config.title) }
            button.search-open #open-search-btn type="button" { "Search" }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            "© " (config.author)
        }
    }
}

/// Renders the filter bar, marking the active button.
pub fn render_filter_bar(buttons: &[FilterButton], active: &FilterToken) -> Markup {
    html! {
        nav.filter-bar {
            @for button in buttons {
                @let is_active = button.token == active.as_str();
                a.filter-btn.active[is_active] href=(button.href()) data-filter=(button.token) {
                    (button.label)
                }
            }
        }
    }
}

fn post_card(post: &Post) -> Markup {
    html! {
        a.blog-card.reveal href={ "/posts/" (post.id) ".html" } data-category=(post.category) {
            img.blog-image src={ "/" (post.image) } alt=(post.title) loading="lazy";
            div.blog-content {
                span.blog-category { (post.category.to_uppercase()) }
                h3 { (post.title) }
                div.blog-date { "📅 " (post.date) }
                p.blog-excerpt { (post.excerpt) }
                span.read-more { "Read more →" }
            }
        }
    }
}

fn gallery_card(item: &GalleryItem) -> Markup {
    html! {
        a.gallery-card.reveal href={ "/gallery/" (item.id) ".html" } {
            img src={ "/" (item.image) } alt=(item.title) loading="lazy";
            div.gallery-info {
                h3 { (item.title) }
                p { (PreEscaped(&item.description)) }
            }
        }
    }
}

/// The two grids as [`FilterOutcome`] dictates.
pub fn render_grids(store: &ContentStore, outcome: &FilterOutcome) -> Markup {
    let posts = outcome.visible_posts(store);
    html! {
        @if outcome.show_post_container {
            section.blog-grid #blog-container {
                @for post in &posts {
                    (post_card(post))
                }
                @if posts.is_empty() {
                    p.empty-state { "No posts in this category yet." }
                }
            }
        }
        @if outcome.show_gallery_container {
            section.gallery-grid #certificates-container {
                @for item in store.gallery_items() {
                    (gallery_card(item))
                }
            }
        }
    }
}

fn search_overlay(config: &SiteConfig) -> Markup {
    html! {
        div.search-overlay #search-overlay data-preview-chars=(config.search.preview_chars) {
            div.search-box {
                button.search-close #close-search-btn type="button" { "Close" }
                input #search-input type="search" placeholder="Search posts and gallery..." autocomplete="off";
                div #search-results-container {}
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a listing page for one filter token.
fn render_listing(
    store: &ContentStore,
    config: &SiteConfig,
    token: &FilterToken,
    css_href: &str,
) -> Markup {
    let outcome = apply_filter(token, store);
    let page_title = match config.filters.iter().find(|b| b.token == token.as_str()) {
        Some(button) if *token != FilterToken::All => format!("{} - {}", button.label, config.title),
        _ => config.title.clone(),
    };

    let content = html! {
        (site_header(config))
        (render_filter_bar(&config.filters, token))
        main.listing-page {
            (render_grids(store, &outcome))
        }
        (site_footer(config))
        (search_overlay(config))
        script { (PreEscaped(JS)) }
    };

    base_document(&page_title, css_href, content)
}

fn render_post_page(post: &Post, config: &SiteConfig, css_href: &str) -> Markup {
    let content = html! {
        (site_header(config))
        main.detail-page {
            img src={ "/" (post.image) } alt=(post.title);
            header.detail-header {
                span.blog-category { (post.category.to_uppercase()) }
                h1 { (post.title) }
                div.blog-date { "📅 " (post.date) }
            }
            article.detail-body {
                (PreEscaped(markdown_to_html(&post.content)))
            }
            a.read-more href="/" { "← Back to all posts" }
        }
        (site_footer(config))
    };

    base_document(&format!("{} - {}", post.title, config.title), css_href, content)
}

fn render_gallery_page(item: &GalleryItem, config: &SiteConfig, css_href: &str) -> Markup {
    let content = html! {
        (site_header(config))
        main.detail-page {
            img src={ "/" (item.image) } alt=(item.title);
            h1 { (item.title) }
            div.detail-body {
                p { (PreEscaped(&item.description)) }
            }
            a.read-more href=(gallery_back_href(config)) { "← Back to gallery" }
        }
        (site_footer(config))
    };

    base_document(&format!("{} - {}", item.title, config.title), css_href, content)
}

// ============================================================================
// Tests
// ============================================================================

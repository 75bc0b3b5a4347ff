//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives next
//! to the content file; every key is optional and user values are merged on
//! top of the stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Hieu's Story"      # Site title (header and <title>)
//! author = "Hieu"             # Footer credit
//!
//! [[filters]]                 # Filter bar buttons, in display order
//! token = "all"
//! label = "All"
//!
//! [[filters]]
//! token = "java"
//! label = "Java"
//!
//! [search]
//! preview_chars = 120         # Summary length in search result listings
//!
//! [colors.light]
//! background = "#f7f7fb"
//! surface = "#ffffff"         # Cards, modals, search overlay
//! text = "#1c1c28"
//! text_muted = "#6b6b80"      # Dates, excerpts
//! accent = "#6c5ce7"          # Category badges, active filter
//! border = "#e4e4ee"
//!
//! [colors.dark]
//! background = "#0f0f17"
//! surface = "#1a1a26"
//! text = "#ececf4"
//! text_muted = "#9a9ab0"
//! accent = "#a29bfe"
//! border = "#2c2c3c"
//! ```
//!
//! ## Partial Configuration
//!
//! Tables merge key by key, so overriding one color keeps the rest:
//!
//! ```toml
//! [colors.light]
//! accent = "#d63031"
//! ```
//!
//! Arrays replace wholesale: a `[[filters]]` entry in the user file replaces
//! the whole default filter bar.
//!
//! Unknown keys are rejected to catch typos early.

use crate::filter::FilterToken;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
    pub author: String,
    /// Filter bar buttons in display order.
    pub filters: Vec<FilterButton>,
    pub search: SearchConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Hieu's Story".to_string(),
            author: "Hieu".to_string(),
            filters: vec![
                FilterButton::new("all", "All"),
                FilterButton::new("java", "Java"),
                FilterButton::new("javascript", "JavaScript"),
                FilterButton::new("certificates", "Certificates"),
            ],
            search: SearchConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        let mut pages: HashMap<String, &str> = HashMap::new();
        for button in &self.filters {
            if button.token.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "filters.token must not be empty".into(),
                ));
            }
            if !seen.insert(button.token.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate filter token '{}'",
                    button.token
                )));
            }
            if let Some(slug) = button.page_slug()
                && let Some(other) = pages.insert(slug.clone(), &button.token)
            {
                return Err(ConfigError::Validation(format!(
                    "filter tokens '{other}' and '{}' both render to filter/{slug}.html",
                    button.token
                )));
            }
        }
        if self.search.preview_chars == 0 {
            return Err(ConfigError::Validation(
                "search.preview_chars must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// One filter bar button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterButton {
    /// Raw filter token: `all`, `certificates`, or a post category.
    pub token: String,
    /// Button text.
    pub label: String,
}

impl FilterButton {
    pub fn new(token: &str, label: &str) -> Self {
        Self {
            token: token.to_string(),
            label: label.to_string(),
        }
    }

    /// File stem of this button's page under `filter/`; `None` for `all`,
    /// which renders as the index.
    ///
    /// Lowercase ASCII alphanumerics, everything else `-`. Distinct tokens can
    /// share a stem, so [`SiteConfig::validate`] rejects collisions.
    pub fn page_slug(&self) -> Option<String> {
        if FilterToken::parse(&self.token) == FilterToken::All {
            return None;
        }
        let slug = self
            .token
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        Some(slug)
    }

    /// Link target of this button: `/` for `all`, its filter page otherwise.
    pub fn href(&self) -> String {
        match self.page_slug() {
            Some(slug) => format!("/filter/{slug}.html"),
            None => "/".to_string(),
        }
    }
}

/// Search result presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Characters of summary shown per result before truncating with `...`.
    pub preview_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { preview_chars: 120 }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Cards, modals and the search overlay.
    pub surface: String,
    pub text: String,
    /// Dates and excerpts.
    pub text_muted: String,
    /// Category badges and the active filter button.
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f7f7fb".to_string(),
            surface: "#ffffff".to_string(),
            text: "#1c1c28".to_string(),
            text_muted: "#6b6b80".to_string(),
            accent: "#6c5ce7".to_string(),
            border: "#e4e4ee".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f0f17".to_string(),
            surface: "#1a1a26".to_string(),
            text: "#ececf4".to_string(),
            text_muted: "#9a9ab0".to_string(),
            accent: "#a29bfe".to_string(),
            border: "#2c2c3c".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to content.toml. Tables merge key by key with the
# defaults; arrays (like [[filters]]) replace the default list entirely.
# Unknown keys will cause an error.

# Site title, shown in the header and the browser tab.
title = "Hieu's Story"

# Footer credit.
author = "Hieu"

# ---------------------------------------------------------------------------
# Filter bar
# ---------------------------------------------------------------------------
# One button per entry, in display order. Tokens:
#   "all"           both grids, every post
#   "certificates"  gallery grid only
#   anything else   posts whose category equals the token
[[filters]]
token = "all"
label = "All"

[[filters]]
token = "java"
label = "Java"

[[filters]]
token = "javascript"
label = "JavaScript"

[[filters]]
token = "certificates"
label = "Certificates"

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Characters of excerpt/description shown per result.
preview_chars = 120

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f7f7fb"
surface = "#ffffff"       # Cards, modals, search overlay
text = "#1c1c28"
text_muted = "#6b6b80"    # Dates, excerpts
accent = "#6c5ce7"        # Category badges, active filter
border = "#e4e4ee"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f0f17"
surface = "#1a1a26"
text = "#ececf4"
text_muted = "#9a9ab0"
accent = "#a29bfe"
border = "#2c2c3c"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_vars(&colors.light, 1),
        dark = scheme_vars(&colors.dark, 2),
    )
}

fn scheme_vars(scheme: &ColorScheme, depth: usize) -> String {
    let pad = "    ".repeat(depth);
    [
        ("bg", &scheme.background),
        ("surface", &scheme.surface),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("accent", &scheme.accent),
        ("border", &scheme.border),
    ]
    .iter()
    .map(|(name, value)| format!("{pad}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_filter_bar() {
        let config = SiteConfig::default();
        let tokens: Vec<&str> = config.filters.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(tokens, vec!["all", "java", "javascript", "certificates"]);
    }

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#f7f7fb");
        assert_eq!(config.colors.dark.background, "#0f0f17");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
accent = "#d63031"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.light.accent, "#d63031");
        assert_eq!(config.colors.light.text, "#1c1c28");
        assert_eq!(config.colors.dark.accent, "#a29bfe");
        assert_eq!(config.search.preview_chars, 120);
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.title, defaults.title);
        assert_eq!(parsed.filters, defaults.filters);
        assert_eq!(parsed.search.preview_chars, defaults.search.preview_chars);
        assert_eq!(parsed.colors.dark.surface, defaults.colors.dark.surface);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Hieu's Story");
        assert_eq!(config.filters.len(), 4);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
title = "Notes"

[search]
preview_chars = 40
"#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.search.preview_chars, 40);
        assert_eq!(config.author, "Hieu");
    }

    #[test]
    fn filters_array_replaces_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[[filters]]
token = "all"
label = "Everything"

[[filters]]
token = "rust"
label = "Rust"
"#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(
            config.filters,
            vec![
                FilterButton::new("all", "Everything"),
                FilterButton::new("rust", "Rust"),
            ]
        );
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "title = ").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "subtitle = \"x\"").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml = r##"
[colors.light]
highlight = "#ff0000"
"##;
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn unknown_filter_key_rejected() {
        let toml = r#"
[[filters]]
token = "all"
label = "All"
icon = "star"
"#;
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_duplicate_filter_token() {
        let mut config = SiteConfig::default();
        config.filters.push(FilterButton::new("java", "Java again"));
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_tokens_sharing_a_page() {
        let mut config = SiteConfig::default();
        config.filters.push(FilterButton::new("Java", "Java (caps)"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("filter/java.html"));

        let mut config = SiteConfig::default();
        config.filters = vec![
            FilterButton::new("c++", "C++"),
            FilterButton::new("c--", "C--"),
        ];
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn page_slug_sanitizes_tokens() {
        assert_eq!(FilterButton::new("all", "All").page_slug(), None);
        assert_eq!(
            FilterButton::new("javascript", "JS").page_slug().as_deref(),
            Some("javascript")
        );
        assert_eq!(
            FilterButton::new("C++ Notes", "C++").page_slug().as_deref(),
            Some("c---notes")
        );
        assert_eq!(FilterButton::new("all", "All").href(), "/");
        assert_eq!(
            FilterButton::new("certificates", "Gallery").href(),
            "/filter/certificates.html"
        );
    }

    #[test]
    fn validate_empty_filter_token() {
        let mut config = SiteConfig::default();
        config.filters.push(FilterButton::new(" ", "Blank"));
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_zero_preview_chars() {
        let mut config = SiteConfig::default();
        config.search.preview_chars = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_runs_on_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[search]\npreview_chars = 0\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value =
            toml::from_str("[colors.light]\ntext = \"a\"\naccent = \"b\"").unwrap();
        let overlay: toml::Value = toml::from_str("[colors.light]\naccent = \"c\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["colors"]["light"]["text"].as_str(), Some("a"));
        assert_eq!(merged["colors"]["light"]["accent"].as_str(), Some("c"));
    }

    #[test]
    fn merge_toml_array_replaced() {
        let base: toml::Value = toml::from_str("xs = [1, 2, 3]").unwrap();
        let overlay: toml::Value = toml::from_str("xs = [9]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["xs"].as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // CSS generation
    // =========================================================================

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in [
            "--color-bg",
            "--color-surface",
            "--color-text",
            "--color-text-muted",
            "--color-accent",
            "--color-border",
        ] {
            assert!(css.contains(var), "missing {var}");
        }
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.accent = "#123456".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-accent: #123456;"));
    }

    #[test]
    fn generate_css_includes_dark_mode_media_query() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        assert!(css.contains("#a29bfe"));
    }
}

use clap::{Parser, Subcommand};
use folio::filter::{self, FilterToken};
use folio::store::ContentStore;
use folio::types::{ContentKind, ContentRef};
use folio::{config, generate, output, search};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Browse, search and publish a blog and photo portfolio")]
#[command(long_about = "\
Browse, search and publish a blog and photo portfolio

Content lives in a single TOML file with [[posts]] and [[gallery]] entries.
Without --source, the built-in sample content is used.

  site/
  ├── content.toml       # [[posts]] and [[gallery]] (pass with --source)
  ├── config.toml        # Site config (optional, next to content.toml)
  └── assets/            # Images and other files copied into the build

Filter tokens:
  all            every post and the gallery
  certificates   the gallery only
  <category>     posts in that category (e.g. java)

Search is a case-insensitive substring match on post titles and excerpts,
and on gallery titles and descriptions. Posts are listed before gallery items.

Run 'folio gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content file; the built-in sample is used when omitted
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every post and gallery item
    List,
    /// Show what a filter token makes visible
    Filter {
        /// all, certificates, or a post category
        token: String,
    },
    /// Search posts and gallery items
    Search {
        query: String,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one record in full
    Show {
        /// blog or gallery
        kind: ContentKind,
        id: u32,
    },
    /// Validate content and config without building
    Check,
    /// Render the static site
    Build {
        /// Output directory
        #[arg(long = "output", default_value = "dist")]
        output_dir: PathBuf,
        /// Assets directory copied into the output (default: assets/ next to the content file)
        #[arg(long)]
        assets: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            let store = load_store(cli.source.as_deref())?;
            output::print_store(&store);
        }
        Command::Filter { token } => {
            let store = load_store(cli.source.as_deref())?;
            let token = FilterToken::parse(&token);
            let outcome = filter::apply_filter(&token, &store);
            output::print_filter(&token, &outcome, &store);
        }
        Command::Search { query, json } => {
            let store = load_store(cli.source.as_deref())?;
            if json {
                let results = search::search(&query, &store);
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                let site_config = load_site_config(cli.source.as_deref())?;
                let outcome = search::search_outcome(&query, &store);
                output::print_search(&query, &outcome, site_config.search.preview_chars);
            }
        }
        Command::Show { kind, id } => {
            let store = load_store(cli.source.as_deref())?;
            let target = ContentRef { kind, id };
            match store.resolve(target) {
                Some(entry) => output::print_entry(&entry),
                None => return Err(format!("no {kind} entry with id {id}").into()),
            }
        }
        Command::Check => {
            let store = load_store(cli.source.as_deref())?;
            let site_config = load_site_config(cli.source.as_deref())?;
            output::print_store(&store);
            for button in &site_config.filters {
                let token = FilterToken::parse(&button.token);
                if let FilterToken::Category(category) = &token
                    && !store.categories().contains(&category.as_str())
                {
                    println!("warning: filter '{}' matches no post category", category);
                }
            }
            println!("==> Content is valid");
        }
        Command::Build { output_dir, assets } => {
            let store = load_store(cli.source.as_deref())?;
            let site_config = load_site_config(cli.source.as_deref())?;
            let assets = assets.or_else(|| {
                cli.source
                    .as_deref()
                    .and_then(Path::parent)
                    .map(|dir| dir.join("assets"))
            });
            println!("==> Building site → {}", output_dir.display());
            let report = generate::generate(&store, &site_config, assets.as_deref(), &output_dir)?;
            output::print_build_report(&report, &output_dir);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_store(source: Option<&Path>) -> Result<ContentStore, folio::store::StoreError> {
    match source {
        Some(path) => ContentStore::load(path),
        None => Ok(ContentStore::sample()),
    }
}

/// Config lives next to the content file; the sample uses stock defaults.
fn load_site_config(source: Option<&Path>) -> Result<config::SiteConfig, config::ConfigError> {
    match source.and_then(Path::parent) {
        Some(dir) => config::load_config(dir),
        None => Ok(config::SiteConfig::default()),
    }
}

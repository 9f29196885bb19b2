//! docshelf CLI: browse a static catalog of saved articles
//!
//! Commands: list, toggle, categories, stats, show, session, completions

mod app;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::json;
use tracing::Level;

use docshelf_query::{
    category_options, format_listing, CategoryFilter, Listing, OutputFormat, SortMode, Stats,
};

use crate::app::{require_article, resolve_config, Shelf};

#[derive(Parser)]
#[command(name = "docshelf")]
#[command(version)]
#[command(about = "Browse, search, and track a static catalog of saved articles")]
struct Cli {
    /// Catalog directory holding the article files
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (defaults to `<root>/docshelf.toml` when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List articles matching a search, category, and sort mode
    #[command(alias = "ls")]
    List {
        /// Case-insensitive substring of title, category, or description
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact category label, or `all`
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        /// no-sort, date, title, watched, or unwatched
        #[arg(long, default_value = "no-sort")]
        sort: SortMode,
        /// table, json, or markdown
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// Flip the watched flag of one article
    Toggle {
        identifier: String,
    },
    /// Categories present in the catalog, with counts
    Categories,
    /// Total, watched, and unwatched counts
    Stats,
    /// One article, including where its date came from
    Show {
        identifier: String,
    },
    /// Manage the local session gate
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Start a session
    Login {
        /// Session length in hours (defaults to `session.ttl_hours`)
        #[arg(long)]
        ttl_hours: Option<u32>,
    },
    /// End the session
    Logout,
    /// Report whether a valid session exists
    Status,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "docshelf", &mut io::stdout());
        return Ok(());
    }

    let config = resolve_config(cli.root.as_deref(), cli.config.as_deref())
        .context("failed to load configuration")?;
    let mut shelf = Shelf::open(config)?;

    match cli.command {
        Commands::List {
            search,
            category,
            sort,
            format,
        } => {
            shelf.ensure_session()?;
            shelf.load().await;
            let visible = shelf.list(&search, &category, sort);
            let listing = Listing::new(shelf.articles(), visible, sort);
            println!("{}", format_listing(&listing, format).trim_end());
        }
        Commands::Toggle { identifier } => {
            shelf.ensure_session()?;
            let watched = shelf.toggle(&identifier)?;
            print_json(&json!({ "identifier": identifier, "watched": watched }))?;
        }
        Commands::Categories => {
            shelf.ensure_session()?;
            shelf.load().await;
            let options: Vec<_> = category_options(shelf.articles())
                .into_iter()
                .map(|o| {
                    json!({
                        "category": o.category,
                        "icon": o.category.header_icon(),
                        "count": o.count,
                    })
                })
                .collect();
            print_json(&options)?;
        }
        Commands::Stats => {
            shelf.ensure_session()?;
            shelf.load().await;
            let articles = shelf.articles();
            print_json(&Stats::new(articles, articles.len()))?;
        }
        Commands::Show { identifier } => {
            shelf.ensure_session()?;
            shelf.load().await;
            let article = require_article(shelf.find(&identifier), &identifier)?;
            print_json(article)?;
        }
        Commands::Session { action } => match action {
            SessionAction::Login { ttl_hours } => {
                let record = shelf.login(ttl_hours)?;
                print_json(&json!({
                    "valid": true,
                    "expiresAt": record.expires_at(),
                }))?;
            }
            SessionAction::Logout => {
                shelf.logout()?;
                print_json(&json!({ "valid": false }))?;
            }
            SessionAction::Status => {
                let record = shelf.session();
                print_json(&json!({
                    "valid": record.is_some(),
                    "enforced": shelf.session_enforced(),
                    "expiresAt": record.and_then(|r| r.expires_at()),
                }))?;
            }
        },
        Commands::Completions { .. } => {}
    }
    Ok(())
}

//! Bunko main entry point
//!
//! Command-line interface for collecting Aozora Bunko works and searching
//! the collected corpus.

use anyhow::bail;
use bunko::config::{self, Config};
use bunko::crawler::{self, build_http_client};
use bunko::storage::Storage;
use bunko::query;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Bunko: collect and search Aozora Bunko texts
#[derive(Parser, Debug)]
#[command(name = "bunko")]
#[command(version)]
#[command(about = "Collects Aozora Bunko works and searches their full text", long_about = None)]
struct Cli {
    /// Path to the SQLite database
    #[arg(short = 'd', long, value_name = "DATABASE")]
    database: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl listing pages and store the extracted texts
    Collect {
        /// Listing-page URLs to crawl
        #[arg(value_name = "URL")]
        urls: Vec<String>,

        /// TOML config file providing listing URLs and database path
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List all collected authors
    Authors,

    /// List one author's titles
    Title {
        #[arg(value_name = "AUTHOR_ID")]
        author_id: String,
    },

    /// Print one work's full text
    Content {
        #[arg(value_name = "AUTHOR_ID")]
        author_id: String,
        #[arg(value_name = "TITLE_ID")]
        title_id: String,
    },

    /// Search the collected works by free text
    Query {
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Collect { urls, config } => {
            handle_collect(urls, config.as_deref(), cli.database).await
        }
        Command::Authors => handle_authors(&open_storage(cli.database)?),
        Command::Title { author_id } => handle_title(&open_storage(cli.database)?, &author_id),
        Command::Content {
            author_id,
            title_id,
        } => handle_content(&open_storage(cli.database)?, &author_id, &title_id),
        Command::Query { text } => handle_query(&open_storage(cli.database)?, &text),
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bunko=info,warn"),
            1 => EnvFilter::new("bunko=debug,info"),
            2 => EnvFilter::new("bunko=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn open_storage(database: Option<PathBuf>) -> anyhow::Result<Storage> {
    let path = database.unwrap_or_else(|| PathBuf::from("bunko.sqlite"));
    Ok(Storage::open(&path)?)
}

/// Handles `collect`: runs the acquisition pipeline for each listing page
async fn handle_collect(
    urls: Vec<String>,
    config_path: Option<&Path>,
    database: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    if !urls.is_empty() {
        config.listing_urls = urls;
    }
    if let Some(database) = database {
        config.database = database.display().to_string();
    }
    if config.listing_urls.is_empty() {
        bail!("no listing URLs given (pass URLs or --config)");
    }
    config::validate(&config)?;

    let client = build_http_client(&config.user_agent)?;
    let storage = Storage::open(Path::new(&config.database))?;

    for listing_url in &config.listing_urls {
        tracing::info!("collecting {}", listing_url);
        let stats = crawler::collect(&client, &storage, listing_url).await?;
        println!(
            "{}: {} discovered, {} stored, {} skipped",
            listing_url, stats.discovered, stats.stored, stats.skipped
        );
    }

    Ok(())
}

/// Handles `authors`: lists author IDs and names in numeric ID order
fn handle_authors(storage: &Storage) -> anyhow::Result<()> {
    for author in storage.list_authors()? {
        println!("{} {}", author.author_id, author.author);
    }
    Ok(())
}

/// Handles `title`: lists one author's works in numeric title ID order
fn handle_title(storage: &Storage, author_id: &str) -> anyhow::Result<()> {
    for title in storage.list_titles(author_id)? {
        println!("{} {}", title.title_id, title.title);
    }
    Ok(())
}

/// Handles `content`: prints one work's full text
fn handle_content(storage: &Storage, author_id: &str, title_id: &str) -> anyhow::Result<()> {
    match storage.get_content(author_id, title_id)? {
        Some(content) => {
            println!("{}", content);
            Ok(())
        }
        None => bail!("no content for author {} title {}", author_id, title_id),
    }
}

/// Handles `query`: free-text search over the collected corpus
fn handle_query(storage: &Storage, text: &str) -> anyhow::Result<()> {
    for hit in query::search(storage, text)? {
        println!(
            "{} {:>5}: {} ({})",
            hit.author_id, hit.title_id, hit.title, hit.author
        );
    }
    Ok(())
}

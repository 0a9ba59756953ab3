//! gigset-qs - Quick Set command line
//!
//! Parses pasted setlist text and matches the songs against a SQLite song
//! catalog. Output is JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gigset_common::config::{resolve_database_path, TomlConfig};
use gigset_common::logging::init_tracing;
use gigset_qs::{
    db, input, QuickSetBuilder, SelectionPolicy, SetlistTextParser, SongMatcher, SqliteCatalog,
};
use serde::Serialize;
use sqlx::SqlitePool;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "gigset-qs", version, about = "Quick-set setlist parsing and song matching")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, env = "GIGSET_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Catalog database file
    #[arg(short, long, env = "GIGSET_DATABASE", global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse setlist text and print the sets and songs
    Parse {
        /// Text file to read ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },
    /// Print catalog matches for one title
    Match {
        title: String,
        #[arg(short, long, default_value = "")]
        artist: String,
    },
    /// Parse, match and propose links for setlist text
    Prepare {
        /// Text file to read ("-" or omitted for stdin)
        input: Option<PathBuf>,
    },
    /// Add a song to the catalog
    AddSong {
        title: String,
        /// Artist name (repeatable)
        #[arg(short, long = "artist")]
        artists: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::resolve_and_load(args.config.as_deref())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!("Starting gigset-qs {}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Parse { input } => {
            let text = read_input(input.as_deref())?;
            print_json(&SetlistTextParser::new().parse(&text))?;
        }
        Command::Match { title, artist } => {
            let pool = open_catalog(args.database.as_deref(), &config).await?;
            let matcher = SongMatcher::with_config(
                Arc::new(SqliteCatalog::new(pool)),
                &config.matching,
            );
            print_json(&matcher.find_matches(&title, &artist).await)?;
        }
        Command::Prepare { input } => {
            let text = read_input(input.as_deref())?;
            let pool = open_catalog(args.database.as_deref(), &config).await?;
            let matcher = SongMatcher::with_config(
                Arc::new(SqliteCatalog::new(pool)),
                &config.matching,
            );
            let builder =
                QuickSetBuilder::new(matcher, SelectionPolicy::from_config(&config.matching));
            print_json(&builder.prepare(&text).await)?;
        }
        Command::AddSong { title, artists } => {
            let pool = open_catalog(args.database.as_deref(), &config).await?;
            let song_id = db::songs::insert_song(&pool, &title, &artists).await?;
            info!(song_id = %song_id, title = %title, "Song added to catalog");
            println!("{}", song_id);
        }
    }

    Ok(())
}

async fn open_catalog(cli_path: Option<&Path>, config: &TomlConfig) -> Result<SqlitePool> {
    let db_path = resolve_database_path(cli_path, config);
    info!("Database: {}", db_path.display());

    db::init_database_pool(&db_path)
        .await
        .with_context(|| format!("Failed to open catalog database {}", db_path.display()))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => Ok(input::read_setlist_file(p)?),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

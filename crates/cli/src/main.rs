mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prompt_curator_client::{SortOrder, TagFilter};
use prompt_curator_core::env_string_with_default;
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:2022";

#[derive(Parser)]
#[command(name = "prompt-curator")]
#[command(about = "Curate text-to-image prompts", long_about = None)]
#[command(version)]
struct Cli {
    /// Server base URL for client commands [env: PROMPT_CURATOR_URL]
    #[arg(long, global = true)]
    url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the RPC server
    Serve {
        /// Listen port [env: SERVER_PORT, default 2022]
        #[arg(short, long)]
        port: Option<u16>,
        /// Bind address [env: SERVER_HOST, default 127.0.0.1]
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Storage URL (sqlite: or postgres://) [env: DATABASE_URL]
        #[arg(long)]
        database_url: Option<String>,
    },
    /// List prompts, filtered and sorted
    List {
        /// Case-insensitive match on text, description or tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact tag, or `all`
        #[arg(short, long, default_value = "all")]
        tag: TagFilter,
        /// newest, oldest or alphabetical
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
        /// Print JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Show every tag with its prompt count
    Tags,
    /// Show one prompt
    Get { id: i64 },
    /// Create a prompt
    Add {
        text: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        image_url: Option<String>,
        /// Repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Edit a prompt; unspecified fields keep their value
    Edit {
        id: i64,
        #[arg(long)]
        text: Option<String>,
        /// Empty string clears the description
        #[arg(short, long)]
        description: Option<String>,
        /// Empty string clears the image URL
        #[arg(short, long)]
        image_url: Option<String>,
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,
    },
    /// Delete a prompt
    Delete {
        id: i64,
        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },
    /// Call the server's healthcheck
    Health,
}

fn get_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prompt-curator")
        .join("prompts.db")
}

fn ensure_db_dir(db_path: &std::path::Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// `DATABASE_URL`, or a SQLite file under the user's data directory.
fn get_database_url() -> Result<String> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Ok(url),
        _ => {
            let db_path = get_db_path();
            ensure_db_dir(&db_path)?;
            Ok(format!("sqlite://{}", db_path.display()))
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {},
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }

    let cli = Cli::parse();
    let url = cli
        .url
        .unwrap_or_else(|| env_string_with_default("PROMPT_CURATOR_URL", DEFAULT_SERVER_URL));

    match cli.command {
        Commands::Serve { port, host, database_url } => {
            let database_url = match database_url {
                Some(url) => url,
                None => get_database_url()?,
            };
            commands::serve::run(port, host, &database_url).await?;
        },
        Commands::List { search, tag, sort, json } => {
            commands::prompts::run_list(&url, search, tag, sort, json).await?;
        },
        Commands::Tags => commands::prompts::run_tags(&url).await?,
        Commands::Get { id } => commands::prompts::run_get(&url, id).await?,
        Commands::Add { text, description, image_url, tags } => {
            commands::prompts::run_add(&url, text, description, image_url, tags).await?;
        },
        Commands::Edit { id, text, description, image_url, add_tags, remove_tags } => {
            let edit =
                commands::prompts::Edit { text, description, image_url, add_tags, remove_tags };
            commands::prompts::run_edit(&url, id, edit).await?;
        },
        Commands::Delete { id, yes } => commands::prompts::run_delete(&url, id, yes).await?,
        Commands::Health => commands::prompts::run_health(&url).await?,
    }

    Ok(())
}

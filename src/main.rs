//! `kisskh` CLI - browse the KissKH catalog and resolve episode streams

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use kisskh::{load_config, ExtensionConfig, KissKhExtension};

#[derive(Parser)]
#[command(name = "kisskh")]
#[command(about = "Browse KissKH dramas and resolve playable episode streams")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/kisskh/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the site base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List home tabs
    Tabs,

    /// Show one page of popular dramas
    Home {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Search dramas
    Search {
        /// Search query
        query: String,
    },

    /// Quick (as-you-type) search
    QuickSearch {
        /// Search query
        query: String,
    },

    /// Load drama details
    Track {
        /// Drama id
        id: String,
    },

    /// Resolve an episode id to playable sources
    Resolve {
        /// Episode id
        episode_id: String,
    },

    /// Fetch the subtitle key for an episode
    Subkey {
        /// Episode id
        episode_id: String,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "kisskh=debug" } else { "kisskh=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = effective_config(cli.config.as_deref(), cli.base_url.as_deref())?;
    let ext = KissKhExtension::new(config)?;
    let format = cli.format;

    match cli.command {
        Commands::Tabs => cmd::feed::cmd_tabs(&ext, format).await?,
        Commands::Home { page } => cmd::feed::cmd_home(&ext, page, format).await?,
        Commands::Search { query } => cmd::feed::cmd_search(&ext, &query, format).await?,
        Commands::QuickSearch { query } => {
            cmd::feed::cmd_quick_search(&ext, &query, format).await?;
        }
        Commands::Track { id } => cmd::feed::cmd_track(&ext, &id, format).await?,
        Commands::Resolve { episode_id } => {
            cmd::stream::cmd_resolve(&ext, &episode_id, format).await?;
        }
        Commands::Subkey { episode_id } => cmd::stream::cmd_subkey(&ext, &episode_id).await?,
        Commands::Config => cmd::config::cmd_config(ext.config(), cli.config.as_deref())?,
    }

    Ok(())
}

fn effective_config(
    path: Option<&std::path::Path>,
    base_url: Option<&str>,
) -> Result<ExtensionConfig> {
    let mut config = match path {
        Some(path) => ExtensionConfig::from_path(path)?,
        None => load_config()?,
    };
    if let Some(base_url) = base_url {
        config.base_url = base_url.to_string();
        config.validate()?;
    }
    Ok(config)
}

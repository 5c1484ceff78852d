//! invite-gallery CLI tool

#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use invite_gallery_cli_lib::{
    commands::{ListCommand, SearchCommand, ServeCommand, ShowCommand},
    load_config,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "invite-gallery")]
#[command(version)]
#[command(about = "Serve and browse invitation templates", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Listen address
        #[arg(long)]
        host: Option<String>,
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
        /// Run in development mode (raw template interception, verbose logs)
        #[arg(long)]
        dev: bool,
    },
    /// List one page of templates
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Templates per page
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Search templates by title or URL
    Search {
        /// Case-insensitive keyword
        keyword: String,
    },
    /// Show one template and its URLs
    Show {
        /// Template id
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port, dev } => {
            ServeCommand { host, port, dev }.execute(config).await?;
        }
        Commands::List { page, page_size } => {
            ListCommand { page, page_size }.execute(&config).await?;
        }
        Commands::Search { keyword } => {
            SearchCommand { keyword }.execute(&config).await?;
        }
        Commands::Show { id } => {
            ShowCommand { id }.execute(&config).await?;
        }
    }

    Ok(())
}

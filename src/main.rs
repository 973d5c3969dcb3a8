//! Search a Matrix homeserver for users from the command line.

mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use matryx_client::{DiscoveryService, MatrixDirectory, MatrixHttpClient, UserProfile};
use tracing::info;

use crate::config::DiscoverConfig;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find users by name, or by full user ID (@user:server)
    Search {
        query: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DiscoverConfig::load(cli.config.as_deref())?;
    let _guard = logging::init(&config)?;

    match cli.command {
        Commands::Search { query, json } => search(&config, &query, json).await,
    }
}

async fn search(config: &DiscoverConfig, query: &str, json: bool) -> Result<()> {
    let client_config = config.client_config();
    let http = MatrixHttpClient::new(&client_config).context("failed to build HTTP client")?;
    http.set_access_token(config.access_token.clone()).await;

    let directory = MatrixDirectory::new(http, &client_config);
    let service = DiscoveryService::new(directory.clone(), directory, config.user_id.clone());

    info!("Searching {} for {:?}", config.homeserver_url, query);
    let profiles = service.search_profiles(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
    } else {
        print_table(&profiles);
    }
    Ok(())
}

fn print_table(profiles: &[UserProfile]) {
    if profiles.is_empty() {
        println!("No users found");
        return;
    }
    for profile in profiles {
        println!("{}\t{}", profile.user_id, profile.display_name.as_deref().unwrap_or(""));
    }
}

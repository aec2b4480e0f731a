pub mod output;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::ConnectionsClient;
use crate::database::models::parse_timestamp;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(name = "connctl")]
#[command(about = "Inspect organization datasource connections and record syncs")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CONNECTIONS_API_URL",
        default_value = DEFAULT_API_URL,
        help = "Base URL of the connections API"
    )]
    pub url: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List all connections")]
    List,

    #[command(about = "Show a single connection")]
    Get {
        #[arg(help = "Connection id")]
        id: String,
    },

    #[command(about = "Record a completed sync (sets last_sync_at)")]
    Sync {
        #[arg(help = "Connection id")]
        id: String,
        #[arg(long, help = "Sync time as ISO-8601 with offset (defaults to now, UTC)")]
        at: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ConnectionsClient::new(&cli.url)?;

    match cli.command {
        Commands::List => {
            let connections = client.list_connections().await?;
            output::print_connections(&connections, output_format)?;
        }
        Commands::Get { id } => {
            let connection = client.get_connection_details(&id).await?;
            output::print_connection(&connection, output_format)?;
        }
        Commands::Sync { id, at } => {
            let last_sync_at = match at {
                Some(raw) => parse_timestamp(&raw)
                    .with_context(|| format!("invalid --at timestamp: {}", raw))?,
                None => DateTime::<FixedOffset>::from(Utc::now()),
            };
            let connection = client.update_connection_status(&id, last_sync_at).await?;
            output::print_connection(&connection, output_format)?;
        }
    }

    Ok(())
}

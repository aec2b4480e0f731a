use super::OutputFormat;
use crate::database::models::Connection;

pub fn print_connections(connections: &[Connection], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(connections)?),
        OutputFormat::Text => {
            println!(
                "{:<12} {:<16} {:<9} {:<9} LAST SYNC",
                "ID", "ORGANIZATION", "PROVIDER", "STATUS"
            );
            for connection in connections {
                println!("{}", summary_line(connection));
            }
        }
    }
    Ok(())
}

pub fn print_connection(connection: &Connection, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(connection)?),
        OutputFormat::Text => println!("{}", details(connection)),
    }
    Ok(())
}

fn last_sync(connection: &Connection) -> String {
    connection
        .last_sync_at
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_else(|| "never".to_string())
}

fn summary_line(connection: &Connection) -> String {
    format!(
        "{:<12} {:<16} {:<9} {:<9} {}",
        connection.id,
        connection.organization_id,
        json_tag(&connection.provider),
        json_tag(&connection.status),
        last_sync(connection)
    )
}

fn details(connection: &Connection) -> String {
    let creds = &connection.credentials;
    let foundry = &connection.foundry_config;
    [
        format!("id:              {}", connection.id),
        format!("organization:    {}", connection.organization_id),
        format!("provider:        {}", json_tag(&connection.provider)),
        format!("status:          {}", json_tag(&connection.status)),
        format!("app name:        {}", creds.app_name),
        format!("app key:         {}", creds.app_key),
        format!("app secret:      {}", mask_secret(&creds.app_secret)),
        format!("base url:        {}", creds.base_url),
        format!("profiles rid:    {}", foundry.profiles_dataset_rid),
        format!("visits rid:      {}", foundry.visits_dataset_rid),
        format!("last sync:       {}", last_sync(connection)),
    ]
    .join("\n")
}

/// The wire name of a serde enum tag
fn json_tag<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => "?".to_string(),
    }
}

/// Text output never prints secrets in full; `--json` does.
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

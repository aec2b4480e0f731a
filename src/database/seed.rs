// Fixed records loaded at process start. State is volatile: a restart
// always comes back to exactly this set, in this order.

use chrono::DateTime;

use super::models::{Connection, ConnectionStatus, Credentials, FoundryConfig, Provider};

pub const SEED_ORGANIZATION_ID: &str = "org_cheracare";

pub fn seed_connections() -> Vec<Connection> {
    vec![
        Connection {
            id: "conn_001".to_string(),
            organization_id: SEED_ORGANIZATION_ID.to_string(),
            provider: Provider::Foundry,
            status: ConnectionStatus::Active,
            credentials: Credentials {
                app_name: "CheraCare Portal".to_string(),
                app_secret: "sk-9f8e7d6c5b4a3210-dead-beef-cafe".to_string(),
                app_key: "ak-1234-5678-abcd-efgh".to_string(),
                base_url: "https://api.cheracare.example.com/v1".to_string(),
            },
            foundry_config: FoundryConfig {
                profiles_dataset_rid: "ri.foundry.main.dataset.aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee"
                    .to_string(),
                visits_dataset_rid: "ri.foundry.main.dataset.11111111-2222-3333-4444-555555555555"
                    .to_string(),
            },
            last_sync_at: None,
        },
        Connection {
            id: "conn_002".to_string(),
            organization_id: SEED_ORGANIZATION_ID.to_string(),
            provider: Provider::Foundry,
            status: ConnectionStatus::Active,
            credentials: Credentials {
                app_name: "CheraCare Mobile".to_string(),
                app_secret: "sk-0123abcd4567efgh-8901-ijkl-mnop".to_string(),
                app_key: "ak-wxyz-9876-lmno-pqrs".to_string(),
                base_url: "https://mobile-api.cheracare.example.com/v2".to_string(),
            },
            foundry_config: FoundryConfig {
                profiles_dataset_rid: "ri.foundry.main.dataset.ffffffff-0000-1111-2222-333333333333"
                    .to_string(),
                visits_dataset_rid: "ri.foundry.main.dataset.66666666-7777-8888-9999-aaaaaaaaaaaa"
                    .to_string(),
            },
            last_sync_at: DateTime::parse_from_rfc3339("2026-02-16T08:30:00+00:00").ok(),
        },
    ]
}

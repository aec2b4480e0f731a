use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// External system a connection syncs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Foundry,
}

/// Lifecycle tag. Only ever set by seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Active,
    Inactive,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "AppName")]
    pub app_name: String,
    #[serde(rename = "AppSecret")]
    pub app_secret: String,
    #[serde(rename = "AppKey")]
    pub app_key: String,
    #[serde(rename = "BaseURL")]
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundryConfig {
    pub profiles_dataset_rid: String,
    pub visits_dataset_rid: String,
}

/// One organization's link to an external data provider.
///
/// `last_sync_at` keeps the offset it was written with, so a value read back
/// serializes to the same string the client sent (modulo RFC 3339 normalization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub organization_id: String,
    pub provider: Provider,
    pub status: ConnectionStatus,
    pub credentials: Credentials,
    #[serde(rename = "foundryConfig")]
    pub foundry_config: FoundryConfig,
    #[serde(default, with = "rfc3339_option")]
    pub last_sync_at: Option<DateTime<FixedOffset>>,
}

/// Parse a timezone-aware timestamp.
///
/// Accepts RFC 3339 and the ISO-8601 variant with a colon-less offset
/// (`2026-02-19T10:00:00+0000`). Naive timestamps are rejected.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}

mod rfc3339_option {
    use chrono::{DateTime, FixedOffset};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            super::parse_timestamp(&s)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", s)))
        })
        .transpose()
    }
}

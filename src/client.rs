//! HTTP client for the connections API.
//!
//! Consumers that sync from a provider read a connection with
//! [`ConnectionsClient::get_connection_details`] and report completion with
//! [`ConnectionsClient::update_connection_status`].

use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use url::Url;

use crate::database::models::Connection;
use crate::routes::CONNECTIONS_PATH;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Connection '{0}' not found")]
    NotFound(String),

    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ConnectionsClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ConnectionsClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let mut base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        // Keep any path prefix (e.g. behind a reverse proxy) when joining
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    pub async fn list_connections(&self) -> Result<Vec<Connection>, ClientError> {
        let response = self.http.get(self.collection_url()?).send().await?;
        Self::decode(response, None).await
    }

    pub async fn get_connection_details(&self, id: &str) -> Result<Connection, ClientError> {
        let response = self.http.get(self.record_url(id)?).send().await?;
        Self::decode(response, Some(id)).await
    }

    /// Record a completed sync. Returns the connection as stored by the server.
    pub async fn update_connection_status(
        &self,
        id: &str,
        last_sync_at: DateTime<FixedOffset>,
    ) -> Result<Connection, ClientError> {
        let response = self
            .http
            .patch(self.record_url(id)?)
            .json(&json!({ "last_sync_at": last_sync_at.to_rfc3339() }))
            .send()
            .await?;
        Self::decode(response, Some(id)).await
    }

    fn collection_url(&self) -> Result<Url, ClientError> {
        self.base_url
            .join(CONNECTIONS_PATH.trim_start_matches('/'))
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))
    }

    fn record_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .push(id);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        id: Option<&str>,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(ClientError::NotFound(id.to_string()));
            }
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let code = body["code"].as_str().unwrap_or("UNKNOWN").to_string();
        let mut message = body["message"]
            .as_str()
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"))
            .to_string();
        if let Some(fields) = body["field_errors"].as_object() {
            let details: Vec<String> = fields
                .iter()
                .map(|(field, reason)| {
                    format!("{}: {}", field, reason.as_str().unwrap_or_default())
                })
                .collect();
            message = format!("{} ({})", message, details.join(", "));
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

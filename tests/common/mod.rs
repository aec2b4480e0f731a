use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use org_connections_api::{config::AppConfig, routes, state::AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    /// Start a freshly seeded server on an unused port.
    ///
    /// The server task lives on the calling test's runtime, so every test
    /// gets its own store and the server stops with the test.
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        let mut config = AppConfig::default();
        config.api.enable_request_logging = false;
        let app = routes::app(AppState::seeded()?, &config);

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self { port, base_url };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

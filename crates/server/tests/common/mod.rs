//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the
//! `schemascope-server` integration tests.
//!
//! - `TestApp`: spawns the real router on a random port. Outbound fetches go
//!   either through the HTTP fetcher to a `wiremock::MockServer` standing in
//!   for the upstream site, or through an in-memory `MockFetcher`.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use reqwest::Client;
use schemascope_server::{
    config::AppConfig,
    router,
    state::{build_app_state, build_app_state_with_fetcher, AppState},
};
use schemascope_test_utils::MockFetcher;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with the HTTP fetcher and default configuration.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_config(test_config()).await
    }

    pub async fn spawn_with_config(config: AppConfig) -> Result<Self> {
        let app_state = build_app_state(config).await?;
        Self::spawn_with_state(app_state).await
    }

    /// Spawns the server with an in-memory fetcher instead of the HTTP one.
    pub async fn spawn_with_fetcher(fetcher: MockFetcher) -> Result<Self> {
        let app_state = build_app_state_with_fetcher(test_config(), Arc::new(fetcher))?;
        Self::spawn_with_state(app_state).await
    }

    pub async fn spawn_with_state(app_state: AppState) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start().await;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// The upstream URL of `route` on the mock site.
    pub fn upstream(&self, route: &str) -> String {
        format!("{}{route}", self.mock_server.uri())
    }

    /// Serves an HTML page on the mock site.
    pub async fn mount_html(&self, route: &str, html: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
            .mount(&self.mock_server)
            .await;
    }

    /// Serves an XML document on the mock site.
    pub async fn mount_xml(&self, route: &str, xml: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(xml, "application/xml"))
            .mount(&self.mock_server)
            .await;
    }

    /// POSTs a JSON body to one of the server's endpoints.
    pub async fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{endpoint}", self.address))
            .json(body)
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// The default configuration with a short fetch timeout.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.fetch.timeout_secs = 2;
    config.fetch.user_agent = "schemascope-test".to_string();
    config
}

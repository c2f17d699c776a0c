//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Everything in it is read-only once built; each
//! request works on its own extracted data.

use crate::config::AppConfig;
use schemascope::{PageFetcher, TypeRules};
use schemascope_web::{FetcherConfig, HttpFetcher};
use std::{sync::Arc, time::Duration};
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// Retrieves pages and sitemaps.
    pub fetcher: Arc<dyn PageFetcher>,
    /// The compiled type inference table.
    pub type_rules: Arc<TypeRules>,
}

/// Builds the shared application state from the configuration, with an HTTP
/// fetcher configured from the `fetch` section.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let fetcher = HttpFetcher::new(&FetcherConfig {
        timeout: Duration::from_secs(config.fetch.timeout_secs),
        user_agent: config.fetch.user_agent.clone(),
    })?;
    info!(
        timeout_secs = config.fetch.timeout_secs,
        user_agent = %config.fetch.user_agent,
        "Initialized HTTP page fetcher."
    );
    build_app_state_with_fetcher(config, Arc::new(fetcher))
}

/// Builds the shared application state around an existing fetcher.
pub fn build_app_state_with_fetcher(
    config: AppConfig,
    fetcher: Arc<dyn PageFetcher>,
) -> anyhow::Result<AppState> {
    let type_rules = config.compile_type_rules()?;
    info!(rules = type_rules.len(), "Compiled type inference rules.");

    Ok(AppState {
        config: Arc::new(config),
        fetcher,
        type_rules: Arc::new(type_rules),
    })
}

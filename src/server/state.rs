//! Server shared state
//!
//! Holds configuration and shared resources for the HTTP server.

use crate::auth::{AccessPolicy, StaticTokenVerifier, TokenVerifier};
use crate::catalog::{open_catalog, PlaceCatalog};
use crate::config::Config;
use crate::present::MediaResolver;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Place store queried by the search endpoints
    pub catalog: Arc<dyn PlaceCatalog>,

    /// Bearer token verification
    pub verifier: Arc<dyn TokenVerifier>,

    /// Per-mode authentication requirements
    pub policy: AccessPolicy,

    /// When the state was created
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state, opening the configured catalog
    pub fn new(config: Config) -> Self {
        let catalog = open_catalog(&config);
        Self::with_catalog(config, catalog)
    }

    /// Create application state around an existing catalog
    pub fn with_catalog(config: Config, catalog: Arc<dyn PlaceCatalog>) -> Self {
        let verifier = Arc::new(StaticTokenVerifier::new(config.auth.tokens.clone()));
        let policy = AccessPolicy::from(&config.auth);

        Self {
            config,
            catalog,
            verifier,
            policy,
            started_at: Utc::now(),
        }
    }

    /// Media resolver for a request with the given headers
    pub fn media_for(&self, headers: &HeaderMap) -> MediaResolver {
        MediaResolver::from_request(
            headers,
            self.config.media.public_base_url.as_deref(),
            &self.config.media.prefix,
        )
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}

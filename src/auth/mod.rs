//! Caller authentication
//!
//! Tokens are issued by an external auth service. This module only maps a
//! bearer token to an `Identity` and decides, per ranking mode, whether an
//! identity is required.

use crate::config::AuthConfig;
use crate::constants::detail::{INVALID_TOKEN, NOT_AUTHENTICATED};
use crate::error::{Error, Result};
use crate::nearby::RankingMode;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user: String,
}

/// Trait for token verification backends
pub trait TokenVerifier: Send + Sync {
    /// Resolve a bearer token to the identity it was issued for
    fn verify(&self, token: &str) -> Option<Identity>;
}

/// Verifier backed by a fixed token table from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    /// Create a verifier from a token -> user map
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).map(|user| Identity { user: user.clone() })
    }
}

/// Which ranking modes need an authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub nearby_require_auth: bool,
    pub top_rated_require_auth: bool,
}

impl AccessPolicy {
    /// Whether `mode` requires an authenticated caller
    pub fn requires_auth(&self, mode: RankingMode) -> bool {
        match mode {
            RankingMode::NearestFirst => self.nearby_require_auth,
            RankingMode::TopRated => self.top_rated_require_auth,
        }
    }
}

impl From<&AuthConfig> for AccessPolicy {
    fn from(config: &AuthConfig) -> Self {
        Self {
            nearby_require_auth: config.nearby_require_auth,
            top_rated_require_auth: config.top_rated_require_auth,
        }
    }
}

/// Extract the bearer token from an `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

/// Authenticate the caller of a request
///
/// A presented token that does not verify is rejected even when the mode
/// is public. With no token, the caller is anonymous; that is an error only
/// when `required`.
pub fn authenticate(
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
    required: bool,
) -> Result<Option<Identity>> {
    match bearer_token(headers) {
        Some(token) => verifier
            .verify(token)
            .map(Some)
            .ok_or_else(|| Error::Unauthorized(INVALID_TOKEN.to_string())),
        None if required => Err(Error::Unauthorized(NOT_AUTHENTICATED.to_string())),
        None => Ok(None),
    }
}

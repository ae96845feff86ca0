//! Media URL resolution
//!
//! Catalog entries store image paths relative to the media root. Clients
//! need absolute URLs, built from the public origin of the request.

use axum::http::{header, HeaderMap};

/// Fallback origin when a request carries no Host header
const FALLBACK_ORIGIN: &str = "http://localhost";

/// Builds absolute media URLs for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    origin: String,
    prefix: String,
}

impl MediaResolver {
    /// Create a resolver for `origin` (scheme and host) and media `prefix`
    ///
    /// Trailing slashes on the origin and missing slashes around the
    /// prefix are normalized.
    pub fn new(origin: impl Into<String>, prefix: impl Into<String>) -> Self {
        let origin = origin.into().trim_end_matches('/').to_string();
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };

        Self { origin, prefix }
    }

    /// Create a resolver from request headers
    ///
    /// A configured `public_base_url` wins over anything in the request.
    /// Otherwise the origin is `X-Forwarded-Proto` (or `http`) plus the
    /// `Host` header.
    pub fn from_request(headers: &HeaderMap, public_base_url: Option<&str>, prefix: &str) -> Self {
        if let Some(base) = public_base_url.filter(|b| !b.is_empty()) {
            return Self::new(base, prefix);
        }

        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty());

        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| *s == "http" || *s == "https")
            .unwrap_or("http");

        match host {
            Some(host) => Self::new(format!("{}://{}", scheme, host), prefix),
            None => Self::new(FALLBACK_ORIGIN, prefix),
        }
    }

    /// The origin URLs are built against
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Resolve a stored media path to an absolute URL
    ///
    /// Returns `None` for an empty path. Paths that are already absolute
    /// URLs are returned unchanged.
    pub fn resolve(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }

        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }

        let encoded = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        Some(format!("{}{}{}", self.origin, self.prefix, encoded))
    }
}

//! travel-guide: Travel Recommendation Backend
//!
//! A library and CLI tool for serving recommended places and finding the
//! ones near a given coordinate.
//!
//! ## Features
//!
//! - Great-circle distance between coordinates
//! - Nearby search within a fixed radius, nearest-first or top-rated
//! - Absolute media URLs for place images and galleries
//! - Per-mode authentication policy
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use travel_guide::catalog::{memory::MemoryCatalog, Place};
//! use travel_guide::nearby::{find_nearby, NearbyQuery, RankingMode};
//!
//! let catalog = MemoryCatalog::new(vec![
//!     Place::new(1, "Gandan Monastery", 4.8).at(47.9214, 106.8943),
//!     Place::new(2, "Null Island", 5.0).at(0.0, 0.0),
//! ]);
//!
//! let query = NearbyQuery::parse(Some("47.915"), Some("106.90")).unwrap();
//! let outcome = find_nearby(&catalog, &query, RankingMode::NearestFirst).unwrap();
//!
//! assert_eq!(outcome.matches.len(), 1);
//! assert_eq!(outcome.matches[0].place.id, 1);
//! ```

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod nearby;
pub mod present;
pub mod server;

// Re-export commonly used types
pub use catalog::{Place, PlaceCatalog};
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use nearby::{find_nearby, NearbyOutcome, NearbyQuery, RankingMode};
pub use present::NearbyResult;

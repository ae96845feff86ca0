//! Place catalog storage
//!
//! This module defines the `PlaceCatalog` trait and the stores that back it.
//! The catalog is read-only from the point of view of a nearby query.
//!
//! ## Flex Point
//! Adding a new store requires:
//! 1. Create `src/catalog/{store_name}.rs` implementing `PlaceCatalog`
//! 2. Add `pub mod {store_name};` below
//! 3. Wire it up in `open_catalog`

pub mod json_file;
pub mod memory;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A recommended place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: u64,

    #[serde(default = "unknown")]
    pub name: String,

    #[serde(default)]
    pub location: String,

    #[serde(default = "unknown")]
    pub description: String,

    #[serde(default = "unknown")]
    pub phone_number: String,

    /// Free-text hotel classification (e.g. "4 star")
    #[serde(default = "unknown")]
    pub hotel_rating: String,

    pub rating: f64,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Primary image, as a path relative to the media root
    #[serde(default)]
    pub image: Option<String>,

    /// Gallery image paths, in display order
    #[serde(default)]
    pub gallery: Vec<String>,
}

fn unknown() -> String {
    "Unknown".to_string()
}

impl Place {
    /// Create a place with the given id, name and rating; other fields default
    pub fn new(id: u64, name: impl Into<String>, rating: f64) -> Self {
        Self {
            id,
            name: name.into(),
            location: String::new(),
            description: unknown(),
            phone_number: unknown(),
            hotel_rating: unknown(),
            rating,
            latitude: None,
            longitude: None,
            image: None,
            gallery: Vec::new(),
        }
    }

    /// Set coordinates
    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.latitude = Some(lat);
        self.longitude = Some(lon);
        self
    }

    /// Set the primary image path
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image = Some(path.into());
        self
    }

    /// Append a gallery image path
    pub fn with_gallery_image(mut self, path: impl Into<String>) -> Self {
        self.gallery.push(path.into());
        self
    }

    /// The place's coordinates, if both latitude and longitude are set
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

/// Places read from a store, plus the entries that could not be decoded
#[derive(Debug, Clone, Default)]
pub struct CatalogScan {
    /// Decoded places, in catalog order
    pub places: Vec<Place>,
    /// Entries skipped because they did not decode as a place
    pub malformed: usize,
}

/// Read access to the place catalog
///
/// Implementations must be thread-safe (Send + Sync) to work with async server.
pub trait PlaceCatalog: Send + Sync {
    /// Returns the store name (e.g., "memory", "json")
    fn name(&self) -> &'static str;

    /// Fetch every place in the catalog, in catalog order
    fn fetch_all(&self) -> Result<Vec<Place>>;

    /// Fetch every place along with a count of undecodable entries
    ///
    /// Stores holding typed records never have malformed entries, so the
    /// default implementation reports zero.
    fn scan(&self) -> Result<CatalogScan> {
        Ok(CatalogScan {
            places: self.fetch_all()?,
            malformed: 0,
        })
    }

    /// Fetch a single place by id
    ///
    /// Default implementation scans `fetch_all`.
    fn fetch_by_id(&self, id: u64) -> Result<Option<Place>> {
        Ok(self.fetch_all()?.into_iter().find(|p| p.id == id))
    }
}

/// Open the catalog named by the configuration
///
/// A configured path opens a JSON file store; otherwise an empty
/// in-memory catalog is used.
pub fn open_catalog(config: &Config) -> Arc<dyn PlaceCatalog> {
    match &config.catalog.path {
        Some(path) if !path.is_empty() => Arc::new(json_file::JsonFileCatalog::new(path)),
        _ => Arc::new(memory::MemoryCatalog::default()),
    }
}

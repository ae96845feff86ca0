//! JSON file catalog
//!
//! Reads places from a JSON array on disk. The file is re-read on every
//! fetch so edits made by catalog tooling are picked up without a restart.
//!
//! Entries are decoded one at a time: an entry that is not a valid place is
//! logged and skipped, and the rest of the file is still served. Only an
//! unreadable file, or one that is not a JSON array, fails the fetch.

use crate::catalog::{CatalogScan, Place, PlaceCatalog};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Catalog backed by a JSON file containing an array of places
#[derive(Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Create a catalog reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<Vec<Value>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::Catalog(format!(
                "Failed to read catalog file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::Catalog(format!(
                "Failed to parse catalog file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl PlaceCatalog for JsonFileCatalog {
    fn name(&self) -> &'static str {
        "json"
    }

    fn fetch_all(&self) -> Result<Vec<Place>> {
        Ok(self.scan()?.places)
    }

    fn scan(&self) -> Result<CatalogScan> {
        let entries = self.read_entries()?;
        let mut scan = CatalogScan {
            places: Vec::with_capacity(entries.len()),
            malformed: 0,
        };

        for (index, entry) in entries.into_iter().enumerate() {
            let id = entry.get("id").cloned();
            match serde_json::from_value::<Place>(entry) {
                Ok(place) => scan.places.push(place),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        index,
                        id = ?id,
                        error = %e,
                        "Skipping malformed catalog entry"
                    );
                    scan.malformed += 1;
                }
            }
        }

        Ok(scan)
    }
}

//! In-memory catalog
//!
//! Holds a fixed list of places. Used for tests and when no catalog file
//! is configured.

use crate::catalog::{Place, PlaceCatalog};
use crate::error::Result;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Catalog backed by a `Vec<Place>`
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    places: Vec<Place>,
    fetches: AtomicUsize,
}

impl MemoryCatalog {
    /// Create a catalog holding the given places, in order
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            places,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of times the catalog has been read
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl PlaceCatalog for MemoryCatalog {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch_all(&self) -> Result<Vec<Place>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.places.clone())
    }

    fn fetch_by_id(&self, id: u64) -> Result<Option<Place>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.places.iter().find(|p| p.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_all_preserves_order() {
        let catalog = MemoryCatalog::new(vec![
            Place::new(3, "c", 1.0),
            Place::new(1, "a", 2.0),
            Place::new(2, "b", 3.0),
        ]);

        let ids: Vec<u64> = catalog.fetch_all().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(catalog.fetch_count(), 1);
    }

    #[test]
    fn test_fetch_by_id() {
        let catalog = MemoryCatalog::new(vec![Place::new(1, "a", 2.0)]);

        assert_eq!(catalog.fetch_by_id(1).unwrap().unwrap().name, "a");
        assert!(catalog.fetch_by_id(99).unwrap().is_none());
        assert_eq!(catalog.fetch_count(), 2);
    }
}

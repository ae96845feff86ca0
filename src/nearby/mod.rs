//! Nearby place search
//!
//! Scans the catalog for places within a fixed radius of a query point and
//! ranks them either nearest-first or top-rated-first.
//!
//! Places that cannot be scored are skipped rather than failing the query.
//! Each skip is counted on the returned `NearbyOutcome` and logged.

pub mod rank;

use crate::catalog::{Place, PlaceCatalog};
use crate::constants::detail::{INVALID_COORDINATES, MISSING_COORDINATES};
use crate::constants::nearby::NEARBY_RADIUS_KM;
use crate::coord::distance::haversine_km;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

pub use rank::rank;

/// Ranking applied to places within the radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Ascending distance, every match returned
    NearestFirst,
    /// Descending rating, capped at `TOP_RATED_LIMIT`
    TopRated,
}

impl Default for RankingMode {
    fn default() -> Self {
        Self::NearestFirst
    }
}

impl std::fmt::Display for RankingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NearestFirst => write!(f, "nearest_first"),
            Self::TopRated => write!(f, "top_rated"),
        }
    }
}

impl std::str::FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest_first" | "nearest-first" | "nearest" => Ok(Self::NearestFirst),
            "top_rated" | "top-rated" | "toprated" => Ok(Self::TopRated),
            _ => Err(format!("Unknown ranking mode: {}", s)),
        }
    }
}

/// A validated query point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub origin: Coordinates,
}

impl NearbyQuery {
    /// Create a query around the given point
    pub fn new(origin: Coordinates) -> Self {
        Self { origin }
    }

    /// Parse raw `lat` / `lon` query parameters
    ///
    /// Both must be present and parse as floating-point numbers.
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Result<Self> {
        let (lat, lon) = match (lat, lon) {
            (Some(lat), Some(lon)) if !lat.trim().is_empty() && !lon.trim().is_empty() => {
                (lat, lon)
            }
            _ => return Err(Error::Validation(MISSING_COORDINATES.to_string())),
        };

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| Error::Validation(INVALID_COORDINATES.to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| Error::Validation(INVALID_COORDINATES.to_string()))?;

        let origin = Coordinates::new(lat, lon);
        if !origin.is_finite() {
            return Err(Error::Validation(INVALID_COORDINATES.to_string()));
        }

        Ok(Self { origin })
    }
}

/// Why a catalog entry was left out of the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Latitude or longitude is not set
    MissingCoordinates,
    /// Coordinates are set but produce no usable distance
    InvalidDistance,
}

/// A place with its distance from the query point
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlace {
    pub place: Place,
    /// Distance in kilometers, unrounded
    pub distance_km: f64,
}

/// Result of a nearby search
#[derive(Debug, Clone, Default)]
pub struct NearbyOutcome {
    /// Ranked matches
    pub matches: Vec<ScoredPlace>,
    /// Number of catalog entries examined
    pub scanned: usize,
    /// Entries skipped because they lack coordinates
    pub skipped_missing: usize,
    /// Entries skipped because their distance could not be computed
    pub skipped_invalid: usize,
    /// Entries the catalog could not decode
    pub skipped_malformed: usize,
}

impl NearbyOutcome {
    /// Total number of skipped entries
    pub fn skipped(&self) -> usize {
        self.skipped_missing + self.skipped_invalid + self.skipped_malformed
    }
}

/// Score a single place against the query point
pub fn score(place: &Place, origin: Coordinates) -> std::result::Result<f64, SkipReason> {
    let coords = place.coordinates().ok_or(SkipReason::MissingCoordinates)?;

    let distance = haversine_km(origin, coords);
    if distance.is_finite() {
        Ok(distance)
    } else {
        Err(SkipReason::InvalidDistance)
    }
}

/// Keep places within `radius_km` of the query point
///
/// Returns the scored matches in catalog order along with the outcome
/// counters for the scan.
pub fn filter_within(
    places: Vec<Place>,
    origin: Coordinates,
    radius_km: f64,
) -> NearbyOutcome {
    let mut outcome = NearbyOutcome {
        scanned: places.len(),
        ..Default::default()
    };

    for place in places {
        match score(&place, origin) {
            Ok(distance_km) if distance_km <= radius_km => {
                outcome.matches.push(ScoredPlace { place, distance_km });
            }
            Ok(_) => {}
            Err(SkipReason::MissingCoordinates) => {
                debug!(place_id = place.id, "Skipping place without coordinates");
                outcome.skipped_missing += 1;
            }
            Err(SkipReason::InvalidDistance) => {
                warn!(
                    place_id = place.id,
                    latitude = ?place.latitude,
                    longitude = ?place.longitude,
                    "Skipping place with unusable coordinates"
                );
                outcome.skipped_invalid += 1;
            }
        }
    }

    outcome
}

/// Find places near the query point
///
/// # Arguments
/// * `catalog` - Place store to scan
/// * `query` - Validated query point
/// * `mode` - Ranking to apply
///
/// # Returns
/// Ranked matches within `NEARBY_RADIUS_KM`. An empty result is not an error;
/// a failing catalog is.
pub fn find_nearby(
    catalog: &dyn PlaceCatalog,
    query: &NearbyQuery,
    mode: RankingMode,
) -> Result<NearbyOutcome> {
    let query_id = Uuid::new_v4();
    let span = info_span!("nearby", %query_id, %mode, origin = %query.origin);
    let _enter = span.enter();

    let scan = catalog.scan()?;

    let mut outcome = filter_within(scan.places, query.origin, NEARBY_RADIUS_KM);
    outcome.scanned += scan.malformed;
    outcome.skipped_malformed = scan.malformed;
    outcome.matches = rank(outcome.matches, mode);

    info!(
        scanned = outcome.scanned,
        matched = outcome.matches.len(),
        skipped = outcome.skipped(),
        "Nearby search complete"
    );

    Ok(outcome)
}

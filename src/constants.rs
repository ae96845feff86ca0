//! Centralized constants for the travel-guide crate

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers (IUGG mean radius)
    pub const EARTH_RADIUS_KM: f64 = 6_371.0088;
}

/// Nearby search policy
pub mod nearby {
    /// Places farther than this from the query point are excluded
    pub const NEARBY_RADIUS_KM: f64 = 5.0;

    /// Maximum number of results returned by the top-rated ranking
    pub const TOP_RATED_LIMIT: usize = 10;

    /// Decimal places kept on the distance reported to clients
    pub const DISTANCE_DECIMALS: i32 = 2;
}

/// Detail messages returned in `{"detail": ...}` error bodies
pub mod detail {
    pub const MISSING_COORDINATES: &str = "Latitude and longitude are required";
    pub const INVALID_COORDINATES: &str = "Invalid latitude or longitude";
    pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
    pub const INVALID_TOKEN: &str = "Given token not valid for any token type";
    pub const NOT_FOUND: &str = "Not found.";
}

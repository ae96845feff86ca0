//! Output formatters
//!
//! Provides trait-based output formatting for nearby search reports.

pub mod gpx;
pub mod json;
pub mod text;

use crate::coord::Coordinates;
use crate::error::Result;
use crate::nearby::RankingMode;
use crate::present::NearbyResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A nearby search as printed by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyReport {
    /// Query point
    pub origin: Coordinates,
    /// Ranking applied
    pub mode: RankingMode,
    /// Catalog entries examined
    pub scanned: usize,
    /// Catalog entries skipped as malformed or for missing or unusable coordinates
    pub skipped: usize,
    /// Ranked results
    pub results: Vec<NearbyResult>,
    /// When the search ran
    pub generated_at: DateTime<Utc>,
}

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format the report
    fn format(&self, report: &NearbyReport) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        Box::new(json::JsonFormatter) as Box<dyn OutputFormatter>,
        Box::new(text::TextFormatter),
        Box::new(gpx::GpxFormatter),
    ]
    .iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) fn sample_report() -> NearbyReport {
    NearbyReport {
        origin: Coordinates::new(47.915, 106.925),
        mode: RankingMode::NearestFirst,
        scanned: 3,
        skipped: 1,
        results: vec![
            NearbyResult {
                id: 1,
                name: "Choijin Lama <Temple> & Museum".to_string(),
                location: "Sukhbaatar District".to_string(),
                description: "Temple complex".to_string(),
                phone_number: "+976 11 324788".to_string(),
                rating: 4.6,
                latitude: Some(47.9166),
                longitude: Some(106.9208),
                image: Some("http://localhost/media/places/choijin.jpg".to_string()),
                distance: 0.35,
                images: vec![],
            },
            NearbyResult {
                id: 2,
                name: "State Department Store".to_string(),
                location: "Peace Avenue".to_string(),
                description: "Shopping".to_string(),
                phone_number: "Unknown".to_string(),
                rating: 4.1,
                latitude: Some(47.9171),
                longitude: Some(106.9103),
                image: None,
                distance: 1.12,
                images: vec![],
            },
        ],
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("gpx").is_some());
        assert!(get_formatter("unknown").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        assert!(formats.iter().any(|f| f.name == "json"));
        assert!(formats.iter().any(|f| f.name == "gpx"));
    }
}

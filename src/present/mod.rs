//! Response shaping
//!
//! Turns catalog places into transport records: media paths become
//! absolute URLs and distances are rounded for display.

pub mod media;

use crate::catalog::Place;
use crate::constants::nearby::DISTANCE_DECIMALS;
use crate::nearby::ScoredPlace;
use serde::{Deserialize, Serialize};

pub use media::MediaResolver;

/// A place returned by a nearby search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyResult {
    pub id: u64,
    pub name: String,
    pub location: String,
    pub description: String,
    pub phone_number: String,
    pub rating: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Absolute URL of the primary image
    pub image: Option<String>,
    /// Kilometers from the query point
    pub distance: f64,
    /// Absolute URLs of gallery images
    pub images: Vec<String>,
}

/// A single place, as returned by the detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub id: u64,
    pub name: String,
    pub location: String,
    pub description: String,
    pub phone_number: String,
    pub hotel_rating: String,
    pub rating: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<String>,
    pub images: Vec<String>,
}

/// Round a distance in kilometers for display
///
/// Halfway cases round away from zero.
pub fn round_distance(km: f64) -> f64 {
    let factor = 10f64.powi(DISTANCE_DECIMALS);
    (km * factor).round() / factor
}

/// Build the response record for a nearby match
pub fn present(scored: &ScoredPlace, media: &MediaResolver) -> NearbyResult {
    let place = &scored.place;
    NearbyResult {
        id: place.id,
        name: place.name.clone(),
        location: place.location.clone(),
        description: place.description.clone(),
        phone_number: place.phone_number.clone(),
        rating: place.rating,
        latitude: place.latitude,
        longitude: place.longitude,
        image: place.image.as_deref().and_then(|p| media.resolve(p)),
        distance: round_distance(scored.distance_km),
        images: gallery_urls(place, media),
    }
}

/// Build response records for a ranked list of matches, preserving order
pub fn present_all(matches: &[ScoredPlace], media: &MediaResolver) -> Vec<NearbyResult> {
    matches.iter().map(|m| present(m, media)).collect()
}

/// Build the detail record for a single place
pub fn present_detail(place: &Place, media: &MediaResolver) -> PlaceDetail {
    PlaceDetail {
        id: place.id,
        name: place.name.clone(),
        location: place.location.clone(),
        description: place.description.clone(),
        phone_number: place.phone_number.clone(),
        hotel_rating: place.hotel_rating.clone(),
        rating: place.rating,
        latitude: place.latitude,
        longitude: place.longitude,
        image: place.image.as_deref().and_then(|p| media.resolve(p)),
        images: gallery_urls(place, media),
    }
}

fn gallery_urls(place: &Place, media: &MediaResolver) -> Vec<String> {
    place
        .gallery
        .iter()
        .filter_map(|p| media.resolve(p))
        .collect()
}

//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::auth::authenticate;
use crate::constants::detail::NOT_FOUND;
use crate::error::Error;
use crate::nearby::{find_nearby, NearbyQuery, RankingMode};
use crate::present::{present_all, present_detail, NearbyResult, PlaceDetail};
use crate::server::state::AppState;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/nearby_places/", get(nearby_handler))
        .route("/api/top_rated_nearby_places/", get(top_rated_handler))
        .route("/api/places/:id/", get(place_detail_handler))
        .route("/api/status", get(status_handler))
        .route("/nearby", get(nearby_handler))
        .route("/top_rated_nearby", get(top_rated_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Raw coordinate query parameters
///
/// Kept as strings so missing, malformed and repeated values all get a
/// `{"detail": ...}` response instead of an extractor rejection.
#[derive(Debug, Default)]
pub struct CoordinateParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl CoordinateParams {
    /// Collect coordinates from decoded query pairs
    ///
    /// Unknown keys are ignored; a repeated key keeps its last value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "lat" => params.lat = Some(value),
                "lon" => params.lon = Some(value),
                _ => {}
            }
        }
        params
    }

    fn from_query(query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Result<Self, Error> {
        let Query(pairs) = query.map_err(|e| Error::Validation(e.body_text()))?;
        Ok(Self::from_pairs(pairs))
    }
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }

        ApiError {
            status,
            detail: err.to_string(),
        }
    }
}

/// Authenticate, validate, search and present for one ranking mode
async fn search(
    state: Arc<AppState>,
    headers: HeaderMap,
    params: CoordinateParams,
    mode: RankingMode,
) -> Result<Json<Vec<NearbyResult>>, ApiError> {
    let identity = authenticate(&headers, state.verifier.as_ref(), state.policy.requires_auth(mode))?;
    debug!(user = ?identity.as_ref().map(|i| &i.user), %mode, "Nearby request");

    let query = NearbyQuery::parse(params.lat.as_deref(), params.lon.as_deref())?;

    // Catalog reads may hit the filesystem
    let catalog = state.catalog.clone();
    let outcome = tokio::task::spawn_blocking(move || find_nearby(catalog.as_ref(), &query, mode))
        .await
        .map_err(|e| Error::Server(format!("Search task failed: {}", e)))??;

    let media = state.media_for(&headers);
    Ok(Json(present_all(&outcome.matches, &media)))
}

/// Places within the search radius, nearest first
///
/// GET /api/nearby_places/?lat=..&lon=..
async fn nearby_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<NearbyResult>>, ApiError> {
    search(state, headers, CoordinateParams::from_query(query)?, RankingMode::NearestFirst).await
}

/// Best-rated places within the search radius
///
/// GET /api/top_rated_nearby_places/?lat=..&lon=..
async fn top_rated_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<NearbyResult>>, ApiError> {
    search(state, headers, CoordinateParams::from_query(query)?, RankingMode::TopRated).await
}

/// Single place detail
///
/// GET /api/places/:id/
async fn place_detail_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<PlaceDetail>, ApiError> {
    // Non-numeric ids name no place
    let Path(id) = id.map_err(|_| Error::NotFound(NOT_FOUND.to_string()))?;
    let catalog = state.catalog.clone();
    let place = tokio::task::spawn_blocking(move || catalog.fetch_by_id(id))
        .await
        .map_err(|e| Error::Server(format!("Lookup task failed: {}", e)))??
        .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))?;

    let media = state.media_for(&headers);
    Ok(Json(present_detail(&place, &media)))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Catalog store name
    pub catalog: String,
    /// Number of places in the catalog (None if the catalog is unreadable)
    pub places: Option<usize>,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let catalog = state.catalog.clone();
    let places = tokio::task::spawn_blocking(move || catalog.fetch_all())
        .await
        .ok()
        .and_then(|r| r.ok())
        .map(|p| p.len());

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog: state.catalog.name().to_string(),
        places,
        uptime_secs: state.uptime_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::MemoryCatalog;
    use crate::catalog::{Place, PlaceCatalog};
    use crate::config::Config;
    use crate::error::Result;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";

    struct DownCatalog;

    impl PlaceCatalog for DownCatalog {
        fn name(&self) -> &'static str {
            "down"
        }

        fn fetch_all(&self) -> Result<Vec<Place>> {
            Err(Error::Catalog("database unavailable".to_string()))
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.auth.tokens.insert(TOKEN.to_string(), "tester@example.mn".to_string());
        config
    }

    fn ulaanbaatar_places() -> Vec<Place> {
        vec![
            Place::new(1, "State Department Store", 4.5)
                .at(47.91, 106.92)
                .with_image("places/store.jpg")
                .with_gallery_image("gallery/store-1.jpg"),
            Place::new(2, "Choijin Lama Temple", 3.0).at(47.92, 106.93),
            Place::new(3, "Null Island", 5.0).at(0.0, 0.0),
        ]
    }

    fn create_test_app(config: Config, catalog: Arc<dyn PlaceCatalog>) -> Router {
        create_router(Arc::new(AppState::with_catalog(config, catalog)))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("Host", "testserver")
            .body(Body::empty())
            .unwrap()
    }

    fn get_authed(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("Host", "testserver")
            .header("Authorization", format!("Bearer {}", TOKEN))
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_nearby_endpoint() {
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let response = app
            .oneshot(get("/api/nearby_places/?lat=47.915&lon=106.925"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let results: Vec<NearbyResult> = json_body(response).await;
        let ids: Vec<u64> = results.iter().map(|r| r.id).collect();

        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&3));
        assert!(results[0].distance <= results[1].distance);

        let store = results.iter().find(|r| r.id == 1).unwrap();
        assert_eq!(store.image.as_deref(), Some("http://testserver/media/places/store.jpg"));
        assert_eq!(store.images, vec!["http://testserver/media/gallery/store-1.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_nearby_alias_route() {
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let response = app.oneshot(get("/nearby?lat=47.915&lon=106.925")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let results: Vec<NearbyResult> = json_body(response).await;
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_nearby_missing_coordinates() {
        let catalog = Arc::new(MemoryCatalog::new(ulaanbaatar_places()));
        let app = create_test_app(test_config(), catalog.clone());

        let response = app.oneshot(get("/api/nearby_places/?lat=47.915")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = json_body(response).await;
        assert!(!err.detail.is_empty());
        assert_eq!(catalog.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_nearby_non_numeric_coordinates() {
        let catalog = Arc::new(MemoryCatalog::new(ulaanbaatar_places()));
        let app = create_test_app(test_config(), catalog.clone());

        let response = app
            .oneshot(get("/api/nearby_places/?lat=abc&lon=106.925"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = json_body(response).await;
        assert!(body["detail"].is_string());
        assert_eq!(catalog.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_coordinate_keys_use_last_value() {
        let catalog = Arc::new(MemoryCatalog::new(ulaanbaatar_places()));

        let app = create_test_app(test_config(), catalog.clone());
        let response = app
            .oneshot(get("/nearby?lat=1&lat=47.915&lon=106.925"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let results: Vec<NearbyResult> = json_body(response).await;
        assert_eq!(results.len(), 2);

        let app = create_test_app(test_config(), catalog.clone());
        let response = app
            .oneshot(get("/nearby?lat=47.915&lon=106.925&lat=abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = json_body(response).await;
        assert!(body["detail"].is_string());
    }

    #[test]
    fn test_coordinate_params_from_pairs() {
        let pairs = vec![
            ("lat".to_string(), "1".to_string()),
            ("page".to_string(), "2".to_string()),
            ("lon".to_string(), "106.925".to_string()),
            ("lat".to_string(), "47.915".to_string()),
        ];

        let params = CoordinateParams::from_pairs(pairs);
        assert_eq!(params.lat.as_deref(), Some("47.915"));
        assert_eq!(params.lon.as_deref(), Some("106.925"));

        let empty = CoordinateParams::from_pairs(Vec::new());
        assert!(empty.lat.is_none() && empty.lon.is_none());
    }

    #[tokio::test]
    async fn test_top_rated_requires_auth_by_default() {
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let response = app
            .oneshot(get("/api/top_rated_nearby_places/?lat=47.915&lon=106.925"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_top_rated_with_token() {
        let places = (1..=15)
            .map(|i| Place::new(i, format!("p{}", i), i as f64).at(47.915, 106.925 + i as f64 * 0.001))
            .collect();
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(places)));

        let response = app
            .oneshot(get_authed("/api/top_rated_nearby_places/?lat=47.915&lon=106.925"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let results: Vec<NearbyResult> = json_body(response).await;
        assert_eq!(results.len(), 10);
        assert_eq!(results[0].id, 15);
        assert!(results.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert!(results.iter().all(|r| r.distance <= 5.0));
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let request = Request::builder()
            .uri("/api/nearby_places/?lat=47.915&lon=106.925")
            .header("Authorization", "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_policy_is_configurable() {
        let mut config = test_config();
        config.auth.nearby_require_auth = true;
        config.auth.top_rated_require_auth = false;
        let state = Arc::new(AppState::with_catalog(
            config,
            Arc::new(MemoryCatalog::new(ulaanbaatar_places())),
        ));

        let response = create_router(state.clone())
            .oneshot(get("/api/nearby_places/?lat=47.915&lon=106.925"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = create_router(state)
            .oneshot(get("/api/top_rated_nearby_places/?lat=47.915&lon=106.925"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_catalog_returns_empty_arrays() {
        let state = Arc::new(AppState::with_catalog(test_config(), Arc::new(MemoryCatalog::default())));

        for uri in [
            "/api/nearby_places/?lat=47.915&lon=106.925",
            "/api/top_rated_nearby_places/?lat=47.915&lon=106.925",
        ] {
            let response = create_router(state.clone()).oneshot(get_authed(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let results: Vec<NearbyResult> = json_body(response).await;
            assert!(results.is_empty());
        }
    }

    #[tokio::test]
    async fn test_catalog_failure_is_server_error() {
        let app = create_test_app(test_config(), Arc::new(DownCatalog));

        let response = app
            .oneshot(get("/api/nearby_places/?lat=47.915&lon=106.925"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_public_base_url_overrides_host() {
        let mut config = test_config();
        config.media.public_base_url = Some("https://travel.example".to_string());
        let app = create_test_app(config, Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let response = app
            .oneshot(get("/api/nearby_places/?lat=47.915&lon=106.925"))
            .await
            .unwrap();

        let results: Vec<NearbyResult> = json_body(response).await;
        let store = results.iter().find(|r| r.id == 1).unwrap();
        assert_eq!(store.image.as_deref(), Some("https://travel.example/media/places/store.jpg"));
    }

    #[tokio::test]
    async fn test_place_detail() {
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let response = app.oneshot(get("/api/places/1/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let detail: PlaceDetail = json_body(response).await;
        assert_eq!(detail.name, "State Department Store");
        assert_eq!(detail.image.as_deref(), Some("http://testserver/media/places/store.jpg"));
    }

    #[tokio::test]
    async fn test_place_detail_not_found() {
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let response = app.oneshot(get("/api/places/42/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let err: ApiError = json_body(response).await;
        assert_eq!(err.detail, NOT_FOUND);
    }

    #[tokio::test]
    async fn test_place_detail_non_numeric_id() {
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let response = app.oneshot(get("/api/places/abc/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let err: ApiError = json_body(response).await;
        assert_eq!(err.detail, NOT_FOUND);
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_test_app(test_config(), Arc::new(MemoryCatalog::new(ulaanbaatar_places())));

        let response = app.oneshot(get("/api/status")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let status: StatusResponse = json_body(response).await;
        assert!(status.running);
        assert_eq!(status.catalog, "memory");
        assert_eq!(status.places, Some(3));
    }
}

//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::{DisplayMode, ReconciledStation};
use crate::reconcile::Alignment;

use super::dto::*;
use super::error::{ApiError, AppError};
use super::state::AppState;
use super::templates::MapTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(map_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The station map.
async fn map_page(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> Result<Response, AppError> {
    let mode = match query.mode.as_deref() {
        Some(raw) => raw
            .parse::<DisplayMode>()
            .map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?,
        None => DisplayMode::default(),
    };

    let (stations, last_updated) = load_stations(&state).await?;

    let html = MapTemplate::new(&stations, mode, last_updated)
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

    Ok(Html(html).into_response())
}

/// Reconciled stations as JSON.
async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<StationsResponse>, ApiError> {
    let (stations, last_updated) = load_stations(&state).await?;

    Ok(Json(StationsResponse {
        stations,
        last_updated: last_updated.map(|t| t.to_rfc3339()),
    }))
}

/// Fetch both feeds and reconcile them.
async fn load_stations(
    state: &AppState,
) -> Result<(Vec<ReconciledStation>, Option<DateTime<Utc>>), AppError> {
    let snapshot = state.feeds.fetch_snapshot().await?;

    match snapshot.alignment() {
        Alignment::Aligned => {}
        Alignment::LengthMismatch {
            information,
            status,
        } => tracing::warn!(
            information,
            status,
            "station feeds differ in length; extra entries ignored"
        ),
        Alignment::IdMismatch {
            index,
            information_id,
            status_id,
        } => tracing::warn!(
            index,
            %information_id,
            %status_id,
            "station feeds are not aligned by position"
        ),
    }

    let stations = snapshot.reconcile();
    tracing::debug!(
        fetched = snapshot.information.stations().len(),
        available = stations.len(),
        "reconciled stations"
    );

    Ok((stations, snapshot.last_updated()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::{TempDir, tempdir};
    use tower::ServiceExt;

    use super::*;
    use crate::gbfs::{FeedConfig, FeedSource, GbfsClient, MockFeedSource};
    use crate::web::{ERROR_PAGE_MESSAGE, GENERIC_ERROR_MESSAGE};

    const INFORMATION: &str = r#"{"last_updated": 1672531200, "data": {"stations": [
        {"station_id": "2337", "name": "Universitetsgata", "lat": 59.9154, "lon": 10.7380},
        {"station_id": "2315", "name": "Stjerneplassen", "lat": 59.9275, "lon": 10.7574},
        {"station_id": "9999", "name": "Virtual hub", "lat": 59.91, "lon": 10.75, "is_virtual_station": true}
    ]}}"#;

    const STATUS: &str = r#"{"last_updated": 1672531200, "data": {"stations": [
        {"station_id": "2337", "is_installed": true, "is_renting": true, "is_returning": true, "num_bikes_available": 12, "num_docks_available": 3},
        {"station_id": "2315", "is_installed": true, "is_renting": true, "is_returning": true, "num_bikes_available": 15, "num_docks_available": 0},
        {"station_id": "9999", "is_installed": true, "is_renting": true, "is_returning": true, "num_bikes_available": 1, "num_docks_available": 1}
    ]}}"#;

    fn mock_router() -> (Router, TempDir) {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("station_information.json"), INFORMATION).unwrap();
        std::fs::write(dir.path().join("station_status.json"), STATUS).unwrap();

        let source = MockFeedSource::new(dir.path()).unwrap();
        let state = AppState::new(FeedSource::Mock(source));
        (create_router(state, dir.path()), dir)
    }

    fn failing_router() -> Router {
        // Nothing listens on port 1.
        let client = GbfsClient::new(FeedConfig::new("http://127.0.0.1:1").with_timeout(2)).unwrap();
        create_router(AppState::new(FeedSource::Live(client)), "static")
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (router, _dir) = mock_router();
        let (status, body) = get(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn map_page_lists_available_stations() {
        let (router, _dir) = mock_router();
        let (status, body) = get(router, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"class="map""#));
        assert!(body.contains(r#"id="bikes-button""#));
        assert!(body.contains(r#"id="docks-button""#));
        assert!(body.contains(r#"id="station-2337""#));
        assert!(body.contains(r#"id="station-2315""#));
        assert!(!body.contains("Virtual hub"));
        assert_eq!(body.matches(r#"<li class="station""#).count(), 2);
        assert!(body.contains("2023-01-01 00:00 UTC"));
    }

    #[tokio::test]
    async fn map_page_shows_bikes_by_default() {
        let (router, _dir) = mock_router();
        let (_, body) = get(router, "/").await;
        assert!(body.contains(r#"data-mode="bikes""#));
        assert!(body.contains(r#"<span class="marker-icon-content">15</span>"#));
    }

    #[tokio::test]
    async fn map_page_can_start_in_docks_mode() {
        let (router, _dir) = mock_router();
        let (status, body) = get(router, "/?mode=docks").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-mode="docks""#));
        assert!(body.contains(r#"<span class="marker-icon-content empty">0</span>"#));
    }

    #[tokio::test]
    async fn map_page_rejects_unknown_mode() {
        let (router, _dir) = mock_router();
        let (status, body) = get(router, "/?mode=scooters").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid display mode"));
    }

    #[tokio::test]
    async fn stations_api_returns_reconciled_json() {
        let (router, _dir) = mock_router();
        let (status, body) = get(router, "/api/stations").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let stations = json["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0]["id"], "2337");
        assert_eq!(stations[0]["numBikesAvailable"], 12);
        assert_eq!(stations[0]["numDocksAvailable"], 3);
        assert_eq!(stations[1]["name"], "Stjerneplassen");
        assert!(stations.iter().all(|s| s["isAvailable"] == true));
        assert_eq!(json["last_updated"], "2023-01-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn upstream_failure_renders_error_page() {
        let (status, body) = get(failing_router(), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains(ERROR_PAGE_MESSAGE));
        assert!(!body.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn upstream_error_status_renders_error_page() {
        use crate::gbfs::DEFAULT_CLIENT_IDENTIFIER;
        use crate::gbfs::test_upstream::spawn_upstream;

        let (api_host, seen) = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR).await;
        let client = GbfsClient::new(FeedConfig::new(api_host)).unwrap();
        let router = create_router(AppState::new(FeedSource::Live(client)), "static");

        let (status, body) = get(router, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains(ERROR_PAGE_MESSAGE));

        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|id| id == DEFAULT_CLIENT_IDENTIFIER));
    }

    #[tokio::test]
    async fn upstream_failure_in_api_is_generic_json() {
        let (status, body) = get(failing_router(), "/api/stations").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], GENERIC_ERROR_MESSAGE);
    }
}

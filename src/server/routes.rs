//! HTTP routes
//!
//! The page itself plus a JSON API over the same page state.

use crate::error::Error;
use crate::format::html::HtmlFormatter;
use crate::format::OutputFormatter;
use crate::server::state::AppState;
use crate::view::{Event, ViewState};

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Determine static files path
    // Try relative to cwd first, then next to the executable
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
            .filter(|path| path.exists())
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|| "static".to_string())
    };

    Router::new()
        .route("/", get(page_handler))
        .route("/locate", post(locate_form_handler))
        .route("/search", post(search_form_handler))
        .route("/api/state", get(state_handler))
        .route("/api/locate", post(locate_handler))
        .route("/api/query", post(query_handler))
        .nest_service("/static", ServeDir::new(&static_path))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "COORDINATOR_STOPPED" => StatusCode::SERVICE_UNAVAILABLE,
            "RENDER_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::CoordinatorStopped => "COORDINATOR_STOPPED",
            Error::Config(_) | Error::Json(_) => "RENDER_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Render the page
///
/// GET /
async fn page_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let snapshot = state.coordinator().snapshot();
    let page = HtmlFormatter::default().format(&snapshot, &state.config)?;
    Ok(Html(page))
}

/// "Get my position" button
///
/// POST /locate
async fn locate_form_handler(State(state): State<Arc<AppState>>) -> Result<Redirect, ApiError> {
    state.coordinator().dispatch(Event::LocateRequested).await?;
    Ok(Redirect::to("/"))
}

/// Search form fields
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

/// Search box submission
///
/// POST /search
async fn search_form_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Redirect, ApiError> {
    state
        .coordinator()
        .dispatch(Event::QueryChanged(form.q))
        .await?;
    Ok(Redirect::to("/"))
}

/// Current page state
///
/// GET /api/state
async fn state_handler(State(state): State<Arc<AppState>>) -> Json<ViewState> {
    Json(state.coordinator().snapshot().as_ref().clone())
}

/// Request the current position
///
/// POST /api/locate
async fn locate_handler(State(state): State<Arc<AppState>>) -> Result<Json<ViewState>, ApiError> {
    let snapshot = state.coordinator().dispatch(Event::LocateRequested).await?;
    Ok(Json(snapshot.as_ref().clone()))
}

/// Query update request body
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Replace the search text
///
/// POST /api/query
async fn query_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<ViewState>, ApiError> {
    let snapshot = state
        .coordinator()
        .dispatch(Event::QueryChanged(req.query))
        .await?;
    Ok(Json(snapshot.as_ref().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::coord::Coordinates;
    use crate::geo::testing::{StubGeocoder, StubLocator};
    use crate::geo::{Place, PlaceResults, PositionError};
    use crate::view::coordinator;
    use crate::view::ViewSettings;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_test_state(locator: StubLocator) -> Arc<AppState> {
        let places = PlaceResults::Places(vec![Place {
            id: 42,
            name: "IKEA Gentofte".to_string(),
            display_name: "IKEA Gentofte, Gentofte, Denmark".to_string(),
            coords: Coordinates::new(55.758, 12.521),
        }]);
        let handle = coordinator::spawn(
            locator,
            StubGeocoder::copenhagen(places),
            ViewSettings::default(),
        );
        Arc::new(AppState::new(Config::default(), handle))
    }

    fn copenhagen() -> StubLocator {
        StubLocator(Ok(Coordinates::new(55.6761, 12.5683)))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_page_endpoint() {
        let app = create_router(create_test_state(copenhagen()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_string(response).await;
        assert!(page.contains("Get my position"));
    }

    #[tokio::test]
    async fn test_locate_form_redirects() {
        let state = create_test_state(copenhagen());
        let app = create_router(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/locate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let snapshot = state.coordinator().wait_idle().await.unwrap();
        assert_eq!(snapshot.address.city, "Copenhagen");
    }

    #[tokio::test]
    async fn test_search_form_sets_query() {
        let state = create_test_state(copenhagen());
        let app = create_router(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("q=IKEA"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let snapshot = state.coordinator().wait_idle().await.unwrap();
        assert_eq!(snapshot.query, "IKEA");
        assert_eq!(snapshot.places.listable().map(|p| p.len()), Some(1));
    }

    #[tokio::test]
    async fn test_search_rejects_get() {
        let state = create_test_state(copenhagen());
        let app = create_router(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/search?q=IKEA")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(state.coordinator().snapshot().query, "");
    }

    #[tokio::test]
    async fn test_api_locate_and_state() {
        let state = create_test_state(copenhagen());

        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/locate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["position"]["is_loading"], true);

        state.coordinator().wait_idle().await.unwrap();

        let response = create_router(state)
            .oneshot(Request::builder().uri("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["position"]["is_loading"], false);
        assert_eq!(body["address"]["country"], "Denmark");
        assert_eq!(body["address"]["postcode"], "1050");
    }

    #[tokio::test]
    async fn test_api_query() {
        let app = create_router(create_test_state(copenhagen()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/query")
                    .header("Content-Type", "application/json")
                    .body(Body::from(serde_json::json!({"query": "IKEA"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["query"], "IKEA");
        assert!(body["search_url"]
            .as_str()
            .unwrap()
            .contains("street=IKEA"));
    }

    #[tokio::test]
    async fn test_denied_page_shows_error() {
        let state = create_test_state(StubLocator(Err(PositionError::PermissionDenied)));
        state
            .coordinator()
            .dispatch(Event::LocateRequested)
            .await
            .unwrap();
        state.coordinator().wait_idle().await.unwrap();

        let response = create_router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let page = body_string(response).await;
        assert!(page.contains("Error: User denied Geolocation"));
        assert!(page.contains("<button type=\"submit\">Get my position</button>"));
    }
}

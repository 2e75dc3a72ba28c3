//! IP-based geolocation
//!
//! Uses ip-api.com to estimate the current position from the public IP address.

use crate::coord::Coordinates;
use crate::geo::position::{PositionError, PositionProvider};
use serde::Deserialize;
use tracing::debug;

/// IP location service
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

impl IpLocator {
    /// Create an IP locator querying `url` with the given HTTP client
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Fetch location from ip-api.com
    async fn fetch_location(&self) -> Result<Coordinates, PositionError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(PositionError::Unavailable(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            PositionError::Unavailable(format!("Failed to parse IP location response: {}", e))
        })?;

        Self::into_coordinates(data)
    }

    fn into_coordinates(data: IpApiResponse) -> Result<Coordinates, PositionError> {
        if data.status != "success" {
            return Err(PositionError::Unavailable(
                data.message
                    .unwrap_or_else(|| "IP location lookup failed".to_string()),
            ));
        }

        let lat = data
            .lat
            .ok_or_else(|| PositionError::Unavailable("No latitude in response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| PositionError::Unavailable("No longitude in response".to_string()))?;

        if let Some(city) = &data.city {
            debug!("IP location resolved near {}", city);
        }

        Ok(Coordinates::new(lat, lng))
    }
}

fn request_error(e: reqwest::Error) -> PositionError {
    if e.is_timeout() {
        PositionError::Timeout
    } else {
        PositionError::Unavailable(format!("IP location request failed: {}", e))
    }
}

impl PositionProvider for IpLocator {
    fn name(&self) -> &'static str {
        "ip"
    }

    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        self.fetch_location().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::testing::serve;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::time::Duration;

    fn parse(json: &str) -> Result<Coordinates, PositionError> {
        let data: IpApiResponse = serde_json::from_str(json).unwrap();
        IpLocator::into_coordinates(data)
    }

    #[test]
    fn test_success_response() {
        let coords = parse(
            r#"{"status":"success","country":"Denmark","city":"Copenhagen","lat":55.6759,"lon":12.5655}"#,
        )
        .unwrap();

        assert_eq!(coords, Coordinates::new(55.6759, 12.5655));
    }

    #[test]
    fn test_fail_response_uses_message() {
        let err = parse(r#"{"status":"fail","message":"private range"}"#).unwrap_err();
        assert_eq!(err, PositionError::Unavailable("private range".to_string()));
    }

    #[test]
    fn test_missing_longitude() {
        let err = parse(r#"{"status":"success","lat":1.0}"#).unwrap_err();
        assert!(matches!(err, PositionError::Unavailable(_)));
    }

    fn ip_api() -> Router {
        Router::new()
            .route(
                "/json",
                get(|| async {
                    Json(json!({"status": "success", "city": "Copenhagen", "lat": 55.6759, "lon": 12.5655}))
                }),
            )
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/garbled", get(|| async { "not json" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
    }

    async fn locator(path: &str) -> IpLocator {
        let base = serve(ip_api()).await;
        IpLocator::new(reqwest::Client::new(), format!("{}{}", base, path))
    }

    #[tokio::test]
    async fn test_current_position_over_http() {
        let coords = locator("/json").await.current_position().await.unwrap();
        assert_eq!(coords, Coordinates::new(55.6759, 12.5655));
    }

    #[tokio::test]
    async fn test_server_error_status_is_unavailable() {
        let err = locator("/broken").await.current_position().await.unwrap_err();

        let PositionError::Unavailable(message) = err else {
            panic!("expected unavailable, got {:?}", err);
        };
        assert!(message.contains("500"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_unavailable() {
        let err = locator("/garbled").await.current_position().await.unwrap_err();
        assert!(matches!(err, PositionError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let base = serve(ip_api()).await;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let locator = IpLocator::new(client, format!("{}/slow", base));

        let err = locator.current_position().await.unwrap_err();
        assert_eq!(err, PositionError::Timeout);
    }

    #[test]
    fn test_locator_name() {
        let locator = IpLocator::new(reqwest::Client::new(), "http://localhost/json");
        assert_eq!(locator.name(), "ip");
    }
}

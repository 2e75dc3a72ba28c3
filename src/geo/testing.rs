//! In-memory backends for tests

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{Address, GeoBackend, PlaceResults, PositionError, PositionProvider};

/// Position provider answering with a canned result
pub struct StubLocator(pub std::result::Result<Coordinates, PositionError>);

impl PositionProvider for StubLocator {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn current_position(&self) -> std::result::Result<Coordinates, PositionError> {
        self.0.clone()
    }
}

/// Geocoder answering with canned results
pub struct StubGeocoder {
    pub address: std::result::Result<Address, String>,
    pub places: std::result::Result<PlaceResults, String>,
}

impl StubGeocoder {
    pub fn new(
        address: std::result::Result<Address, String>,
        places: std::result::Result<PlaceResults, String>,
    ) -> Self {
        Self { address, places }
    }

    pub fn copenhagen(places: PlaceResults) -> Self {
        Self::new(
            Ok(Address {
                country: "Denmark".to_string(),
                city: "Copenhagen".to_string(),
                postcode: "1050".to_string(),
            }),
            Ok(places),
        )
    }
}

impl GeoBackend for StubGeocoder {
    async fn reverse_geocode(&self, _coords: Coordinates) -> Result<Address> {
        self.address.clone().map_err(Error::Geocoding)
    }

    async fn search(&self, _url: &str) -> Result<PlaceResults> {
        self.places.clone().map_err(Error::Geocoding)
    }
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

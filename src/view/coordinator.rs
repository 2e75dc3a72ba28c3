//! Event loop driving the page state
//!
//! One task owns the [`ViewState`] and applies events in arrival order.
//! Effects run as independent tasks that report back with another event, so
//! a slow backend never blocks the loop. Snapshots are published on a
//! `watch` channel.

use crate::error::{Error, Result};
use crate::geo::{GeoBackend, PositionProvider};
use crate::view::{update, Effect, Event, ViewSettings, ViewState};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

struct Command {
    event: Event,
    reply: Option<oneshot::Sender<Arc<ViewState>>>,
}

/// Handle to a running coordinator
///
/// Cheap to clone; the loop stops once every handle is dropped and all
/// in-flight effects have finished.
#[derive(Clone)]
pub struct CoordinatorHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Arc<ViewState>>,
}

impl CoordinatorHandle {
    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<ViewState> {
        self.snapshots.borrow().clone()
    }

    /// Apply `event` and return the snapshot right after it
    pub async fn dispatch(&self, event: Event) -> Result<Arc<ViewState>> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command {
                event,
                reply: Some(reply),
            })
            .map_err(|_| Error::CoordinatorStopped)?;
        response.await.map_err(|_| Error::CoordinatorStopped)
    }

    /// Wait until no request is in flight
    pub async fn wait_idle(&self) -> Result<Arc<ViewState>> {
        let mut snapshots = self.snapshots.clone();
        let state = snapshots
            .wait_for(|state| state.is_idle())
            .await
            .map_err(|_| Error::CoordinatorStopped)?;
        Ok(state.clone())
    }
}

/// Start a coordinator on the current tokio runtime
pub fn spawn<P, G>(locator: P, geocoder: G, settings: ViewSettings) -> CoordinatorHandle
where
    P: PositionProvider + 'static,
    G: GeoBackend + 'static,
{
    let initial = Arc::new(ViewState::new(&settings));
    let (commands, receiver) = mpsc::unbounded_channel();
    let (publisher, snapshots) = watch::channel(initial.clone());

    let runner = EffectRunner {
        locator: Arc::new(locator),
        geocoder: Arc::new(geocoder),
        commands: commands.downgrade(),
    };

    tokio::spawn(run_loop(initial, receiver, publisher, runner, settings));

    CoordinatorHandle {
        commands,
        snapshots,
    }
}

async fn run_loop<P, G>(
    mut state: Arc<ViewState>,
    mut receiver: mpsc::UnboundedReceiver<Command>,
    publisher: watch::Sender<Arc<ViewState>>,
    runner: EffectRunner<P, G>,
    settings: ViewSettings,
) where
    P: PositionProvider + 'static,
    G: GeoBackend + 'static,
{
    while let Some(Command { event, reply }) = receiver.recv().await {
        let transition = update(&state, event, &settings);
        state = Arc::new(transition.state);
        publisher.send_replace(state.clone());

        for effect in transition.effects {
            runner.start(effect);
        }

        if let Some(reply) = reply {
            let _ = reply.send(state.clone());
        }
    }
}

struct EffectRunner<P, G> {
    locator: Arc<P>,
    geocoder: Arc<G>,
    commands: mpsc::WeakUnboundedSender<Command>,
}

impl<P, G> EffectRunner<P, G>
where
    P: PositionProvider + 'static,
    G: GeoBackend + 'static,
{
    fn start(&self, effect: Effect) {
        // Holding a strong sender keeps the loop alive until the answer is in.
        let Some(commands) = self.commands.upgrade() else {
            return;
        };
        let locator = self.locator.clone();
        let geocoder = self.geocoder.clone();

        tokio::spawn(async move {
            let event = match effect {
                Effect::RequestPosition { generation } => {
                    info!("Requesting current position from {}", locator.name());
                    let result = locator.current_position().await;
                    if let Err(e) = &result {
                        warn!("Position request failed: {}", e);
                    }
                    Event::PositionResolved { generation, result }
                }
                Effect::ReverseGeocode { generation, coords } => {
                    info!("Resolving address for {}", coords);
                    let result = geocoder.reverse_geocode(coords).await.map_err(|e| {
                        warn!("Error fetching location data: {}", e);
                        e.to_string()
                    });
                    Event::AddressResolved { generation, result }
                }
                Effect::SearchPlaces { generation, url } => {
                    info!("Searching nearby places: {}", url);
                    let result = geocoder.search(&url).await.map_err(|e| {
                        warn!("Error fetching nearby places: {}", e);
                        e.to_string()
                    });
                    Event::PlacesResolved { generation, result }
                }
            };

            let _ = commands.send(Command { event, reply: None });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::geo::testing::{StubGeocoder, StubLocator};
    use crate::geo::{Place, PlaceResults, PositionError};

    const COPENHAGEN: Coordinates = Coordinates {
        lat: 55.6761,
        lng: 12.5683,
    };

    fn ikea() -> PlaceResults {
        PlaceResults::Places(vec![Place {
            id: 42,
            name: "IKEA Gentofte".to_string(),
            display_name: "IKEA Gentofte, Gentofte, Denmark".to_string(),
            coords: Coordinates::new(55.758, 12.521),
        }])
    }

    #[tokio::test]
    async fn test_locate_then_search() {
        let handle = spawn(
            StubLocator(Ok(COPENHAGEN)),
            StubGeocoder::copenhagen(ikea()),
            ViewSettings::default(),
        );

        let state = handle.dispatch(Event::LocateRequested).await.unwrap();
        assert!(state.position.is_loading);

        let state = handle.wait_idle().await.unwrap();
        assert_eq!(state.coordinates(), Some(COPENHAGEN));
        assert_eq!(state.address.city, "Copenhagen");
        assert_eq!(state.address.country, "Denmark");
        assert_eq!(state.address.postcode, "1050");

        handle
            .dispatch(Event::QueryChanged("IKEA".to_string()))
            .await
            .unwrap();
        let state = handle.wait_idle().await.unwrap();

        assert!(state
            .search_url
            .contains("city=Copenhagen&street=IKEA&country=Denmark&accept-language=en&format=jsonv2"));
        assert_eq!(state.places, ikea());
    }

    #[tokio::test]
    async fn test_permission_denied() {
        let handle = spawn(
            StubLocator(Err(PositionError::PermissionDenied)),
            StubGeocoder::copenhagen(ikea()),
            ViewSettings::default(),
        );

        handle.dispatch(Event::LocateRequested).await.unwrap();
        let state = handle.wait_idle().await.unwrap();

        assert_eq!(state.position.error.as_deref(), Some("User denied Geolocation"));
        assert!(state.coordinates().is_none());
        assert!(!state.position.is_loading);
        assert!(!state.shows_location());
    }

    #[tokio::test]
    async fn test_geocoding_failures_are_swallowed() {
        let handle = spawn(
            StubLocator(Ok(COPENHAGEN)),
            StubGeocoder::new(Err("boom".to_string()), Err("boom".to_string())),
            ViewSettings::default(),
        );

        handle.dispatch(Event::LocateRequested).await.unwrap();
        handle
            .dispatch(Event::QueryChanged("IKEA".to_string()))
            .await
            .unwrap();
        let state = handle.wait_idle().await.unwrap();

        assert_eq!(state.coordinates(), Some(COPENHAGEN));
        assert_eq!(state.address.city, "");
        assert_eq!(state.places, PlaceResults::default());
    }

    #[tokio::test]
    async fn test_snapshot_starts_empty() {
        let handle = spawn(
            StubLocator(Ok(COPENHAGEN)),
            StubGeocoder::copenhagen(ikea()),
            ViewSettings::default(),
        );

        let state = handle.snapshot();
        assert!(state.is_idle());
        assert!(state.coordinates().is_none());
    }
}

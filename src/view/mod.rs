//! Page state and its update function
//!
//! The whole page is one immutable [`ViewState`] snapshot. Every input, be it
//! a user action or an answer from a backend, is an [`Event`] fed through
//! [`update`], which returns the next snapshot plus the [`Effect`]s (network
//! requests) the runtime must start. Derived values follow the chain
//! coordinate -> address -> search URL -> places.
//!
//! Each derived value carries a generation counter. With
//! [`ViewSettings::discard_stale`] set, an answer for anything but the latest
//! generation is dropped; otherwise whichever answer arrives last wins.

pub mod coordinator;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::geo::{Address, PlaceResults, PositionError, PositionState, SearchParams};
use serde::Serialize;
use tracing::debug;

/// Settings the update function needs to derive values
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    /// Forward search endpoint
    pub search_url: String,
    /// Preferred result language
    pub language: String,
    /// Ignore answers to superseded requests
    pub discard_stale: bool,
}

impl ViewSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            search_url: config.geocoding.search_url.clone(),
            language: config.geocoding.language.clone(),
            discard_stale: config.search.discard_stale,
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Tracks requests for one derived value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Requests {
    /// Generation of the most recently issued request
    latest: u64,
    /// The latest request has not been answered yet
    pending: bool,
}

impl Requests {
    fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.pending = true;
        self.latest
    }

    /// Record an answer; returns whether it should be applied
    fn answer(&mut self, generation: u64, discard_stale: bool) -> bool {
        let is_latest = generation == self.latest;
        if is_latest {
            self.pending = false;
        }
        is_latest || !discard_stale
    }
}

/// Snapshot of everything the page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    /// Position source
    pub position: PositionState,
    /// Address of the current coordinate
    pub address: Address,
    /// Raw search text
    pub query: String,
    /// Forward search URL derived from address and query
    pub search_url: String,
    /// Latest search answer
    pub places: PlaceResults,
    #[serde(skip)]
    address_requests: Requests,
    #[serde(skip)]
    search_requests: Requests,
}

impl ViewState {
    /// Initial state: no coordinate, empty address and query
    ///
    /// The search URL is derived right away but not fetched.
    pub fn new(settings: &ViewSettings) -> Self {
        let mut state = Self {
            position: PositionState::default(),
            address: Address::default(),
            query: String::new(),
            search_url: String::new(),
            places: PlaceResults::default(),
            address_requests: Requests::default(),
            search_requests: Requests::default(),
        };
        state.search_url = state.derive_search_url(settings);
        state
    }

    /// Current coordinate, if any
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.position.coordinates
    }

    /// The address block is meaningful
    pub fn shows_location(&self) -> bool {
        !self.position.is_loading && self.position.coordinates.is_some()
    }

    /// The results block is meaningful
    pub fn shows_places(&self) -> bool {
        !self.query.is_empty()
    }

    /// A reverse geocoding request is outstanding
    pub fn address_pending(&self) -> bool {
        self.address_requests.pending
    }

    /// A search request is outstanding
    pub fn search_pending(&self) -> bool {
        self.search_requests.pending
    }

    /// Nothing is in flight
    pub fn is_idle(&self) -> bool {
        !self.position.is_loading && !self.address_pending() && !self.search_pending()
    }

    fn derive_search_url(&self, settings: &ViewSettings) -> String {
        SearchParams {
            city: &self.address.city,
            street: &self.query,
            country: &self.address.country,
            language: &settings.language,
        }
        .to_url(&settings.search_url)
    }

    /// Re-derive the search URL and request it if it changed
    fn refresh_search(&mut self, settings: &ViewSettings, effects: &mut Vec<Effect>) {
        let url = self.derive_search_url(settings);
        if url == self.search_url {
            return;
        }
        self.search_url = url.clone();
        let generation = self.search_requests.issue();
        effects.push(Effect::SearchPlaces { generation, url });
    }
}

/// Inputs to the page
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user asked for their position
    LocateRequested,
    /// The position provider answered
    PositionResolved {
        generation: u64,
        result: Result<Coordinates, PositionError>,
    },
    /// Reverse geocoding answered (errors carry the logged message)
    AddressResolved {
        generation: u64,
        result: Result<Address, String>,
    },
    /// The search text changed
    QueryChanged(String),
    /// Place search answered (errors carry the logged message)
    PlacesResolved {
        generation: u64,
        result: Result<PlaceResults, String>,
    },
}

/// Requests the runtime must start
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the position provider
    RequestPosition { generation: u64 },
    /// Resolve the address of `coords`
    ReverseGeocode { generation: u64, coords: Coordinates },
    /// Fetch `url` from the search endpoint
    SearchPlaces { generation: u64, url: String },
}

/// Outcome of one [`update`]
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    pub effects: Vec<Effect>,
}

/// Apply `event` to `state`
pub fn update(state: &ViewState, event: Event, settings: &ViewSettings) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        Event::LocateRequested => match next.position.request() {
            Some(generation) => effects.push(Effect::RequestPosition { generation }),
            None => debug!("Position request already in flight"),
        },

        Event::PositionResolved { generation, result } => {
            if next.position.resolve(generation, result) {
                if let Some(coords) = next.position.coordinates {
                    let generation = next.address_requests.issue();
                    effects.push(Effect::ReverseGeocode { generation, coords });
                }
            }
        }

        Event::AddressResolved { generation, result } => {
            let apply = next
                .address_requests
                .answer(generation, settings.discard_stale);
            match result {
                Ok(address) if apply => {
                    next.address = address;
                    next.refresh_search(settings, &mut effects);
                }
                Ok(_) => debug!("Dropping stale address (generation {})", generation),
                Err(_) => {}
            }
        }

        Event::QueryChanged(query) => {
            next.query = query;
            next.refresh_search(settings, &mut effects);
        }

        Event::PlacesResolved { generation, result } => {
            let apply = next
                .search_requests
                .answer(generation, settings.discard_stale);
            match result {
                Ok(places) if apply => next.places = places,
                Ok(_) => debug!("Dropping stale search results (generation {})", generation),
                Err(_) => {}
            }
        }
    }

    Transition {
        state: next,
        effects,
    }
}

//! trip-planner-rs: the non-trivial pieces behind an itinerary planner.
//!
//! - [`extract_json`] recovers the JSON object a text model was asked to produce,
//!   tolerating code fences, surrounding prose and `//` comments.
//! - [`sequence_route`] orders a day's geocoded activities by greedy nearest
//!   neighbour under haversine distance.
//! - [`DestinationTrie`] backs destination autocomplete.
//!
//! The surrounding flow (prompting a model, typing its draft, geocoding
//! activities) lives in [`services`] behind the [`TextGenerator`] and
//! [`Geocoder`] traits.
//!
//! # Quick Start
//!
//! ```rust
//! use trip_planner_rs::{extract_json, sequence_route, GeoPoint, LocatedActivity};
//!
//! let extraction = extract_json("Sure! {\"itinerary\": []} Have fun.").unwrap();
//! assert!(extraction.value["itinerary"].is_array());
//!
//! let stop = |id: &str, lng: f64| LocatedActivity {
//!     id: id.to_string(),
//!     title: id.to_string(),
//!     location: id.to_string(),
//!     time: None,
//!     category: None,
//!     coords: GeoPoint::new(0.0, lng),
//! };
//! let route = sequence_route(vec![stop("hotel", 0.0), stop("far", 10.0), stop("near", 1.0)]).unwrap();
//! assert_eq!(route[1].id, "near");
//! ```

extern crate self as trip_planner_rs;

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod types;

pub use crate::core::{
    directions_url, extract_json, haversine_km, next_stop, route_distance_km, sequence_route,
    CandidateSource, DestinationTrie, Extraction, GeoPoint, LocatedActivity,
};
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use schemas::{CompletionSchema, SchemaHandle};
pub use services::{
    ActivityRef, CachedGeocoder, ChatCompletionsClient, Geocoder, ItineraryGenerator,
    TextGenerator,
};
pub use trip_planner_macros::completion_schema;
pub use types::{ActivityDraft, DayPlan, ItineraryDraft, TripPreferences};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;

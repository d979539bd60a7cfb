pub mod autocomplete;
pub mod extractor;
pub mod geo;
pub mod sequencer;

pub use autocomplete::{DestinationTrie, POPULAR_DESTINATIONS};
pub use extractor::{extract_json, CandidateSource, Extraction};
pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use sequencer::{directions_url, next_stop, route_distance_km, sequence_route, LocatedActivity};

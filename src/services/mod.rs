pub mod chat_client;
pub mod generation;
pub mod geocoding;
pub mod prompt;

pub use chat_client::{ChatCompletionsClient, TextGenerator};
pub use generation::{recover_draft, GeneratedItinerary, ItineraryGenerator};
pub use geocoding::{
    cache_key, locate_activities, plan_day_route, ActivityRef, CachedGeocoder, DayRoute,
    Geocoder, LocatedDay, DEFAULT_CACHE_CAPACITY,
};
pub use prompt::build_itinerary_prompt;

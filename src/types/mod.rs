pub mod itinerary;
pub mod preferences;
pub mod response;

pub use itinerary::{ActivityDraft, DayPlan, ItineraryDraft};
pub use preferences::TripPreferences;
pub use response::{deserialize_structured_response, parse_structured};

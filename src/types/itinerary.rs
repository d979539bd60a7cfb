use crate::completion_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Day-by-day travel plan drafted by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[completion_schema]
pub struct ItineraryDraft {
    /// Days of the trip in visiting order
    pub itinerary: Vec<DayPlan>,
}

/// One day of the itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    /// 1-based day counter within the trip
    #[serde(default)]
    pub day: Option<u32>,
    /// Short theme for the day
    #[serde(default)]
    pub title: Option<String>,
    /// Summary of what the day covers
    #[serde(default)]
    pub description: Option<String>,
    /// Planned stops in chronological order
    #[serde(default)]
    pub activities: Vec<ActivityDraft>,
}

/// A single planned stop. Every field is optional; enrichment fills gaps later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Place name suitable for geocoding
    #[serde(default)]
    pub location: Option<String>,
    /// Estimated cost as free text, e.g. "₹200" or "Free"
    #[serde(default)]
    pub cost: Option<String>,
    /// Start time, e.g. "09:00 AM"
    #[serde(default)]
    pub time: Option<String>,
    /// One of food, attraction, transport, accommodation, entertainment, shopping, other
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub travel_mode: Option<String>,
    #[serde(default)]
    pub travel_time_from_previous: Option<String>,
    /// Search phrase for an illustrative photo
    #[serde(default)]
    pub image_query: Option<String>,
}

impl ItineraryDraft {
    pub fn day_count(&self) -> usize {
        self.itinerary.len()
    }

    pub fn activity_count(&self) -> usize {
        self.itinerary.iter().map(|day| day.activities.len()).sum()
    }

    /// Day number as drafted, or its 1-based position when the model left it out.
    pub fn day_number(&self, index: usize) -> u32 {
        self.itinerary
            .get(index)
            .and_then(|day| day.day)
            .unwrap_or(index as u32 + 1)
    }
}

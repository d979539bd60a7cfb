use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Traveller preferences collected before drafting an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TripPreferences {
    /// Number of days to plan
    pub days: u32,
    /// Free-text interests, e.g. "history, street food"
    pub interests: String,
    /// low, medium or high
    pub budget: String,
    /// solo, couple, family or friends
    pub trip_type: String,
    /// public, rental, walking, ...
    pub transportation: String,
    /// relaxed, moderate or fast
    pub pace: String,
    /// hotel, hostel, resort, ...
    pub accommodation: String,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            days: 1,
            interests: String::new(),
            budget: "medium".to_string(),
            trip_type: "solo".to_string(),
            transportation: "public".to_string(),
            pace: "moderate".to_string(),
            accommodation: "hotel".to_string(),
        }
    }
}

impl TripPreferences {
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = interests.into();
        self
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = budget.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.days == 0 {
            return Err(PlannerError::InvalidArgument(
                "a trip needs at least one day".to_string(),
            ));
        }
        Ok(())
    }
}

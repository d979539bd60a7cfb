use crate::types::TripPreferences;

const ACTIVITY_CATEGORIES: &str =
    "food, attraction, transport, accommodation, entertainment, shopping, other";

/// Prompt asking the model for a day-by-day itinerary as one JSON object.
pub fn build_itinerary_prompt(destination: &str, prefs: &TripPreferences) -> String {
    let interests = if prefs.interests.trim().is_empty() {
        "general sightseeing"
    } else {
        prefs.interests.trim()
    };

    format!(
        r#"Create a {days}-day travel itinerary for {destination}.

Traveller preferences:
- Interests: {interests}
- Budget: {budget}
- Trip type: {trip_type}
- Transportation: {transportation}
- Pace: {pace}
- Accommodation: {accommodation}

Respond with a single JSON object of this shape and no other text:
{{
  "itinerary": [
    {{
      "day": 1,
      "title": "string",
      "description": "string",
      "activities": [
        {{
          "title": "string",
          "description": "string",
          "location": "specific place name in {destination}",
          "cost": "string",
          "time": "HH:MM AM/PM",
          "category": "one of: {ACTIVITY_CATEGORIES}",
          "travelMode": "string",
          "travelTimeFromPrevious": "string",
          "imageQuery": "string"
        }}
      ]
    }}
  ]
}}
Include exactly {days} entries in "itinerary", numbered from 1."#,
        days = prefs.days,
        budget = prefs.budget,
        trip_type = prefs.trip_type,
        transportation = prefs.transportation,
        pace = prefs.pace,
        accommodation = prefs.accommodation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_destination_and_preferences() {
        let prefs = TripPreferences::default()
            .with_days(3)
            .with_interests("street food, forts")
            .with_budget("low");
        let prompt = build_itinerary_prompt("Jaipur", &prefs);

        assert!(prompt.contains("3-day travel itinerary for Jaipur"));
        assert!(prompt.contains("Interests: street food, forts"));
        assert!(prompt.contains("Budget: low"));
        assert!(prompt.contains("\"travelTimeFromPrevious\""));
        assert!(prompt.contains("exactly 3 entries"));
    }

    #[test]
    fn blank_interests_fall_back() {
        let prompt = build_itinerary_prompt("Bhuj", &TripPreferences::default());
        assert!(prompt.contains("1-day travel itinerary"));
        assert!(prompt.contains("Interests: general sightseeing"));
    }
}

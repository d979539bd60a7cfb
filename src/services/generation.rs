use serde_json::Value;
use tracing::{debug, info, warn};

use super::{chat_client::TextGenerator, prompt::build_itinerary_prompt};
use crate::{
    core::extractor::{extract_json, CandidateSource},
    error::{PlannerError, Result},
    types::{parse_structured, ItineraryDraft, TripPreferences},
};

/// Outcome of one drafting round trip.
#[derive(Debug, Clone)]
pub struct GeneratedItinerary {
    pub draft: ItineraryDraft,
    /// The JSON value exactly as recovered, before typing
    pub raw: Value,
    pub candidate: String,
    pub source: CandidateSource,
}

/// Drafts itineraries with a text generator and recovers them from its output.
#[derive(Debug)]
pub struct ItineraryGenerator<G> {
    generator: G,
}

impl<G: TextGenerator> ItineraryGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn generate(
        &self,
        destination: &str,
        prefs: &TripPreferences,
    ) -> Result<GeneratedItinerary> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(PlannerError::InvalidArgument(
                "destination must not be empty".to_string(),
            ));
        }
        prefs.validate()?;

        let prompt = build_itinerary_prompt(destination, prefs);
        info!(target: "tripplanner::generate", destination, days = prefs.days, "drafting itinerary");

        let text = self.generator.generate(&prompt).await?;
        recover_draft(&text, prefs.days)
    }
}

/// Extract and type a draft from raw model text.
///
/// Failures are logged with the raw text and the attempted candidate, then
/// returned unchanged to the caller.
pub fn recover_draft(text: &str, expected_days: u32) -> Result<GeneratedItinerary> {
    let extraction = match extract_json(text) {
        Ok(extraction) => extraction,
        Err(err) => {
            warn!(
                target: "tripplanner::generate",
                code = err.error_code(),
                raw = %text,
                candidate = err.candidate().unwrap_or(""),
                "could not recover JSON from model output"
            );
            return Err(err);
        }
    };

    let draft: ItineraryDraft = parse_structured(&extraction.value).map_err(|err| {
        warn!(
            target: "tripplanner::generate",
            error = %err,
            candidate = %extraction.candidate,
            "recovered JSON is not an itinerary"
        );
        err
    })?;

    if draft.day_count() == 0 {
        warn!(
            target: "tripplanner::generate",
            candidate = %extraction.candidate,
            "recovered itinerary has no days"
        );
        return Err(PlannerError::Validation(
            "failed to generate itinerary: the draft contains no days".to_string(),
        ));
    }

    if draft.day_count() != expected_days as usize {
        debug!(
            target: "tripplanner::generate",
            expected_days,
            drafted_days = draft.day_count(),
            "model returned a different number of days"
        );
    }

    Ok(GeneratedItinerary {
        draft,
        raw: extraction.value,
        candidate: extraction.candidate,
        source: extraction.source,
    })
}

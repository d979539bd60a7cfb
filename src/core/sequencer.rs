use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geo::{haversine_km, GeoPoint};
use crate::error::{PlannerError, Result};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";
const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// An activity joined with the coordinates its location resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedActivity {
    pub id: String,
    pub title: String,
    /// Human-readable place label, e.g. "Aina Mahal"
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub coords: GeoPoint,
}

/// Order one day's activities by greedy nearest neighbour.
///
/// The first activity stays first. Each following stop is the closest remaining
/// activity to the previous stop; on equal distances the earlier one in input
/// order wins. The output is a permutation of the input.
pub fn sequence_route(activities: Vec<LocatedActivity>) -> Result<Vec<LocatedActivity>> {
    let mut input = activities.into_iter();
    let start = input.next().ok_or_else(|| {
        PlannerError::InvalidArgument("route sequencing needs at least one activity".to_string())
    })?;
    let mut remaining: Vec<LocatedActivity> = input.collect();

    let mut current = start.coords;
    let mut route = Vec::with_capacity(remaining.len() + 1);
    route.push(start);

    while !remaining.is_empty() {
        let mut nearest = 0;
        let mut min_distance = f64::INFINITY;

        for (idx, candidate) in remaining.iter().enumerate() {
            let distance = haversine_km(&current, &candidate.coords);
            if distance < min_distance {
                min_distance = distance;
                nearest = idx;
            }
        }

        let next = remaining.remove(nearest);
        debug!(
            target: "tripplanner::route",
            stop = %next.id,
            distance_km = min_distance,
            "selected next stop"
        );
        current = next.coords;
        route.push(next);
    }

    Ok(route)
}

/// Sum of the leg distances along `route`, in kilometers.
pub fn route_distance_km(route: &[LocatedActivity]) -> f64 {
    route
        .windows(2)
        .map(|leg| haversine_km(&leg[0].coords, &leg[1].coords))
        .sum()
}

/// The stop visited right after the activity with `id`, if any.
pub fn next_stop<'a>(route: &'a [LocatedActivity], id: &str) -> Option<&'a LocatedActivity> {
    let position = route.iter().position(|activity| activity.id == id)?;
    route.get(position + 1)
}

/// Shareable maps link for a route.
///
/// No stops links to a search for the destination itself, one stop to a
/// search for that place, and two or more to turn-by-turn directions with the
/// middle stops as waypoints.
pub fn directions_url(route: &[LocatedActivity], destination: &str) -> String {
    let place = |activity: &LocatedActivity| format!("{}, {}", activity.location, destination);

    let url = match route {
        [] => Url::parse_with_params(MAPS_SEARCH_URL, &[("api", "1"), ("query", destination)]),
        [only] => Url::parse_with_params(
            MAPS_SEARCH_URL,
            &[("api", "1".to_string()), ("query", place(only))],
        ),
        [first, middle @ .., last] => {
            let mut params = vec![
                ("api", "1".to_string()),
                ("origin", place(first)),
                ("destination", place(last)),
            ];
            if !middle.is_empty() {
                let waypoints: Vec<String> = middle.iter().map(place).collect();
                params.push(("waypoints", waypoints.join("|")));
            }
            Url::parse_with_params(MAPS_DIRECTIONS_URL, &params)
        }
    };

    url.map(String::from)
        .unwrap_or_else(|_| MAPS_DIRECTIONS_URL.to_string())
}

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{
    core::{
        geo::GeoPoint,
        sequencer::{route_distance_km, sequence_route, LocatedActivity},
    },
    error::{PlannerError, Result},
    types::DayPlan,
};

/// Resolves a place name to coordinates. Implemented by an external provider.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<GeoPoint>;
}

/// Default number of distinct queries kept by [`CachedGeocoder::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Geocoder wrapper that remembers successful lookups.
///
/// The cache is owned by the wrapper and safe to share across concurrent
/// requests. Failed lookups are not cached. Once `capacity` entries are held,
/// storing a new one evicts an arbitrary existing entry.
#[derive(Debug)]
pub struct CachedGeocoder<G> {
    inner: G,
    capacity: usize,
    cache: RwLock<HashMap<String, GeoPoint>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// A capacity of zero disables caching.
    pub fn with_capacity(inner: G, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn remember(&self, key: String, point: GeoPoint) {
        if self.capacity == 0 {
            return;
        }
        let mut cache = self.cache.write().await;
        if cache.len() >= self.capacity && !cache.contains_key(&key) {
            let evicted = cache.keys().next().cloned();
            if let Some(evicted) = evicted {
                debug!(target: "tripplanner::geocode", %evicted, "cache full, evicting");
                cache.remove(&evicted);
            }
        }
        cache.insert(key, point);
    }
}

/// Lowercased query with surrounding and repeated whitespace removed.
pub fn cache_key(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[async_trait]
impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, query: &str) -> Result<GeoPoint> {
        let key = cache_key(query);
        if let Some(point) = self.cache.read().await.get(&key) {
            debug!(target: "tripplanner::geocode", %key, "cache hit");
            return Ok(*point);
        }

        let point = self.inner.geocode(query).await?;
        self.remember(key, point).await;
        Ok(point)
    }
}

/// An activity awaiting coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRef {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ActivityRef {
    pub fn located(self, coords: GeoPoint) -> LocatedActivity {
        LocatedActivity {
            id: self.id,
            title: self.title,
            location: self.location,
            time: self.time,
            category: self.category,
            coords,
        }
    }

    /// References for every drafted activity of a day, with ids `day{n}-{i}`.
    ///
    /// A missing location falls back to the title; activities with neither are skipped.
    pub fn from_day(day_number: u32, day: &DayPlan) -> Vec<ActivityRef> {
        day.activities
            .iter()
            .enumerate()
            .filter_map(|(idx, activity)| {
                let title = activity.title.clone().unwrap_or_default();
                let location = activity
                    .location
                    .clone()
                    .filter(|location| !location.trim().is_empty())
                    .unwrap_or_else(|| title.clone());
                if location.trim().is_empty() {
                    return None;
                }
                Some(ActivityRef {
                    id: format!("day{}-{}", day_number, idx + 1),
                    title,
                    location,
                    time: activity.time.clone(),
                    category: activity.category.clone(),
                })
            })
            .collect()
    }
}

/// Activities of one day split by whether their location resolved.
#[derive(Debug, Clone, Default)]
pub struct LocatedDay {
    pub located: Vec<LocatedActivity>,
    pub unresolved: Vec<ActivityRef>,
}

/// Geocode each activity's location, keeping input order.
pub async fn locate_activities<G>(geocoder: &G, activities: Vec<ActivityRef>) -> LocatedDay
where
    G: Geocoder + ?Sized,
{
    let mut day = LocatedDay::default();
    for activity in activities {
        match geocoder.geocode(&activity.location).await {
            Ok(coords) => day.located.push(activity.located(coords)),
            Err(err) => {
                warn!(
                    target: "tripplanner::geocode",
                    id = %activity.id,
                    location = %activity.location,
                    error = %err,
                    "could not locate activity"
                );
                day.unresolved.push(activity);
            }
        }
    }
    day
}

/// A sequenced day ready for the map view.
#[derive(Debug, Clone)]
pub struct DayRoute {
    pub route: Vec<LocatedActivity>,
    pub unresolved: Vec<ActivityRef>,
    pub total_km: f64,
}

/// Geocode a day's activities and order the located ones by nearest neighbour.
pub async fn plan_day_route<G>(geocoder: &G, activities: Vec<ActivityRef>) -> Result<DayRoute>
where
    G: Geocoder + ?Sized,
{
    let requested = activities.len();
    let LocatedDay {
        located,
        unresolved,
    } = locate_activities(geocoder, activities).await;

    if located.is_empty() && requested > 0 {
        return Err(PlannerError::Geocoding(format!(
            "none of the {requested} activities could be located"
        )));
    }

    let route = sequence_route(located)?;
    let total_km = route_distance_km(&route);
    Ok(DayRoute {
        route,
        unresolved,
        total_km,
    })
}

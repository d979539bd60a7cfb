use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use trip_planner_rs::{
    haversine_km, next_stop, route_distance_km, sequence_route,
    services::{locate_activities, plan_day_route},
    ActivityRef, CachedGeocoder, GeoPoint, Geocoder, LocatedActivity, PlannerError,
};

fn activity(id: &str, lat: f64, lng: f64) -> LocatedActivity {
    LocatedActivity {
        id: id.to_string(),
        title: id.to_uppercase(),
        location: format!("{id}, Bhuj"),
        time: None,
        category: Some("attraction".to_string()),
        coords: GeoPoint::new(lat, lng),
    }
}

fn ids(route: &[LocatedActivity]) -> Vec<&str> {
    route.iter().map(|a| a.id.as_str()).collect()
}

#[test]
fn route_is_a_permutation_anchored_at_the_first_stop() {
    let input = vec![
        activity("hotel", 23.2530, 69.6693),
        activity("prag-mahal", 23.2553, 69.6653),
        activity("kala-dungar", 23.8667, 69.8167),
        activity("aina-mahal", 23.2548, 69.6649),
        activity("bhujia-hill", 23.2650, 69.6900),
        activity("white-rann", 23.9500, 69.7833),
    ];
    let route = sequence_route(input.clone()).unwrap();

    assert_eq!(route.len(), input.len());
    assert_eq!(route[0], input[0]);

    let mut expected: Vec<&str> = ids(&input);
    let mut actual: Vec<&str> = ids(&route);
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(actual, expected);
}

#[test]
fn every_step_takes_the_nearest_remaining_stop() {
    let input = vec![
        activity("a", 10.0, 10.0),
        activity("b", 10.5, 12.0),
        activity("c", 11.0, 9.0),
        activity("d", 9.0, 11.5),
        activity("e", 12.0, 12.0),
    ];
    let route = sequence_route(input).unwrap();

    for (idx, window) in route.windows(2).enumerate() {
        let chosen = haversine_km(&window[0].coords, &window[1].coords);
        for later in &route[idx + 2..] {
            assert!(chosen <= haversine_km(&window[0].coords, &later.coords));
        }
    }
}

#[test]
fn start_c_b_becomes_start_b_c() {
    let a = activity("a", 48.8584, 2.2945);
    let b = activity("b", 48.8606, 2.3376);
    let c = activity("c", 48.8867, 2.3431);
    assert!(haversine_km(&a.coords, &b.coords) < haversine_km(&a.coords, &c.coords));

    let route = sequence_route(vec![a, c, b]).unwrap();
    assert_eq!(ids(&route), ["a", "b", "c"]);
}

#[test]
fn known_equatorial_coordinates() {
    let route = sequence_route(vec![
        activity("origin", 0.0, 0.0),
        activity("ten", 0.0, 10.0),
        activity("one", 0.0, 1.0),
    ])
    .unwrap();
    assert_eq!(ids(&route), ["origin", "one", "ten"]);

    let first_leg = haversine_km(&route[0].coords, &route[1].coords);
    assert!((first_leg - 111.195).abs() / 111.195 < 0.001);
    assert!((route_distance_km(&route) - 1111.95).abs() / 1111.95 < 0.001);
    assert_eq!(next_stop(&route, "one").map(|s| s.id.as_str()), Some("ten"));
}

#[test]
fn empty_route_is_rejected() {
    let err = sequence_route(Vec::new()).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_ARGUMENT");
}

#[test]
fn out_of_range_points_are_sequenced_as_given() {
    let route = sequence_route(vec![
        activity("a", 0.0, 0.0),
        activity("b", 95.0, 200.0),
        activity("c", 0.0, 1.0),
    ])
    .unwrap();
    assert_eq!(route.len(), 3);
    assert_eq!(route[0].id, "a");
    assert!(route[1].coords.validate().is_err() || route[2].coords.validate().is_err());
}

#[derive(Debug, Default)]
struct TableGeocoder {
    places: HashMap<String, GeoPoint>,
    calls: AtomicUsize,
}

impl TableGeocoder {
    fn with(places: &[(&str, f64, f64)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|(name, lat, lng)| (name.to_string(), GeoPoint::new(*lat, *lng)))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn geocode(&self, query: &str) -> trip_planner_rs::Result<GeoPoint> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.places
            .get(query)
            .copied()
            .ok_or_else(|| PlannerError::Geocoding(format!("no result for {query}")))
    }
}

fn reference(id: &str, location: &str) -> ActivityRef {
    ActivityRef {
        id: id.to_string(),
        title: id.to_string(),
        location: location.to_string(),
        time: None,
        category: None,
    }
}

#[tokio::test]
async fn cached_geocoder_reuses_successful_lookups() {
    let geocoder = CachedGeocoder::new(TableGeocoder::with(&[("Aina Mahal", 23.2548, 69.6649)]));

    let first = geocoder.geocode("Aina Mahal").await.unwrap();
    let second = geocoder.geocode("  aina   MAHAL ").await.unwrap();
    let third = geocoder.geocode("Aina Mahal").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(geocoder.inner().calls(), 1);
    assert_eq!(geocoder.cached_len().await, 1);
}

#[tokio::test]
async fn cached_geocoder_does_not_cache_failures() {
    let geocoder = CachedGeocoder::new(TableGeocoder::default());
    assert!(geocoder.geocode("Atlantis").await.is_err());
    assert!(geocoder.geocode("Atlantis").await.is_err());
    assert_eq!(geocoder.inner().calls(), 2);
    assert_eq!(geocoder.cached_len().await, 0);
}

#[tokio::test]
async fn cached_geocoder_stays_within_capacity() {
    let geocoder = CachedGeocoder::with_capacity(
        TableGeocoder::with(&[
            ("Aina Mahal", 23.2548, 69.6649),
            ("Prag Mahal", 23.2553, 69.6653),
            ("Dhordo", 23.8333, 69.6667),
        ]),
        2,
    );

    for place in ["Aina Mahal", "Prag Mahal", "Dhordo", "Dhordo"] {
        geocoder.geocode(place).await.unwrap();
    }

    assert_eq!(geocoder.cached_len().await, 2);
    assert_eq!(geocoder.inner().calls(), 3);
}

#[tokio::test]
async fn zero_capacity_disables_caching() {
    let geocoder =
        CachedGeocoder::with_capacity(TableGeocoder::with(&[("Dhordo", 23.8333, 69.6667)]), 0);
    geocoder.geocode("Dhordo").await.unwrap();
    geocoder.geocode("Dhordo").await.unwrap();
    assert_eq!(geocoder.inner().calls(), 2);
    assert_eq!(geocoder.cached_len().await, 0);
}

#[test]
fn unresolved_activities_are_reported_not_dropped() {
    let geocoder = TableGeocoder::with(&[("Prag Mahal", 23.2553, 69.6653)]);
    let day = tokio_test::block_on(locate_activities(
        &geocoder,
        vec![reference("1", "Prag Mahal"), reference("2", "Nowhere Lane")],
    ));

    assert_eq!(day.located.len(), 1);
    assert_eq!(day.located[0].coords, GeoPoint::new(23.2553, 69.6653));
    assert_eq!(day.unresolved, vec![reference("2", "Nowhere Lane")]);
}

#[tokio::test]
async fn plan_day_route_orders_located_stops() {
    let geocoder = CachedGeocoder::new(TableGeocoder::with(&[
        ("Hotel", 0.0, 0.0),
        ("Far Fort", 0.0, 10.0),
        ("Near Market", 0.0, 1.0),
    ]));

    let day = plan_day_route(
        &geocoder,
        vec![
            reference("hotel", "Hotel"),
            reference("fort", "Far Fort"),
            reference("lost", "Unknown"),
            reference("market", "Near Market"),
        ],
    )
    .await
    .unwrap();

    assert_eq!(ids(&day.route), ["hotel", "market", "fort"]);
    assert_eq!(day.unresolved.len(), 1);
    assert!((day.total_km - 1111.95).abs() < 2.0);
}

#[tokio::test]
async fn plan_day_route_fails_when_nothing_resolves() {
    let geocoder = TableGeocoder::default();
    let err = plan_day_route(&geocoder, vec![reference("x", "Atlantis")])
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::Geocoding(_)));

    let err = plan_day_route(&geocoder, Vec::new()).await.unwrap_err();
    assert!(matches!(err, PlannerError::InvalidArgument(_)));
}

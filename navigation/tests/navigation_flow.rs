use navigation::directions::{self, RouteProvider, StaticRouteProvider};
use navigation::error::RouteError;
use navigation::format::{format_distance_km, format_duration};
use navigation::region::region_for;
use navigation::tracker::{PositionFix, TrackerState};
use shared::Coordinate;

const SAMPLE_DIRECTIONS: &str = include_str!("../data/sample_directions.json");

#[test]
fn sample_document_parses_into_a_trackable_route() {
    let route = directions::parse_route(SAMPLE_DIRECTIONS).expect("route");

    assert_eq!(route.path.len(), 3);
    // The instruction-less filler step is dropped during parsing.
    assert_eq!(route.steps.len(), 2);
    assert_eq!(route.total_distance_m, 520_000.0);
    assert_eq!(route.total_duration_secs, 25_200.0);
    assert_eq!(format_distance_km(route.total_distance_m), "520.0 km");
    assert_eq!(format_duration(route.total_duration_secs), "7 hrs");
}

#[test]
fn walking_the_path_advances_through_every_instruction() {
    let route = directions::parse_route(SAMPLE_DIRECTIONS).expect("route");
    let path = route.path.clone();

    let mut state = TrackerState::new(route).expect("tracker");
    assert_eq!(state.current_step_index(), 0);
    assert!(state.traversed_prefix().is_empty());
    assert_eq!(state.current_instruction(), "Head north onto the highway");

    for point in &path {
        state = state.on_position_fix(&PositionFix::new(*point));
    }

    assert!(state.is_last_step());
    assert_eq!(state.current_instruction(), "Arrive at the destination");
    assert_eq!(state.next_instruction(), None);
    assert_eq!(state.traversed_prefix(), path.as_slice());
}

#[test]
fn resolved_route_frames_a_padded_viewport() {
    let route = directions::parse_route(SAMPLE_DIRECTIONS).expect("route");
    let region = region_for(&route.path);

    // Box spans 38.5..43.252 lat and -126.453..-120.2 lon, padded 1.5x.
    assert!((region.center.lat - 40.876).abs() < 1e-9);
    assert!((region.center.lon - -123.3265).abs() < 1e-9);
    assert!((region.lat_span - 4.752 * 1.5).abs() < 1e-9);
    assert!((region.lon_span - 6.253 * 1.5).abs() < 1e-9);
}

#[test]
fn provider_without_a_route_reports_no_route() {
    let err = directions::parse_route(r#"{"routes": []}"#).unwrap_err();
    assert!(matches!(err, RouteError::NoRoute));
    assert_eq!(err.to_string(), "no route found");
}

#[test]
fn static_provider_feeds_the_tracker_end_to_end() {
    let route = directions::parse_route(SAMPLE_DIRECTIONS).expect("route");
    let provider = StaticRouteProvider::new(route);

    let origin = Coordinate {
        lat: 38.5,
        lon: -120.2,
    };
    let destination = Coordinate {
        lat: 43.252,
        lon: -126.453,
    };
    let resolved = provider
        .resolve_route(origin, destination)
        .expect("resolved route");
    let state = TrackerState::new(resolved).expect("tracker");

    let state = state.on_position_fix(&PositionFix::new(Coordinate {
        lat: 40.7,
        lon: -120.95,
    }));
    assert_eq!(state.current_step_index(), 1);
    assert_eq!(state.traversed_prefix().len(), 2);
}

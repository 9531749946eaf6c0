use crate::domain::geo::{haversine_km, Coordinates, EARTH_RADIUS_KM};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}

#[test]
fn zero_distance_for_identical_points() {
    let paris = Coordinates::new(48.8566, 2.3522);
    assert_eq!(haversine_km(paris, paris), 0.0);
}

#[test]
fn one_degree_of_longitude_at_the_equator() {
    let a = Coordinates::new(0.0, 0.0);
    let b = Coordinates::new(0.0, 1.0);
    // R * pi / 180
    assert_close(haversine_km(a, b), 111.195, 0.01);
}

#[test]
fn london_to_paris_matches_known_distance() {
    let london = Coordinates::new(51.5074, -0.1278);
    let paris = Coordinates::new(48.8566, 2.3522);
    assert_close(haversine_km(london, paris), 343.5, 2.0);
}

#[test]
fn pole_to_pole_is_half_the_circumference() {
    let north = Coordinates::new(90.0, 0.0);
    let south = Coordinates::new(-90.0, 0.0);
    assert_close(
        haversine_km(north, south),
        EARTH_RADIUS_KM * std::f64::consts::PI,
        0.01,
    );
}

#[test]
fn distance_is_symmetric() {
    let tokyo = Coordinates::new(35.6762, 139.6503);
    let sydney = Coordinates::new(-33.8688, 151.2093);
    assert_close(
        haversine_km(tokyo, sydney),
        haversine_km(sydney, tokyo),
        1e-9,
    );
}

#[test]
fn antipodal_points_do_not_produce_nan() {
    let a = Coordinates::new(0.0, 0.0);
    let b = Coordinates::new(0.0, 180.0);
    let distance = haversine_km(a, b);
    assert!(distance.is_finite());
    assert_close(distance, EARTH_RADIUS_KM * std::f64::consts::PI, 0.01);
}

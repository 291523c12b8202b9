//! Properties of the great-circle distance calculator

use citynav::geo::{distance, Coordinate, EARTH_RADIUS_KM};

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

fn random_coords(seed: u64, n: usize) -> Vec<Coordinate> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n)
        .map(|_| coord(rng.f64() * 180.0 - 90.0, rng.f64() * 360.0 - 180.0))
        .collect()
}

#[test]
fn test_identity_is_zero() {
    for p in random_coords(1, 200) {
        assert!(distance(p, p).abs() < 1e-9, "distance({p:?}, itself) != 0");
    }
}

#[test]
fn test_symmetric_and_non_negative() {
    let points = random_coords(2, 60);
    for a in &points {
        for b in &points {
            let ab = distance(*a, *b);
            let ba = distance(*b, *a);
            assert!(ab >= 0.0);
            assert!(ab.is_finite());
            assert!((ab - ba).abs() < 1e-9, "asymmetric: {ab} vs {ba}");
        }
    }
}

#[test]
fn test_triangle_inequality() {
    let points = random_coords(3, 25);
    for a in &points {
        for b in &points {
            for c in &points {
                let direct = distance(*a, *c);
                let via = distance(*a, *b) + distance(*b, *c);
                assert!(direct <= via + 1e-6, "{direct} > {via}");
            }
        }
    }
}

#[test]
fn test_temple_to_university() {
    let temple = coord(20.2376, 85.8346);
    let university = coord(20.3499, 85.8181);
    let d = distance(temple, university);
    assert!((10.0..=20.0).contains(&d), "got {d} km");
}

#[test]
fn test_city_points_sanity() {
    let d = distance(coord(20.2961, 85.8245), coord(20.2647, 85.8341));
    assert!(d > 0.0 && d < 100.0, "got {d} km");
}

#[test]
fn test_pole_to_pole_is_half_circumference() {
    let d = distance(coord(90.0, 0.0), coord(-90.0, 0.0));
    let half = std::f64::consts::PI * EARTH_RADIUS_KM;
    assert!((d - half).abs() < 1e-3, "got {d} km, expected {half}");
    assert!((d - 20015.0).abs() < 1.0, "got {d} km");
}

#[test]
fn test_antimeridian_wraparound() {
    let d = distance(coord(0.0, 179.9), coord(0.0, -179.9));
    assert!((d - 22.24).abs() < 0.1, "got {d} km");
}

#[test]
fn test_out_of_range_rejected() {
    for (lat, lon) in [(91.0, 0.0), (-90.1, 0.0), (0.0, 180.5), (0.0, -181.0)] {
        assert!(Coordinate::new(lat, lon).is_err(), "({lat}, {lon}) accepted");
    }
}

#[test]
fn test_concurrent_callers_agree() {
    let a = coord(20.2376, 85.8346);
    let b = coord(20.3499, 85.8181);
    let expected = distance(a, b);

    let results: Vec<f64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(move || (0..1000).map(|_| distance(a, b)).sum::<f64>() / 1000.0))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for r in results {
        assert!((r - expected).abs() < 1e-9);
    }
}

use super::*;

fn square(side: f64, r: f64) -> RoundRectCoverage {
    RoundRectCoverage::new(Rect::new(0.0, 0.0, side, side), r, r, true)
}

#[test]
fn corners_are_empty_and_interior_is_full() {
    let c = square(100.0, 20.0);
    assert_eq!(c.coverage(2, 2), 0);
    assert_eq!(c.coverage(97, 2), 0);
    assert_eq!(c.coverage(2, 97), 0);
    assert_eq!(c.coverage(97, 97), 0);

    assert_eq!(c.coverage(50, 50), 255);
    assert_eq!(c.coverage(20, 20), 255);
    assert_eq!(c.coverage(0, 50), 255);
    assert_eq!(c.coverage(50, 0), 255);
    assert_eq!(c.coverage(99, 50), 255);
}

#[test]
fn outside_the_rect_is_empty() {
    let c = square(100.0, 20.0);
    assert_eq!(c.coverage(-1, 50), 0);
    assert_eq!(c.coverage(100, 50), 0);
    assert_eq!(c.coverage(50, 100), 0);
}

#[test]
fn coverage_is_mirror_symmetric() {
    let c = square(100.0, 20.0);
    for y in 0..25 {
        for x in 0..25 {
            let v = c.coverage(x, y);
            assert_eq!(v, c.coverage(99 - x, y), "({x},{y})");
            assert_eq!(v, c.coverage(x, 99 - y), "({x},{y})");
            assert_eq!(v, c.coverage(99 - x, 99 - y), "({x},{y})");
        }
    }
}

#[test]
fn edge_band_has_partial_coverage() {
    let c = square(100.0, 20.0);
    let partial = (0..20)
        .flat_map(|y| (0..20).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let v = c.coverage(x, y);
            v > 0 && v < 255
        })
        .count();
    assert!(partial > 0);
}

#[test]
fn oversized_radius_fits_to_circle() {
    let c = square(100.0, 80.0);
    assert_eq!(c.radii(), (50.0, 50.0));
    assert_eq!(c.coverage(50, 50), 255);
    assert_eq!(c.coverage(5, 5), 0);
    assert_eq!(c.coverage(13, 13), 0);
    assert_eq!(c.coverage(16, 16), 255);
}

#[test]
fn zero_radius_is_a_plain_rect() {
    let c = square(10.0, 0.0);
    assert_eq!(c.radii(), (0.0, 0.0));
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(c.coverage(x, y), 255);
        }
    }
    let nan = square(10.0, f64::NAN);
    assert_eq!(nan.coverage(0, 0), 255);
}

#[test]
fn aliased_coverage_is_binary() {
    let c = RoundRectCoverage::new(Rect::new(0.0, 0.0, 64.0, 64.0), 20.0, 20.0, false);
    for y in 0..64 {
        for x in 0..64 {
            let v = c.coverage(x, y);
            assert!(v == 0 || v == 255);
        }
    }
    assert_eq!(c.coverage(1, 1), 0);
    assert_eq!(c.coverage(32, 32), 255);
}

#[test]
fn elliptical_corners() {
    let c = RoundRectCoverage::new(Rect::new(0.0, 0.0, 100.0, 50.0), 40.0, 10.0, true);
    assert_eq!(c.coverage(1, 1), 0);
    assert_eq!(c.coverage(50, 25), 255);
    assert_eq!(c.coverage(50, 0), 255);
    assert_eq!(c.coverage(0, 25), 255);
}

#[test]
fn empty_rect_covers_nothing() {
    let c = RoundRectCoverage::new(Rect::new(5.0, 5.0, 5.0, 20.0), 3.0, 3.0, true);
    assert_eq!(c.coverage(5, 10), 0);
}

#[test]
fn inverted_rect_is_normalized() {
    let c = RoundRectCoverage::new(Rect::new(10.0, 10.0, 0.0, 0.0), 0.0, 0.0, true);
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(c.pixel_bounds(), (0, 0, 10, 10));
}

#[test]
fn outline_bounds_match_rect() {
    let r = Rect::new(10.0, 20.0, 110.0, 70.0);
    for (rx, ry) in [(0.0, 0.0), (12.0, 12.0), (30.0, 8.0)] {
        let path = RoundRectCoverage::new(r, rx, ry, true).outline(0.1);
        let bb = path.bounding_box();
        assert!((bb.x0 - r.x0).abs() < 1e-6, "{rx}/{ry}: {bb:?}");
        assert!((bb.y0 - r.y0).abs() < 1e-6, "{rx}/{ry}: {bb:?}");
        assert!((bb.x1 - r.x1).abs() < 1e-6, "{rx}/{ry}: {bb:?}");
        assert!((bb.y1 - r.y1).abs() < 1e-6, "{rx}/{ry}: {bb:?}");
    }
}

#[test]
fn outline_excludes_corners() {
    let c = square(100.0, 20.0);
    let path = c.outline(0.01);
    assert!(path.contains(Point::new(50.0, 50.0)));
    assert!(!path.contains(Point::new(2.0, 2.0)));
    assert!(path.contains(Point::new(2.0, 50.0)));
}

#[test]
fn infinite_radius_is_the_largest_corner() {
    let c = square(40.0, f64::INFINITY);
    assert_eq!(c.radii(), (20.0, 20.0));
}

#[test]
fn huge_finite_radius_fits_like_infinity() {
    for r in [1e300, 1e307, 1e308, f64::MAX] {
        let c = square(100.0, r);
        assert_eq!(c.radii(), (50.0, 50.0), "r={r}");
        assert_eq!(c.coverage(0, 0), 0, "r={r}");
        assert_eq!(c.coverage(5, 5), 0, "r={r}");
        assert_eq!(c.coverage(50, 50), 255, "r={r}");
    }
}

#[test]
fn huge_elliptical_radii_keep_their_ratio() {
    let c = RoundRectCoverage::new(Rect::new(0.0, 0.0, 100.0, 50.0), f64::MAX, f64::MAX / 4.0, true);
    let (rx, ry) = c.radii();
    assert!((rx - 50.0).abs() < 1e-9, "{rx}");
    assert!((ry - 12.5).abs() < 1e-9, "{ry}");
    assert_eq!(c.coverage(0, 0), 0);
}

#[test]
fn subnormal_radius_is_nearly_square() {
    let c = square(10.0, f64::MIN_POSITIVE / 2.0);
    let (rx, ry) = c.radii();
    assert!(rx > 0.0 && ry > 0.0);
    assert_eq!(c.coverage(0, 0), 255);
    assert_eq!(c.coverage(9, 9), 255);
}

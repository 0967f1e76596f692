use super::*;
use kurbo::Point;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn default_angle_runs_top_to_bottom() {
    let g = LinearGeometry::resolve(&LinearLayer::default(), [200.0, 100.0]);
    assert!(close(g.sample([37.0, 0.0]).t, 0.0));
    assert!(close(g.sample([150.0, 50.0]).t, 0.5));
    assert!(close(g.sample([3.0, 100.0]).t, 1.0));
    assert_eq!(g.sample([3.0, 100.0]).mask, 1.0);
}

#[test]
fn ninety_degrees_runs_left_to_right() {
    let layer = LinearLayer {
        angle: Some(90.0),
        ..Default::default()
    };
    let g = LinearGeometry::resolve(&layer, [200.0, 100.0]);
    assert!(close(g.sample([0.0, 10.0]).t, 0.0));
    assert!(close(g.sample([100.0, 90.0]).t, 0.5));
    assert!(close(g.sample([200.0, 40.0]).t, 1.0));
}

#[test]
fn diagonal_angle_reaches_corners_exactly() {
    let layer = LinearLayer {
        angle: Some(135.0),
        ..Default::default()
    };
    let g = LinearGeometry::resolve(&layer, [300.0, 100.0]);
    assert!(close(g.sample([0.0, 0.0]).t, 0.0));
    assert!(close(g.sample([300.0, 100.0]).t, 1.0));
}

#[test]
fn explicit_points_override_angle_and_clamp_outside() {
    let layer = LinearLayer {
        angle: Some(90.0),
        from: Some(Point::new(10.0, 10.0)),
        to: Some(Point::new(10.0, 50.0)),
        ..Default::default()
    };
    let g = LinearGeometry::resolve(&layer, [100.0, 100.0]);
    assert!(close(g.sample([80.0, 30.0]).t, 0.5));
    assert_eq!(g.sample([0.0, -20.0]).t, 0.0);
    assert_eq!(g.sample([0.0, 90.0]).t, 1.0);
}

#[test]
fn degenerate_points_yield_zero_progress() {
    let layer = LinearLayer {
        from: Some(Point::new(5.0, 5.0)),
        to: Some(Point::new(5.0, 5.0)),
        ..Default::default()
    };
    let g = LinearGeometry::resolve(&layer, [10.0, 10.0]);
    assert_eq!(g.sample([9.0, 1.0]).t, 0.0);
}

#[test]
fn easing_reshapes_progress() {
    let layer = LinearLayer {
        angle: Some(90.0),
        easing: Some(2.0),
        ..Default::default()
    };
    let g = LinearGeometry::resolve(&layer, [100.0, 10.0]);
    assert!(close(g.sample([50.0, 5.0]).t, 0.25));

    let bad = LinearLayer {
        easing: Some(-3.0),
        ..Default::default()
    };
    let g = LinearGeometry::resolve(&bad, [100.0, 10.0]);
    assert!(g.easing > 0.0);
}

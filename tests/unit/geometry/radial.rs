use super::*;
use kurbo::Point;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn default_ellipse_fills_the_canvas() {
    let g = RadialGeometry::resolve(&RadialLayer::default(), [200.0, 100.0]);
    assert_eq!(g.center, [100.0, 50.0]);
    assert_eq!(g.radii, [100.0, 50.0]);
    assert!(close(g.sample([100.0, 50.0]).t, 0.0));
    assert!(close(g.sample([150.0, 50.0]).t, 0.5));
    assert!(close(g.sample([100.0, 100.0]).t, 1.0));
    assert_eq!(g.sample([0.0, 0.0]).t, 1.0);
}

#[test]
fn squircle_reaches_further_into_corners_than_ellipse() {
    let base = RadialLayer {
        center: Some(Point::new(0.0, 0.0)),
        radius: Some(10.0),
        ..Default::default()
    };
    let ellipse = RadialGeometry::resolve(&base, [20.0, 20.0]);
    let squircle = RadialGeometry::resolve(
        &RadialLayer {
            power: Some(6.0),
            ..base
        },
        [20.0, 20.0],
    );
    let diag = [6.0, 6.0];
    assert!(squircle.distance(diag) < ellipse.distance(diag));
    assert!(close(squircle.distance([10.0, 0.0]), 1.0));
}

#[test]
fn inner_and_outer_remap_distance() {
    let g = RadialGeometry::resolve(
        &RadialLayer {
            center: Some(Point::new(0.0, 0.0)),
            radius: Some(10.0),
            inner: Some(0.5),
            outer: Some(1.0),
            ..Default::default()
        },
        [10.0, 10.0],
    );
    assert_eq!(g.sample([3.0, 0.0]).t, 0.0);
    assert!(close(g.sample([7.5, 0.0]).t, 0.5));
    assert_eq!(g.sample([12.0, 0.0]).t, 1.0);
}

#[test]
fn collapsed_band_is_a_hard_step() {
    let g = RadialGeometry::resolve(
        &RadialLayer {
            center: Some(Point::new(0.0, 0.0)),
            radius: Some(10.0),
            inner: Some(0.5),
            outer: Some(0.5),
            ..Default::default()
        },
        [10.0, 10.0],
    );
    assert_eq!(g.sample([4.0, 0.0]).t, 0.0);
    assert_eq!(g.sample([6.0, 0.0]).t, 1.0);
}

#[test]
fn hostile_parameters_are_sanitized() {
    let g = RadialGeometry::resolve(
        &RadialLayer {
            radius_x: Some(-5.0),
            radius_y: Some(f32::NAN),
            power: Some(0.0),
            falloff: Some(f32::INFINITY),
            ..Default::default()
        },
        [40.0, 20.0],
    );
    assert!(g.radii[0] > 0.0);
    assert_eq!(g.radii[1], 10.0);
    assert_eq!(g.power, 1.0);
    assert_eq!(g.falloff, 1.0);
    let s = g.sample([1.0, 1.0]);
    assert!(s.t.is_finite());
}

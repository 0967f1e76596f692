use super::*;
use kurbo::{Point, Size};

fn inset_box(blur: f32, spread: f32) -> BoxGeometry {
    BoxGeometry::resolve(
        &BoxLayer {
            center: Some(Point::new(50.0, 50.0)),
            size: Some(Size::new(60.0, 40.0)),
            corner_radius: 8.0,
            spread,
            blur,
            inset: true,
            ..Default::default()
        },
        [100.0, 100.0],
    )
}

fn outer_box(blur: f32, spread: f32) -> BoxGeometry {
    BoxGeometry {
        inset: false,
        ..inset_box(blur, spread)
    }
}

#[test]
fn sdf_is_negative_inside_and_positive_outside() {
    assert!(sd_rounded_box([0.0, 0.0], [0.0, 0.0], [10.0, 5.0], 2.0) < 0.0);
    assert!((sd_rounded_box([15.0, 0.0], [0.0, 0.0], [10.0, 5.0], 2.0) - 5.0).abs() < 1e-5);
    assert!((sd_rounded_box([0.0, 7.0], [0.0, 0.0], [10.0, 5.0], 0.0) - 2.0).abs() < 1e-5);
}

#[test]
fn rounded_corner_pushes_distance_out() {
    let sharp = sd_rounded_box([10.0, 5.0], [0.0, 0.0], [10.0, 5.0], 0.0);
    let round = sd_rounded_box([10.0, 5.0], [0.0, 0.0], [10.0, 5.0], 4.0);
    assert!(sharp.abs() < 1e-5);
    assert!(round > 1.0);
}

#[test]
fn inset_masks_everything_strictly_outside_the_box() {
    let g = inset_box(12.0, 4.0);
    for y in 0..100 {
        for x in 0..100 {
            let p = [x as f32 + 0.5, y as f32 + 0.5];
            let s = g.sample(p);
            if g.box_distance(p) > 0.0 {
                assert_eq!(s.mask, 0.0, "({x},{y}) outside should be hidden");
            } else {
                assert_eq!(s.mask, 1.0, "({x},{y}) inside should be visible");
            }
        }
    }
    // Just inside the left edge.
    assert_eq!(g.sample([20.5, 50.0]).mask, 1.0);
    assert_eq!(g.sample([19.5, 50.0]).mask, 0.0);
}

#[test]
fn inset_progress_is_high_inside_and_low_at_edges() {
    let g = inset_box(12.0, 4.0);
    let center = g.sample([50.0, 50.0]).t;
    let edge = g.sample([20.2, 50.0]).t;
    assert!(center > 0.9, "center {center}");
    assert!(edge < 0.3, "edge {edge}");
}

#[test]
fn outer_masks_inside_and_fades_outward() {
    let g = outer_box(12.0, 0.0);
    assert_eq!(g.sample([50.0, 50.0]).mask, 0.0);

    let near = g.sample([81.0, 50.0]);
    let far = g.sample([95.0, 50.0]);
    assert_eq!(near.mask, 1.0);
    assert!(near.t < 0.6);
    assert!(far.t > near.t);

    // Far enough that the remaining shadow weight is negligible.
    let g = outer_box(4.0, 0.0);
    assert_eq!(g.sample([99.0, 50.0]).mask, 0.0);
}

#[test]
fn zero_blur_is_a_hard_edge_at_spread() {
    let inset = inset_box(0.0, 5.0);
    assert_eq!(inset.sample([22.0, 50.0]).t, 0.0);
    assert_eq!(inset.sample([30.0, 50.0]).t, 1.0);

    let outer = outer_box(0.0, 5.0);
    assert_eq!(outer.sample([83.0, 50.0]).t, 0.0);
    assert_eq!(outer.sample([83.0, 50.0]).mask, 1.0);
    assert_eq!(outer.sample([90.0, 50.0]).mask, 0.0);
}

#[test]
fn resolve_clamps_hostile_values() {
    let g = BoxGeometry::resolve(
        &BoxLayer {
            size: Some(Size::new(-20.0, 10.0)),
            corner_radius: 100.0,
            spread: -3.0,
            blur: f32::NAN,
            ..Default::default()
        },
        [50.0, 50.0],
    );
    assert_eq!(g.half, [10.0, 5.0]);
    assert_eq!(g.radius, 5.0);
    assert_eq!(g.spread, 0.0);
    assert_eq!(g.sigma, 0.0);
}

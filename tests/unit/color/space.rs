use super::*;

#[test]
fn srgb_round_trip_is_lossless_for_every_byte() {
    for v in 0u8..=255 {
        let back = linear_to_srgb(srgb_to_linear(v)).round();
        assert_eq!(back as u8, v, "byte {v}");
    }
}

#[test]
fn linear_to_srgb_does_not_round() {
    let x = linear_to_srgb(0.2);
    assert!(x.fract() != 0.0);
    assert!(x > 123.0 && x < 124.0);
}

#[test]
fn linear_to_srgb_clamps_out_of_range() {
    assert_eq!(linear_to_srgb(-1.0), 0.0);
    assert!((linear_to_srgb(4.0) - 255.0).abs() < 1e-3);
}

#[test]
fn oklab_round_trip_within_tolerance() {
    let steps = [0.0f32, 0.001, 0.02, 0.18, 0.5, 0.77, 1.0];
    for &r in &steps {
        for &g in &steps {
            for &b in &steps {
                let c = LinearRgba::rgba(r, g, b, 0.5);
                let back = oklab_to_linear(linear_to_oklab(c), c.a);
                assert!((back.r - r).abs() < 1e-4, "{c:?} -> {back:?}");
                assert!((back.g - g).abs() < 1e-4, "{c:?} -> {back:?}");
                assert!((back.b - b).abs() < 1e-4, "{c:?} -> {back:?}");
                assert_eq!(back.a, 0.5);
            }
        }
    }
}

#[test]
fn oklab_white_has_unit_lightness_and_no_chroma() {
    let w = LinearRgba::rgba(1.0, 1.0, 1.0, 1.0).to_oklab();
    assert!((w.l - 1.0).abs() < 1e-3);
    assert!(w.a.abs() < 1e-3);
    assert!(w.b.abs() < 1e-3);
}

#[test]
fn luminance_weights_sum_to_one() {
    let white = LinearRgba::rgba(1.0, 1.0, 1.0, 1.0);
    assert!((white.luminance() - 1.0).abs() < 1e-6);
}

use super::*;
use crate::config::model::{
    Dither, DitherMode, LinearLayer, Preset, RadialLayer,
};

fn linear(paint: LayerPaint) -> Layer {
    Layer::Linear(LinearLayer {
        paint,
        ..Default::default()
    })
}

#[test]
fn presets_fill_unset_fields() {
    let cfg = GradientConfig {
        preset: Preset::Video,
        layers: vec![linear(LayerPaint::default())],
        ..Default::default()
    };
    let r = ResolvedConfig::resolve(&cfg, RenderSize::new(64, 64)).unwrap();
    assert_eq!(r.dither.mode, DitherMode::InterleavedGradient);
    assert_eq!(r.dither.amplitude, 1.5);
    assert_eq!(r.layers[0].color_space, ColorSpace::LinearRgb);
    assert_eq!(r.layers[0].blend, BlendMode::Normal);
    assert_eq!(r.layers[0].opacity, 1.0);

    let still = ResolvedConfig::resolve(
        &GradientConfig {
            layers: vec![linear(LayerPaint::default())],
            ..Default::default()
        },
        RenderSize::new(64, 64),
    )
    .unwrap();
    assert_eq!(still.dither.mode, DitherMode::BlueNoise);
    assert_eq!(still.layers[0].color_space, ColorSpace::Oklab);
}

#[test]
fn dither_override_wins_per_field() {
    let cfg = GradientConfig {
        preset: Preset::Video,
        dither: Some(Dither {
            mode: Some(DitherMode::None),
            amplitude: None,
        }),
        ..Default::default()
    };
    let r = ResolvedConfig::resolve(&cfg, RenderSize::new(8, 8)).unwrap();
    assert_eq!(r.dither.mode, DitherMode::None);
    assert_eq!(r.dither.amplitude, 1.5);
}

#[test]
fn explicit_layer_fields_override_presets() {
    let cfg = GradientConfig {
        layers: vec![linear(LayerPaint {
            opacity: Some(2.0),
            blend: Some(BlendMode::Screen),
            color_space: Some(ColorSpace::LinearRgb),
            ..Default::default()
        })],
        ..Default::default()
    };
    let r = ResolvedConfig::resolve(&cfg, RenderSize::new(8, 8)).unwrap();
    let layer = &r.layers[0];
    assert_eq!(layer.opacity, 1.0);
    assert_eq!(layer.blend, BlendMode::Screen);
    assert_eq!(layer.color_space, ColorSpace::LinearRgb);
}

#[test]
fn bad_base_color_is_reported() {
    let cfg = GradientConfig {
        base_color: "#zzzzzz".into(),
        ..Default::default()
    };
    let err = ResolvedConfig::resolve(&cfg, RenderSize::new(8, 8)).unwrap_err();
    assert!(matches!(err, crate::GradiaError::InvalidColorFormat(_)));
}

#[test]
fn shadow_is_clamped_and_evaluated() {
    let shadow = ResolvedShadow::resolve(&Shadow {
        start_intensity: -1.0,
        end_intensity: 3.0,
        curve: 0.0,
    });
    assert_eq!(shadow.start, 0.0);
    assert_eq!(shadow.end, 1.0);
    assert_eq!(shadow.curve, MIN_EXPONENT);

    let linear = ResolvedShadow {
        start: 0.0,
        end: 0.5,
        curve: 1.0,
    };
    assert_eq!(linear.factor(0.0), 1.0);
    assert!((linear.factor(1.0) - 0.5).abs() < 1e-6);
    assert!((linear.factor(0.5) - 0.75).abs() < 1e-6);
}

#[test]
fn grain_without_positive_amount_is_dropped() {
    let defaults = Preset::Still.defaults();
    let zero = Grain {
        amount: 0.0,
        ..Default::default()
    };
    assert!(ResolvedGrain::resolve(Some(&zero), &defaults).is_none());
    assert!(ResolvedGrain::resolve(None, &defaults).is_none());

    let nan = Grain {
        amount: f32::NAN,
        ..Default::default()
    };
    assert!(ResolvedGrain::resolve(Some(&nan), &defaults).is_none());
}

#[test]
fn grain_takes_preset_scale_and_seeded_offset() {
    let defaults = Preset::Video.defaults();
    let g = ResolvedGrain::resolve(
        Some(&Grain {
            amount: 0.2,
            seed: 7,
            ..Default::default()
        }),
        &defaults,
    )
    .unwrap();
    assert_eq!(g.scale, 1.5);
    assert!(g.monochrome);
    assert_eq!(g.offset, seed_offset(7));

    let tiny = ResolvedGrain::resolve(
        Some(&Grain {
            amount: 0.2,
            scale: Some(0.1),
            ..Default::default()
        }),
        &defaults,
    )
    .unwrap();
    assert_eq!(tiny.scale, 1.0);
}

#[test]
fn grain_cells_cover_scale_pixels() {
    let g = ResolvedGrain {
        amount: 0.5,
        scale: 2.0,
        monochrome: true,
        offset: [10.0, 20.0],
    };
    assert_eq!(g.cell(0, 0), g.cell(1, 1));
    assert_ne!(g.cell(1, 0), g.cell(2, 0));
    assert_eq!(g.cell(3, 5), [11.0, 22.0]);
}

#[test]
fn radial_layer_geometry_uses_the_design_canvas() {
    let cfg = GradientConfig {
        layers: vec![Layer::Radial(RadialLayer::default())],
        ..Default::default()
    };
    let r = ResolvedConfig::resolve(&cfg, RenderSize::new(200, 100).with_physical(400, 200))
        .unwrap();
    assert_eq!(r.design, [200.0, 100.0]);
    match &r.layers[0].geometry {
        Geometry::Radial(g) => assert_eq!(g.center, [100.0, 50.0]),
        other => panic!("unexpected geometry {other:?}"),
    }
}

#[test]
fn monochrome_grain_shares_one_sample() {
    let mut g = ResolvedGrain {
        amount: 0.5,
        scale: 1.0,
        monochrome: true,
        offset: seed_offset(3),
    };
    let [r, gr, b] = g.noise(17, 9);
    assert_eq!(r, gr);
    assert_eq!(gr, b);

    g.monochrome = false;
    let mut saw_difference = false;
    for x in 0..16 {
        let [r, gr, b] = g.noise(x, 5);
        for v in [r, gr, b] {
            assert!(v > -1.0 && v < 1.0);
        }
        saw_difference |= r != gr || gr != b;
    }
    assert!(saw_difference);
}

use super::*;
use crate::config::model::{
    BoxLayer, Dither, DitherMode, Grain, Layer, LayerPaint, LinearLayer, RadialLayer,
};
use crate::foundation::core::Size;

fn no_dither() -> Option<Dither> {
    Some(Dither {
        mode: Some(DitherMode::None),
        amplitude: None,
    })
}

fn resolved(config: &GradientConfig, size: RenderSize) -> ResolvedConfig {
    ResolvedConfig::resolve(config, size).unwrap()
}

#[test]
fn base_color_round_trips_through_the_pipeline() {
    let cfg = GradientConfig {
        base_color: "#336699".into(),
        dither: no_dither(),
        ..Default::default()
    };
    let size = RenderSize::new(4, 4);
    let r = resolved(&cfg, size);
    assert_eq!(shade_pixel(&r, size, BlueNoise::shared(), 2, 1), [0x33, 0x66, 0x99, 255]);
}

#[test]
fn translucent_output_keeps_undithered_alpha() {
    let cfg = GradientConfig {
        base_color: "#ffffff80".into(),
        opaque: false,
        ..Default::default()
    };
    let size = RenderSize::new(8, 8);
    let r = resolved(&cfg, size);
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(shade_pixel(&r, size, BlueNoise::shared(), x, y)[3], 0x80);
        }
    }

    let opaque = resolved(
        &GradientConfig {
            opaque: true,
            ..cfg
        },
        size,
    );
    assert_eq!(shade_pixel(&opaque, size, BlueNoise::shared(), 0, 0)[3], 255);
}

#[test]
fn masked_layers_contribute_nothing() {
    let cfg = GradientConfig {
        layers: vec![Layer::Box(BoxLayer {
            paint: LayerPaint {
                start: Some("#ff0000".into()),
                end: Some("#ff0000".into()),
                ..Default::default()
            },
            size: Some(Size::new(10.0, 10.0)),
            inset: true,
            ..Default::default()
        })],
        ..Default::default()
    };
    let r = resolved(&cfg, RenderSize::new(100, 100));
    let layer = &r.layers[0];
    assert!(shade_layer(layer, [5.0, 5.0], 5, 5).is_none());
    let inside = shade_layer(layer, [50.0, 50.0], 50, 50).unwrap();
    assert!(inside.r > 0.99 && inside.a > 0.99);
}

#[test]
fn opacity_scales_layer_alpha() {
    let cfg = GradientConfig {
        layers: vec![Layer::Linear(LinearLayer {
            paint: LayerPaint {
                opacity: Some(0.25),
                ..Default::default()
            },
            ..Default::default()
        })],
        ..Default::default()
    };
    let r = resolved(&cfg, RenderSize::new(16, 16));
    let c = shade_layer(&r.layers[0], [8.0, 8.0], 8, 8).unwrap();
    assert!((c.a - 0.25).abs() < 1e-6);
}

#[test]
fn layer_grain_is_damped_in_the_dark() {
    let layer_with = |color: &str| GradientConfig {
        layers: vec![Layer::Radial(RadialLayer {
            paint: LayerPaint {
                start: Some(color.into()),
                end: Some(color.into()),
                color_space: Some(crate::config::model::ColorSpace::LinearRgb),
                grain: Some(Grain {
                    amount: 0.2,
                    seed: 11,
                    monochrome: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        })],
        ..Default::default()
    };
    let spread = |cfg: &GradientConfig| {
        let r = resolved(cfg, RenderSize::new(32, 32));
        let base = r.layers[0].stops[0].linear.r;
        let mut max = 0.0f32;
        for y in 0..32 {
            for x in 0..32 {
                let c = shade_layer(&r.layers[0], [x as f32 + 0.5, y as f32 + 0.5], x, y).unwrap();
                max = max.max((c.r - base).abs());
            }
        }
        max
    };
    let dark = spread(&layer_with("#080808"));
    let mid = spread(&layer_with("#808080"));
    assert!(mid > 0.05, "mid-grey grain spread {mid}");
    assert!(dark < mid * 0.5, "dark {dark} vs mid {mid}");
}

#[test]
fn parallel_and_serial_rasterization_agree() {
    let cfg = GradientConfig {
        grain: Some(Grain {
            amount: 0.05,
            seed: 9,
            ..Default::default()
        }),
        layers: vec![
            Layer::Linear(LinearLayer {
                angle: Some(45.0),
                ..Default::default()
            }),
            Layer::Radial(RadialLayer {
                paint: LayerPaint {
                    opacity: Some(0.5),
                    start: Some("#ff8800".into()),
                    end: Some("#0088ff00".into()),
                    ..Default::default()
                },
                power: Some(4.0),
                ..Default::default()
            }),
        ],
        ..Default::default()
    };
    let size = RenderSize::new(40, 24);
    let r = resolved(&cfg, size);
    let serial = render_resolved(&r, size, BlueNoise::shared(), false).unwrap();
    let parallel = render_resolved(&r, size, BlueNoise::shared(), true).unwrap();
    assert_eq!(serial, parallel);
    assert_eq!(serial.data.len(), 40 * 24 * 4);
    assert!(!serial.premultiplied);
}

#[test]
fn injected_blue_noise_is_used() {
    let cfg = GradientConfig {
        base_color: "#808080".into(),
        dither: Some(Dither {
            mode: Some(DitherMode::BlueNoise),
            amplitude: Some(1.0),
        }),
        ..Default::default()
    };
    // All thresholds at 255 turn every TPDF sample into +1.
    let flat = Arc::new(BlueNoise::from_thresholds(vec![255; 64 * 64]).unwrap());
    let opts = CpuRenderOpts {
        parallel: false,
        blue_noise: Some(flat),
    };
    let frame = render_pixels_with(&cfg, RenderSize::new(8, 8), &opts).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px[0] == 0x81));
}

#[test]
fn locally_owned_opts_fall_back_to_shared_blue_noise() {
    let cfg = GradientConfig {
        base_color: "#808080".into(),
        dither: Some(Dither {
            mode: Some(DitherMode::BlueNoise),
            amplitude: Some(1.0),
        }),
        ..Default::default()
    };
    let size = RenderSize::new(16, 16);
    let opts = CpuRenderOpts {
        parallel: false,
        blue_noise: None,
    };
    let frame = render_pixels_with(&cfg, size, &opts).unwrap();
    let r = resolved(&cfg, size);
    let expected = render_resolved(&r, size, BlueNoise::shared(), false).unwrap();
    assert_eq!(frame, expected);
}

#[test]
fn invalid_sizes_are_rejected() {
    let err = render_pixels(&GradientConfig::default(), RenderSize::new(0, 4)).unwrap_err();
    assert!(matches!(err, crate::GradiaError::Validation(_)));
}

use std::collections::BTreeSet;

use gradia::{GradientConfig, RenderSize, check_gpu_support, render_pixels};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("sunset.json");
    let config = GradientConfig::from_json(s)?;
    println!("gpu path: {:?}", check_gpu_support(&config));

    let frame = render_pixels(&config, RenderSize::new(320, 180).with_physical(640, 360))?;
    for (name, c) in ["r", "g", "b"].iter().zip(0..3) {
        let levels: BTreeSet<u8> = frame.data.chunks_exact(4).map(|px| px[c]).collect();
        println!("{name}: {} distinct levels", levels.len());
    }
    let img = frame.to_rgba_image()?;
    println!("rendered {}x{}", img.width(), img.height());

    Ok(())
}

// Demo runner for the `laser_vision` library: processes one still image the
// way an embedding application would process each captured frame, and writes
// the annotated frame plus the mask views next to it. Camera acquisition and
// live display belong to the embedding application, not to this crate.

use std::env;
use std::path::Path;

use anyhow::Context;
use laser_vision::pipeline::{LaserPipeline, PipelineConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    // --- 1. Argument parsing ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage: laser_vision <input_image> <output_dir>");
        return Ok(());
    }
    let input_path = &args[1];
    let output_dir = Path::new(&args[2]);

    // --- 2. Load the frame ---
    let frame = image::open(input_path)
        .with_context(|| format!("failed to open input image {input_path}"))?
        .to_rgb8();

    // --- 3. Run the pipeline ---
    let config = PipelineConfig {
        image_width: frame.width(),
        image_height: frame.height(),
        display_thresholds: true,
        ..PipelineConfig::default()
    };
    let pipeline = LaserPipeline::new(config.clone());
    let result = pipeline.process_frame(&frame);

    match &result.detection {
        Some(detection) => info!(
            x = detection.center.0,
            y = detection.center.1,
            radius = detection.radius,
            "laser pointer located"
        ),
        None => info!("no laser pointer in this frame"),
    }

    // --- 4. Write the outputs ---
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;

    result.annotated.save(output_dir.join("annotated.png"))?;
    result.laser_mask.save(output_dir.join("laser.png"))?;

    if config.display_thresholds {
        result.hsv.save(output_dir.join("hsv.png"))?;
        result.hue_mask.save(output_dir.join("hue.png"))?;
        result.saturation_mask.save(output_dir.join("saturation.png"))?;
        result.value_mask.save(output_dir.join("value.png"))?;
    }

    info!(dir = %output_dir.display(), "wrote pipeline outputs");
    Ok(())
}

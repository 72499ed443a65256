// THEORY:
// The `pipeline` module is the top-level API for the laser tracking engine.
// It sequences the core stages in a fixed order for every incoming frame:
// split the frame into HSV channels, threshold each channel (hue inverted),
// AND the channel masks into the laser mask, select the dominant blob and
// extract its geometry, then annotate a working copy of the frame.
//
// Key architectural principles:
// 1.  **Immutable configuration, transient scratch**: `PipelineConfig` is
//     fixed when the pipeline is built. Every channel image and mask is
//     allocated fresh per frame and moved into the `DetectionResult`; there
//     is no hidden state shared between calls, so one frame's output is a
//     pure function of that frame and the configuration.
// 2.  **The caller's frame is never touched**: Annotation happens on a copy
//     that travels out in the result bundle.
// 3.  **Degenerate outcomes are results, not errors**: An empty mask, a
//     zero-mass contour, or a blob below the size gate all produce a
//     well-formed result with `detection: None` and an unannotated frame.

use crate::core_modules::annotator;
use crate::core_modules::blob_detector::blob_detector;
use crate::core_modules::compositor;
use crate::core_modules::hsv;
use crate::core_modules::thresholder::{self, ChannelBounds, ChannelKind};
use image::{GrayImage, RgbImage};
use tracing::debug;

/// Configuration for the LaserPipeline, fixed for the pipeline's lifetime.
///
/// The default bounds target a red laser pointer: hue names the *excluded*
/// middle band (the kept range wraps around the hue circle), saturation and
/// value demand a vivid, near-ceiling-bright dot.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Hue band in OpenCV 8-bit units (0-179). Inverted after thresholding.
    pub hue: ChannelBounds,
    pub saturation: ChannelBounds,
    pub value: ChannelBounds,
    /// Enclosing-circle radius a blob must strictly exceed to count as a
    /// detection; anything at or below it is treated as noise.
    pub min_radius: f32,
    /// Whether the display collaborator should surface the per-channel mask
    /// views. Pipeline correctness does not depend on it.
    pub display_thresholds: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            hue: ChannelBounds::new(20, 160),
            saturation: ChannelBounds::new(100, 255),
            value: ChannelBounds::new(200, 255),
            min_radius: 10.0,
            display_thresholds: false,
        }
    }
}

impl PipelineConfig {
    pub fn bounds(&self, kind: ChannelKind) -> ChannelBounds {
        match kind {
            ChannelKind::Hue => self.hue,
            ChannelKind::Saturation => self.saturation,
            ChannelKind::Value => self.value,
        }
    }
}

/// An accepted per-frame detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Mass-weighted centroid of the dominant blob, truncated to integer
    /// pixel coordinates (enclosing-circle center for zero-mass blobs).
    pub center: (i32, i32),
    /// Center of the blob's minimum enclosing circle.
    pub circle_center: (f32, f32),
    /// Radius of the blob's minimum enclosing circle.
    pub radius: f32,
}

/// The primary output of the pipeline for a single frame.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// Working copy of the input frame, annotated when a detection passed
    /// the size gate.
    pub annotated: RgbImage,
    /// The three post-threshold channel masks re-merged into one
    /// three-channel diagnostic image.
    pub hsv: RgbImage,
    pub hue_mask: GrayImage,
    pub saturation_mask: GrayImage,
    pub value_mask: GrayImage,
    /// Composite of the three channel masks; the segmentation the blob
    /// selection ran on.
    pub laser_mask: GrayImage,
    pub detection: Option<Detection>,
}

/// The main, top-level struct for the laser tracking engine.
pub struct LaserPipeline {
    config: PipelineConfig,
}

impl LaserPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes one color frame and returns the full per-frame bundle.
    ///
    /// The frame must match the configured dimensions; feeding mismatched
    /// frames is a caller error, not a condition the pipeline defends
    /// against.
    pub fn process_frame(&self, frame: &RgbImage) -> DetectionResult {
        debug_assert_eq!(
            frame.dimensions(),
            (self.config.image_width, self.config.image_height)
        );

        // --- 1. Channel split ---
        let (hue, saturation, value) = hsv::split_channels(frame);

        // --- 2. Per-channel thresholding, inversion only for hue ---
        let hue_mask = thresholder::threshold_channel(
            &hue,
            self.config.bounds(ChannelKind::Hue),
            ChannelKind::Hue.inverted(),
        );
        let saturation_mask = thresholder::threshold_channel(
            &saturation,
            self.config.bounds(ChannelKind::Saturation),
            ChannelKind::Saturation.inverted(),
        );
        let value_mask = thresholder::threshold_channel(
            &value,
            self.config.bounds(ChannelKind::Value),
            ChannelKind::Value.inverted(),
        );

        // --- 3. Composite into the laser mask ---
        let laser_mask = compositor::composite_laser_mask(&hue_mask, &saturation_mask, &value_mask);

        // --- 4. Blob selection & geometry extraction ---
        let dominant = blob_detector::find_dominant_blob(&laser_mask);

        // --- 5. Size gate & annotation on a working copy ---
        let mut annotated = frame.clone();
        let detection = match dominant {
            None => {
                debug!("no contours in laser mask");
                None
            }
            Some(blob) => {
                let (circle_x, circle_y) = blob.circle.center;
                let radius = blob.circle.radius;
                let center = blob.center();

                if radius > self.config.min_radius {
                    annotator::annotate_detection(
                        &mut annotated,
                        (circle_x as i32, circle_y as i32),
                        radius as i32,
                        center,
                    );
                    debug!(x = center.0, y = center.1, radius, "laser detected");
                    Some(Detection {
                        center,
                        circle_center: (circle_x, circle_y),
                        radius,
                    })
                } else {
                    debug!(radius, "dominant blob below minimum radius");
                    None
                }
            }
        };

        // --- 6. Re-merge the thresholded channels for the diagnostic view ---
        let hsv = hsv::merge_channels(&hue_mask, &saturation_mask, &value_mask);

        DetectionResult {
            annotated,
            hsv,
            hue_mask,
            saturation_mask,
            value_mask,
            laser_mask,
            detection,
        }
    }
}

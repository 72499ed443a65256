// THEORY:
// The `thresholder` module turns a single-channel image into a binary mask.
// A pixel survives when its value lies inside the configured band for that
// channel; everything else is zeroed. The laser mask is later built by
// intersecting the three per-channel masks.
//
// Key architectural principles:
// 1.  **Two sequential passes, not one comparison**: The mask is produced by
//     first collapsing every value strictly above `max` to zero and then
//     binarizing every remaining value at or above `min` to the marker value.
//     The decomposition is the contract: the boundary behavior at `min` and
//     `max` falls out of the pass order, and any reimplementation has to
//     reproduce both passes to match it exactly.
// 2.  **Hue wrap-around via inversion**: Hue is circular, and a red target
//     straddles the wrap point, so its band cannot be expressed as one
//     contiguous range. The hue bounds instead name the *excluded* middle
//     band, and the thresholded hue mask is inverted afterwards. The trick is
//     only sound when the wanted range is the complement of one contiguous
//     band, which holds for hue alone; saturation and value never invert.
//     Whether a channel inverts is a property of `ChannelKind`, so the
//     thresholding routine itself stays a pure function of its arguments.
// 3.  **Silent degenerate bounds**: `min > max` simply yields an all-off mask
//     (nothing survives both passes). A quiet empty mask keeps the frame loop
//     alive, which matters more here than flagging a misconfiguration.

use image::GrayImage;

/// The marker value written for pixels that pass the threshold.
pub const MASK_ON: u8 = 255;

/// An inclusive per-channel value band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBounds {
    pub min: u8,
    pub max: u8,
}

impl ChannelBounds {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

/// Identifies which HSV component a channel image holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Hue,
    Saturation,
    Value,
}

impl ChannelKind {
    /// Whether the thresholded mask for this channel is inverted.
    /// Only hue inverts; its bounds select the excluded middle band.
    pub fn inverted(self) -> bool {
        matches!(self, ChannelKind::Hue)
    }
}

/// Thresholds a channel image into a binary mask.
///
/// Pass one collapses values strictly above `bounds.max` to zero; pass two
/// binarizes values at or above `bounds.min` to [`MASK_ON`]. With `invert`
/// the final on/off state of every pixel is negated.
pub fn threshold_channel(channel: &GrayImage, bounds: ChannelBounds, invert: bool) -> GrayImage {
    let mut mask = channel.clone();

    for pixel in mask.pixels_mut() {
        if pixel[0] > bounds.max {
            pixel[0] = 0;
        }
    }

    for pixel in mask.pixels_mut() {
        pixel[0] = if pixel[0] >= bounds.min { MASK_ON } else { 0 };
    }

    if invert {
        for pixel in mask.pixels_mut() {
            pixel[0] = MASK_ON - pixel[0];
        }
    }

    mask
}

// THEORY:
// The `annotator` renders an accepted detection back onto the frame so a
// human can follow the dot. It contains no detection logic, but its geometry
// is part of the pipeline's visible contract: a circle outline at the
// enclosing circle, a filled dot exactly at the reported center, and a
// corner-mark box for the square of side 2x radius centered on the same
// point. Drawing happens in place; a frame with no accepted detection is
// never touched.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

/// Outline color of the enclosing-circle highlight.
pub const CIRCLE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
/// Fill color of the centroid dot.
pub const CENTROID_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Color of the corner-mark bounding-box indicator.
pub const CORNER_COLOR: Rgb<u8> = Rgb([98, 196, 193]);

const CENTROID_DOT_RADIUS: i32 = 5;
const CORNER_MARK_LENGTH: f32 = 15.0;
const STROKE_WIDTH: i32 = 2;

/// Draws the full highlight set for one detection: circle outline at
/// (`circle_center`, `radius`), centroid dot at `center`, and the corner-mark
/// box around the circle.
pub fn annotate_detection(
    frame: &mut RgbImage,
    circle_center: (i32, i32),
    radius: i32,
    center: (i32, i32),
) {
    for stroke in 0..STROKE_WIDTH {
        draw_hollow_circle_mut(frame, circle_center, radius + stroke, CIRCLE_COLOR);
    }

    draw_filled_circle_mut(frame, center, CENTROID_DOT_RADIUS, CENTROID_COLOR);

    draw_corner_box(frame, circle_center, radius);
}

/// Corner marks of the axis-aligned square of side 2x radius centered on
/// `center`: two short strokes per corner, no connecting rectangle.
fn draw_corner_box(frame: &mut RgbImage, center: (i32, i32), radius: i32) {
    let r = radius as f32;
    let (cx, cy) = (center.0 as f32, center.1 as f32);
    let (x0, y0, x1, y1) = (cx - r, cy - r, cx + r, cy + r);
    let length = CORNER_MARK_LENGTH.min(r);

    let corners = [
        (x0, y0, 1.0, 1.0),
        (x1, y0, -1.0, 1.0),
        (x0, y1, 1.0, -1.0),
        (x1, y1, -1.0, -1.0),
    ];
    for (corner_x, corner_y, dx, dy) in corners {
        for stroke in 0..STROKE_WIDTH {
            let s = stroke as f32;
            draw_line_segment_mut(
                frame,
                (corner_x, corner_y + dy * s),
                (corner_x + dx * length, corner_y + dy * s),
                CORNER_COLOR,
            );
            draw_line_segment_mut(
                frame,
                (corner_x + dx * s, corner_y),
                (corner_x + dx * s, corner_y + dy * length),
                CORNER_COLOR,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_land_on_their_contract_positions() {
        let mut frame = RgbImage::new(120, 120);
        annotate_detection(&mut frame, (60, 60), 20, (60, 60));

        // Circle outline passes through the cardinal points of the radius.
        assert_eq!(*frame.get_pixel(80, 60), CIRCLE_COLOR);
        assert_eq!(*frame.get_pixel(60, 80), CIRCLE_COLOR);

        // Centroid dot sits exactly on the reported center.
        assert_eq!(*frame.get_pixel(60, 60), CENTROID_COLOR);

        // Corner marks start at the corners of the 2x-radius square.
        assert_eq!(*frame.get_pixel(40, 40), CORNER_COLOR);
        assert_eq!(*frame.get_pixel(80, 80), CORNER_COLOR);
    }

    #[test]
    fn drawing_is_clipped_at_the_frame_border() {
        let mut frame = RgbImage::new(64, 64);
        // Circle partially outside the frame must not panic.
        annotate_detection(&mut frame, (2, 2), 30, (2, 2));
        assert_eq!(*frame.get_pixel(2, 2), CENTROID_COLOR);
    }

    #[test]
    fn untouched_frame_stays_black() {
        let frame = RgbImage::new(32, 32);
        assert!(frame.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}

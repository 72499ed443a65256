// THEORY:
// The `blob_detector` is the engine of the spatial analysis stage. It turns
// the binary laser mask into a list of `Blob` candidates and picks the one
// the frame's detection will be based on.
//
// Key architectural principles:
// 1.  **External contours only**: Candidates are the outer borders of the
//     mask's connected regions. Holes inside a region say nothing about where
//     the dot is and are ignored.
// 2.  **Largest area wins**: A laser dot saturates a compact cluster of
//     pixels, while threshold noise produces scattered slivers. Ranking by
//     enclosed area keeps the dominant cluster. Ties keep the first contour
//     in trace order.
// 3.  **Stateless utility**: `find_blobs` maps one mask for one frame to the
//     blobs of that same frame. It has no memory of previous frames.

use crate::core_modules::blob::Blob;
use image::GrayImage;
use imageproc::contours::{BorderType, Contour, find_contours};

pub mod blob_detector {
    use super::*;

    /// Extracts every external connected region of a binary mask as a `Blob`.
    pub fn find_blobs(mask: &GrayImage) -> Vec<Blob> {
        let contours: Vec<Contour<i32>> = find_contours(mask);

        contours
            .into_iter()
            .filter(|contour| contour.border_type == BorderType::Outer)
            .map(|contour| Blob::from_contour(contour.points))
            .collect()
    }

    /// Selects the candidate with the greatest enclosed area.
    /// Ties resolve to the earliest candidate in trace order.
    pub fn dominant_blob(blobs: Vec<Blob>) -> Option<Blob> {
        let mut best: Option<Blob> = None;
        for blob in blobs {
            match &best {
                Some(current) if blob.area <= current.area => {}
                _ => best = Some(blob),
            }
        }
        best
    }

    /// Convenience for the per-frame path: find all blobs, keep the dominant.
    pub fn find_dominant_blob(mask: &GrayImage) -> Option<Blob> {
        dominant_blob(find_blobs(mask))
    }
}

#[cfg(test)]
mod tests {
    use super::blob_detector::*;
    use image::{GrayImage, Luma};
    use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
    use imageproc::rect::Rect;

    fn mask_with_disk(center: (i32, i32), radius: i32) -> GrayImage {
        let mut mask = GrayImage::new(200, 200);
        draw_filled_circle_mut(&mut mask, center, radius, Luma([255]));
        mask
    }

    #[test]
    fn empty_mask_has_no_blobs() {
        let mask = GrayImage::new(64, 64);
        assert!(find_blobs(&mask).is_empty());
        assert!(find_dominant_blob(&mask).is_none());
    }

    #[test]
    fn single_disk_reports_its_center_and_radius() {
        let mask = mask_with_disk((100, 80), 20);
        let blob = find_dominant_blob(&mask).expect("disk not detected");

        let center = blob.center();
        assert!((center.0 - 100).abs() <= 1, "center x {}", center.0);
        assert!((center.1 - 80).abs() <= 1, "center y {}", center.1);
        assert!(
            (blob.circle.radius - 20.0).abs() <= 1.0,
            "radius {}",
            blob.circle.radius
        );
    }

    #[test]
    fn larger_of_two_blobs_wins() {
        let mut mask = mask_with_disk((40, 40), 6);
        draw_filled_circle_mut(&mut mask, (150, 150), 18, Luma([255]));

        let blob = find_dominant_blob(&mask).expect("no blob detected");
        let center = blob.center();
        assert!((center.0 - 150).abs() <= 1);
        assert!((center.1 - 150).abs() <= 1);
    }

    #[test]
    fn internal_holes_are_not_candidates() {
        let mut mask = GrayImage::new(100, 100);
        draw_filled_rect_mut(&mut mask, Rect::at(20, 20).of_size(40, 40), Luma([255]));
        // Punch a hole; its border must not become a candidate of its own.
        draw_filled_rect_mut(&mut mask, Rect::at(35, 35).of_size(10, 10), Luma([0]));

        let blobs = find_blobs(&mask);
        assert_eq!(blobs.len(), 1);
    }

    #[test]
    fn single_pixel_blob_is_degenerate_but_located() {
        let mut mask = GrayImage::new(32, 32);
        mask.put_pixel(9, 21, Luma([255]));

        let blob = find_dominant_blob(&mask).expect("pixel not detected");
        assert_eq!(blob.moments.m00, 0.0);
        assert_eq!(blob.center(), (9, 21));
    }
}

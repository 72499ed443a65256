// THEORY:
// The `compositor` joins the three per-channel verdicts into the final laser
// mask. A pixel belongs to the laser only when its hue (post-inversion),
// saturation, and value conditions all held simultaneously, which is a
// pixel-wise logical AND over binary masks. The AND is applied pairwise; since
// it is commutative and associative the grouping does not affect the result.

use image::GrayImage;

/// Pixel-wise AND of two equally sized binary masks.
pub fn and_masks(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());

    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        image::Luma([a.get_pixel(x, y)[0] & b.get_pixel(x, y)[0]])
    })
}

/// Builds the laser mask from the three post-threshold channel masks,
/// hue already inverted: (hue AND value) AND saturation.
pub fn composite_laser_mask(
    hue: &GrayImage,
    saturation: &GrayImage,
    value: &GrayImage,
) -> GrayImage {
    and_masks(saturation, &and_masks(hue, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::thresholder::MASK_ON;
    use image::Luma;

    fn mask_with(values: &[u8]) -> GrayImage {
        let mut image = GrayImage::new(values.len() as u32, 1);
        for (x, &v) in values.iter().enumerate() {
            image.put_pixel(x as u32, 0, Luma([v]));
        }
        image
    }

    #[test]
    fn pixel_is_on_iff_all_three_masks_are_on() {
        let hue = mask_with(&[MASK_ON, MASK_ON, MASK_ON, 0, MASK_ON, 0, 0, 0]);
        let saturation = mask_with(&[MASK_ON, MASK_ON, 0, MASK_ON, 0, MASK_ON, 0, 0]);
        let value = mask_with(&[MASK_ON, 0, MASK_ON, MASK_ON, 0, 0, MASK_ON, 0]);

        let laser = composite_laser_mask(&hue, &saturation, &value);

        let expected = [MASK_ON, 0, 0, 0, 0, 0, 0, 0];
        for (x, &want) in expected.iter().enumerate() {
            assert_eq!(laser.get_pixel(x as u32, 0)[0], want, "pixel index {x}");
        }
    }

    #[test]
    fn grouping_order_does_not_matter() {
        let a = mask_with(&[MASK_ON, 0, MASK_ON, 0]);
        let b = mask_with(&[MASK_ON, MASK_ON, 0, 0]);
        let c = mask_with(&[MASK_ON, MASK_ON, MASK_ON, 0]);

        let left_first = and_masks(&and_masks(&a, &b), &c);
        let right_first = and_masks(&a, &and_masks(&b, &c));
        assert_eq!(left_first.as_raw(), right_first.as_raw());

        let swapped = composite_laser_mask(&b, &c, &a);
        let original = composite_laser_mask(&a, &b, &c);
        assert_eq!(swapped.as_raw(), original.as_raw());
    }
}

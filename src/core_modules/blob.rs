// THEORY:
// The `blob` module is a data container for one connected region extracted
// from the detection mask, summarized by the three geometric quantities the
// pipeline decides with: enclosed area (candidate ranking), raw spatial
// moments (mass-weighted centroid), and the minimum enclosing circle (size
// gate and annotation geometry). Like the rest of the per-frame artifacts it
// is a snapshot with no memory; a `Blob` describes one contour in one frame.
//
// All three quantities are computed from the contour polygon:
// 1.  **Area** is the shoelace polygon area of the traced boundary.
// 2.  **Moments** m00/m10/m01 come from Green's theorem over the same polygon,
//     so m00 equals the area and the centroid is m10/m00, m01/m00. A contour
//     that never encloses anything (a single pixel, a one-pixel-wide line)
//     has m00 == 0; the centroid is undefined there and the reported center
//     falls back to the enclosing-circle center instead.
// 3.  **Minimum enclosing circle** is exact, via Welzl's incremental
//     algorithm over the contour points. Contours here are short boundary
//     traces, so the worst-case cost of the unshuffled variant is irrelevant.

use imageproc::point::Point;

/// Raw spatial moments of a contour polygon.
/// `m00` is the enclosed (signed-normalized) area; `m10` and `m01` are the
/// first moments about the y and x axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

/// The smallest circle containing every point of a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnclosingCircle {
    pub center: (f32, f32),
    pub radius: f32,
}

/// One connected region of the detection mask, described by its traced
/// external contour and the geometry derived from it.
#[derive(Debug, Clone)]
pub struct Blob {
    /// The boundary pixels of the region, in trace order.
    pub contour: Vec<Point<i32>>,
    /// Enclosed pixel-area of the contour polygon.
    pub area: f64,
    /// Raw spatial moments of the contour polygon.
    pub moments: RawMoments,
    /// Minimum enclosing circle of the contour.
    pub circle: EnclosingCircle,
}

impl Blob {
    pub fn from_contour(contour: Vec<Point<i32>>) -> Self {
        let moments = polygon_moments(&contour);
        let circle = min_enclosing_circle(&contour);
        Self {
            area: moments.m00,
            contour,
            moments,
            circle,
        }
    }

    /// The reported center of the blob: the mass-weighted centroid truncated
    /// to integer coordinates, or the enclosing-circle center when the
    /// contour has zero moment mass.
    pub fn center(&self) -> (i32, i32) {
        if self.moments.m00 > 0.0 {
            (
                (self.moments.m10 / self.moments.m00) as i32,
                (self.moments.m01 / self.moments.m00) as i32,
            )
        } else {
            (self.circle.center.0 as i32, self.circle.center.1 as i32)
        }
    }
}

/// Green's theorem over the closed contour polygon. The sign of the traced
/// orientation is normalized away so `m00` is always non-negative.
fn polygon_moments(contour: &[Point<i32>]) -> RawMoments {
    if contour.len() < 3 {
        return RawMoments::default();
    }

    let mut m00 = 0.0;
    let mut m10 = 0.0;
    let mut m01 = 0.0;

    for i in 0..contour.len() {
        let p = contour[i];
        let q = contour[(i + 1) % contour.len()];
        let (px, py) = (p.x as f64, p.y as f64);
        let (qx, qy) = (q.x as f64, q.y as f64);

        let cross = px * qy - qx * py;
        m00 += cross;
        m10 += (px + qx) * cross;
        m01 += (py + qy) * cross;
    }

    m00 /= 2.0;
    m10 /= 6.0;
    m01 /= 6.0;

    if m00 < 0.0 {
        RawMoments {
            m00: -m00,
            m10: -m10,
            m01: -m01,
        }
    } else {
        RawMoments { m00, m10, m01 }
    }
}

const CONTAINS_EPSILON: f64 = 1e-6;

/// Exact minimum enclosing circle of the contour points, Welzl's incremental
/// algorithm. An empty contour yields a zero circle at the origin.
pub fn min_enclosing_circle(contour: &[Point<i32>]) -> EnclosingCircle {
    let points: Vec<(f64, f64)> = contour.iter().map(|p| (p.x as f64, p.y as f64)).collect();

    let Some(&first) = points.first() else {
        return EnclosingCircle {
            center: (0.0, 0.0),
            radius: 0.0,
        };
    };

    let mut circle = (first, 0.0);
    for i in 1..points.len() {
        if contains(circle, points[i]) {
            continue;
        }
        circle = (points[i], 0.0);
        for j in 0..i {
            if contains(circle, points[j]) {
                continue;
            }
            circle = circle_from_two(points[i], points[j]);
            for k in 0..j {
                if contains(circle, points[k]) {
                    continue;
                }
                circle = circle_from_three(points[i], points[j], points[k]);
            }
        }
    }

    let ((center_x, center_y), radius) = circle;
    EnclosingCircle {
        center: (center_x as f32, center_y as f32),
        radius: radius as f32,
    }
}

fn contains(circle: ((f64, f64), f64), p: (f64, f64)) -> bool {
    distance(circle.0, p) <= circle.1 + CONTAINS_EPSILON
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

fn circle_from_two(a: (f64, f64), b: (f64, f64)) -> ((f64, f64), f64) {
    let center = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
    (center, distance(a, b) / 2.0)
}

/// Circumcircle of three points; for (near-)collinear triples the widest
/// two-point circle over the triple encloses all three and is used instead.
fn circle_from_three(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> ((f64, f64), f64) {
    let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
    if d.abs() < CONTAINS_EPSILON {
        let candidates = [
            circle_from_two(a, b),
            circle_from_two(a, c),
            circle_from_two(b, c),
        ];
        return candidates
            .into_iter()
            .max_by(|x, y| x.1.total_cmp(&y.1))
            .unwrap();
    }

    let a2 = a.0 * a.0 + a.1 * a.1;
    let b2 = b.0 * b.0 + b.1 * b.1;
    let c2 = c.0 * c.0 + c.1 * c.1;
    let ux = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
    let uy = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;

    let center = (ux, uy);
    (center, distance(center, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_contour(side: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(0, 0),
            Point::new(side, 0),
            Point::new(side, side),
            Point::new(0, side),
        ]
    }

    #[test]
    fn square_moments_match_shoelace_area_and_centroid() {
        let blob = Blob::from_contour(square_contour(19));

        assert!((blob.area - 361.0).abs() < 1e-9);
        assert!((blob.moments.m00 - 361.0).abs() < 1e-9);
        assert_eq!(blob.center(), (9, 9));
    }

    #[test]
    fn orientation_does_not_change_the_moments() {
        let mut reversed = square_contour(19);
        reversed.reverse();
        let blob = Blob::from_contour(reversed);

        assert!((blob.moments.m00 - 361.0).abs() < 1e-9);
        assert_eq!(blob.center(), (9, 9));
    }

    #[test]
    fn enclosing_circle_of_square_is_its_circumcircle() {
        let blob = Blob::from_contour(square_contour(19));

        let expected_radius = (2.0_f32).sqrt() * 9.5;
        assert!((blob.circle.center.0 - 9.5).abs() < 1e-3);
        assert!((blob.circle.center.1 - 9.5).abs() < 1e-3);
        assert!((blob.circle.radius - expected_radius).abs() < 1e-3);
    }

    #[test]
    fn degenerate_contours_fall_back_to_the_circle_center() {
        let point = Blob::from_contour(vec![Point::new(7, 11)]);
        assert_eq!(point.moments.m00, 0.0);
        assert_eq!(point.center(), (7, 11));
        assert_eq!(point.circle.radius, 0.0);

        let line = Blob::from_contour(vec![Point::new(0, 0), Point::new(10, 0)]);
        assert_eq!(line.moments.m00, 0.0);
        assert_eq!(line.center(), (5, 0));
        assert!((line.circle.radius - 5.0).abs() < 1e-6);
    }

    #[test]
    fn collinear_points_use_the_extreme_pair_as_diameter() {
        let contour = vec![Point::new(0, 0), Point::new(4, 0), Point::new(9, 0)];
        let circle = min_enclosing_circle(&contour);

        assert!((circle.center.0 - 4.5).abs() < 1e-6);
        assert!((circle.radius - 4.5).abs() < 1e-6);
    }

    #[test]
    fn empty_contour_yields_zero_circle() {
        let circle = min_enclosing_circle(&[]);
        assert_eq!(circle.radius, 0.0);
    }
}

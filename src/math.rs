//! Geometric math utilities.
//!
//! Orientation tests, distances, segment projections and polygon area.

use crate::basics::PointD;

// ============================================================================
// Constants
// ============================================================================

/// Coinciding points maximal distance (epsilon).
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

// ============================================================================
// Orientation
// ============================================================================

/// Twice the signed area of the triangle (x1,y1), (x2,y2), (x,y).
/// Positive when the point lies to the left of (x1,y1)→(x2,y2).
#[inline]
pub fn is_left(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    (x2 - x1) * (y - y1) - (x - x1) * (y2 - y1)
}

// ============================================================================
// Distance calculations
// ============================================================================

/// Euclidean distance between two points.
#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn calc_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

/// Compute the parameter `u` for the projection of point (x, y) onto
/// the line segment (x1,y1)→(x2,y2). Returns 0 if the segment is degenerate.
#[inline]
pub fn calc_segment_point_u(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;

    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }

    let pdx = x - x1;
    let pdy = y - y1;

    (pdx * dx + pdy * dy) / (dx * dx + dy * dy)
}

/// Squared distance from point (x, y) to the closest point on segment
/// (x1,y1)→(x2,y2), given pre-computed parameter `u`.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn calc_segment_point_sq_distance_with_u(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x: f64,
    y: f64,
    u: f64,
) -> f64 {
    if u <= 0.0 {
        calc_sq_distance(x, y, x1, y1)
    } else if u >= 1.0 {
        calc_sq_distance(x, y, x2, y2)
    } else {
        calc_sq_distance(x, y, x1 + u * (x2 - x1), y1 + u * (y2 - y1))
    }
}

/// Squared distance from point (x, y) to the closest point on segment
/// (x1,y1)→(x2,y2).
#[inline]
pub fn calc_segment_point_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    calc_segment_point_sq_distance_with_u(
        x1,
        y1,
        x2,
        y2,
        x,
        y,
        calc_segment_point_u(x1, y1, x2, y2, x, y),
    )
}

// ============================================================================
// Area
// ============================================================================

/// Signed area of a closed polygon (shoelace formula).
/// Positive for counter-clockwise winding in a y-up coordinate system.
pub fn calc_polygon_area(vertices: &[PointD]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_is_left() {
        assert!(is_left(0.0, 0.0, 10.0, 0.0, 5.0, 1.0) > 0.0);
        assert!(is_left(0.0, 0.0, 10.0, 0.0, 5.0, -1.0) < 0.0);
    }

    #[test]
    fn test_calc_distance() {
        assert!((calc_distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < EPS);
        assert!((calc_sq_distance(0.0, 0.0, 3.0, 4.0) - 25.0).abs() < EPS);
    }

    #[test]
    fn test_calc_segment_point_u() {
        assert!((calc_segment_point_u(0.0, 0.0, 10.0, 0.0, 5.0, 3.0) - 0.5).abs() < EPS);
        assert!(calc_segment_point_u(0.0, 0.0, 10.0, 0.0, -5.0, 0.0) < 0.0);
        assert_eq!(calc_segment_point_u(1.0, 1.0, 1.0, 1.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn test_calc_segment_point_sq_distance() {
        // Perpendicular foot inside the segment
        assert!((calc_segment_point_sq_distance(0.0, 0.0, 10.0, 0.0, 5.0, 3.0) - 9.0).abs() < EPS);
        // Closest to the end point
        assert!(
            (calc_segment_point_sq_distance(0.0, 0.0, 10.0, 0.0, 13.0, 4.0) - 25.0).abs() < EPS
        );
    }

    #[test]
    fn test_calc_polygon_area() {
        let ccw = [
            PointD::new(0.0, 0.0),
            PointD::new(4.0, 0.0),
            PointD::new(4.0, 3.0),
            PointD::new(0.0, 3.0),
        ];
        assert!((calc_polygon_area(&ccw) - 12.0).abs() < EPS);
        let mut cw = ccw;
        cw.reverse();
        assert!((calc_polygon_area(&cw) + 12.0).abs() < EPS);
        assert_eq!(calc_polygon_area(&ccw[..2]), 0.0);
    }
}

//! Hit testing against stroke outlines and centerlines.
//!
//! Point tests use winding numbers over the outline polygons (Sunday's
//! crossing rule with `is_left`) plus an inclusive distance band around the
//! outline edges. Selection tests measure how much of the centerline lies
//! inside a rectangle or a lasso polygon.

use crate::basics::{FillingRule, PointD, RectD};
use crate::clip_liang_barsky::clip_segment_range;
use crate::math::{calc_distance, calc_sq_distance, calc_segment_point_sq_distance, is_left};
use crate::stylus_point::StylusPoint;

// ============================================================================
// Winding
// ============================================================================

/// Winding number of the closed polygon `poly` around `(x, y)`.
pub fn winding_number(poly: &[PointD], x: f64, y: f64) -> i32 {
    let n = poly.len();
    if n < 3 {
        return 0;
    }
    let mut wn = 0;
    for i in 0..n {
        let a = &poly[i];
        let b = &poly[(i + 1) % n];
        if a.y <= y {
            if b.y > y && is_left(a.x, a.y, b.x, b.y, x, y) > 0.0 {
                wn += 1;
            }
        } else if b.y <= y && is_left(a.x, a.y, b.x, b.y, x, y) < 0.0 {
            wn -= 1;
        }
    }
    wn
}

/// Whether `(x, y)` is inside the union of `polys` under `rule`.
pub fn point_in_polygons(polys: &[Vec<PointD>], x: f64, y: f64, rule: FillingRule) -> bool {
    let total: i32 = polys.iter().map(|p| winding_number(p, x, y)).sum();
    match rule {
        FillingRule::NonZero => total != 0,
        FillingRule::EvenOdd => total % 2 != 0,
    }
}

/// Shortest distance from `(x, y)` to any edge of the closed `polys`.
/// `f64::INFINITY` when there are no vertices.
pub fn distance_to_polygons(polys: &[Vec<PointD>], x: f64, y: f64) -> f64 {
    let mut best = f64::INFINITY;
    for poly in polys {
        let n = poly.len();
        if n == 1 {
            best = best.min(calc_sq_distance(x, y, poly[0].x, poly[0].y));
            continue;
        }
        for i in 0..n {
            let a = &poly[i];
            let b = &poly[(i + 1) % n];
            best = best.min(calc_segment_point_sq_distance(a.x, a.y, b.x, b.y, x, y));
        }
    }
    best.sqrt()
}

// ============================================================================
// Outline tests
// ============================================================================

/// Non-zero fill test with an inclusive boundary band of `boundary_eps`.
pub fn hit_test_outline(polys: &[Vec<PointD>], x: f64, y: f64, boundary_eps: f64) -> bool {
    if point_in_polygons(polys, x, y, FillingRule::NonZero) {
        return true;
    }
    distance_to_polygons(polys, x, y) <= boundary_eps
}

/// Like [`hit_test_outline`] but also accepts points within `diameter / 2`
/// of the outline.
pub fn hit_test_diameter(
    polys: &[Vec<PointD>],
    x: f64,
    y: f64,
    diameter: f64,
    boundary_eps: f64,
) -> bool {
    let tolerance = if diameter.is_finite() && diameter > 0.0 {
        (diameter * 0.5).max(boundary_eps)
    } else {
        boundary_eps
    };
    hit_test_outline(polys, x, y, tolerance)
}

// ============================================================================
// Selection tests
// ============================================================================

/// Fraction of the centerline length through `nodes` that lies inside
/// `rect` (boundary inclusive). A zero-length centerline counts as fully
/// inside when its first node is inside.
pub fn fraction_in_rect(nodes: &[StylusPoint], rect: &RectD) -> f64 {
    let mut r = *rect;
    r.normalize();
    let Some(first) = nodes.first() else {
        return 0.0;
    };

    let mut total = 0.0;
    let mut inside = 0.0;
    for w in nodes.windows(2) {
        let len = calc_distance(w[0].x, w[0].y, w[1].x, w[1].y);
        total += len;
        if let Some((t0, t1)) = clip_segment_range(w[0].x, w[0].y, w[1].x, w[1].y, &r) {
            inside += len * (t1 - t0);
        }
    }

    if total > 0.0 {
        (inside / total).clamp(0.0, 1.0)
    } else if r.hit_test(first.x, first.y) {
        1.0
    } else {
        0.0
    }
}

/// Fraction of `nodes` inside the closed `lasso` polygon (non-zero rule).
/// Lassos with fewer than three points contain nothing.
pub fn fraction_in_lasso(nodes: &[StylusPoint], lasso: &[PointD]) -> f64 {
    if lasso.len() < 3 || nodes.is_empty() {
        return 0.0;
    }
    let inside = nodes
        .iter()
        .filter(|n| winding_number(lasso, n.x, n.y) != 0)
        .count();
    inside as f64 / nodes.len() as f64
}

/// Whether `fraction` of a stroke meets a `percentage` threshold.
///
/// The percentage is clamped to `0..=100`; something must be inside even
/// when the threshold is zero.
pub fn meets_percentage(fraction: f64, percentage: f64) -> bool {
    if !(fraction > 0.0) {
        return false;
    }
    let pct = if percentage.is_nan() {
        100.0
    } else {
        percentage.clamp(0.0, 100.0)
    };
    fraction * 100.0 + 1e-9 >= pct
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn square(x: f64, y: f64, s: f64) -> Vec<PointD> {
        vec![
            PointD::new(x, y),
            PointD::new(x + s, y),
            PointD::new(x + s, y + s),
            PointD::new(x, y + s),
        ]
    }

    fn line(n: usize, len: f64) -> Vec<StylusPoint> {
        (0..n)
            .map(|i| StylusPoint::new(len * i as f64 / (n - 1) as f64, 0.0, 1.0))
            .collect()
    }

    #[test]
    fn test_winding_orientation() {
        let ccw = square(0.0, 0.0, 10.0);
        assert_eq!(winding_number(&ccw, 5.0, 5.0), 1);
        let mut cw = ccw.clone();
        cw.reverse();
        assert_eq!(winding_number(&cw, 5.0, 5.0), -1);
        assert_eq!(winding_number(&ccw, 15.0, 5.0), 0);
        assert_eq!(winding_number(&ccw[..2], 5.0, 0.0), 0);
    }

    #[test]
    fn test_nonzero_vs_evenodd() {
        let polys = vec![square(0.0, 0.0, 10.0), square(2.0, 2.0, 4.0)];
        assert!(point_in_polygons(&polys, 3.0, 3.0, FillingRule::NonZero));
        assert!(!point_in_polygons(&polys, 3.0, 3.0, FillingRule::EvenOdd));
        assert!(point_in_polygons(&polys, 8.0, 8.0, FillingRule::EvenOdd));
    }

    #[test]
    fn test_distance_to_polygons() {
        let polys = vec![square(0.0, 0.0, 10.0)];
        assert!((distance_to_polygons(&polys, 13.0, 5.0) - 3.0).abs() < EPS);
        assert!((distance_to_polygons(&polys, 5.0, 4.0) - 4.0).abs() < EPS);
        assert_eq!(distance_to_polygons(&[], 0.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn test_boundary_inclusive() {
        let polys = vec![square(0.0, 0.0, 10.0)];
        // Right and top edges are outside for the pure crossing rule.
        assert!(hit_test_outline(&polys, 10.0, 5.0, 1e-9));
        assert!(hit_test_outline(&polys, 5.0, 10.0, 1e-9));
        assert!(hit_test_outline(&polys, 10.0, 10.0, 1e-9));
        assert!(!hit_test_outline(&polys, 10.1, 5.0, 1e-9));
    }

    #[test]
    fn test_nan_query_misses() {
        let polys = vec![square(0.0, 0.0, 10.0)];
        assert!(!hit_test_outline(&polys, f64::NAN, 5.0, 1e-9));
    }

    #[test]
    fn test_hit_test_diameter() {
        let polys = vec![square(0.0, 0.0, 10.0)];
        assert!(!hit_test_diameter(&polys, 12.0, 5.0, 2.0, 1e-9));
        assert!(hit_test_diameter(&polys, 12.0, 5.0, 4.0, 1e-9));
        assert!(hit_test_diameter(&polys, 5.0, 5.0, 0.0, 1e-9));
        assert!(!hit_test_diameter(&polys, 12.0, 5.0, f64::NAN, 1e-9));
    }

    #[test]
    fn test_fraction_in_rect() {
        let nodes = line(3, 10.0);
        let r = RectD::new(0.0, -1.0, 5.0, 1.0);
        assert!((fraction_in_rect(&nodes, &r) - 0.5).abs() < EPS);
        // Flipped corners are normalized.
        let flipped = RectD::new(5.0, 1.0, 0.0, -1.0);
        assert!((fraction_in_rect(&nodes, &flipped) - 0.5).abs() < EPS);
        let all = RectD::new(-1.0, -1.0, 11.0, 1.0);
        assert!((fraction_in_rect(&nodes, &all) - 1.0).abs() < EPS);
        let none = RectD::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(fraction_in_rect(&nodes, &none), 0.0);
    }

    #[test]
    fn test_fraction_in_rect_single_node() {
        let nodes = [StylusPoint::new(5.0, 5.0, 1.0)];
        assert_eq!(fraction_in_rect(&nodes, &RectD::new(0.0, 0.0, 10.0, 10.0)), 1.0);
        assert_eq!(fraction_in_rect(&nodes, &RectD::new(6.0, 6.0, 10.0, 10.0)), 0.0);
        assert_eq!(fraction_in_rect(&[], &RectD::new(0.0, 0.0, 1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_fraction_in_lasso() {
        let nodes = line(11, 10.0);
        let lasso = vec![
            PointD::new(-1.0, -1.0),
            PointD::new(4.5, -1.0),
            PointD::new(4.5, 1.0),
            PointD::new(-1.0, 1.0),
        ];
        // Nodes at x = 0..=4 are inside.
        assert!((fraction_in_lasso(&nodes, &lasso) - 5.0 / 11.0).abs() < EPS);
        assert_eq!(fraction_in_lasso(&nodes, &lasso[..2]), 0.0);
    }

    #[test]
    fn test_meets_percentage() {
        assert!(meets_percentage(0.5, 50.0));
        assert!(!meets_percentage(0.49, 50.0));
        assert!(meets_percentage(1.0, 250.0));
        assert!(meets_percentage(0.01, -5.0));
        assert!(!meets_percentage(0.0, 0.0));
        assert!(!meets_percentage(0.9, f64::NAN));
    }
}

//! Outline builder: turns a fitted centerline into a fillable outline.
//!
//! A ribbon outline is a single closed sub-path: the right offset forward,
//! a round end cap, the left offset backward and a round start cap. The
//! half-width at each node is `width / 2 * pressure`. Ellipse-shaped
//! strokes ignore the centerline and emit the ellipse inscribed in the
//! bounding box of the knots.
//!
//! Outlines are meant to be filled with the non-zero winding rule.

use crate::basics::{PointD, PATH_FLAGS_CCW};
use crate::bounding_rect::bounding_rect_points;
use crate::config::StrokeConfig;
use crate::ellipse::Ellipse;
use crate::math_stroke::{segment_normal, MathStroke};
use crate::path_storage::PathStorage;
use crate::stroke_fit::FittedPath;
use crate::stylus_point::StylusPoint;

/// Build the filled outline of `path` swept with `base_width`.
pub fn build(
    path: &FittedPath,
    base_width: f64,
    ellipse_shape: bool,
    config: &StrokeConfig,
) -> PathStorage {
    let scale = config.approximation_scale();
    let nodes = if ellipse_shape {
        Vec::new()
    } else {
        path.flatten(scale)
    };
    build_from_nodes(path, &nodes, base_width, ellipse_shape, scale)
}

/// Like [`build`], for callers that already hold `path.flatten(scale)`.
/// `nodes` is ignored for ellipse-shaped strokes.
pub fn build_from_nodes(
    path: &FittedPath,
    nodes: &[StylusPoint],
    base_width: f64,
    ellipse_shape: bool,
    scale: f64,
) -> PathStorage {
    if ellipse_shape {
        build_ellipse(path, base_width, scale)
    } else {
        build_ribbon(nodes, base_width, scale)
    }
}

/// Ellipse inscribed in the bounding box of the knots.
pub fn build_ellipse(path: &FittedPath, base_width: f64, scale: f64) -> PathStorage {
    let mut ps = PathStorage::new();
    let points: Vec<PointD> = path.knots().iter().map(StylusPoint::point).collect();
    if let Some(bounds) = bounding_rect_points(&points) {
        let mut e = Ellipse::from_bounds(&bounds, base_width * 0.5, scale);
        ps.concat_path(&mut e, 0);
    }
    ps
}

/// Round-capped, round-joined ribbon through `nodes`.
///
/// `nodes` must not contain consecutive coincident entries. A single node
/// yields a circle, or a one-vertex closed sub-path when its radius is
/// zero; a node list whose radii are all zero yields a sliver of zero area.
pub fn build_ribbon(nodes: &[StylusPoint], base_width: f64, scale: f64) -> PathStorage {
    let mut ps = PathStorage::new();
    let half = base_width * 0.5;
    let radius = |n: &StylusPoint| half * n.pressure as f64;

    match nodes {
        [] => return ps,
        [only] => {
            let r = radius(only);
            if r > 0.0 {
                let mut e = Ellipse::new(only.x, only.y, r, r, 0, false);
                e.set_approximation_scale(scale);
                ps.concat_path(&mut e, 0);
            } else {
                // Zero radius: a closed sub-path collapsed onto the node.
                ps.move_to(only.x, only.y);
                ps.close_polygon(PATH_FLAGS_CCW);
            }
            return ps;
        }
        _ => {}
    }

    let mut ms = MathStroke::new();
    ms.set_approximation_scale(scale);

    let normals: Vec<(f64, f64)> = nodes
        .windows(2)
        .map(|w| segment_normal(&w[0], &w[1]).unwrap_or((0.0, 0.0)))
        .collect();

    let first = &nodes[0];
    let last = &nodes[nodes.len() - 1];
    let n_first = normals[0];
    let n_last = normals[normals.len() - 1];
    let r_first = radius(first);
    let r_last = radius(last);

    let mut right: Vec<PointD> = Vec::with_capacity(nodes.len() * 2);
    let mut left: Vec<PointD> = Vec::with_capacity(nodes.len() * 2);
    right.push(PointD::new(first.x + n_first.0 * r_first, first.y + n_first.1 * r_first));
    left.push(PointD::new(first.x - n_first.0 * r_first, first.y - n_first.1 * r_first));

    let mut jr = Vec::new();
    let mut jl = Vec::new();
    for (j, node) in nodes.iter().enumerate().skip(1).take(nodes.len() - 2) {
        ms.calc_join(&mut jr, &mut jl, node, normals[j - 1], normals[j], radius(node));
        right.extend_from_slice(&jr);
        left.extend_from_slice(&jl);
    }

    right.push(PointD::new(last.x + n_last.0 * r_last, last.y + n_last.1 * r_last));
    left.push(PointD::new(last.x - n_last.0 * r_last, last.y - n_last.1 * r_last));

    let mut cap = Vec::new();

    ps.move_to(right[0].x, right[0].y);
    for p in &right[1..] {
        ps.line_to_distinct(p.x, p.y);
    }
    ms.calc_cap(&mut cap, last, n_last, r_last);
    for p in &cap {
        ps.line_to_distinct(p.x, p.y);
    }
    for p in left.iter().rev() {
        ps.line_to_distinct(p.x, p.y);
    }
    ms.calc_cap(&mut cap, first, (-n_first.0, -n_first.1), r_first);
    for p in &cap {
        ps.line_to_distinct(p.x, p.y);
    }
    ps.close_polygon(PATH_FLAGS_CCW);
    ps
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{is_close, PI};
    use crate::math::calc_polygon_area;
    use crate::stroke_fit::fit;

    fn fitted(points: &[(f64, f64)], curve: bool) -> FittedPath {
        let pts: Vec<PointD> = points.iter().map(|&p| PointD::from(p)).collect();
        fit(&pts, None, curve, false, &StrokeConfig::default()).unwrap()
    }

    fn area(ps: &PathStorage) -> f64 {
        ps.polygons().iter().map(|p| calc_polygon_area(p)).sum()
    }

    #[test]
    fn test_straight_ribbon_area() {
        let path = fitted(&[(0.0, 0.0), (10.0, 0.0)], false);
        let ps = build(&path, 4.0, false, &StrokeConfig::default());
        assert_eq!(ps.num_paths(), 1);
        assert!(is_close(ps.last_command()));
        let expected = 10.0 * 4.0 + PI * 4.0;
        let a = area(&ps);
        assert!(a > 0.0);
        assert!((a - expected).abs() < 1.5, "area {}", a);
    }

    #[test]
    fn test_ribbon_extent() {
        let path = fitted(&[(0.0, 0.0), (10.0, 0.0)], false);
        let ps = build(&path, 4.0, false, &StrokeConfig::default());
        let polys = ps.polygons();
        let xs: Vec<f64> = polys[0].iter().map(|p| p.x).collect();
        let ys: Vec<f64> = polys[0].iter().map(|p| p.y).collect();
        let max_x = xs.iter().cloned().fold(f64::MIN, f64::max);
        let min_x = xs.iter().cloned().fold(f64::MAX, f64::min);
        let max_y = ys.iter().cloned().fold(f64::MIN, f64::max);
        assert!((max_x - 12.0).abs() < 0.2);
        assert!((min_x + 2.0).abs() < 0.2);
        assert!((max_y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_node_circle() {
        let path = fitted(&[(5.0, 5.0)], false);
        let ps = build(&path, 2.0, false, &StrokeConfig::default());
        let polys = ps.polygons();
        assert_eq!(polys.len(), 1);
        for p in &polys[0] {
            let d = ((p.x - 5.0).powi(2) + (p.y - 5.0).powi(2)).sqrt();
            assert!((d - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_pressure_single_node_is_degenerate_dot() {
        let ps = build_ribbon(&[StylusPoint::new(1.0, 1.0, 0.0)], 4.0, 1.0);
        assert!(!ps.is_empty());
        assert_eq!(ps.num_paths(), 1);
        assert!(is_close(ps.last_command()));
        assert_eq!(ps.polygons(), vec![vec![PointD::new(1.0, 1.0)]]);
    }

    #[test]
    fn test_ellipse_shape_uses_knot_bounds() {
        let path = fitted(&[(0.0, 0.0), (3.0, 1.0), (10.0, 4.0)], true);
        let ps = build(&path, 2.0, true, &StrokeConfig::default());
        let polys = ps.polygons();
        assert_eq!(polys.len(), 1);
        for p in &polys[0] {
            let u = (p.x - 5.0) / 5.0;
            let v = (p.y - 2.0) / 2.0;
            assert!((u * u + v * v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ellipse_shape_single_point_circle() {
        let path = fitted(&[(5.0, 5.0)], false);
        let ps = build(&path, 6.0, true, &StrokeConfig::default());
        let a = area(&ps);
        assert!(a > 0.9 * PI * 9.0 && a <= PI * 9.0);
    }

    #[test]
    fn test_reversal_ribbon_positive_area() {
        let path = fitted(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)], false);
        let ps = build(&path, 2.0, false, &StrokeConfig::default());
        assert_eq!(ps.num_paths(), 1);
        // Traced twice plus caps and the turn-around: at least the single pass.
        assert!(area(&ps) > 10.0 * 2.0);
    }

    #[test]
    fn test_build_matches_prebuilt_nodes() {
        let path = fitted(&[(0.0, 0.0), (30.0, 20.0), (60.0, 0.0)], true);
        let cfg = StrokeConfig::default();
        let nodes = path.flatten(cfg.approximation_scale());
        for ellipse in [false, true] {
            let a = build(&path, 5.0, ellipse, &cfg);
            let b = build_from_nodes(&path, &nodes, 5.0, ellipse, 1.0);
            assert_eq!(a.polygons(), b.polygons());
        }
    }

    #[test]
    fn test_scale_adds_vertices() {
        let path = fitted(&[(0.0, 0.0), (30.0, 20.0), (60.0, 0.0)], true);
        let mut cfg = StrokeConfig::default();
        let coarse = build(&path, 8.0, false, &cfg).total_vertices();
        cfg.set_approximation_scale(8.0);
        let fine = build(&path, 8.0, false, &cfg).total_vertices();
        assert!(fine > coarse);
    }
}

//! Rectangle clipping for stroke geometry and hit testing.
//!
//! - Cohen-Sutherland outcodes for point classification.
//! - Liang-Barsky parametric range of a segment inside a rectangle, used
//!   to measure how much of a centerline lies inside a selection box.
//! - Sutherland-Hodgman polygon clipping, used to clip outline sub-paths.

use crate::basics::{PointD, Rect};

// ============================================================================
// Clipping flags (Cohen-Sutherland outcodes)
// ============================================================================

pub const CLIPPING_FLAGS_X1_CLIPPED: u32 = 4;
pub const CLIPPING_FLAGS_X2_CLIPPED: u32 = 1;
pub const CLIPPING_FLAGS_Y1_CLIPPED: u32 = 8;
pub const CLIPPING_FLAGS_Y2_CLIPPED: u32 = 2;

/// Compute Cohen-Sutherland outcode for point (x, y) against clip_box.
///
/// ```text
///        |        |
///  0110  |  0010  | 0011
///        |        |
/// -------+--------+-------- clip_box.y2
///        |        |
///  0100  |  0000  | 0001
///        |        |
/// -------+--------+-------- clip_box.y1
///        |        |
///  1100  |  1000  | 1001
///        |        |
///  clip_box.x1  clip_box.x2
/// ```
#[inline]
pub fn clipping_flags<T: Copy + PartialOrd>(x: T, y: T, clip_box: &Rect<T>) -> u32 {
    clipping_flags_x(x, clip_box) | clipping_flags_y(y, clip_box)
}

/// Compute x-axis clipping flags only.
#[inline]
pub fn clipping_flags_x<T: Copy + PartialOrd>(x: T, clip_box: &Rect<T>) -> u32 {
    (x > clip_box.x2) as u32 | (((x < clip_box.x1) as u32) << 2)
}

/// Compute y-axis clipping flags only.
#[inline]
pub fn clipping_flags_y<T: Copy + PartialOrd>(y: T, clip_box: &Rect<T>) -> u32 {
    (((y > clip_box.y2) as u32) << 1) | (((y < clip_box.y1) as u32) << 3)
}

// ============================================================================
// Liang-Barsky parametric range
// ============================================================================

/// Parameter interval `[t0, t1]` of the segment (x1,y1)→(x2,y2) that lies
/// inside `clip_box` (boundary inclusive). `None` when no part is inside.
///
/// A zero-length segment yields `(0, 1)` when its point is inside.
pub fn clip_segment_range(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    clip_box: &Rect<f64>,
) -> Option<(f64, f64)> {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    // Each pair is (p, q) for one boundary: inside when p * t <= q.
    let edges = [
        (-dx, x1 - clip_box.x1),
        (dx, clip_box.x2 - x1),
        (-dy, y1 - clip_box.y1),
        (dy, clip_box.y2 - y1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }
    Some((t0, t1))
}

// ============================================================================
// Sutherland-Hodgman polygon clipping
// ============================================================================

#[derive(Clone, Copy)]
enum ClipEdge {
    Left,
    Right,
    Bottom,
    Top,
}

impl ClipEdge {
    fn inside(self, p: &PointD, clip_box: &Rect<f64>) -> bool {
        match self {
            ClipEdge::Left => clipping_flags_x(p.x, clip_box) & CLIPPING_FLAGS_X1_CLIPPED == 0,
            ClipEdge::Right => clipping_flags_x(p.x, clip_box) & CLIPPING_FLAGS_X2_CLIPPED == 0,
            ClipEdge::Bottom => clipping_flags_y(p.y, clip_box) & CLIPPING_FLAGS_Y1_CLIPPED == 0,
            ClipEdge::Top => clipping_flags_y(p.y, clip_box) & CLIPPING_FLAGS_Y2_CLIPPED == 0,
        }
    }

    fn intersect(self, a: &PointD, b: &PointD, clip_box: &Rect<f64>) -> PointD {
        match self {
            ClipEdge::Left | ClipEdge::Right => {
                let x = if matches!(self, ClipEdge::Left) {
                    clip_box.x1
                } else {
                    clip_box.x2
                };
                let t = (x - a.x) / (b.x - a.x);
                PointD::new(x, a.y + t * (b.y - a.y))
            }
            ClipEdge::Bottom | ClipEdge::Top => {
                let y = if matches!(self, ClipEdge::Bottom) {
                    clip_box.y1
                } else {
                    clip_box.y2
                };
                let t = (y - a.y) / (b.y - a.y);
                PointD::new(a.x + t * (b.x - a.x), y)
            }
        }
    }
}

/// Clip a closed polygon against `clip_box`.
///
/// Returns the clipped vertex list, empty when nothing of the polygon
/// survives. Polygons fully inside are returned unchanged.
pub fn clip_polygon(points: &[PointD], clip_box: &Rect<f64>) -> Vec<PointD> {
    if points.is_empty() {
        return Vec::new();
    }
    if points
        .iter()
        .all(|p| clipping_flags(p.x, p.y, clip_box) == 0)
    {
        return points.to_vec();
    }

    let mut output = points.to_vec();
    for edge in [ClipEdge::Left, ClipEdge::Right, ClipEdge::Bottom, ClipEdge::Top] {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let n = input.len();
        for i in 0..n {
            let cur = &input[i];
            let prev = &input[(i + n - 1) % n];
            let cur_in = edge.inside(cur, clip_box);
            let prev_in = edge.inside(prev, clip_box);
            if cur_in {
                if !prev_in {
                    output.push(edge.intersect(prev, cur, clip_box));
                }
                output.push(*cur);
            } else if prev_in {
                output.push(edge.intersect(prev, cur, clip_box));
            }
        }
    }
    if output.len() < 3 {
        output.clear();
    }
    output
}

// ============================================================================
// Tests
// ============================================================================

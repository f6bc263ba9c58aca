//! Stroke math: round caps, round joins and arc flattening with a radius
//! that varies from node to node.
//!
//! Normals point to the right of the direction of travel,
//! `n = (dy, -dx) / len`. Angles are measured counter-clockwise.

use crate::basics::{PointD, PI};
use crate::math::{calc_distance, VERTEX_DIST_EPSILON};
use crate::stylus_point::StylusPoint;

/// Turn angles smaller than this are treated as straight continuations.
pub const JOIN_ANGLE_EPSILON: f64 = 1e-9;

/// Unit right-hand normal of the segment `v0 -> v1`, `None` when the
/// endpoints coincide.
#[inline]
pub fn segment_normal(v0: &StylusPoint, v1: &StylusPoint) -> Option<(f64, f64)> {
    let len = calc_distance(v0.x, v0.y, v1.x, v1.y);
    if len <= VERTEX_DIST_EPSILON {
        return None;
    }
    Some(((v1.y - v0.y) / len, -(v1.x - v0.x) / len))
}

/// Signed turn from normal `n1` to normal `n2`, in `(-PI, PI]`.
/// Positive for a left (counter-clockwise) turn of the path.
#[inline]
pub fn turn_angle(n1: (f64, f64), n2: (f64, f64)) -> f64 {
    let cross = n1.0 * n2.1 - n1.1 * n2.0;
    let dot = n1.0 * n2.0 + n1.1 * n2.1;
    let a = cross.atan2(dot);
    if a <= -PI + JOIN_ANGLE_EPSILON {
        PI
    } else {
        a
    }
}

// ============================================================================
// MathStroke
// ============================================================================

/// Cap and join calculator for round-capped, round-joined ribbons.
///
/// Output vertices are pushed into `Vec<PointD>` consumers in the order
/// they are traversed along the side they belong to.
#[derive(Debug, Clone)]
pub struct MathStroke {
    approx_scale: f64,
}

impl MathStroke {
    pub fn new() -> Self {
        Self { approx_scale: 1.0 }
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.approx_scale = s;
    }
    pub fn approximation_scale(&self) -> f64 {
        self.approx_scale
    }

    /// Angular step keeping the chord deviation under `0.125 / scale`.
    pub fn arc_step(&self, r: f64) -> f64 {
        let r = r.abs();
        (r / (r + 0.125 / self.approx_scale)).acos() * 2.0
    }

    /// Append the arc around `(x, y)` of radius `r` starting at angle `a1`
    /// and sweeping `sweep` radians. Both end points are included. A zero
    /// radius collapses the arc to its center.
    pub fn calc_arc(&self, vc: &mut Vec<PointD>, x: f64, y: f64, r: f64, a1: f64, sweep: f64) {
        if r <= 0.0 {
            vc.push(PointD::new(x, y));
            return;
        }
        let da = self.arc_step(r);
        let n = if da > 0.0 {
            ((sweep.abs() / da).ceil() as usize).max(1)
        } else {
            1
        };
        let step = sweep / n as f64;
        for i in 0..n {
            let a = a1 + step * i as f64;
            vc.push(PointD::new(x + a.cos() * r, y + a.sin() * r));
        }
        let a2 = a1 + sweep;
        vc.push(PointD::new(x + a2.cos() * r, y + a2.sin() * r));
    }

    /// Round cap at `v` for a side whose normal is `n`: a half circle from
    /// `v + n * r` counter-clockwise to `v - n * r`.
    ///
    /// Clears `vc` first.
    pub fn calc_cap(&self, vc: &mut Vec<PointD>, v: &StylusPoint, n: (f64, f64), r: f64) {
        vc.clear();
        let a1 = n.1.atan2(n.0);
        self.calc_arc(vc, v.x, v.y, r, a1, PI);
    }

    /// Join at interior node `v` between the segment with normal `n1` and
    /// the following segment with normal `n2`.
    ///
    /// `right` receives the right-side vertices and `left` the left-side
    /// vertices, both in forward order. The outer side of the turn gets an
    /// arc around `v`; the inner side passes through `v` itself so that the
    /// ribbon covers the turn without gaps under the non-zero rule.
    ///
    /// Clears both outputs first.
    pub fn calc_join(
        &self,
        right: &mut Vec<PointD>,
        left: &mut Vec<PointD>,
        v: &StylusPoint,
        n1: (f64, f64),
        n2: (f64, f64),
        r: f64,
    ) {
        right.clear();
        left.clear();

        let (ax, ay) = (n1.0 * r, n1.1 * r);
        let (bx, by) = (n2.0 * r, n2.1 * r);
        let phi = turn_angle(n1, n2);
        let center = PointD::new(v.x, v.y);

        if phi > JOIN_ANGLE_EPSILON {
            // Left turn: the right side is outer.
            self.calc_arc(right, v.x, v.y, r, n1.1.atan2(n1.0), phi);
            left.push(PointD::new(v.x - ax, v.y - ay));
            left.push(center);
            left.push(PointD::new(v.x - bx, v.y - by));
        } else if phi < -JOIN_ANGLE_EPSILON {
            // Right turn: the left side is outer.
            right.push(PointD::new(v.x + ax, v.y + ay));
            right.push(center);
            right.push(PointD::new(v.x + bx, v.y + by));
            self.calc_arc(left, v.x, v.y, r, (-n1.1).atan2(-n1.0), phi);
        } else {
            right.push(PointD::new(v.x + ax, v.y + ay));
            right.push(PointD::new(v.x + bx, v.y + by));
            left.push(PointD::new(v.x - ax, v.y - ay));
            left.push(PointD::new(v.x - bx, v.y - by));
        }
    }
}

impl Default for MathStroke {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

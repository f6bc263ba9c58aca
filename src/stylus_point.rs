//! Stylus samples: a position plus pen pressure.
//!
//! Pressure is stored as `f32` in `[0, 1]`. `StylusSequence` collects
//! outline nodes and merges coincident neighbours so that every segment
//! between consecutive nodes has a usable direction.

use crate::basics::PointD;
use crate::math::{calc_distance, VERTEX_DIST_EPSILON};

/// Pressure assumed when the caller supplies none.
pub const DEFAULT_PRESSURE: f32 = 1.0;

/// Clamp a pressure into `[0, 1]`. NaN maps to zero.
#[inline]
pub fn clamp_pressure(p: f32) -> f32 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

// ============================================================================
// StylusPoint
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylusPoint {
    pub x: f64,
    pub y: f64,
    pub pressure: f32,
}

impl StylusPoint {
    /// Create a sample; the pressure is clamped into `[0, 1]`.
    pub fn new(x: f64, y: f64, pressure: f32) -> Self {
        Self {
            x,
            y,
            pressure: clamp_pressure(pressure),
        }
    }

    pub fn from_point(p: PointD, pressure: f32) -> Self {
        Self::new(p.x, p.y, pressure)
    }

    pub fn point(&self) -> PointD {
        PointD::new(self.x, self.y)
    }

    /// Distance to `other`, ignoring pressure.
    pub fn distance(&self, other: &StylusPoint) -> f64 {
        calc_distance(self.x, self.y, other.x, other.y)
    }

    /// Same position as `other` within `VERTEX_DIST_EPSILON`.
    pub fn coincides(&self, other: &StylusPoint) -> bool {
        self.distance(other) <= VERTEX_DIST_EPSILON
    }
}

// ============================================================================
// Pressure synthesis
// ============================================================================

/// Taper the tail of a synthesized pressure sequence.
///
/// When there are more than `taper_points` entries, entry
/// `len - taper_points + i` is scaled by `1 - (i / taper_points)²` for
/// `i = 1..taper_points`, so the pressure falls off towards the last point.
/// Shorter sequences are left unchanged.
pub fn apply_pressure_taper(pressures: &mut [f32], taper_points: usize) {
    let count = pressures.len();
    if taper_points == 0 || count <= taper_points {
        return;
    }
    let window = taper_points as f32;
    for i in 1..taper_points {
        let d = i as f32 / window;
        let m = count + i - taper_points;
        pressures[m] = clamp_pressure(pressures[m] * (1.0 - d * d));
    }
}

// ============================================================================
// StylusSequence
// ============================================================================

/// Ordered node list without consecutive coincident nodes.
///
/// A node added on top of the previous one is merged into it, keeping the
/// larger of the two pressures.
#[derive(Debug, Clone, Default)]
pub struct StylusSequence {
    nodes: Vec<StylusPoint>,
}

impl StylusSequence {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
        }
    }

    pub fn add(&mut self, p: StylusPoint) {
        if let Some(last) = self.nodes.last_mut() {
            if last.coincides(&p) {
                last.pressure = last.pressure.max(p.pressure);
                return;
            }
        }
        self.nodes.push(p);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn as_slice(&self) -> &[StylusPoint] {
        &self.nodes
    }

    pub fn into_vec(self) -> Vec<StylusPoint> {
        self.nodes
    }
}

// ============================================================================
// Tests
// ============================================================================

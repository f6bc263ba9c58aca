//! Cubic Bezier primitives for fitted stroke centerlines.
//!
//! - `catrom_to_bezier` turns one Catmull-Rom span into cubic control points.
//! - `Curve4Points::point_at` evaluates a cubic exactly at a parameter.
//! - `Curve4Inc` flattens a cubic with uniform parameter steps using forward
//!   differences, so the k-th emitted vertex sits at `t = k / num_steps`.
//!   The step count is clamped to `CURVE_MIN_STEPS..=CURVE_MAX_STEPS`.

use crate::basics::{
    uround, PointD, VertexSource, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
};

/// Minimum number of parametric steps used to flatten one cubic.
pub const CURVE_MIN_STEPS: u32 = 4;

/// Maximum number of parametric steps used to flatten one cubic. Bounds the
/// node count of a span regardless of its coordinate magnitude.
pub const CURVE_MAX_STEPS: u32 = 1024;

// ============================================================================
// Curve4Points
// ============================================================================

/// Eight control-point coordinates for a cubic Bezier curve:
/// `[x1, y1, x2, y2, x3, y3, x4, y4]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve4Points {
    pub cp: [f64; 8],
}

impl Curve4Points {
    #[allow(clippy::too_many_arguments)]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64, x4: f64, y4: f64) -> Self {
        Self {
            cp: [x1, y1, x2, y2, x3, y3, x4, y4],
        }
    }

    /// A cubic with all four control points at `(x, y)`.
    pub fn degenerate(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y, x, y, x, y)
    }

    pub fn start(&self) -> PointD {
        PointD::new(self.cp[0], self.cp[1])
    }

    pub fn end(&self) -> PointD {
        PointD::new(self.cp[6], self.cp[7])
    }

    /// Evaluate the curve at `t` in `[0, 1]` (Bernstein form).
    ///
    /// `t == 0` and `t == 1` reproduce the end points bit-exactly.
    pub fn point_at(&self, t: f64) -> PointD {
        if t <= 0.0 {
            return self.start();
        }
        if t >= 1.0 {
            return self.end();
        }
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * mt * mt * t;
        let b2 = 3.0 * mt * t * t;
        let b3 = t * t * t;
        let c = &self.cp;
        PointD::new(
            b0 * c[0] + b1 * c[2] + b2 * c[4] + b3 * c[6],
            b0 * c[1] + b1 * c[3] + b2 * c[5] + b3 * c[7],
        )
    }

    /// Length of the control polygon, an upper bound of the arc length.
    pub fn control_length(&self) -> f64 {
        let c = &self.cp;
        let seg = |i: usize| {
            let dx = c[i + 2] - c[i];
            let dy = c[i + 3] - c[i + 1];
            (dx * dx + dy * dy).sqrt()
        };
        seg(0) + seg(2) + seg(4)
    }
}

impl std::ops::Index<usize> for Curve4Points {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.cp[i]
    }
}

// ============================================================================
// Curve conversion
// ============================================================================

/// Convert the Catmull-Rom span between `(x2,y2)` and `(x3,y3)` to cubic
/// Bezier control points. `(x1,y1)` and `(x4,y4)` are the outer neighbours.
#[allow(clippy::too_many_arguments)]
pub fn catrom_to_bezier(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
    x4: f64,
    y4: f64,
) -> Curve4Points {
    Curve4Points::new(
        x2,
        y2,
        (-x1 + 6.0 * x2 + x3) / 6.0,
        (-y1 + 6.0 * y2 + y3) / 6.0,
        (x2 + 6.0 * x3 - x4) / 6.0,
        (y2 + 6.0 * y3 - y4) / 6.0,
        x3,
        y3,
    )
}

// ============================================================================
// Curve4Inc: uniform-parameter cubic flattener
// ============================================================================

/// Incremental cubic Bezier flattener using forward differences.
///
/// Emits `num_steps + 1` vertices: a `move_to` at the start point, then
/// `line_to` vertices at equal parameter increments, the last one being the
/// exact end point.
pub struct Curve4Inc {
    num_steps: i32,
    step: i32,
    scale: f64,
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
    fx: f64,
    fy: f64,
    dfx: f64,
    dfy: f64,
    ddfx: f64,
    ddfy: f64,
    dddfx: f64,
    dddfy: f64,
    saved_fx: f64,
    saved_fy: f64,
    saved_dfx: f64,
    saved_dfy: f64,
    saved_ddfx: f64,
    saved_ddfy: f64,
}

impl Curve4Inc {
    pub fn new() -> Self {
        Self {
            num_steps: 0,
            step: -1,
            scale: 1.0,
            start_x: 0.0,
            start_y: 0.0,
            end_x: 0.0,
            end_y: 0.0,
            fx: 0.0,
            fy: 0.0,
            dfx: 0.0,
            dfy: 0.0,
            ddfx: 0.0,
            ddfy: 0.0,
            dddfx: 0.0,
            dddfy: 0.0,
            saved_fx: 0.0,
            saved_fy: 0.0,
            saved_dfx: 0.0,
            saved_dfy: 0.0,
            saved_ddfx: 0.0,
            saved_ddfy: 0.0,
        }
    }

    /// Create a flattener with the given approximation scale and curve.
    pub fn with_scale(cp: &Curve4Points, scale: f64) -> Self {
        let mut c = Self::new();
        c.set_approximation_scale(scale);
        c.init(cp);
        c
    }

    pub fn init(&mut self, cp: &Curve4Points) {
        let (x1, y1, x2, y2, x3, y3, x4, y4) =
            (cp[0], cp[1], cp[2], cp[3], cp[4], cp[5], cp[6], cp[7]);
        self.start_x = x1;
        self.start_y = y1;
        self.end_x = x4;
        self.end_y = y4;

        // NaN lengths fall through `min` to the cap.
        let len = (cp.control_length() * 0.25 * self.scale).min(CURVE_MAX_STEPS as f64);
        self.num_steps = uround(len).clamp(CURVE_MIN_STEPS, CURVE_MAX_STEPS) as i32;

        let subdivide_step = 1.0 / self.num_steps as f64;
        let subdivide_step2 = subdivide_step * subdivide_step;
        let subdivide_step3 = subdivide_step * subdivide_step * subdivide_step;

        let pre1 = 3.0 * subdivide_step;
        let pre2 = 3.0 * subdivide_step2;
        let pre4 = 6.0 * subdivide_step2;
        let pre5 = 6.0 * subdivide_step3;

        let tmp1x = x1 - x2 * 2.0 + x3;
        let tmp1y = y1 - y2 * 2.0 + y3;

        let tmp2x = (x2 - x3) * 3.0 - x1 + x4;
        let tmp2y = (y2 - y3) * 3.0 - y1 + y4;

        self.saved_fx = x1;
        self.fx = x1;
        self.saved_fy = y1;
        self.fy = y1;

        self.saved_dfx = (x2 - x1) * pre1 + tmp1x * pre2 + tmp2x * subdivide_step3;
        self.dfx = self.saved_dfx;
        self.saved_dfy = (y2 - y1) * pre1 + tmp1y * pre2 + tmp2y * subdivide_step3;
        self.dfy = self.saved_dfy;

        self.saved_ddfx = tmp1x * pre4 + tmp2x * pre5;
        self.ddfx = self.saved_ddfx;
        self.saved_ddfy = tmp1y * pre4 + tmp2y * pre5;
        self.ddfy = self.saved_ddfy;

        self.dddfx = tmp2x * pre5;
        self.dddfy = tmp2y * pre5;

        self.step = self.num_steps;
    }

    /// Number of parameter steps; the curve yields `num_steps + 1` vertices.
    pub fn num_steps(&self) -> u32 {
        self.num_steps.max(0) as u32
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.scale = s;
    }

    pub fn approximation_scale(&self) -> f64 {
        self.scale
    }
}

impl Default for Curve4Inc {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexSource for Curve4Inc {
    fn rewind(&mut self, _path_id: u32) {
        if self.num_steps == 0 {
            self.step = -1;
            return;
        }
        self.step = self.num_steps;
        self.fx = self.saved_fx;
        self.fy = self.saved_fy;
        self.dfx = self.saved_dfx;
        self.dfy = self.saved_dfy;
        self.ddfx = self.saved_ddfx;
        self.ddfy = self.saved_ddfy;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step < 0 {
            return PATH_CMD_STOP;
        }
        if self.step == self.num_steps {
            *x = self.start_x;
            *y = self.start_y;
            self.step -= 1;
            return PATH_CMD_MOVE_TO;
        }
        if self.step == 0 {
            *x = self.end_x;
            *y = self.end_y;
            self.step -= 1;
            return PATH_CMD_LINE_TO;
        }

        self.fx += self.dfx;
        self.fy += self.dfy;
        self.dfx += self.ddfx;
        self.dfy += self.ddfy;
        self.ddfx += self.dddfx;
        self.ddfy += self.dddfy;

        *x = self.fx;
        *y = self.fy;
        self.step -= 1;
        PATH_CMD_LINE_TO
    }
}

// ============================================================================
// Tests
// ============================================================================

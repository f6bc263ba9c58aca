//! Ellipse vertex generator.
//!
//! Used for single-node strokes (a dot of the stroke width) and for the
//! ellipse-shaped stroke mode, where the ellipse is inscribed in the
//! bounding box of the definition points.

use crate::basics::{
    uround, RectD, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO,
    PATH_CMD_STOP, PATH_FLAGS_CCW, PATH_FLAGS_CLOSE, PI,
};

/// Lower bound on the automatic step count.
pub const ELLIPSE_MIN_STEPS: u32 = 8;

/// Ellipse vertex generator.
///
/// Generates a closed polygon approximating an ellipse. The number of
/// steps is either given explicitly or derived from the radii and the
/// approximation scale, never fewer than [`ELLIPSE_MIN_STEPS`] when derived.
#[derive(Debug, Clone)]
pub struct Ellipse {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    scale: f64,
    num: u32,
    step: u32,
    cw: bool,
}

impl Ellipse {
    /// Create a new ellipse. `num_steps == 0` selects the automatic count.
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, num_steps: u32, cw: bool) -> Self {
        let mut e = Self {
            x,
            y,
            rx,
            ry,
            scale: 1.0,
            num: num_steps,
            step: 0,
            cw,
        };
        if e.num == 0 {
            e.calc_num_steps();
        }
        e
    }

    /// Ellipse inscribed in `bounds`. A side of zero extent falls back to
    /// `min_radius` so a straight or single-point stroke still has area.
    pub fn from_bounds(bounds: &RectD, min_radius: f64, scale: f64) -> Self {
        let cx = (bounds.x1 + bounds.x2) * 0.5;
        let cy = (bounds.y1 + bounds.y2) * 0.5;
        let mut rx = bounds.width().abs() * 0.5;
        let mut ry = bounds.height().abs() * 0.5;
        if rx <= 0.0 {
            rx = min_radius;
        }
        if ry <= 0.0 {
            ry = min_radius;
        }
        let mut e = Self::new(cx, cy, rx, ry, 0, false);
        e.set_approximation_scale(scale);
        e
    }

    /// Re-initialize with new parameters.
    pub fn init(&mut self, x: f64, y: f64, rx: f64, ry: f64, num_steps: u32, cw: bool) {
        self.x = x;
        self.y = y;
        self.rx = rx;
        self.ry = ry;
        self.num = num_steps;
        self.step = 0;
        self.cw = cw;
        if self.num == 0 {
            self.calc_num_steps();
        }
    }

    /// Set approximation scale (affects automatic step count).
    pub fn set_approximation_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.calc_num_steps();
    }

    pub fn num_steps(&self) -> u32 {
        self.num
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn radii(&self) -> (f64, f64) {
        (self.rx, self.ry)
    }

    fn calc_num_steps(&mut self) {
        let ra = (self.rx.abs() + self.ry.abs()) / 2.0;
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        let da = (ra / (ra + 0.125 / scale)).acos() * 2.0;
        self.num = if da > 0.0 {
            uround(2.0 * PI / da).max(ELLIPSE_MIN_STEPS)
        } else {
            ELLIPSE_MIN_STEPS
        };
    }
}

impl VertexSource for Ellipse {
    fn rewind(&mut self, _path_id: u32) {
        self.step = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step == self.num {
            self.step += 1;
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE | PATH_FLAGS_CCW;
        }
        if self.step > self.num {
            return PATH_CMD_STOP;
        }
        let mut angle = self.step as f64 / self.num as f64 * 2.0 * PI;
        if self.cw {
            angle = 2.0 * PI - angle;
        }
        *x = self.x + angle.cos() * self.rx;
        *y = self.y + angle.sin() * self.ry;
        self.step += 1;
        if self.step == 1 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{is_end_poly, is_stop};

    #[test]
    fn test_ellipse_basic() {
        let mut e = Ellipse::new(0.0, 0.0, 10.0, 10.0, 8, false);
        e.rewind(0);
        let mut x = 0.0;
        let mut y = 0.0;

        let cmd = e.vertex(&mut x, &mut y);
        assert_eq!(cmd, PATH_CMD_MOVE_TO);
        assert!((x - 10.0).abs() < 1e-6);
        assert!(y.abs() < 1e-6);

        for _ in 1..8 {
            let cmd = e.vertex(&mut x, &mut y);
            assert_eq!(cmd, PATH_CMD_LINE_TO);
        }

        let cmd = e.vertex(&mut x, &mut y);
        assert!(is_end_poly(cmd));
        let cmd = e.vertex(&mut x, &mut y);
        assert!(is_stop(cmd));
    }

    #[test]
    fn test_ellipse_cw() {
        let mut e = Ellipse::new(0.0, 0.0, 10.0, 10.0, 4, true);
        e.rewind(0);
        let mut x = 0.0;
        let mut y = 0.0;
        e.vertex(&mut x, &mut y);
        e.vertex(&mut x, &mut y);
        assert!(x.abs() < 1e-6);
        assert!((y + 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_ellipse_auto_steps() {
        let e = Ellipse::new(0.0, 0.0, 100.0, 100.0, 0, false);
        assert!(e.num_steps() > 20);
    }

    #[test]
    fn test_tiny_radius_keeps_min_steps() {
        let e = Ellipse::new(0.0, 0.0, 0.01, 0.01, 0, false);
        assert_eq!(e.num_steps(), ELLIPSE_MIN_STEPS);
        let z = Ellipse::new(0.0, 0.0, 0.0, 0.0, 0, false);
        assert_eq!(z.num_steps(), ELLIPSE_MIN_STEPS);
    }

    #[test]
    fn test_from_bounds_inscribed() {
        let r = RectD::new(10.0, 20.0, 50.0, 40.0);
        let e = Ellipse::from_bounds(&r, 1.0, 1.0);
        assert_eq!(e.center(), (30.0, 30.0));
        assert_eq!(e.radii(), (20.0, 10.0));
    }

    #[test]
    fn test_from_bounds_flat_side_uses_min_radius() {
        let r = RectD::new(0.0, 5.0, 40.0, 5.0);
        let e = Ellipse::from_bounds(&r, 2.5, 1.0);
        assert_eq!(e.radii(), (20.0, 2.5));
    }

    #[test]
    fn test_scale_refines() {
        let mut e = Ellipse::new(0.0, 0.0, 50.0, 50.0, 0, false);
        let coarse = e.num_steps();
        e.set_approximation_scale(4.0);
        assert!(e.num_steps() > coarse);
    }
}

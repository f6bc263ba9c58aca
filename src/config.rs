//! Tunable parameters shared by fitting, outline building and hit testing.

use crate::stylus_point::DEFAULT_PRESSURE;

/// Default number of trailing points shaped by the synthetic pressure taper.
pub const DEFAULT_TAPER_POINTS: usize = 16;

/// Default inclusive distance from the outline that still counts as a hit.
pub const DEFAULT_BOUNDARY_EPSILON: f64 = 1e-9;

/// Stroke engine configuration.
///
/// Values are read when a stroke builds its geometry, so a stroke keeps the
/// configuration it was created with (clones included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeConfig {
    approximation_scale: f64,
    taper_points: usize,
    default_pressure: f32,
    boundary_epsilon: f64,
}

impl StrokeConfig {
    pub fn new() -> Self {
        Self {
            approximation_scale: 1.0,
            taper_points: DEFAULT_TAPER_POINTS,
            default_pressure: DEFAULT_PRESSURE,
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
        }
    }

    /// Flattening precision for arcs and curves. Non-positive or non-finite
    /// values are ignored.
    pub fn set_approximation_scale(&mut self, s: f64) -> &mut Self {
        if s.is_finite() && s > 0.0 {
            self.approximation_scale = s;
        }
        self
    }

    pub fn approximation_scale(&self) -> f64 {
        self.approximation_scale
    }

    /// Size of the pressure taper window. Zero disables the taper.
    pub fn set_taper_points(&mut self, n: usize) -> &mut Self {
        self.taper_points = n;
        self
    }

    pub fn taper_points(&self) -> usize {
        self.taper_points
    }

    /// Pressure used when none is supplied, clamped to `[0, 1]`.
    pub fn set_default_pressure(&mut self, p: f32) -> &mut Self {
        self.default_pressure = if p.is_nan() { DEFAULT_PRESSURE } else { p.clamp(0.0, 1.0) };
        self
    }

    pub fn default_pressure(&self) -> f32 {
        self.default_pressure
    }

    pub fn set_boundary_epsilon(&mut self, e: f64) -> &mut Self {
        if e.is_finite() && e >= 0.0 {
            self.boundary_epsilon = e;
        }
        self
    }

    pub fn boundary_epsilon(&self) -> f64 {
        self.boundary_epsilon
    }
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = StrokeConfig::default();
        assert_eq!(c.approximation_scale(), 1.0);
        assert_eq!(c.taper_points(), 16);
        assert_eq!(c.default_pressure(), 1.0);
        assert_eq!(c.boundary_epsilon(), 1e-9);
    }

    #[test]
    fn test_setters_chain_and_validate() {
        let mut c = StrokeConfig::new();
        c.set_approximation_scale(4.0)
            .set_taper_points(8)
            .set_default_pressure(1.5)
            .set_boundary_epsilon(0.5);
        assert_eq!(c.approximation_scale(), 4.0);
        assert_eq!(c.taper_points(), 8);
        assert_eq!(c.default_pressure(), 1.0);
        assert_eq!(c.boundary_epsilon(), 0.5);

        c.set_approximation_scale(0.0).set_boundary_epsilon(f64::NAN);
        assert_eq!(c.approximation_scale(), 4.0);
        assert_eq!(c.boundary_epsilon(), 0.5);

        c.set_default_pressure(-2.0);
        assert_eq!(c.default_pressure(), 0.0);
    }
}

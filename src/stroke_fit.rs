//! Curve fitting of raw stylus samples.
//!
//! A fitted path is either the raw polyline through the samples or a
//! uniform Catmull-Rom spline through every sample, stored as one cubic
//! Bezier per span. Endpoint tangents are one-sided: the missing outer
//! neighbour is the reflection of the second point across the endpoint.
//!
//! Pressure is carried per knot and interpolated linearly within a span.

use crate::basics::{is_stop, PointD, VertexSource, PATH_FLAGS_NONE};
use crate::config::StrokeConfig;
use crate::curves::{catrom_to_bezier, Curve4Inc, Curve4Points};
use crate::error::{Result, StrokeError};
use crate::path_storage::PathStorage;
use crate::stylus_point::{apply_pressure_taper, clamp_pressure, StylusPoint, StylusSequence};

/// Pressure per point as used by the geometry.
///
/// Explicit pressures are clamped and used as-is (the taper flag is
/// ignored). Otherwise every point gets the configured default pressure,
/// tapered towards the end when `add_pressure` is set.
pub fn effective_pressures(
    count: usize,
    pressures: Option<&[f32]>,
    add_pressure: bool,
    config: &StrokeConfig,
) -> Vec<f32> {
    match pressures {
        Some(p) => p.iter().map(|&v| clamp_pressure(v)).collect(),
        None => {
            let mut p = vec![config.default_pressure(); count];
            if add_pressure {
                apply_pressure_taper(&mut p, config.taper_points());
            }
            p
        }
    }
}

/// Fit a path through `points`.
///
/// Fails on an empty point list or when `pressures` is not parallel to
/// `points`. Coordinates are not checked here.
pub fn fit(
    points: &[PointD],
    pressures: Option<&[f32]>,
    fit_to_curve: bool,
    add_pressure: bool,
    config: &StrokeConfig,
) -> Result<FittedPath> {
    if points.is_empty() {
        return Err(StrokeError::EmptyPoints);
    }
    if let Some(p) = pressures {
        if p.len() != points.len() {
            return Err(StrokeError::PressureMismatch {
                points: points.len(),
                pressures: p.len(),
            });
        }
    }
    let effective = effective_pressures(points.len(), pressures, add_pressure, config);
    let knots: Vec<StylusPoint> = points
        .iter()
        .zip(&effective)
        .map(|(pt, &pr)| StylusPoint::from_point(*pt, pr))
        .collect();
    Ok(FittedPath::from_knots(knots, fit_to_curve))
}

// ============================================================================
// FittedPath
// ============================================================================

/// Smoothed or raw centerline through the stroke samples.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPath {
    knots: Vec<StylusPoint>,
    spans: Vec<Curve4Points>,
    curved: bool,
}

impl FittedPath {
    /// Build from knots that already carry their effective pressures.
    pub fn from_knots(knots: Vec<StylusPoint>, fit_to_curve: bool) -> Self {
        let spans = if fit_to_curve {
            catmull_rom_spans(&knots)
        } else {
            Vec::new()
        };
        Self {
            knots,
            spans,
            curved: fit_to_curve,
        }
    }

    /// Number of knots (the input points).
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn knots(&self) -> &[StylusPoint] {
        &self.knots
    }

    /// Cubic spans of a fitted curve; empty for a polyline.
    pub fn spans(&self) -> &[Curve4Points] {
        &self.spans
    }

    pub fn is_curve(&self) -> bool {
        self.curved
    }

    /// Evaluate at `param` in `[0, len - 1]`; values outside are clamped.
    /// Integer parameters return the knots exactly.
    pub fn point_at(&self, param: f64) -> StylusPoint {
        let n = self.knots.len();
        if n == 0 {
            return StylusPoint::new(0.0, 0.0, 0.0);
        }
        if n == 1 || param.is_nan() || param <= 0.0 {
            return self.knots[0];
        }
        let last = (n - 1) as f64;
        if param >= last {
            return self.knots[n - 1];
        }
        let i = (param.floor() as usize).min(n - 2);
        let t = param - i as f64;
        if t <= 0.0 {
            return self.knots[i];
        }
        let a = &self.knots[i];
        let b = &self.knots[i + 1];
        let pressure = a.pressure + (b.pressure - a.pressure) * t as f32;
        let pos = if self.curved {
            self.spans[i].point_at(t)
        } else {
            PointD::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
        };
        StylusPoint::new(pos.x, pos.y, pressure)
    }

    /// Ordered outline nodes with consecutive duplicates merged.
    ///
    /// Curved spans are sampled with uniform parameter steps; the step
    /// count grows with the span's control polygon and `scale`, up to
    /// `CURVE_MAX_STEPS` per span.
    pub fn flatten(&self, scale: f64) -> Vec<StylusPoint> {
        let mut seq = StylusSequence::with_capacity(self.knots.len());
        if !self.curved || self.knots.len() < 2 {
            for k in &self.knots {
                seq.add(*k);
            }
            return seq.into_vec();
        }

        for (i, span) in self.spans.iter().enumerate() {
            let p0 = self.knots[i].pressure;
            let p1 = self.knots[i + 1].pressure;
            let mut inc = Curve4Inc::with_scale(span, scale);
            let steps = inc.num_steps().max(1) as f32;
            let mut x = 0.0;
            let mut y = 0.0;
            let mut k = 0u32;
            inc.rewind(0);
            loop {
                let cmd = inc.vertex(&mut x, &mut y);
                if is_stop(cmd) {
                    break;
                }
                let t = k as f32 / steps;
                seq.add(StylusPoint::new(x, y, p0 + (p1 - p0) * t));
                k += 1;
            }
        }
        seq.into_vec()
    }

    /// Export the centerline: `move_to` followed by `line_to` or cubic
    /// commands. The path is left open.
    pub fn to_path(&self) -> PathStorage {
        let mut ps = PathStorage::new();
        let Some(first) = self.knots.first() else {
            return ps;
        };
        ps.move_to(first.x, first.y);
        if self.curved {
            for s in &self.spans {
                ps.curve4(s[2], s[3], s[4], s[5], s[6], s[7]);
            }
        } else {
            for k in &self.knots[1..] {
                ps.line_to(k.x, k.y);
            }
        }
        ps.end_poly(PATH_FLAGS_NONE);
        ps
    }

    /// Apply `trans` to every knot and re-derive the spans.
    pub(crate) fn transform_knots<F: Fn(f64, f64) -> (f64, f64)>(&mut self, trans: F) {
        for k in &mut self.knots {
            let (x, y) = trans(k.x, k.y);
            k.x = x;
            k.y = y;
        }
        if self.curved {
            self.spans = catmull_rom_spans(&self.knots);
        }
    }
}

/// One cubic per pair of consecutive knots.
fn catmull_rom_spans(knots: &[StylusPoint]) -> Vec<Curve4Points> {
    let n = knots.len();
    if n < 2 {
        return Vec::new();
    }
    let mut spans = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let p1 = knots[i].point();
        let p2 = knots[i + 1].point();
        if knots[i].coincides(&knots[i + 1]) {
            spans.push(Curve4Points::degenerate(p1.x, p1.y));
            continue;
        }
        let p0 = if i == 0 {
            PointD::new(2.0 * p1.x - p2.x, 2.0 * p1.y - p2.y)
        } else {
            knots[i - 1].point()
        };
        let p3 = if i + 2 < n {
            knots[i + 2].point()
        } else {
            PointD::new(2.0 * p2.x - p1.x, 2.0 * p2.y - p1.y)
        };
        spans.push(catrom_to_bezier(
            p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, p3.x, p3.y,
        ));
    }
    spans
}

// ============================================================================
// Tests
// ============================================================================

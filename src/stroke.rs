//! Strokes and stroke handles.
//!
//! A [`Stroke`] owns its definition (points, optional pressures, width and
//! style flags) together with the geometry derived from it: the fitted
//! centerline, the filled outline, the flattened centerline nodes and the
//! outline bounds. The derived geometry is rebuilt eagerly whenever the
//! points are transformed, so every query reads a consistent cache.
//!
//! A [`StrokeHandle`] owns at most one stroke and adds an explicit,
//! idempotent `dispose`. Operations on a disposed handle log a warning and
//! return a neutral value.

use tracing::{debug, trace, warn};

use crate::basics::{PointD, RectD};
use crate::bounding_rect::bounding_rect_single;
use crate::clip_liang_barsky::clip_polygon;
use crate::config::StrokeConfig;
use crate::error::{Result, StrokeError};
use crate::hit_test;
use crate::path_storage::PathStorage;
use crate::stroke_fit::{effective_pressures, FittedPath};
use crate::stroke_outline;
use crate::stylus_point::StylusPoint;
use crate::trans_affine::{TransAffine, AFFINE_EPSILON};

// ============================================================================
// StyleFlags
// ============================================================================

/// Rendering style of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleFlags {
    /// Smooth the samples with a spline instead of joining them with lines.
    pub fit_to_curve: bool,
    /// Draw the ellipse inscribed in the points' bounding box.
    pub ellipse_shape: bool,
    /// Synthesize a pressure taper when no pressures are supplied.
    pub add_pressure: bool,
}

impl StyleFlags {
    pub const fn new(fit_to_curve: bool, ellipse_shape: bool, add_pressure: bool) -> Self {
        Self {
            fit_to_curve,
            ellipse_shape,
            add_pressure,
        }
    }

    pub const fn with_fit_to_curve(mut self, v: bool) -> Self {
        self.fit_to_curve = v;
        self
    }

    pub const fn with_ellipse_shape(mut self, v: bool) -> Self {
        self.ellipse_shape = v;
        self
    }

    pub const fn with_add_pressure(mut self, v: bool) -> Self {
        self.add_pressure = v;
        self
    }
}

// ============================================================================
// StrokeDefinition
// ============================================================================

/// Validated input of a stroke.
///
/// Only the point coordinates change after construction, and only through
/// [`Stroke::transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    points: Vec<PointD>,
    pressures: Option<Vec<f32>>,
    width: f64,
    flags: StyleFlags,
}

impl StrokeDefinition {
    pub fn new(
        points: &[PointD],
        pressures: Option<&[f32]>,
        width: f64,
        flags: StyleFlags,
    ) -> Result<Self> {
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
        if !(width > 0.0) || !width.is_finite() {
            return Err(StrokeError::InvalidWidth(width));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(StrokeError::NonFinitePoint { index });
        }
        Ok(Self {
            points: points.to_vec(),
            pressures: pressures.map(<[f32]>::to_vec),
            width,
            flags,
        })
    }

    pub fn points(&self) -> &[PointD] {
        &self.points
    }

    /// Pressures as supplied by the caller, if any.
    pub fn pressures(&self) -> Option<&[f32]> {
        self.pressures.as_deref()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    /// Pressure per point as used by the geometry.
    pub fn effective_pressures(&self, config: &StrokeConfig) -> Vec<f32> {
        effective_pressures(
            self.points.len(),
            self.pressures.as_deref(),
            self.flags.add_pressure,
            config,
        )
    }

    fn knots(&self, config: &StrokeConfig) -> Vec<StylusPoint> {
        self.points
            .iter()
            .zip(self.effective_pressures(config))
            .map(|(p, pr)| StylusPoint::from_point(*p, pr))
            .collect()
    }

    fn transform_points(&mut self, matrix: &TransAffine) {
        for p in &mut self.points {
            matrix.transform(&mut p.x, &mut p.y);
        }
    }
}

// ============================================================================
// InkStroke
// ============================================================================

/// Operations shared by strokes and stroke handles.
pub trait InkStroke {
    /// Apply `matrix` to every point and rebuild the geometry.
    fn transform(&mut self, matrix: &TransAffine);

    /// Whether `(x, y)` lies inside the filled outline.
    fn hit_test(&self, x: f64, y: f64) -> bool;

    /// The filled outline, optionally clipped to `bounds`.
    fn geometry(&self, bounds: Option<&RectD>) -> PathStorage;

    /// Bounding box of the filled outline.
    fn bounds(&self) -> Option<RectD>;
}

// ============================================================================
// Stroke
// ============================================================================

/// A stroke with its cached geometry. `Clone` is a deep copy.
#[derive(Debug, Clone)]
pub struct Stroke {
    definition: StrokeDefinition,
    config: StrokeConfig,
    fitted: FittedPath,
    nodes: Vec<StylusPoint>,
    outline: PathStorage,
    polygons: Vec<Vec<PointD>>,
    bounds: Option<RectD>,
}

impl Stroke {
    /// Create a stroke with the default configuration.
    pub fn new(
        points: &[PointD],
        pressures: Option<&[f32]>,
        width: f64,
        flags: StyleFlags,
    ) -> Result<Self> {
        Self::with_config(points, pressures, width, flags, StrokeConfig::default())
    }

    pub fn with_config(
        points: &[PointD],
        pressures: Option<&[f32]>,
        width: f64,
        flags: StyleFlags,
        config: StrokeConfig,
    ) -> Result<Self> {
        let definition = match StrokeDefinition::new(points, pressures, width, flags) {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "rejected stroke definition");
                return Err(e);
            }
        };
        Ok(Self::from_definition(definition, config))
    }

    /// Build the geometry of an already validated definition.
    pub fn from_definition(definition: StrokeDefinition, config: StrokeConfig) -> Self {
        let fitted =
            FittedPath::from_knots(definition.knots(&config), definition.flags.fit_to_curve);
        let mut stroke = Self {
            definition,
            config,
            fitted,
            nodes: Vec::new(),
            outline: PathStorage::new(),
            polygons: Vec::new(),
            bounds: None,
        };
        stroke.rebuild();
        debug!(
            points = stroke.definition.points.len(),
            width = stroke.definition.width,
            fit_to_curve = stroke.definition.flags.fit_to_curve,
            ellipse_shape = stroke.definition.flags.ellipse_shape,
            "stroke created"
        );
        stroke
    }

    fn rebuild(&mut self) {
        let scale = self.config.approximation_scale();
        self.nodes = self.fitted.flatten(scale);
        self.outline = stroke_outline::build_from_nodes(
            &self.fitted,
            &self.nodes,
            self.definition.width,
            self.definition.flags.ellipse_shape,
            scale,
        );
        self.polygons = self.outline.polygons();
        self.bounds = bounding_rect_single(&mut self.outline, 0);
        trace!(
            nodes = self.nodes.len(),
            vertices = self.outline.total_vertices(),
            "stroke outline rebuilt"
        );
    }

    pub fn definition(&self) -> &StrokeDefinition {
        &self.definition
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    pub fn fitted_path(&self) -> &FittedPath {
        &self.fitted
    }

    /// Flattened centerline nodes used for selection tests.
    pub fn nodes(&self) -> &[StylusPoint] {
        &self.nodes
    }

    /// The cached filled outline.
    pub fn outline(&self) -> &PathStorage {
        &self.outline
    }

    /// The fitted centerline as a path (open, not filled).
    pub fn centerline(&self) -> PathStorage {
        self.fitted.to_path()
    }

    pub fn bounds(&self) -> Option<RectD> {
        self.bounds
    }

    /// Apply `matrix` to every point, then rebuild the geometry.
    ///
    /// Pressures and width are not scaled. A matrix with non-finite
    /// components is ignored.
    pub fn transform(&mut self, matrix: &TransAffine) {
        if !matrix.is_finite() {
            warn!(m = ?matrix.as_array(), "ignoring non-finite transform");
            return;
        }
        if matrix.is_degenerate(AFFINE_EPSILON) {
            debug!(m = ?matrix.as_array(), "degenerate transform collapses stroke");
        }
        self.definition.transform_points(matrix);
        self.fitted.transform_knots(|x, y| matrix.apply(x, y));
        self.rebuild();
    }

    /// Non-zero fill test with an inclusive boundary.
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        hit_test::hit_test_outline(&self.polygons, x, y, self.config.boundary_epsilon())
    }

    /// Hit test with a round tip of `diameter` around the query point.
    pub fn hit_test_diameter(&self, x: f64, y: f64, diameter: f64) -> bool {
        hit_test::hit_test_diameter(
            &self.polygons,
            x,
            y,
            diameter,
            self.config.boundary_epsilon(),
        )
    }

    /// At least `percentage`% of the centerline length lies inside `rect`.
    pub fn hit_test_rect(&self, rect: &RectD, percentage: f64) -> bool {
        hit_test::meets_percentage(hit_test::fraction_in_rect(&self.nodes, rect), percentage)
    }

    /// At least `percentage`% of the centerline nodes lie inside `lasso`.
    pub fn hit_test_lasso(&self, lasso: &[PointD], percentage: f64) -> bool {
        hit_test::meets_percentage(hit_test::fraction_in_lasso(&self.nodes, lasso), percentage)
    }

    /// The outline, optionally clipped to `bounds`. Sub-paths that fall
    /// entirely outside are dropped.
    ///
    /// `bounds` is a clip region, not an output. Bindings that report the
    /// stroke extent alongside its geometry should read [`Stroke::bounds`].
    pub fn geometry(&self, bounds: Option<&RectD>) -> PathStorage {
        let Some(b) = bounds else {
            return self.outline.clone();
        };
        let mut clip = *b;
        clip.normalize();
        let mut ps = PathStorage::new();
        for poly in &self.polygons {
            let clipped = clip_polygon(poly, &clip);
            ps.add_polygon(&clipped);
        }
        ps
    }
}

impl InkStroke for Stroke {
    fn transform(&mut self, matrix: &TransAffine) {
        Stroke::transform(self, matrix);
    }

    fn hit_test(&self, x: f64, y: f64) -> bool {
        Stroke::hit_test(self, x, y)
    }

    fn geometry(&self, bounds: Option<&RectD>) -> PathStorage {
        Stroke::geometry(self, bounds)
    }

    fn bounds(&self) -> Option<RectD> {
        Stroke::bounds(self)
    }
}

// ============================================================================
// StrokeHandle
// ============================================================================

/// Owning handle with an explicit lifecycle.
///
/// Dropping the handle releases the stroke; `dispose` does the same
/// earlier and may be called any number of times.
#[derive(Debug, Default)]
pub struct StrokeHandle {
    stroke: Option<Box<Stroke>>,
}

impl StrokeHandle {
    pub fn new(
        points: &[PointD],
        pressures: Option<&[f32]>,
        width: f64,
        flags: StyleFlags,
    ) -> Result<Self> {
        Stroke::new(points, pressures, width, flags).map(Self::from_stroke)
    }

    pub fn with_config(
        points: &[PointD],
        pressures: Option<&[f32]>,
        width: f64,
        flags: StyleFlags,
        config: StrokeConfig,
    ) -> Result<Self> {
        Stroke::with_config(points, pressures, width, flags, config).map(Self::from_stroke)
    }

    pub fn from_stroke(stroke: Stroke) -> Self {
        Self {
            stroke: Some(Box::new(stroke)),
        }
    }

    /// Independent deep copy. Cloning a disposed handle yields a disposed
    /// handle.
    pub fn clone_handle(&self) -> Self {
        match self.live("clone_handle") {
            Some(s) => Self::from_stroke(s.clone()),
            None => Self::default(),
        }
    }

    pub fn stroke(&self) -> Option<&Stroke> {
        self.stroke.as_deref()
    }

    pub fn is_disposed(&self) -> bool {
        self.stroke.is_none()
    }

    /// Release the stroke. Calling it again has no effect.
    pub fn dispose(&mut self) {
        if self.stroke.take().is_some() {
            debug!("stroke handle disposed");
        }
    }

    pub fn transform(&mut self, matrix: &TransAffine) {
        match self.stroke.as_deref_mut() {
            Some(s) => s.transform(matrix),
            None => warn!(op = "transform", "operation on disposed stroke handle"),
        }
    }

    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        self.live("hit_test").is_some_and(|s| s.hit_test(x, y))
    }

    pub fn hit_test_diameter(&self, x: f64, y: f64, diameter: f64) -> bool {
        self.live("hit_test_diameter")
            .is_some_and(|s| s.hit_test_diameter(x, y, diameter))
    }

    pub fn hit_test_rect(&self, rect: &RectD, percentage: f64) -> bool {
        self.live("hit_test_rect")
            .is_some_and(|s| s.hit_test_rect(rect, percentage))
    }

    pub fn hit_test_lasso(&self, lasso: &[PointD], percentage: f64) -> bool {
        self.live("hit_test_lasso")
            .is_some_and(|s| s.hit_test_lasso(lasso, percentage))
    }

    /// The outline, optionally clipped; empty once disposed.
    pub fn geometry(&self, bounds: Option<&RectD>) -> PathStorage {
        self.live("geometry")
            .map_or_else(PathStorage::new, |s| s.geometry(bounds))
    }

    pub fn bounds(&self) -> Option<RectD> {
        self.live("bounds").and_then(Stroke::bounds)
    }

    fn live(&self, op: &'static str) -> Option<&Stroke> {
        let s = self.stroke.as_deref();
        if s.is_none() {
            warn!(op, "operation on disposed stroke handle");
        }
        s
    }
}

impl From<Stroke> for StrokeHandle {
    fn from(stroke: Stroke) -> Self {
        Self::from_stroke(stroke)
    }
}

impl InkStroke for StrokeHandle {
    fn transform(&mut self, matrix: &TransAffine) {
        StrokeHandle::transform(self, matrix);
    }

    fn hit_test(&self, x: f64, y: f64) -> bool {
        StrokeHandle::hit_test(self, x, y)
    }

    fn geometry(&self, bounds: Option<&RectD>) -> PathStorage {
        StrokeHandle::geometry(self, bounds)
    }

    fn bounds(&self) -> Option<RectD> {
        StrokeHandle::bounds(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

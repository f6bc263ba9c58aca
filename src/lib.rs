//! # ink-stroke
//!
//! Geometry engine for freehand ink strokes.
//!
//! A stroke is built from sampled stylus points, optional per-point
//! pressures, a base width and a few style flags. From that input the
//! engine:
//!
//! - fits a centerline (raw polyline or Catmull-Rom spline through every
//!   sample),
//! - builds a filled outline with pressure-varying width, round caps and
//!   round joins, or an ellipse inscribed in the points' bounding box,
//! - applies affine transforms to the points and rebuilds the outline,
//! - answers hit tests against the outline (non-zero winding, inclusive
//!   boundary) and selection tests against the centerline.
//!
//! ## Architecture
//!
//! The engine follows a vertex-source pipeline:
//!
//! 1. **Stylus points**: samples with pressure and pressure synthesis
//! 2. **Curve fitting**: polyline or cubic spans through the samples
//! 3. **Outline building**: caps, joins and offsets into a `PathStorage`
//! 4. **Queries**: hit testing, clipping and bounds on the cached outline
//!
//! [`Stroke`] owns the input and its cached geometry; [`StrokeHandle`] adds
//! an explicit, idempotent dispose on top.

// Foundation Types & Math
pub mod basics;
pub mod config;
pub mod error;
pub mod math;

// Geometry Primitives
pub mod bounding_rect;
pub mod clip_liang_barsky;
pub mod curves;
pub mod ellipse;
pub mod math_stroke;
pub mod path_storage;
pub mod trans_affine;

// Stroke Engine
pub mod hit_test;
pub mod stroke;
pub mod stroke_fit;
pub mod stroke_outline;
pub mod stylus_point;

pub use basics::{FillingRule, PointD, RectD, VertexSource};
pub use config::StrokeConfig;
pub use error::{Result, StrokeError};
pub use path_storage::PathStorage;
pub use stroke::{InkStroke, Stroke, StrokeDefinition, StrokeHandle, StyleFlags};
pub use stroke_fit::{fit, FittedPath};
pub use stylus_point::StylusPoint;
pub use trans_affine::TransAffine;

//! Affine transformation matrix.
//!
//! 2D affine transformations applied to stroke control points. The canvas
//! layer hands matrices over as six numbers or as a 3×3 homogeneous matrix;
//! rotation, scaling and translation constructors cover the common cases.

/// Epsilon for affine matrix comparisons.
pub const AFFINE_EPSILON: f64 = 1e-14;

/// 2D affine transformation matrix.
///
/// Stores six components: `[sx, shy, shx, sy, tx, ty]` representing the
/// matrix:
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// Transform: `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
///
/// The component order matches the `m11, m12, m21, m22, dx, dy` layout used
/// by Qt and Android matrices, so a six-element array from those toolkits
/// can be passed to [`TransAffine::from_array`] unchanged.
#[derive(Debug, Clone, Copy)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Identity matrix.
    pub fn new() -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn new_custom(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    /// Construct from `[sx, shy, shx, sy, tx, ty]`.
    pub fn from_array(m: &[f64; 6]) -> Self {
        Self::new_custom(m[0], m[1], m[2], m[3], m[4], m[5])
    }

    /// Construct from a row-major 3×3 homogeneous matrix
    /// `[[sx, shx, tx], [shy, sy, ty], [_, _, _]]`.
    ///
    /// The bottom row is ignored: projective components are not supported.
    pub fn from_homogeneous(m: &[[f64; 3]; 3]) -> Self {
        Self::new_custom(m[0][0], m[1][0], m[0][1], m[1][1], m[0][2], m[1][2])
    }

    pub fn new_rotation(a: f64) -> Self {
        let (sa, ca) = a.sin_cos();
        Self::new_custom(ca, sa, -sa, ca, 0.0, 0.0)
    }

    pub fn new_scaling(x: f64, y: f64) -> Self {
        Self::new_custom(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    pub fn new_scaling_uniform(s: f64) -> Self {
        Self::new_scaling(s, s)
    }

    pub fn new_translation(x: f64, y: f64) -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// The six components in `[sx, shy, shx, sy, tx, ty]` order.
    pub fn as_array(&self) -> [f64; 6] {
        [self.sx, self.shy, self.shx, self.sy, self.tx, self.ty]
    }

    /// Post-multiply: `self = self * m`, i.e. apply `self` first, then `m`.
    pub fn multiply(&mut self, m: &TransAffine) -> &mut Self {
        let t0 = self.sx * m.sx + self.shy * m.shx;
        let t2 = self.shx * m.sx + self.sy * m.shx;
        let t4 = self.tx * m.sx + self.ty * m.shx + m.tx;
        self.shy = self.sx * m.shy + self.shy * m.sy;
        self.sy = self.shx * m.shy + self.sy * m.sy;
        self.ty = self.tx * m.shy + self.ty * m.sy + m.ty;
        self.sx = t0;
        self.shx = t2;
        self.tx = t4;
        self
    }

    // ====================================================================
    // Transformations
    // ====================================================================

    #[inline]
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        (*x, *y) = self.apply(*x, *y);
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.sx + y * self.shx + self.tx,
            x * self.shy + y * self.sy + self.ty,
        )
    }

    // ====================================================================
    // Auxiliary
    // ====================================================================

    /// Determinant of the 2x2 portion.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }

    /// `true` when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }

    /// `true` when the 2x2 portion collapses the plane onto a line or a point.
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.determinant().abs() <= epsilon
    }

    /// Component-wise comparison within `epsilon`.
    pub fn is_equal(&self, m: &TransAffine, epsilon: f64) -> bool {
        self.as_array()
            .iter()
            .zip(m.as_array().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TransAffine {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other, AFFINE_EPSILON)
    }
}

impl From<[f64; 6]> for TransAffine {
    fn from(m: [f64; 6]) -> Self {
        Self::from_array(&m)
    }
}

/// `a * b` applies `a` first, then `b`.
impl std::ops::Mul for TransAffine {
    type Output = TransAffine;
    fn mul(self, rhs: TransAffine) -> TransAffine {
        let mut result = self;
        result.multiply(&rhs);
        result
    }
}

impl std::ops::MulAssign for TransAffine {
    fn mul_assign(&mut self, rhs: TransAffine) {
        self.multiply(&rhs);
    }
}

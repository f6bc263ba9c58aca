//! Bounding rectangle calculation.
//!
//! Axis-aligned bounds of a vertex source or of a plain point list. Used
//! for the cached stroke bounds and for the ellipse-shaped stroke mode.

use crate::basics::{is_stop, is_vertex, PointD, RectD, VertexSource};

/// Running min/max accumulator shared by the bounding functions.
struct BoundsAcc {
    first: bool,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl BoundsAcc {
    fn new() -> Self {
        Self {
            first: true,
            x1: 1.0,
            y1: 1.0,
            x2: 0.0,
            y2: 0.0,
        }
    }

    fn add(&mut self, x: f64, y: f64) {
        if self.first {
            self.x1 = x;
            self.y1 = y;
            self.x2 = x;
            self.y2 = y;
            self.first = false;
        } else {
            if x < self.x1 {
                self.x1 = x;
            }
            if y < self.y1 {
                self.y1 = y;
            }
            if x > self.x2 {
                self.x2 = x;
            }
            if y > self.y2 {
                self.y2 = y;
            }
        }
    }

    fn finish(self) -> Option<RectD> {
        if !self.first && self.x1 <= self.x2 && self.y1 <= self.y2 {
            Some(RectD::new(self.x1, self.y1, self.x2, self.y2))
        } else {
            None
        }
    }
}

/// Compute the bounding rectangle of a vertex source, starting at `path_id`.
///
/// Only vertex commands contribute; end_poly markers are skipped. Returns
/// `None` if no vertices are found.
pub fn bounding_rect_single(vs: &mut dyn VertexSource, path_id: u32) -> Option<RectD> {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut acc = BoundsAcc::new();

    vs.rewind(path_id);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if is_vertex(cmd) {
            acc.add(x, y);
        }
    }
    acc.finish()
}

/// Bounding rectangle of a point list. Returns `None` for an empty slice.
pub fn bounding_rect_points(points: &[PointD]) -> Option<RectD> {
    let mut acc = BoundsAcc::new();
    for p in points {
        acc.add(p.x, p.y);
    }
    acc.finish()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipse::Ellipse;
    use crate::path_storage::PathStorage;

    #[test]
    fn test_bounding_rect_single_path() {
        let mut ps = PathStorage::new();
        ps.move_to(10.0, 20.0);
        ps.line_to(50.0, 80.0);
        ps.line_to(30.0, 5.0);
        ps.close_polygon(0);

        let r = bounding_rect_single(&mut ps, 0).unwrap();
        assert_eq!(r, RectD::new(10.0, 5.0, 50.0, 80.0));
    }

    #[test]
    fn test_bounding_rect_empty() {
        let mut ps = PathStorage::new();
        assert!(bounding_rect_single(&mut ps, 0).is_none());
        assert!(bounding_rect_points(&[]).is_none());
    }

    #[test]
    fn test_bounding_rect_single_point() {
        let r = bounding_rect_points(&[PointD::new(3.0, -4.0)]).unwrap();
        assert_eq!(r, RectD::new(3.0, -4.0, 3.0, -4.0));
    }

    #[test]
    fn test_bounding_rect_ellipse() {
        let mut e = Ellipse::new(100.0, 100.0, 50.0, 30.0, 64, false);
        let r = bounding_rect_single(&mut e, 0).unwrap();
        assert!((r.x1 - 50.0).abs() < 0.5);
        assert!((r.x2 - 150.0).abs() < 0.5);
        assert!((r.y1 - 70.0).abs() < 0.5);
        assert!((r.y2 - 130.0).abs() < 0.5);
    }

    #[test]
    fn test_bounding_rect_points_negative() {
        let pts = [
            PointD::new(-10.0, 5.0),
            PointD::new(7.0, -3.0),
            PointD::new(0.0, 12.0),
        ];
        let r = bounding_rect_points(&pts).unwrap();
        assert_eq!(r, RectD::new(-10.0, -3.0, 7.0, 12.0));
    }
}

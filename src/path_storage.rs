//! Path storage: the vertex container returned as stroke geometry.
//!
//! Stores vertices with path commands in a flat `Vec<VertexD>`. Sub-paths
//! start with `move_to` and are usually terminated by `close_polygon`.

use crate::basics::{
    is_curve4, is_end_poly, is_move_to, is_stop, is_vertex, PointD, VertexD, VertexSource,
    PATH_CMD_CURVE4, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CLOSE,
};
use crate::curves::{Curve4Inc, Curve4Points};
use crate::math::{calc_distance, VERTEX_DIST_EPSILON};

/// Ordered sequence of vertices with path commands.
///
/// Supports multiple sub-paths separated by `move_to` commands. Implements
/// `VertexSource` so it can be fed to anything that consumes vertices.
#[derive(Debug, Clone, Default)]
pub struct PathStorage {
    vertices: Vec<VertexD>,
    iterator: usize,
}

impl PathStorage {
    /// Create an empty path storage.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            iterator: 0,
        }
    }

    // ---------------------------------------------------------------
    // Path construction
    // ---------------------------------------------------------------

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push(VertexD::new(x, y, PATH_CMD_MOVE_TO));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertices.push(VertexD::new(x, y, PATH_CMD_LINE_TO));
    }

    /// Add a line_to unless it would repeat the last vertex.
    pub fn line_to_distinct(&mut self, x: f64, y: f64) {
        let mut x0 = 0.0;
        let mut y0 = 0.0;
        let cmd = self.last_vertex_xy(&mut x0, &mut y0);
        if is_vertex(cmd) && calc_distance(x, y, x0, y0) <= VERTEX_DIST_EPSILON {
            return;
        }
        self.line_to(x, y);
    }

    /// Add a cubic Bezier curve (curve4) with two explicit control points.
    #[allow(clippy::too_many_arguments)]
    pub fn curve4(
        &mut self,
        x_ctrl1: f64,
        y_ctrl1: f64,
        x_ctrl2: f64,
        y_ctrl2: f64,
        x_to: f64,
        y_to: f64,
    ) {
        self.vertices
            .push(VertexD::new(x_ctrl1, y_ctrl1, PATH_CMD_CURVE4));
        self.vertices
            .push(VertexD::new(x_ctrl2, y_ctrl2, PATH_CMD_CURVE4));
        self.vertices
            .push(VertexD::new(x_to, y_to, PATH_CMD_CURVE4));
    }

    /// Add an end_poly command with optional flags.
    pub fn end_poly(&mut self, flags: u32) {
        if is_vertex(self.last_command()) {
            self.vertices
                .push(VertexD::new(0.0, 0.0, PATH_CMD_END_POLY | flags));
        }
    }

    /// Close the current polygon.
    pub fn close_polygon(&mut self, flags: u32) {
        self.end_poly(PATH_FLAGS_CLOSE | flags);
    }

    /// Append `points` as one closed sub-path. Fewer than two points are ignored.
    pub fn add_polygon(&mut self, points: &[PointD]) {
        if points.len() < 2 {
            return;
        }
        self.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            self.line_to(p.x, p.y);
        }
        self.close_polygon(0);
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// Total number of vertices stored, including end_poly markers.
    pub fn total_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get the last vertex's (x, y) and command. Returns `PATH_CMD_STOP` if empty.
    pub fn last_vertex_xy(&self, x: &mut f64, y: &mut f64) -> u32 {
        match self.vertices.last() {
            Some(v) => {
                *x = v.x;
                *y = v.y;
                v.cmd
            }
            None => {
                *x = 0.0;
                *y = 0.0;
                PATH_CMD_STOP
            }
        }
    }

    /// Get the last command (or `PATH_CMD_STOP` if empty).
    pub fn last_command(&self) -> u32 {
        self.vertices.last().map_or(PATH_CMD_STOP, |v| v.cmd)
    }

    /// Get a vertex by index. Returns the command, `PATH_CMD_STOP` when out of range.
    pub fn vertex_idx(&self, idx: usize, x: &mut f64, y: &mut f64) -> u32 {
        match self.vertices.get(idx) {
            Some(v) => {
                *x = v.x;
                *y = v.y;
                v.cmd
            }
            None => PATH_CMD_STOP,
        }
    }

    pub fn command(&self, idx: usize) -> u32 {
        self.vertices.get(idx).map_or(PATH_CMD_STOP, |v| v.cmd)
    }

    /// Number of `move_to` commands, i.e. sub-paths.
    pub fn num_paths(&self) -> usize {
        self.vertices.iter().filter(|v| is_move_to(v.cmd)).count()
    }

    // ---------------------------------------------------------------
    // Concatenation
    // ---------------------------------------------------------------

    /// Concatenate all vertices from a vertex source as-is.
    pub fn concat_path(&mut self, vs: &mut dyn VertexSource, path_id: u32) {
        let mut x = 0.0;
        let mut y = 0.0;
        vs.rewind(path_id);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.vertices.push(VertexD::new(x, y, cmd));
        }
    }

    // ---------------------------------------------------------------
    // Polygon extraction
    // ---------------------------------------------------------------

    /// Split the path into flat point lists, one per sub-path.
    ///
    /// Cubic segments are flattened; end_poly markers only terminate the
    /// current list. Every list is treated as implicitly closed by callers.
    pub fn polygons(&self) -> Vec<Vec<PointD>> {
        let mut out: Vec<Vec<PointD>> = Vec::new();
        let mut cur: Vec<PointD> = Vec::new();
        let mut i = 0;
        while i < self.vertices.len() {
            let v = self.vertices[i];
            if is_move_to(v.cmd) {
                if !cur.is_empty() {
                    out.push(std::mem::take(&mut cur));
                }
                cur.push(PointD::new(v.x, v.y));
            } else if is_curve4(v.cmd) && i + 2 < self.vertices.len() {
                let start = cur.last().copied().unwrap_or(PointD::new(v.x, v.y));
                let c2 = self.vertices[i + 1];
                let to = self.vertices[i + 2];
                let cp = Curve4Points::new(start.x, start.y, v.x, v.y, c2.x, c2.y, to.x, to.y);
                let mut inc = Curve4Inc::with_scale(&cp, 1.0);
                let mut x = 0.0;
                let mut y = 0.0;
                inc.rewind(0);
                // Skip the start point, it is already in `cur`.
                inc.vertex(&mut x, &mut y);
                while !is_stop(inc.vertex(&mut x, &mut y)) {
                    cur.push(PointD::new(x, y));
                }
                i += 2;
            } else if is_vertex(v.cmd) {
                cur.push(PointD::new(v.x, v.y));
            } else if is_end_poly(v.cmd) && !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            i += 1;
        }
        if !cur.is_empty() {
            out.push(cur);
        }
        out
    }
}

impl VertexSource for PathStorage {
    fn rewind(&mut self, path_id: u32) {
        self.iterator = path_id as usize;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.iterator >= self.vertices.len() {
            return PATH_CMD_STOP;
        }
        let v = &self.vertices[self.iterator];
        *x = v.x;
        *y = v.y;
        self.iterator += 1;
        v.cmd
    }
}

// ============================================================================
// Tests
// ============================================================================

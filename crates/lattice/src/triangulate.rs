use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::color::Color;
use crate::grid::{Lattice, VertexId};

/// Three vertex ids, wound so the signed area is positive on the regular grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [VertexId; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        Self {
            vertices: [a, b, c],
            color: Color::BLACK,
        }
    }

    /// Undirected edges, each with its endpoints in ascending order.
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.vertices;
        let ordered = |x: VertexId, y: VertexId| if x <= y { (x, y) } else { (y, x) };
        [ordered(a, b), ordered(b, c), ordered(c, a)]
    }
}

/// Which diagonal splits each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagonalRule {
    /// Every cell is cut from its top-right to its bottom-left corner.
    Fixed,
    /// Checkerboard: even cells as `Fixed`, odd cells cut top-left to bottom-right.
    #[default]
    Alternating,
}

impl FromStr for DiagonalRule {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(DiagonalRule::Fixed),
            "alternating" | "alternate" | "checker" => Ok(DiagonalRule::Alternating),
            other => Err(format!(
                "unknown diagonal rule '{other}'; expected fixed or alternating"
            )),
        }
    }
}

impl fmt::Display for DiagonalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagonalRule::Fixed => f.write_str("fixed"),
            DiagonalRule::Alternating => f.write_str("alternating"),
        }
    }
}

impl Lattice {
    /// Splits every cell into two triangles over the shared vertices, replacing
    /// any previous triangle set. Cells are visited row-major.
    pub fn triangulate(&mut self, rule: DiagonalRule) {
        let dims = self.dims;
        let mut triangles = Vec::with_capacity(dims.cell_count() * 2);
        for j in 0..dims.rows {
            for i in 0..dims.cols {
                let tl = dims.vertex_id(i, j);
                let tr = dims.vertex_id(i + 1, j);
                let bl = dims.vertex_id(i, j + 1);
                let br = dims.vertex_id(i + 1, j + 1);

                let split_tl_br = match rule {
                    DiagonalRule::Fixed => false,
                    DiagonalRule::Alternating => (i + j) % 2 == 1,
                };
                if split_tl_br {
                    triangles.push(Triangle::new(tl, tr, br));
                    triangles.push(Triangle::new(tl, br, bl));
                } else {
                    triangles.push(Triangle::new(tl, tr, bl));
                    triangles.push(Triangle::new(tr, br, bl));
                }
            }
        }

        debug!(triangles = triangles.len(), %rule, "triangulated lattice");
        self.triangles = triangles;
    }

    /// For each vertex, the indices of the triangles that reference it.
    pub fn incident_triangles(&self) -> Vec<Vec<usize>> {
        let mut incident = vec![Vec::new(); self.vertices.len()];
        for (index, triangle) in self.triangles.iter().enumerate() {
            for id in triangle.vertices {
                incident[id.index()].push(index);
            }
        }
        incident
    }
}

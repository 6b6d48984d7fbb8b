//! Lays out the regular vertex grid every later stage works on.
//!
//! Types:
//!
//! - `Point` is a position in pixel space (y grows downwards).
//! - `VertexId` indexes the shared vertex arena; triangles only ever hold ids.
//! - `Vertex` pairs a position with the boundary flag the mutator honours.
//! - `CellSize` and `GridDims` describe the nominal cell and how many of them
//!   are laid out.
//! - `Lattice` owns the vertex arena and the triangle set.
//!
//! Functions:
//!
//! - `GridDims::covering` computes `ceil(W / cw) x ceil(H / ch)`.
//! - `Lattice::build` validates its inputs and places `(cols + 1) x (rows + 1)`
//!   vertices at the grid intersections, row-major.
use tracing::debug;

use crate::error::LatticeError;
use crate::triangulate::Triangle;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

/// Signed area of `abc`; positive for the winding the triangulator emits.
pub fn signed_area(a: Point, b: Point, c: Point) -> f64 {
    0.5 * ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point,
    /// Vertices on the outer ring of the grid; these never move.
    pub boundary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), LatticeError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(LatticeError::InvalidCellSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Largest canvas, in pixels, a lattice may cover.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Largest number of cells a lattice may hold.
pub const MAX_CELLS: u64 = 1 << 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub cols: u32,
    pub rows: u32,
}

impl GridDims {
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Smallest grid of `cell` sized cells covering the canvas. The last row and
    /// column may overflow it.
    pub fn covering(canvas: (u32, u32), cell: CellSize) -> Result<Self, LatticeError> {
        validate_canvas(canvas)?;
        cell.validate()?;
        let cols = (f64::from(canvas.0) / cell.width).ceil();
        let rows = (f64::from(canvas.1) / cell.height).ceil();
        let dims = Self::new(cols as u32, rows as u32);
        dims.check_size()?;
        Ok(dims)
    }

    /// Rejects grids whose vertex and triangle arenas would not fit in memory.
    pub fn check_size(&self) -> Result<(), LatticeError> {
        if u64::from(self.cols) * u64::from(self.rows) > MAX_CELLS {
            return Err(LatticeError::TooManyCells {
                cols: self.cols,
                rows: self.rows,
                max: MAX_CELLS,
            });
        }
        Ok(())
    }

    pub fn vertex_columns(&self) -> usize {
        self.cols as usize + 1
    }

    pub fn vertex_rows(&self) -> usize {
        self.rows as usize + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_columns() * self.vertex_rows()
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Id of the vertex at grid intersection `(i, j)`.
    pub fn vertex_id(&self, i: u32, j: u32) -> VertexId {
        VertexId(j as usize * self.vertex_columns() + i as usize)
    }

    /// Grid intersection `(i, j)` of a vertex id.
    pub fn coordinates(&self, id: VertexId) -> (u32, u32) {
        let columns = self.vertex_columns();
        ((id.0 % columns) as u32, (id.0 / columns) as u32)
    }

    pub fn is_boundary(&self, i: u32, j: u32) -> bool {
        i == 0 || j == 0 || i == self.cols || j == self.rows
    }
}

fn validate_canvas((width, height): (u32, u32)) -> Result<(), LatticeError> {
    if width == 0 || height == 0 {
        return Err(LatticeError::EmptyCanvas { width, height });
    }
    if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
        return Err(LatticeError::CanvasTooLarge {
            width,
            height,
            max: MAX_CANVAS_PIXELS,
        });
    }
    Ok(())
}

/// Shared vertex arena plus the triangles that reference it.
#[derive(Debug, Clone)]
pub struct Lattice {
    pub(crate) canvas: (u32, u32),
    pub(crate) dims: GridDims,
    pub(crate) cell_size: CellSize,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) triangles: Vec<Triangle>,
}

impl Lattice {
    /// Places the grid vertices. The lattice has no triangles until
    /// [`Lattice::triangulate`] runs.
    pub fn build(
        canvas: (u32, u32),
        dims: GridDims,
        cell_size: CellSize,
    ) -> Result<Self, LatticeError> {
        validate_canvas(canvas)?;
        cell_size.validate()?;
        if dims.cols == 0 || dims.rows == 0 {
            return Err(LatticeError::EmptyGrid {
                cols: dims.cols,
                rows: dims.rows,
            });
        }
        dims.check_size()?;
        let covered_width = f64::from(dims.cols) * cell_size.width;
        let covered_height = f64::from(dims.rows) * cell_size.height;
        if covered_width < f64::from(canvas.0) || covered_height < f64::from(canvas.1) {
            return Err(LatticeError::GridTooSmall {
                cols: dims.cols,
                rows: dims.rows,
                cell_width: cell_size.width,
                cell_height: cell_size.height,
                width: canvas.0,
                height: canvas.1,
            });
        }

        let mut vertices = Vec::with_capacity(dims.vertex_count());
        for j in 0..=dims.rows {
            for i in 0..=dims.cols {
                vertices.push(Vertex {
                    position: grid_point(cell_size, i, j),
                    boundary: dims.is_boundary(i, j),
                });
            }
        }

        debug!(
            width = canvas.0,
            height = canvas.1,
            cols = dims.cols,
            rows = dims.rows,
            vertices = vertices.len(),
            "built lattice grid"
        );

        Ok(Self {
            canvas,
            dims,
            cell_size,
            vertices,
            triangles: Vec::new(),
        })
    }

    pub fn canvas(&self) -> (u32, u32) {
        self.canvas
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Where a vertex sat on the regular grid, regardless of mutation.
    pub fn grid_position(&self, id: VertexId) -> Point {
        let (i, j) = self.dims.coordinates(id);
        grid_point(self.cell_size, i, j)
    }

    pub fn corners(&self, triangle: &Triangle) -> [Point; 3] {
        triangle.vertices.map(|id| self.vertices[id.0].position)
    }

    pub fn area(&self, triangle: &Triangle) -> f64 {
        let [a, b, c] = self.corners(triangle);
        signed_area(a, b, c)
    }
}

fn grid_point(cell: CellSize, i: u32, j: u32) -> Point {
    Point::new(f64::from(i) * cell.width, f64::from(j) * cell.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_rounds_up() {
        let dims = GridDims::covering((1366, 768), CellSize::new(120.0, 100.0)).unwrap();
        assert_eq!(dims, GridDims::new(12, 8));

        let exact = GridDims::covering((240, 200), CellSize::new(120.0, 100.0)).unwrap();
        assert_eq!(exact, GridDims::new(2, 2));
    }

    #[test]
    fn places_vertices_on_intersections() {
        let lattice =
            Lattice::build((240, 200), GridDims::new(2, 2), CellSize::new(120.0, 100.0)).unwrap();
        assert_eq!(lattice.vertices().len(), 9);
        let centre = lattice.dims().vertex_id(1, 1);
        assert_eq!(lattice.vertex(centre).position, Point::new(120.0, 100.0));
        assert!(!lattice.vertex(centre).boundary);
        let corner = lattice.dims().vertex_id(2, 2);
        assert_eq!(lattice.vertex(corner).position, Point::new(240.0, 200.0));
        assert!(lattice.vertex(corner).boundary);
    }

    #[test]
    fn only_outer_ring_is_boundary() {
        let lattice =
            Lattice::build((400, 300), GridDims::new(4, 3), CellSize::new(100.0, 100.0)).unwrap();
        let interior = lattice.vertices().iter().filter(|v| !v.boundary).count();
        assert_eq!(interior, 3 * 2);
    }

    #[test]
    fn overflowing_cells_are_kept() {
        let dims = GridDims::covering((130, 90), CellSize::new(120.0, 100.0)).unwrap();
        let lattice = Lattice::build((130, 90), dims, CellSize::new(120.0, 100.0)).unwrap();
        let far = lattice.dims().vertex_id(dims.cols, dims.rows);
        assert_eq!(lattice.vertex(far).position, Point::new(240.0, 100.0));
    }

    #[test]
    fn coordinates_round_trip_ids() {
        let dims = GridDims::new(5, 3);
        let id = dims.vertex_id(4, 2);
        assert_eq!(id, VertexId(16));
        assert_eq!(dims.coordinates(id), (4, 2));
    }

    #[test]
    fn rejects_bad_preconditions() {
        let cell = CellSize::new(10.0, 10.0);
        assert!(matches!(
            Lattice::build((0, 10), GridDims::new(1, 1), cell),
            Err(LatticeError::EmptyCanvas { .. })
        ));
        assert!(matches!(
            Lattice::build((10, 10), GridDims::new(0, 1), cell),
            Err(LatticeError::EmptyGrid { .. })
        ));
        assert!(matches!(
            Lattice::build((10, 10), GridDims::new(1, 1), CellSize::new(-1.0, 10.0)),
            Err(LatticeError::InvalidCellSize { .. })
        ));
        assert!(matches!(
            Lattice::build((10, 10), GridDims::new(1, 1), CellSize::new(f64::NAN, 10.0)),
            Err(LatticeError::InvalidCellSize { .. })
        ));
        assert!(matches!(
            Lattice::build((25, 10), GridDims::new(2, 1), cell),
            Err(LatticeError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn rejects_oversized_grids_before_allocating() {
        let tiny = CellSize::new(1.0, 1.0);
        assert!(matches!(
            GridDims::covering((60_000, 60_000), tiny),
            Err(LatticeError::CanvasTooLarge { .. })
        ));
        assert!(matches!(
            GridDims::covering((16_000, 16_000), tiny),
            Err(LatticeError::TooManyCells { .. })
        ));
        assert!(matches!(
            Lattice::build((10, 10), GridDims::new(5_000, 5_000), tiny),
            Err(LatticeError::TooManyCells { .. })
        ));
        assert!(GridDims::covering((3840, 2160), CellSize::new(2.0, 2.0)).is_ok());
    }
}

//! Low-poly wallpaper engine.
//!
//! A wallpaper is produced in a single pass over one mesh:
//!
//! ```text
//!   LatticeConfig + (Color, Color) + Rng
//!          │
//!          ▼
//!   Lattice::build ──▶ triangulate ──▶ mutate ──▶ gradient_colors_random_direction ──▶ render
//!    (grid.rs)      (triangulate.rs) (mutate.rs)        (gradient.rs)                (raster.rs)
//! ```
//!
//! The lattice owns a flat arena of vertices. Triangles hold `VertexId`s rather
//! than coordinates, so moving a vertex during mutation moves the corner of
//! every triangle that touches it and adjacent triangles can never drift apart.
//! All randomness comes from the generator handed to [`render`], so a fixed
//! seed reproduces the same image byte for byte.

mod color;
mod error;
mod gradient;
mod grid;
mod mutate;
mod raster;
mod triangulate;

pub use color::Color;
pub use error::LatticeError;
pub use gradient::GradientAxis;
pub use grid::{
    signed_area, CellSize, GridDims, Lattice, Point, Vertex, VertexId, MAX_CANVAS_PIXELS, MAX_CELLS,
};
pub use mutate::{MutationReport, MAX_SHRINK_STEPS, MIN_AREA_RATIO};
pub use triangulate::{DiagonalRule, Triangle};

pub use image::RgbImage;

use rand::Rng;
use tracing::info;

/// Geometry of a single wallpaper run.
///
/// Mirrors the CLI flags: the canvas to cover, the nominal cell that gets split
/// into two triangles, how far interior vertices may wander, and which
/// diagonal each cell is cut along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeConfig {
    /// Output size in pixels.
    pub canvas: (u32, u32),
    /// Nominal cell size in pixels; the grid is `ceil(canvas / cell)` cells.
    pub cell_size: CellSize,
    /// Largest per-axis displacement of an interior vertex, in pixels.
    pub mutation: f64,
    /// Diagonal split applied to every cell.
    pub diagonal: DiagonalRule,
}

impl Default for LatticeConfig {
    /// 1366x768 canvas of 120x100 cells with a mutation of 30px.
    fn default() -> Self {
        Self {
            canvas: (1366, 768),
            cell_size: CellSize::new(120.0, 100.0),
            mutation: 30.0,
            diagonal: DiagonalRule::default(),
        }
    }
}

impl LatticeConfig {
    /// Checks every precondition up front so nothing is built for a bad run.
    pub fn validate(&self) -> Result<GridDims, LatticeError> {
        if !self.mutation.is_finite() || self.mutation < 0.0 {
            return Err(LatticeError::InvalidIntensity(self.mutation));
        }
        GridDims::covering(self.canvas, self.cell_size)
    }
}

/// Builds, mutates, colors and rasterizes one wallpaper.
///
/// The generator is consumed by mutation first and the gradient angle second.
pub fn render<R: Rng + ?Sized>(
    config: &LatticeConfig,
    colors: (Color, Color),
    rng: &mut R,
) -> Result<RgbImage, LatticeError> {
    let dims = config.validate()?;
    let mut lattice = Lattice::build(config.canvas, dims, config.cell_size)?;
    lattice.triangulate(config.diagonal);
    let report = lattice.mutate(config.mutation, rng)?;
    let axis = lattice.gradient_colors_random_direction(colors.0, colors.1, rng)?;
    let image = lattice.render();

    info!(
        width = config.canvas.0,
        height = config.canvas.1,
        cols = dims.cols,
        rows = dims.rows,
        triangles = lattice.triangles().len(),
        pinned = report.pinned,
        angle = axis.angle(),
        "rendered lattice wallpaper"
    );
    Ok(image)
}

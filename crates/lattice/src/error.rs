use thiserror::Error;

/// Precondition failures raised before any lattice or raster work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    #[error("canvas must be at least 1x1 pixels (got {width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("canvas {width}x{height} is too large; at most {max} pixels are supported")]
    CanvasTooLarge { width: u32, height: u32, max: u64 },

    #[error("grid must have at least one column and one row (got {cols}x{rows})")]
    EmptyGrid { cols: u32, rows: u32 },

    #[error("grid of {cols}x{rows} cells is too large; at most {max} cells are supported")]
    TooManyCells { cols: u32, rows: u32, max: u64 },

    #[error("cell size must be positive and finite (got {width}x{height})")]
    InvalidCellSize { width: f64, height: f64 },

    #[error("{cols}x{rows} cells of {cell_width}x{cell_height}px miss a {width}x{height} canvas")]
    GridTooSmall {
        cols: u32,
        rows: u32,
        cell_width: f64,
        cell_height: f64,
        width: u32,
        height: u32,
    },

    #[error("mutation intensity must be a non-negative finite number (got {0})")]
    InvalidIntensity(f64),

    #[error("invalid color '{0}'; expected #rrggbb")]
    InvalidColor(String),

    #[error("lattice has no triangles; triangulate it first")]
    NotTriangulated,
}

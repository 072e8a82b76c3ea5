use thiserror::Error;

/// Failures of the shoreline tracing core.
///
/// Every variant is terminal: the computation is deterministic, so nothing
/// is retried and no partial polygons are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShorelineError {
    #[error("Invalid raster shape: {rows}x{cols} (need at least 2x2 cells)")]
    InvalidRasterShape { rows: usize, cols: usize },

    #[error("No boundary detected: raster has no land/water transition")]
    EmptyBoundarySet,

    #[error("Expected {expected} stitched loops, found {found}")]
    InsufficientLoopCount { expected: usize, found: usize },

    #[error("Degenerate reference latitude {lat} (must lie strictly within -90..90)")]
    DegenerateReference { lat: f64 },
}

pub type Result<T> = std::result::Result<T, ShorelineError>;

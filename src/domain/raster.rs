use crate::error::{Result, ShorelineError};

/// Label of a water cell in the occupancy grids this tool consumes
pub const WATER: u8 = 0;
/// Label of a land cell
pub const LAND: u8 = 1;

/// Immutable 2-D grid of cell labels, row 0 at the top
///
/// Labels are stored row-major. Any comparable label type works; the
/// loaders in `crate::io` produce `u8` grids.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyRaster<L = u8> {
    rows: usize,
    cols: usize,
    cells: Vec<L>,
}

impl<L: Copy + PartialEq> OccupancyRaster<L> {
    /// Create a raster from a row-major label buffer
    ///
    /// # Errors
    /// * `InvalidRasterShape` if either dimension is below 2 or the buffer
    ///   length is not `rows * cols`
    pub fn new(rows: usize, cols: usize, cells: Vec<L>) -> Result<Self> {
        if rows < 2 || cols < 2 || cells.len() != rows * cols {
            return Err(ShorelineError::InvalidRasterShape { rows, cols });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Create a raster from nested rows, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<L>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != width) {
            return Err(ShorelineError::InvalidRasterShape {
                rows: height,
                cols: width,
            });
        }
        Self::new(height, width, rows.into_iter().flatten().collect())
    }

    /// Create a raster with every cell set to `fill`
    pub fn filled(rows: usize, cols: usize, fill: L) -> Result<Self> {
        Self::new(rows, cols, vec![fill; rows.saturating_mul(cols)])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Label at (row, col); panics when out of range like slice indexing
    pub fn get(&self, row: usize, col: usize) -> L {
        self.cells[row * self.cols + col]
    }

    /// Return a copy with the rectangle `rows x cols` (half-open) set to `label`
    ///
    /// Ranges are clipped to the raster.
    pub fn with_block(
        mut self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        label: L,
    ) -> Self {
        for r in rows.start..rows.end.min(self.rows) {
            for c in cols.start..cols.end.min(self.cols) {
                self.cells[r * self.cols + c] = label;
            }
        }
        self
    }

    /// Number of cells carrying `label`
    pub fn count(&self, label: L) -> usize {
        self.cells.iter().filter(|&&l| l == label).count()
    }
}

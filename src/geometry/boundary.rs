use crate::config::fosen::RASTER_HEIGHT_OFFSET;
use crate::domain::{GridPoint, OccupancyRaster};
use crate::error::{Result, ShorelineError};

/// Finds land/water transition cells in an occupancy raster
///
/// A cell is on the boundary when its label differs from the cell to its
/// right or the cell below it. The last row and column are never visited,
/// so transitions that only show up there are not reported.
///
/// Cell (i, j) maps to the grid point `(height_offset - i - 0.5, j + 0.5)`:
/// rows are flipped so x grows northward, and both axes sit on cell centres.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryExtractor {
    height_offset: f64,
}

impl Default for BoundaryExtractor {
    fn default() -> Self {
        Self {
            height_offset: RASTER_HEIGHT_OFFSET,
        }
    }
}

impl BoundaryExtractor {
    /// Use a different fixed row flip offset
    pub fn with_height_offset(height_offset: f64) -> Self {
        Self { height_offset }
    }

    /// Grid point of the centre of cell (row, col)
    pub fn cell_to_point(&self, row: usize, col: usize) -> GridPoint {
        GridPoint::new(self.height_offset - row as f64 - 0.5, col as f64 + 0.5)
    }

    /// Cell (row, col) whose centre is `point`
    ///
    /// Returns `None` for points that are not on a cell centre of a
    /// non-negative index.
    pub fn point_to_cell(&self, point: &GridPoint) -> Option<(usize, usize)> {
        let row = self.height_offset - 0.5 - point.x;
        let col = point.y - 0.5;
        if row < 0.0 || col < 0.0 || row.fract() != 0.0 || col.fract() != 0.0 {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Scan the raster in row-major order and collect boundary points
    ///
    /// # Errors
    /// * `InvalidRasterShape` when the raster has fewer than 2 rows or columns
    pub fn extract<L: Copy + PartialEq>(&self, raster: &OccupancyRaster<L>) -> Result<Vec<GridPoint>> {
        let (rows, cols) = (raster.rows(), raster.cols());
        if rows < 2 || cols < 2 {
            return Err(ShorelineError::InvalidRasterShape { rows, cols });
        }

        let mut boundary = Vec::new();
        for i in 0..rows - 1 {
            for j in 0..cols - 1 {
                let label = raster.get(i, j);
                if label != raster.get(i, j + 1) || label != raster.get(i + 1, j) {
                    boundary.push(self.cell_to_point(i, j));
                }
            }
        }

        Ok(boundary)
    }
}

/// Extract boundary points with the operating-area row offset
pub fn extract_boundary<L: Copy + PartialEq>(raster: &OccupancyRaster<L>) -> Result<Vec<GridPoint>> {
    BoundaryExtractor::default().extract(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LAND, WATER};

    fn is_transition(raster: &OccupancyRaster, row: usize, col: usize) -> bool {
        let label = raster.get(row, col);
        label != raster.get(row, col + 1) || label != raster.get(row + 1, col)
    }

    #[test]
    fn test_rectangle_yields_perimeter_not_area() {
        let raster = OccupancyRaster::filled(10, 10, WATER)
            .unwrap()
            .with_block(3..6, 3..6, LAND);
        let extractor = BoundaryExtractor::default();
        let boundary = extractor.extract(&raster).unwrap();

        // 3 cells above the block, 3 to its left, its right column and
        // the rest of its bottom row
        assert_eq!(boundary.len(), 11);
        let transitions = (0..9)
            .flat_map(|r| (0..9).map(move |c| (r, c)))
            .filter(|&(r, c)| is_transition(&raster, r, c))
            .count();
        assert_eq!(boundary.len(), transitions);
        assert_ne!(boundary.len(), raster.count(LAND));

        for point in &boundary {
            let (row, col) = extractor.point_to_cell(point).unwrap();
            assert!(is_transition(&raster, row, col));
        }
    }

    #[test]
    fn test_coordinates_follow_offset_formula() {
        let raster = OccupancyRaster::from_rows(vec![
            vec![WATER, LAND, LAND],
            vec![WATER, LAND, LAND],
            vec![WATER, LAND, LAND],
        ])
        .unwrap();
        let boundary = extract_boundary(&raster).unwrap();
        assert_eq!(
            boundary,
            vec![GridPoint::new(616.5, 0.5), GridPoint::new(615.5, 0.5)]
        );
    }

    #[test]
    fn test_last_row_and_column_are_skipped() {
        let mut rows = vec![vec![WATER; 4]; 4];
        rows[3][3] = LAND;
        let raster = OccupancyRaster::from_rows(rows).unwrap();
        assert!(extract_boundary(&raster).unwrap().is_empty());

        let mut rows = vec![vec![WATER; 4]; 4];
        rows[3][1] = LAND;
        let raster = OccupancyRaster::from_rows(rows).unwrap();
        // Only (2, 1) sees the land cell, via its lower neighbour
        assert_eq!(
            extract_boundary(&raster).unwrap(),
            vec![GridPoint::new(614.5, 1.5)]
        );
    }

    #[test]
    fn test_cell_with_both_transitions_emitted_once() {
        let raster = OccupancyRaster::from_rows(vec![vec![LAND, WATER], vec![WATER, WATER]]).unwrap();
        assert_eq!(extract_boundary(&raster).unwrap().len(), 1);
    }

    #[test]
    fn test_uniform_raster_has_no_boundary() {
        let raster = OccupancyRaster::filled(5, 7, LAND).unwrap();
        assert!(extract_boundary(&raster).unwrap().is_empty());
    }

    #[test]
    fn test_custom_offset() {
        let raster = OccupancyRaster::from_rows(vec![vec![LAND, WATER], vec![LAND, WATER]]).unwrap();
        let boundary = BoundaryExtractor::with_height_offset(2.0).extract(&raster).unwrap();
        assert_eq!(boundary, vec![GridPoint::new(1.5, 0.5)]);
    }
}

//! Raster to land polygons, end to end.
//!
//! extract boundary -> stitch -> close loop 3 -> (simplify) -> project and merge

use crate::config::fosen;
use crate::domain::{GeodeticReference, LandPolygons, OccupancyRaster, PolygonCollection};
use crate::error::{Result, ShorelineError};
use crate::geometry::simplify::{epsilon_for_level, simplify_collection};
use crate::geometry::{BoundaryExtractor, Stitcher, to_geodetic};

/// Tunables for one pipeline run
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Largest gap bridged while stitching, in cells
    pub distance_cutoff: f64,
    /// Row flip offset for grid coordinates
    pub height_offset: f64,
    /// Origin of the local grid frame
    pub reference: GeodeticReference,
    /// Simplification level 0-3, 0 keeps every boundary point
    pub simplify: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            distance_cutoff: fosen::DISTANCE_CUTOFF,
            height_offset: fosen::RASTER_HEIGHT_OFFSET,
            reference: fosen::MAP_CORNER,
            simplify: 0,
        }
    }
}

impl PipelineConfig {
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.distance_cutoff = cutoff;
        self
    }

    pub fn with_reference(mut self, reference: GeodeticReference) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_simplify_level(mut self, level: u8) -> Self {
        self.simplify = level.min(3);
        self
    }
}

/// Append the fixed closing point to loop 3.
///
/// The surveyed raster leaves loop 3 open where the land runs off the
/// southern edge of the grid; the map draws it closed through
/// `fosen::PATCH_POINT`. This holds for that raster only.
///
/// # Errors
/// * `InsufficientLoopCount` if the stitcher produced fewer than four loops
pub fn close_patched_loop(collection: &mut PolygonCollection) -> Result<()> {
    let found = collection.len();
    if found < fosen::EXPECTED_LOOPS {
        return Err(ShorelineError::InsufficientLoopCount {
            expected: fosen::EXPECTED_LOOPS,
            found,
        });
    }

    if let Some(chain) = collection.get_mut(fosen::PATCHED_LOOP) {
        chain.push(fosen::PATCH_POINT);
    }
    Ok(())
}

/// Boundary loops in the grid frame, after the loop 3 patch
pub fn trace_loops<L: Copy + PartialEq>(
    raster: &OccupancyRaster<L>,
    config: &PipelineConfig,
) -> Result<PolygonCollection> {
    let boundary = BoundaryExtractor::with_height_offset(config.height_offset).extract(raster)?;
    let mut collection = Stitcher::new(config.distance_cutoff).stitch(&boundary)?;
    close_patched_loop(&mut collection)?;
    Ok(collection)
}

/// Run the whole chain and return the three land groups in WGS84
pub fn build_land_polygons<L: Copy + PartialEq>(
    raster: &OccupancyRaster<L>,
    config: &PipelineConfig,
) -> Result<LandPolygons> {
    let mut collection = trace_loops(raster, config)?;
    if config.simplify > 0 {
        collection = simplify_collection(&collection, epsilon_for_level(config.simplify));
    }
    to_geodetic(&collection, config.reference)
}

pub mod point;
pub mod polygon;
pub mod raster;

pub use point::{GeodeticPoint, GeodeticReference, GridPoint};
pub use polygon::{LandPolygons, PolygonCollection, PolygonLoop};
pub use raster::{LAND, OccupancyRaster, WATER};

pub mod geojson;
pub mod raster;

pub use self::geojson::{save_geojson, to_feature_collection};
pub use self::raster::{RasterFile, load_raster};

pub mod boundary;
pub mod convert;
pub mod projection;
pub mod simplify;
pub mod stitch;

pub use boundary::{BoundaryExtractor, extract_boundary};
pub use convert::{recombine, to_geodetic};
pub use projection::{Projector, project};
pub use simplify::{simplify_collection, simplify_loop};
pub use stitch::{Stitcher, stitch};

//! shoremap - Trace shoreline polygons from a land/water occupancy grid

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod io;
pub mod pipeline;

pub use error::{Result, ShorelineError};

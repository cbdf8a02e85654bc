//! Geospatial helpers: zip-prefix coordinate averaging and great-circle distance.

mod averaging;
mod haversine;

pub use averaging::{Coordinate, mean_coordinates};
pub use haversine::{EARTH_RADIUS_KM, haversine_distance, haversine_distances};

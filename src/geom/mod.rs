mod convert;
pub mod parse;

pub use parse::{parse_coordinates, parse_geojson, parse_geometry, parse_wkt};

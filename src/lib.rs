//! # flexpolyline-rs
//!
//! Encoder and decoder for the flexible polyline format: a compact, URL-safe
//! string holding a sequence of latitude/longitude pairs and an optional third
//! dimension (level, altitude, elevation or a custom value).
//!
//! There are currently three main entry points.
//!
//! ### 1. `encode` / `decode` - Raw Codec
//!
//! ```
//! use flexpolyline_rs::{decode, encode, Header};
//!
//! # fn main() -> Result<(), flexpolyline_rs::PolylineError> {
//! let encoded = encode(&[(50.1022829, 8.6982122), (50.1020076, 8.6956695)], &Header::default())?;
//! assert_eq!(encoded, "BFoz5xJ67i1B1B7P");
//!
//! let coordinates = decode(&encoded)?;
//! assert_eq!(coordinates[1].lng, 8.69567);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Polyline` - Header plus Coordinates
//!
//! ```
//! use flexpolyline_rs::{Polyline, ThirdDimension};
//!
//! # fn main() -> Result<(), flexpolyline_rs::PolylineError> {
//! let polyline = Polyline::decode("BlBoz5xJ67i1BU1B7PUzIhaUxL7YU")?;
//! assert_eq!(polyline.header.third_dim, ThirdDimension::Altitude);
//! println!("{}", polyline);
//! println!("{}", polyline.to_wkt());
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvPolylines` - CSV File Conversion
//!
//! ```no_run
//! use flexpolyline_rs::{CsvPolylineConfig, CsvPolylines, GeometryFormat};
//!
//! let config = CsvPolylineConfig::new("geometry");
//! "routes.csv".to_polyline_csv("encoded.csv", &config).unwrap();
//!
//! let config = CsvPolylineConfig::new("polyline").geometry_format(GeometryFormat::GeoJson);
//! "encoded.csv".to_geometry_csv("decoded.csv", &config).unwrap();
//! ```
//!
//! Collections of polylines convert to GeoArrow and GeoParquet through
//! [`PolylinesToArrow`] and [`PolylinesToGeoParquet`].

pub mod codec;
pub mod coord;
pub mod core;
pub mod error;
pub mod geom;
pub mod io;
pub mod polyline;

pub use codec::{Decoder, Header, ThirdDimension, decode, decode_header, encode, peek_third_dimension};
pub use coord::{Coordinate, LatLngZ};
pub use crate::core::{DEFAULT_PRECISION, ENCODING_TABLE, FORMAT_VERSION, MAX_PRECISION};
pub use error::PolylineError;
pub use geom::{parse_coordinates, parse_geojson, parse_geometry, parse_wkt};
pub use io::{
    CsvPolylineConfig, CsvPolylines, GeometryFormat, PolylinesToArrow, PolylinesToGeoParquet,
    csv_decode_polylines, csv_encode_polylines, write_geoparquet,
};
pub use polyline::{Polyline, decode_all, encode_all};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;

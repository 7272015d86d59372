pub mod arrow;
pub mod csv;
pub mod parquet;

pub use arrow::PolylinesToArrow;
pub use csv::{
    CsvPolylineConfig, CsvPolylines, GeometryFormat, csv_decode_polylines, csv_encode_polylines,
};
pub use parquet::{PolylinesToGeoParquet, write_geoparquet};

use crate::error::PolylineError;
use crate::io::arrow::PolylinesToArrow;
use crate::polyline::Polyline;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Writes a RecordBatch with a GeoArrow geometry column to a GeoParquet file (WKB encoded).
///
/// Batches from [`PolylinesToArrow::to_record_batch`] carry a 2D geometry. The third
/// dimension survives only through the `polyline` column (z is part of the encoding)
/// and the `third_dim` / `third_dim_precision` columns that describe it.
pub fn write_geoparquet(batch: &RecordBatch, path: impl AsRef<Path>) -> Result<(), PolylineError> {
    let schema = batch.schema();

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();

    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&schema, &options)
        .map_err(|e| PolylineError::IoError(e.to_string()))?;

    let file = File::create(path.as_ref()).map_err(|e| PolylineError::IoError(e.to_string()))?;
    let mut writer = ArrowWriter::try_new(file, encoder.target_schema(), None)
        .map_err(|e| PolylineError::IoError(e.to_string()))?;

    let encoded_batch = encoder
        .encode_record_batch(batch)
        .map_err(|e| PolylineError::IoError(e.to_string()))?;

    writer
        .write(&encoded_batch)
        .map_err(|e| PolylineError::IoError(e.to_string()))?;

    let kv_metadata = encoder
        .into_keyvalue()
        .map_err(|e| PolylineError::IoError(e.to_string()))?;

    writer.append_key_value_metadata(kv_metadata);
    writer
        .finish()
        .map_err(|e| PolylineError::IoError(e.to_string()))?;

    debug!(rows = batch.num_rows(), path = %path.as_ref().display(), "wrote geoparquet");
    Ok(())
}

pub trait PolylinesToGeoParquet: PolylinesToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), PolylineError>;
}

impl PolylinesToGeoParquet for [Polyline] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), PolylineError> {
        let batch = self.to_record_batch()?;
        write_geoparquet(&batch, path)
    }
}

impl PolylinesToGeoParquet for Vec<Polyline> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), PolylineError> {
        self.as_slice().to_geoparquet(path)
    }
}

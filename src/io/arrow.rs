use crate::error::PolylineError;
use crate::polyline::{Polyline, encode_all};
use arrow_array::{RecordBatch, StringArray, UInt8Array, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::LineStringArray;
use geoarrow_array::builder::LineStringBuilder;
use geoarrow_schema::{Crs, Dimension, LineStringType, Metadata};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`Polyline`]s to Arrow arrays.
///
/// Implemented for `[Polyline]` and `Vec<Polyline>`.
pub trait PolylinesToArrow {
    /// Converts polylines to a 2D GeoArrow LineStringArray (x = lng, y = lat).
    fn to_arrow_line_strings(&self) -> LineStringArray;
    /// Converts polylines to a RecordBatch with polyline, precision, third_dim,
    /// third_dim_precision, num_points, and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, PolylineError>;
}

impl PolylinesToArrow for [Polyline] {
    fn to_arrow_line_strings(&self) -> LineStringArray {
        let typ = LineStringType::new(Dimension::XY, wgs84_metadata());
        let lines: Vec<_> = self.par_iter().map(Polyline::to_line_string).collect();
        LineStringBuilder::from_line_strings(&lines, typ).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, PolylineError> {
        let encoded = encode_all(self)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        let line_array = self.to_arrow_line_strings();
        let polylines: StringArray = encoded.iter().map(|s| Some(s.as_str())).collect();
        let precisions: UInt8Array = self.iter().map(|p| Some(p.header.precision)).collect();
        let third_dims: StringArray = self
            .iter()
            .map(|p| Some(p.header.third_dim.as_str()))
            .collect();
        let third_dim_precisions: UInt8Array = self
            .iter()
            .map(|p| Some(p.header.third_dim_precision))
            .collect();
        let num_points: UInt64Array = self.iter().map(|p| Some(p.len() as u64)).collect();

        let geometry_field = line_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("polyline", DataType::Utf8, false),
            Field::new("precision", DataType::UInt8, false),
            Field::new("third_dim", DataType::Utf8, false),
            Field::new("third_dim_precision", DataType::UInt8, false),
            Field::new("num_points", DataType::UInt64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(polylines),
                Arc::new(precisions),
                Arc::new(third_dims),
                Arc::new(third_dim_precisions),
                Arc::new(num_points),
                Arc::new(line_array.into_arrow()),
            ],
        )
        .map_err(|e| PolylineError::IoError(e.to_string()))
    }
}

impl PolylinesToArrow for Vec<Polyline> {
    fn to_arrow_line_strings(&self) -> LineStringArray {
        self.as_slice().to_arrow_line_strings()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, PolylineError> {
        self.as_slice().to_record_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Header, ThirdDimension};
    use arrow_array::Array;
    use geoarrow_array::GeoArrowArray;

    fn sample() -> Result<Vec<Polyline>, PolylineError> {
        Ok(vec![
            Polyline::decode("BFoz5xJ67i1B1B7PzIhaxL7Y")?,
            Polyline::decode("BlBoz5xJ67i1BU1B7PUzIhaUxL7YU")?,
        ])
    }

    #[test]
    fn test_polylines_to_arrow_line_strings() -> Result<(), PolylineError> {
        let line_array = sample()?.to_arrow_line_strings();
        assert_eq!(line_array.len(), 2);
        Ok(())
    }

    #[test]
    fn test_polylines_to_record_batch() -> Result<(), PolylineError> {
        let batch = sample()?.to_record_batch()?;
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 6);

        let polylines = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| PolylineError::IoError("polyline column is not Utf8".to_string()))?;
        assert_eq!(polylines.value(0), "BFoz5xJ67i1B1B7PzIhaxL7Y");
        assert_eq!(polylines.value(1), "BlBoz5xJ67i1BU1B7PUzIhaUxL7YU");

        let third_dims = batch
            .column(2)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| PolylineError::IoError("third_dim column is not Utf8".to_string()))?;
        assert_eq!(third_dims.value(0), "absent");
        assert_eq!(third_dims.value(1), "altitude");

        let num_points = batch
            .column(4)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .ok_or_else(|| PolylineError::IoError("num_points column is not UInt64".to_string()))?;
        assert_eq!(num_points.value(0), 4);
        Ok(())
    }

    #[test]
    fn test_record_batch_propagates_encode_error() {
        let bad = vec![Polyline::from_coordinates(
            &[(1.0, 2.0)],
            Header::new(5).third_dimension(ThirdDimension::Reserved1, 0),
        )];
        assert!(matches!(
            bad.to_record_batch(),
            Err(PolylineError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_empty_slice() -> Result<(), PolylineError> {
        let polylines: Vec<Polyline> = Vec::new();
        assert_eq!(polylines.as_slice().to_arrow_line_strings().len(), 0);
        assert_eq!(polylines.to_record_batch()?.num_rows(), 0);
        Ok(())
    }
}

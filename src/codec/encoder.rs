use crate::codec::converter::DimensionConverter;
use crate::codec::header::Header;
use crate::coord::Coordinate;
use crate::error::PolylineError;
use tracing::debug;

/// Encodes a sequence of coordinates into a flexible polyline string.
///
/// Latitude and longitude are scaled by `10^header.precision`; when
/// `header.third_dim` is not `Absent` the z value of every coordinate is
/// encoded as well, scaled by `10^header.third_dim_precision`. The encoding is
/// lossy: values are rounded half away from zero at the configured precision.
///
/// # Process
///
/// 1. Validates the header and writes its two varints
/// 2. Creates one converter for latitude, one for longitude, and one for z if configured
/// 3. For each coordinate, appends the zigzag/varint encoded delta of every axis in order
///
/// # Example
/// ```
/// use flexpolyline_rs::{encode, Header};
///
/// let coordinates = [
///     (50.1022829, 8.6982122),
///     (50.1020076, 8.6956695),
///     (50.1006313, 8.6914960),
///     (50.0987800, 8.6875156),
/// ];
/// let encoded = encode(&coordinates, &Header::default()).unwrap();
/// assert_eq!(encoded, "BFoz5xJ67i1B1B7PzIhaxL7Y");
/// ```
///
/// # Errors
///
/// - [`PolylineError::InvalidArgument`] - `coordinates` is empty
/// - [`PolylineError::OutOfRange`] - a header field is outside its bounds, the third
///   dimension kind is reserved, or a coordinate value is not finite or too large to scale
pub fn encode<C: Coordinate>(coordinates: &[C], header: &Header) -> Result<String, PolylineError> {
    if coordinates.is_empty() {
        return Err(PolylineError::InvalidArgument(
            "coordinates must not be empty".to_string(),
        ));
    }

    let has_z = header.third_dim.is_present();
    let per_coordinate = if has_z { 3 } else { 2 };
    let mut result = String::with_capacity(4 + coordinates.len() * per_coordinate * 4);
    header.encode_into(&mut result)?;

    let mut lat = DimensionConverter::new(header.precision);
    let mut lng = DimensionConverter::new(header.precision);
    let mut z = has_z.then(|| DimensionConverter::new(header.third_dim_precision));

    for coord in coordinates {
        lat.encode_value(coord.lat(), &mut result)?;
        lng.encode_value(coord.lng(), &mut result)?;
        if let Some(z) = z.as_mut() {
            z.encode_value(coord.z(), &mut result)?;
        }
    }

    debug!(
        coordinates = coordinates.len(),
        precision = header.precision,
        third_dim = %header.third_dim,
        third_dim_precision = header.third_dim_precision,
        encoded_len = result.len(),
        "encoded polyline"
    );

    Ok(result)
}

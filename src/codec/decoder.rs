use crate::codec::converter::DimensionConverter;
use crate::codec::header::{Header, ThirdDimension};
use crate::coord::LatLngZ;
use crate::error::PolylineError;
use tracing::{debug, warn};

fn check_not_blank(encoded: &str) -> Result<(), PolylineError> {
    if encoded.trim().is_empty() {
        return Err(PolylineError::InvalidArgument(
            "encoded polyline must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Lazy decoder over the coordinates of an encoded polyline.
///
/// The header is parsed when the decoder is created; coordinates are decoded one
/// at a time as the iterator advances. Each item is a `Result`: once an error is
/// yielded the iterator is exhausted. Creating a new decoder over the same string
/// restarts from the first coordinate.
///
/// # Example
/// ```
/// use flexpolyline_rs::Decoder;
///
/// # fn main() -> Result<(), flexpolyline_rs::PolylineError> {
/// let decoder = Decoder::new("BFoz5xJ67i1B1B7PzIhaxL7Y")?;
/// assert_eq!(decoder.header().precision, 5);
///
/// for coordinate in decoder {
///     let coordinate = coordinate?;
///     println!("{}, {}", coordinate.lat, coordinate.lng);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
    index: usize,
    header: Header,
    lat: DimensionConverter,
    lng: DimensionConverter,
    z: Option<DimensionConverter>,
    decoded: usize,
    done: bool,
}

impl<'a> Decoder<'a> {
    /// Parses the header of `encoded` and prepares the per-axis converters.
    ///
    /// # Errors
    ///
    /// - [`PolylineError::InvalidArgument`] - `encoded` is empty or blank
    /// - any header error, see [`Header::decode`]
    pub fn new(encoded: &'a str) -> Result<Self, PolylineError> {
        check_not_blank(encoded)?;
        let bytes = encoded.as_bytes();
        let (header, index) = Header::decode(bytes, 0)?;

        if header.third_dim.is_reserved() {
            warn!(third_dim = %header.third_dim, "decoding polyline with reserved third dimension");
        }

        Ok(Self {
            bytes,
            index,
            header,
            lat: DimensionConverter::new(header.precision),
            lng: DimensionConverter::new(header.precision),
            z: header
                .third_dim
                .is_present()
                .then(|| DimensionConverter::new(header.third_dim_precision)),
            decoded: 0,
            done: false,
        })
    }

    /// The header parsed from the encoded string.
    pub fn header(&self) -> &Header {
        &self.header
    }

    fn decode_next(&mut self) -> Result<LatLngZ, PolylineError> {
        let truncated = |err: PolylineError, coordinate: usize| match err {
            PolylineError::PrematureEnd => PolylineError::TruncatedEncoding { coordinate },
            other => other,
        };

        // Latitude starts a new group, so running out of input inside it is a bare varint error
        let (lat, index) = self.lat.decode_value(self.bytes, self.index)?;

        let (lng, index) = self
            .lng
            .decode_value(self.bytes, index)
            .map_err(|e| truncated(e, self.decoded))?;

        let (z, index) = match self.z.as_mut() {
            Some(converter) => converter
                .decode_value(self.bytes, index)
                .map_err(|e| truncated(e, self.decoded))?,
            None => (0.0, index),
        };

        self.index = index;
        self.decoded += 1;
        Ok(LatLngZ::with_z(lat, lng, z))
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<LatLngZ, PolylineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.index >= self.bytes.len() {
            self.done = true;
            debug!(
                coordinates = self.decoded,
                precision = self.header.precision,
                third_dim = %self.header.third_dim,
                "decoded polyline"
            );
            return None;
        }

        let item = self.decode_next();
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

impl std::iter::FusedIterator for Decoder<'_> {}

/// Decodes an encoded polyline into a list of coordinates.
///
/// Coordinates carry `z = 0` when the polyline has no third dimension.
///
/// # Example
/// ```
/// use flexpolyline_rs::decode;
///
/// let coordinates = decode("BFoz5xJ67i1B1B7PzIhaxL7Y").unwrap();
/// assert_eq!(coordinates.len(), 4);
/// assert!((coordinates[0].lat - 50.10228).abs() < 1e-5);
/// assert!((coordinates[0].lng - 8.69821).abs() < 1e-5);
/// ```
///
/// # Errors
///
/// - [`PolylineError::InvalidArgument`] - `encoded` is empty or blank
/// - [`PolylineError::UnsupportedVersion`] / [`PolylineError::InvalidHeader`] - bad header
/// - [`PolylineError::InvalidCharacter`] - a byte outside the alphabet
/// - [`PolylineError::PrematureEnd`] - input ends inside a varint
/// - [`PolylineError::TruncatedEncoding`] - input ends inside a coordinate group
/// - [`PolylineError::VarintOverflow`] - a varint wider than 64 bits
pub fn decode(encoded: &str) -> Result<Vec<LatLngZ>, PolylineError> {
    Decoder::new(encoded)?.collect()
}

/// Decodes only the header of an encoded polyline.
pub fn decode_header(encoded: &str) -> Result<Header, PolylineError> {
    check_not_blank(encoded)?;
    Header::decode(encoded.as_bytes(), 0).map(|(header, _)| header)
}

/// Returns the third dimension kind of an encoded polyline without decoding its coordinates.
///
/// # Example
/// ```
/// use flexpolyline_rs::{peek_third_dimension, ThirdDimension};
///
/// assert_eq!(peek_third_dimension("BVoz5xJ67i1BU").unwrap(), ThirdDimension::Level);
/// assert_eq!(peek_third_dimension("B1Boz5xJ67i1BU").unwrap(), ThirdDimension::Elevation);
/// ```
pub fn peek_third_dimension(encoded: &str) -> Result<ThirdDimension, PolylineError> {
    decode_header(encoded).map(|header| header.third_dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encoder::encode;

    #[test]
    fn test_decode_2d_example_1() -> Result<(), PolylineError> {
        let coordinates = decode("BFoz5xJ67i1B1B7PzIhaxL7Y")?;
        let expected = [
            (50.10228, 8.69821),
            (50.10201, 8.69567),
            (50.10063, 8.69150),
            (50.09878, 8.68752),
        ];

        assert_eq!(coordinates.len(), expected.len());
        for (coord, (lat, lng)) in coordinates.iter().zip(expected) {
            assert!((coord.lat - lat).abs() < 1e-9);
            assert!((coord.lng - lng).abs() < 1e-9);
            assert_eq!(coord.z, 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_decode_3d_example_1() -> Result<(), PolylineError> {
        let decoder = Decoder::new("BVoz5xJ67i1BU1B7PUzIhaUxL7YU")?;
        assert_eq!(decoder.header().third_dim, ThirdDimension::Level);

        let coordinates: Vec<LatLngZ> = decoder.collect::<Result<_, _>>()?;
        let z: Vec<f64> = coordinates.iter().map(|c| c.z).collect();
        assert_eq!(z, vec![10.0, 20.0, 30.0, 40.0]);
        assert!((coordinates[3].lat - 50.09878).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_lazy_matches_eager() -> Result<(), PolylineError> {
        let encoded = "BF05xgKuy2xCx9B7vUl0OhnR54EqSzpEl-HxjD3pBiGnyGi2CvwFsgD3nD4vB6e";
        let eager = decode(encoded)?;
        let lazy: Vec<LatLngZ> = Decoder::new(encoded)?.collect::<Result<_, _>>()?;
        assert_eq!(eager, lazy);

        // A fresh decoder restarts from the first coordinate
        let first = Decoder::new(encoded)?.next();
        assert_eq!(first, Some(Ok(eager[0])));
        Ok(())
    }

    #[test]
    fn test_header_only_is_empty_sequence() -> Result<(), PolylineError> {
        assert!(decode("BF")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_blank_input() {
        for encoded in ["", "   ", "\n"] {
            assert!(matches!(
                decode(encoded),
                Err(PolylineError::InvalidArgument(_))
            ));
            assert!(matches!(
                peek_third_dimension(encoded),
                Err(PolylineError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_truncated_coordinate_group() {
        // Latitude present, longitude missing
        assert_eq!(
            decode("BFoz5xJ"),
            Err(PolylineError::TruncatedEncoding { coordinate: 0 })
        );
        // Second coordinate missing its z value
        assert_eq!(
            decode("BVoz5xJ67i1BU1B7P"),
            Err(PolylineError::TruncatedEncoding { coordinate: 1 })
        );
    }

    #[test]
    fn test_truncated_varint() {
        assert_eq!(decode("BFoz5x"), Err(PolylineError::PrematureEnd));
        assert_eq!(
            decode("BFoz5xJ67i1"),
            Err(PolylineError::TruncatedEncoding { coordinate: 0 })
        );
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            decode("BFoz5xJ67i1B1B7PzIha!L7Y"),
            Err(PolylineError::InvalidCharacter {
                byte: b'!',
                offset: 20
            })
        );
    }

    #[test]
    fn test_non_ascii_input() {
        assert!(matches!(
            decode("BFoz5xJ\u{e9}"),
            Err(PolylineError::InvalidCharacter { byte: 0xC3, offset: 7 })
        ));
    }

    #[test]
    fn test_iterator_fuses_after_error() -> Result<(), PolylineError> {
        let mut decoder = Decoder::new("BFoz5xJ67i1B*")?;
        assert!(matches!(decoder.next(), Some(Ok(_))));
        assert!(matches!(decoder.next(), Some(Err(_))));
        assert_eq!(decoder.next(), None);
        Ok(())
    }

    #[test]
    fn test_unsupported_version() {
        assert_eq!(
            decode("CFoz5xJ67i1B"),
            Err(PolylineError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_peek_matches_decode_header() -> Result<(), PolylineError> {
        for (kind, encoded) in [
            (ThirdDimension::Absent, "BFoz5xJ67i1B1B7PzIhaxL7Y"),
            (ThirdDimension::Level, "BVoz5xJ67i1BU1B7PUzIhaUxL7YU"),
            (ThirdDimension::Altitude, "BlBoz5xJ67i1BU1B7PUzIhaUxL7YU"),
            (ThirdDimension::Elevation, "B1Boz5xJ67i1BU"),
        ] {
            assert_eq!(peek_third_dimension(encoded)?, kind);
            assert_eq!(Decoder::new(encoded)?.header().third_dim, kind);
        }
        Ok(())
    }

    #[test]
    fn test_peek_ignores_corrupt_body() -> Result<(), PolylineError> {
        assert_eq!(peek_third_dimension("BV!!!")?, ThirdDimension::Level);
        assert!(decode("BV!!!").is_err());
        Ok(())
    }

    #[test]
    fn test_roundtrip_all_precisions_2d() -> Result<(), PolylineError> {
        let raw: [(u64, u64); 5] = [
            (96821474666297905, 78334196549606266),
            (29405294060895017, 70361389340728572),
            (16173544634348013, 17673855782924183),
            (22448654820449524, 13005139703027850),
            (73351231936757857, 78298027377720633),
        ];
        let coordinates: Vec<(f64, f64)> = raw
            .iter()
            .map(|&(a, b)| (a as f64 / 1e15, b as f64 / 1e15))
            .collect();

        for precision in 0..=15u8 {
            let encoded = encode(&coordinates, &Header::new(precision))?;
            let decoded = decode(&encoded)?;
            // f64 spacing near 100 dominates beyond 13 digits
            let tolerance = 10f64.powi(-i32::from(precision)).max(1e-13);
            for (original, restored) in coordinates.iter().zip(&decoded) {
                assert!((original.0 - restored.lat).abs() <= tolerance);
                assert!((original.1 - restored.lng).abs() <= tolerance);
            }
        }
        Ok(())
    }

    #[test]
    fn test_roundtrip_all_precisions_3d() -> Result<(), PolylineError> {
        let coordinates = [
            (52.5199356, 13.3866272, 231.5491),
            (-33.8688197, 151.2092955, -12.0004),
            (0.0, -0.0000001, 8848.86),
            (-89.9999999, 179.9999999, 0.4999),
        ];
        let kinds = [
            ThirdDimension::Level,
            ThirdDimension::Altitude,
            ThirdDimension::Elevation,
            ThirdDimension::Custom1,
            ThirdDimension::Custom2,
        ];

        for third_dim_precision in 0..=9u8 {
            for kind in kinds {
                let header = Header::new(7).third_dimension(kind, third_dim_precision);
                let decoded = decode(&encode(&coordinates, &header)?)?;
                let tolerance = 10f64.powi(-i32::from(third_dim_precision));
                for (original, restored) in coordinates.iter().zip(&decoded) {
                    assert!((original.0 - restored.lat).abs() <= 1e-7);
                    assert!((original.1 - restored.lng).abs() <= 1e-7);
                    assert!((original.2 - restored.z).abs() <= tolerance);
                }
            }
        }
        Ok(())
    }
}

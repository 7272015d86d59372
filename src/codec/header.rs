use crate::core::constants::{DEFAULT_PRECISION, FORMAT_VERSION, MAX_PRECISION};
use crate::core::varint;
use crate::error::PolylineError;
use serde::{Deserialize, Serialize};
use tracing::trace;

const PRECISION_MASK: u64 = 0xF;
const THIRD_DIM_SHIFT: u32 = 4;
const THIRD_DIM_MASK: u64 = 0x7;
const THIRD_DIM_PRECISION_SHIFT: u32 = 7;
const HEADER_BITS: u32 = 11;

/// Kind of the optional third coordinate component.
///
/// The discriminants are the 3-bit values stored in the header.
/// `Reserved1` and `Reserved2` can be decoded but are rejected by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThirdDimension {
    /// No third dimension, coordinates are 2D
    #[default]
    Absent = 0,
    Level = 1,
    Altitude = 2,
    Elevation = 3,
    Reserved1 = 4,
    Reserved2 = 5,
    Custom1 = 6,
    Custom2 = 7,
}

impl ThirdDimension {
    /// Whether coordinates carry a z component.
    pub fn is_present(self) -> bool {
        self != ThirdDimension::Absent
    }

    /// Whether this kind is one of the two reserved header values.
    pub fn is_reserved(self) -> bool {
        matches!(self, ThirdDimension::Reserved1 | ThirdDimension::Reserved2)
    }

    /// Short key naming the z component in keyed (object) representations.
    pub fn key(self) -> Option<&'static str> {
        match self {
            ThirdDimension::Absent => None,
            ThirdDimension::Level => Some("lvl"),
            ThirdDimension::Altitude => Some("alt"),
            ThirdDimension::Elevation => Some("elv"),
            ThirdDimension::Reserved1 => Some("rsv1"),
            ThirdDimension::Reserved2 => Some("rsv2"),
            ThirdDimension::Custom1 => Some("cst1"),
            ThirdDimension::Custom2 => Some("cst2"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThirdDimension::Absent => "absent",
            ThirdDimension::Level => "level",
            ThirdDimension::Altitude => "altitude",
            ThirdDimension::Elevation => "elevation",
            ThirdDimension::Reserved1 => "reserved1",
            ThirdDimension::Reserved2 => "reserved2",
            ThirdDimension::Custom1 => "custom1",
            ThirdDimension::Custom2 => "custom2",
        }
    }
}

impl TryFrom<u8> for ThirdDimension {
    type Error = PolylineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ThirdDimension::Absent),
            1 => Ok(ThirdDimension::Level),
            2 => Ok(ThirdDimension::Altitude),
            3 => Ok(ThirdDimension::Elevation),
            4 => Ok(ThirdDimension::Reserved1),
            5 => Ok(ThirdDimension::Reserved2),
            6 => Ok(ThirdDimension::Custom1),
            7 => Ok(ThirdDimension::Custom2),
            _ => Err(PolylineError::OutOfRange(format!(
                "third dimension {} not in 0..=7",
                value
            ))),
        }
    }
}

impl std::fmt::Display for ThirdDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polyline header: format version, coordinate precisions and third dimension kind.
///
/// # Wire Format
///
/// Two varints:
///
/// | Varint | Content                                                         |
/// |--------|-----------------------------------------------------------------|
/// | 0      | Format version (currently 1)                                    |
/// | 1      | `third_dim_precision << 7 \| third_dim << 4 \| precision`       |
///
/// # Example
/// ```
/// use flexpolyline_rs::{Header, ThirdDimension};
///
/// let header = Header::new(5).third_dimension(ThirdDimension::Altitude, 0);
/// assert_eq!(header.encode().unwrap(), "BlB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default = "default_version")]
    pub version: u64,
    /// Decimal digits kept for latitude and longitude (0-15)
    pub precision: u8,
    #[serde(default)]
    pub third_dim: ThirdDimension,
    /// Decimal digits kept for the third dimension (0-15)
    #[serde(default)]
    pub third_dim_precision: u8,
}

fn default_version() -> u64 {
    FORMAT_VERSION
}

impl Default for Header {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl Header {
    /// Header for 2D coordinates at the given precision.
    pub fn new(precision: u8) -> Self {
        Self {
            version: FORMAT_VERSION,
            precision,
            third_dim: ThirdDimension::Absent,
            third_dim_precision: 0,
        }
    }

    /// Sets the third dimension kind and its precision.
    pub fn third_dimension(mut self, third_dim: ThirdDimension, precision: u8) -> Self {
        self.third_dim = third_dim;
        self.third_dim_precision = precision;
        self
    }

    /// Checks every field against its bit width. Reserved third dimension kinds are rejected.
    pub fn validate(&self) -> Result<(), PolylineError> {
        if self.version != FORMAT_VERSION {
            return Err(PolylineError::UnsupportedVersion(self.version));
        }
        if self.precision > MAX_PRECISION {
            return Err(PolylineError::OutOfRange(format!(
                "precision {} not in 0..={}",
                self.precision, MAX_PRECISION
            )));
        }
        if self.third_dim_precision > MAX_PRECISION {
            return Err(PolylineError::OutOfRange(format!(
                "third dimension precision {} not in 0..={}",
                self.third_dim_precision, MAX_PRECISION
            )));
        }
        if self.third_dim.is_reserved() {
            return Err(PolylineError::OutOfRange(format!(
                "third dimension {} is reserved",
                self.third_dim as u8
            )));
        }
        Ok(())
    }

    /// The packed second header value.
    pub fn packed(&self) -> u64 {
        (u64::from(self.third_dim_precision) << THIRD_DIM_PRECISION_SHIFT)
            | ((self.third_dim as u64) << THIRD_DIM_SHIFT)
            | u64::from(self.precision)
    }

    /// Validates the header and appends its two varints to `out`.
    pub fn encode_into(&self, out: &mut String) -> Result<(), PolylineError> {
        self.validate()?;
        varint::encode_into(FORMAT_VERSION, out);
        varint::encode_into(self.packed(), out);
        Ok(())
    }

    /// Validates the header and returns its two varints.
    pub fn encode(&self) -> Result<String, PolylineError> {
        let mut out = String::with_capacity(4);
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Reads the header starting at `index`, returning it with the index of the first body byte.
    ///
    /// # Errors
    ///
    /// - [`PolylineError::UnsupportedVersion`] - first varint is not [`FORMAT_VERSION`]
    /// - [`PolylineError::InvalidHeader`] - second varint has bits above the 11-bit layout
    /// - any varint error ([`PolylineError::PrematureEnd`], [`PolylineError::InvalidCharacter`], ...)
    pub fn decode(bytes: &[u8], index: usize) -> Result<(Self, usize), PolylineError> {
        let (version, index) = varint::decode(bytes, index)?;
        if version != FORMAT_VERSION {
            return Err(PolylineError::UnsupportedVersion(version));
        }

        let (packed, index) = varint::decode(bytes, index)?;
        if packed >> HEADER_BITS != 0 {
            return Err(PolylineError::InvalidHeader(packed));
        }

        let header = Self {
            version,
            precision: (packed & PRECISION_MASK) as u8,
            third_dim: ThirdDimension::try_from(((packed >> THIRD_DIM_SHIFT) & THIRD_DIM_MASK) as u8)?,
            third_dim_precision: ((packed >> THIRD_DIM_PRECISION_SHIFT) & PRECISION_MASK) as u8,
        };
        trace!(?header, body_offset = index, "decoded polyline header");

        Ok((header, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ThirdDimension; 8] = [
        ThirdDimension::Absent,
        ThirdDimension::Level,
        ThirdDimension::Altitude,
        ThirdDimension::Elevation,
        ThirdDimension::Reserved1,
        ThirdDimension::Reserved2,
        ThirdDimension::Custom1,
        ThirdDimension::Custom2,
    ];

    #[test]
    fn test_default_header() {
        let header = Header::default();
        assert_eq!(header.version, FORMAT_VERSION);
        assert_eq!(header.precision, 5);
        assert_eq!(header.third_dim, ThirdDimension::Absent);
        assert_eq!(header.third_dim_precision, 0);
    }

    #[test]
    fn test_encode_known_headers() -> Result<(), PolylineError> {
        assert_eq!(Header::new(5).encode()?, "BF");
        assert_eq!(
            Header::new(5)
                .third_dimension(ThirdDimension::Level, 0)
                .encode()?,
            "BV"
        );
        assert_eq!(
            Header::new(5)
                .third_dimension(ThirdDimension::Elevation, 0)
                .encode()?,
            "B1B"
        );
        Ok(())
    }

    #[test]
    fn test_roundtrip_full_domain() -> Result<(), PolylineError> {
        for precision in 0..=MAX_PRECISION {
            for third_dim_precision in 0..=MAX_PRECISION {
                for third_dim in ALL_KINDS.iter().filter(|k| !k.is_reserved()) {
                    let header =
                        Header::new(precision).third_dimension(*third_dim, third_dim_precision);
                    let encoded = header.encode()?;
                    let (decoded, next) = Header::decode(encoded.as_bytes(), 0)?;
                    assert_eq!(decoded, header);
                    assert_eq!(next, encoded.len());
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_reserved_kinds_rejected_on_encode() {
        for kind in [ThirdDimension::Reserved1, ThirdDimension::Reserved2] {
            let result = Header::new(5).third_dimension(kind, 2).encode();
            assert!(matches!(result, Err(PolylineError::OutOfRange(_))));
        }
    }

    #[test]
    fn test_reserved_kinds_accepted_on_decode() -> Result<(), PolylineError> {
        // version 1, packed = 4 << 4 | 5 = 69
        let (header, _) = Header::decode(b"BlC", 0)?;
        assert_eq!(header.third_dim, ThirdDimension::Reserved1);
        assert_eq!(header.precision, 5);
        Ok(())
    }

    #[test]
    fn test_precision_out_of_range() {
        assert!(matches!(
            Header::new(16).encode(),
            Err(PolylineError::OutOfRange(_))
        ));
        assert!(matches!(
            Header::new(5)
                .third_dimension(ThirdDimension::Altitude, 16)
                .encode(),
            Err(PolylineError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_third_dimension_from_u8() {
        for (value, kind) in ALL_KINDS.iter().enumerate() {
            assert_eq!(ThirdDimension::try_from(value as u8), Ok(*kind));
        }
        assert!(matches!(
            ThirdDimension::try_from(8),
            Err(PolylineError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        assert_eq!(
            Header::decode(b"CF", 0),
            Err(PolylineError::UnsupportedVersion(2))
        );
        assert_eq!(
            Header::decode(b"AF", 0),
            Err(PolylineError::UnsupportedVersion(0))
        );
    }

    #[test]
    fn test_header_bits_beyond_layout() {
        // packed = 1 << 11 encodes as "ggC"
        let mut encoded = String::from("B");
        varint::encode_into(1 << 11, &mut encoded);
        assert_eq!(
            Header::decode(encoded.as_bytes(), 0),
            Err(PolylineError::InvalidHeader(1 << 11))
        );
    }

    #[test]
    fn test_truncated_header() {
        assert_eq!(Header::decode(b"B", 0), Err(PolylineError::PrematureEnd));
        assert_eq!(Header::decode(b"Bl", 0), Err(PolylineError::PrematureEnd));
    }

    #[test]
    fn test_serde_names() -> Result<(), serde_json::Error> {
        let header = Header::new(6).third_dimension(ThirdDimension::Elevation, 2);
        let json = serde_json::to_string(&header)?;
        assert!(json.contains("\"elevation\""));

        let parsed: Header = serde_json::from_str(r#"{"precision":7}"#)?;
        assert_eq!(parsed, Header::new(7));
        Ok(())
    }
}

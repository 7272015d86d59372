use crate::codec::{Decoder, Header, ThirdDimension, encode};
use crate::coord::{Coordinate, LatLngZ};
use crate::core::constants::MAX_PRECISION;
use crate::error::PolylineError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// A decoded (or to-be-encoded) polyline: its header and coordinates.
///
/// # Example
///
/// ```
/// use flexpolyline_rs::{Header, Polyline, ThirdDimension};
///
/// # fn main() -> Result<(), flexpolyline_rs::PolylineError> {
/// let header = Header::new(5).third_dimension(ThirdDimension::Altitude, 0);
/// let polyline = Polyline::from_coordinates(&[(50.1022829, 8.6982122, 10.0)], header);
/// let encoded = polyline.encode()?;
///
/// let restored = Polyline::decode(&encoded)?;
/// assert_eq!(restored.header, header);
/// assert_eq!(restored.coordinates[0].z, 10.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub header: Header,
    pub coordinates: Vec<LatLngZ>,
}

impl Polyline {
    pub fn new(header: Header, coordinates: Vec<LatLngZ>) -> Self {
        Self {
            header,
            coordinates,
        }
    }

    /// Create a Polyline from any coordinate type.
    pub fn from_coordinates<C: Coordinate>(coordinates: &[C], header: Header) -> Self {
        Self::new(header, coordinates.iter().map(LatLngZ::from).collect())
    }

    /// Encodes this polyline using its header.
    pub fn encode(&self) -> Result<String, PolylineError> {
        encode(&self.coordinates, &self.header)
    }

    /// Decodes an encoded polyline, keeping the header it declares.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let decoder = Decoder::new(encoded)?;
        let header = *decoder.header();
        let coordinates = decoder.collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(header, coordinates))
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Converts to a JSON object whose coordinates are keyed objects.
    ///
    /// Each coordinate has `lat` and `lng` keys, plus the third dimension key
    /// (`lvl`, `alt`, `elv`, `cst1`, `cst2`) when the polyline has one.
    pub fn to_keyed_json(&self) -> Value {
        let key = self.header.third_dim.key();
        let coordinates = self
            .coordinates
            .iter()
            .map(|c| {
                let mut entry = Map::new();
                entry.insert("lat".to_string(), Value::from(c.lat));
                entry.insert("lng".to_string(), Value::from(c.lng));
                if let Some(key) = key {
                    entry.insert(key.to_string(), Value::from(c.z));
                }
                Value::Object(entry)
            })
            .collect();

        let mut root = Map::new();
        root.insert("precision".to_string(), Value::from(self.header.precision));
        root.insert(
            "third_dim".to_string(),
            Value::from(self.header.third_dim.as_str()),
        );
        root.insert(
            "third_dim_precision".to_string(),
            Value::from(self.header.third_dim_precision),
        );
        root.insert("coordinates".to_string(), Value::Array(coordinates));
        Value::Object(root)
    }

    /// Reads the representation produced by [`Polyline::to_keyed_json`].
    ///
    /// Missing header fields fall back to [`Header::default`] values.
    pub fn from_keyed_json(value: &Value) -> Result<Self, PolylineError> {
        let object = value
            .as_object()
            .ok_or_else(|| PolylineError::ParseError("expected a JSON object".to_string()))?;

        let mut header = Header::default();
        if let Some(precision) = object.get("precision") {
            header.precision = json_u8(precision, "precision")?;
        }
        if let Some(third_dim) = object.get("third_dim") {
            header.third_dim = serde_json::from_value(third_dim.clone())
                .map_err(|e| PolylineError::ParseError(e.to_string()))?;
        }
        if let Some(precision) = object.get("third_dim_precision") {
            header.third_dim_precision = json_u8(precision, "third_dim_precision")?;
        }

        let entries = object
            .get("coordinates")
            .and_then(Value::as_array)
            .ok_or_else(|| PolylineError::ParseError("missing 'coordinates' array".to_string()))?;

        let key = header.third_dim.key();
        let coordinates = entries
            .iter()
            .map(|entry| {
                let lat = json_f64(entry, "lat")?;
                let lng = json_f64(entry, "lng")?;
                let z = match key {
                    Some(key) => json_f64(entry, key)?,
                    None => 0.0,
                };
                Ok(LatLngZ::with_z(lat, lng, z))
            })
            .collect::<Result<Vec<_>, PolylineError>>()?;

        Ok(Self::new(header, coordinates))
    }
}

fn json_u8(value: &Value, name: &str) -> Result<u8, PolylineError> {
    value
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| PolylineError::ParseError(format!("'{}' must be a small integer", name)))
}

fn json_f64(entry: &Value, key: &str) -> Result<f64, PolylineError> {
    entry
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| PolylineError::ParseError(format!("coordinate missing numeric '{}'", key)))
}

/// Decodes many encoded polylines in parallel.
///
/// Each string is decoded independently; results keep the input order.
pub fn decode_all<S: AsRef<str> + Sync>(encoded: &[S]) -> Vec<Result<Polyline, PolylineError>> {
    encoded
        .par_iter()
        .map(|s| Polyline::decode(s.as_ref()))
        .collect()
}

/// Encodes many polylines in parallel, keeping the input order.
pub fn encode_all(polylines: &[Polyline]) -> Vec<Result<String, PolylineError>> {
    polylines.par_iter().map(Polyline::encode).collect()
}

/// Text form `{(precision); [(lat, lng), ]}`, or `{(precision, third_dim_precision, third_dim); [(lat, lng, z), ]}`.
///
/// Values are written with the header precisions unless the formatter precision
/// (`{:.N}`) overrides them.
impl std::fmt::Display for Polyline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = &self.header;
        let prec_2d = f.precision().unwrap_or(header.precision as usize);
        let prec_3d = f.precision().unwrap_or(header.third_dim_precision as usize);

        if header.third_dim.is_present() {
            write!(
                f,
                "{{({}, {}, {}); [",
                header.precision, header.third_dim_precision, header.third_dim as u8
            )?;
            for c in &self.coordinates {
                write!(
                    f,
                    "({:.*}, {:.*}, {:.*}), ",
                    prec_2d, c.lat, prec_2d, c.lng, prec_3d, c.z
                )?;
            }
        } else {
            write!(f, "{{({}); [", header.precision)?;
            for c in &self.coordinates {
                write!(f, "({:.*}, {:.*}), ", prec_2d, c.lat, prec_2d, c.lng)?;
            }
        }
        write!(f, "]}}")
    }
}

fn strip<'a>(s: &'a str, prefix: &str, suffix: &str) -> Result<&'a str, PolylineError> {
    s.strip_prefix(prefix)
        .and_then(|s| s.strip_suffix(suffix))
        .ok_or_else(|| PolylineError::ParseError(format!("expected '{}...{}' in '{}'", prefix, suffix, s)))
}

fn parse_precision(s: &str) -> Result<u8, PolylineError> {
    let value: u8 = s
        .trim()
        .parse()
        .map_err(|_| PolylineError::ParseError(format!("invalid precision '{}'", s.trim())))?;
    if value > MAX_PRECISION {
        return Err(PolylineError::OutOfRange(format!(
            "precision {} not in 0..={}",
            value, MAX_PRECISION
        )));
    }
    Ok(value)
}

fn parse_header(s: &str) -> Result<Header, PolylineError> {
    let fields: Vec<&str> = strip(s.trim(), "(", ")")?.split(',').collect();
    match fields.as_slice() {
        [precision] => Ok(Header::new(parse_precision(precision)?)),
        [precision, third_dim_precision, third_dim] => {
            let kind: u8 = third_dim.trim().parse().map_err(|_| {
                PolylineError::ParseError(format!("invalid third dimension '{}'", third_dim.trim()))
            })?;
            let kind = ThirdDimension::try_from(kind)?;
            if !kind.is_present() {
                return Err(PolylineError::ParseError(
                    "3D header with absent third dimension".to_string(),
                ));
            }
            Ok(Header::new(parse_precision(precision)?)
                .third_dimension(kind, parse_precision(third_dim_precision)?))
        }
        _ => Err(PolylineError::ParseError(format!(
            "header must have 1 or 3 fields, got {}",
            fields.len()
        ))),
    }
}

fn parse_value(s: &str) -> Result<f64, PolylineError> {
    s.trim()
        .parse()
        .map_err(|_| PolylineError::ParseError(format!("invalid number '{}'", s.trim())))
}

impl FromStr for Polyline {
    type Err = PolylineError;

    /// Parses the text form written by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = strip(s.trim(), "{", "}")?;
        let (header, body) = inner
            .split_once(';')
            .ok_or_else(|| PolylineError::ParseError("missing ';' after header".to_string()))?;
        let header = parse_header(header)?;
        let body = strip(body.trim(), "[", "]")?;

        let mut items = body.split('(');
        if items.next().is_some_and(|lead| !lead.trim().is_empty()) {
            return Err(PolylineError::ParseError(format!(
                "unexpected text before first coordinate in '{}'",
                body
            )));
        }

        let has_z = header.third_dim.is_present();
        let coordinates = items
            .map(|item| {
                let item = item.trim_end().trim_end_matches(',').trim_end();
                let text = item.strip_suffix(')').ok_or_else(|| {
                    PolylineError::ParseError(format!("unterminated coordinate '({}'", item))
                })?;
                let values = text
                    .split(',')
                    .map(parse_value)
                    .collect::<Result<Vec<_>, _>>()?;
                match (values.as_slice(), has_z) {
                    ([lat, lng], false) => Ok(LatLngZ::new(*lat, *lng)),
                    ([lat, lng, z], true) => Ok(LatLngZ::with_z(*lat, *lng, *z)),
                    _ => Err(PolylineError::ParseError(format!(
                        "expected {} components in '({})'",
                        if has_z { 3 } else { 2 },
                        text
                    ))),
                }
            })
            .collect::<Result<Vec<_>, PolylineError>>()?;

        Ok(Self::new(header, coordinates))
    }
}

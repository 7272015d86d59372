use crate::coord::LatLngZ;
use crate::error::PolylineError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, PolylineError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

fn geojson_root(s: &str) -> Result<geojson::Geometry, PolylineError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| PolylineError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => Ok(geom),
        GeoJson::Feature(feat) => feat.geometry.ok_or_else(|| {
            PolylineError::GeometryParseError("Feature has no geometry".to_string())
        }),
        GeoJson::FeatureCollection(_) => Err(PolylineError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

/// Parses a GeoJSON geometry or feature into a `geo_types::Geometry`.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, PolylineError> {
    Geometry::try_from(geojson_root(s)?)
        .map_err(|e| PolylineError::GeometryParseError(e.to_string()))
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, PolylineError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| PolylineError::GeometryParseError(e.to_string()))?;

    wkt.try_into()
        .map_err(|_| PolylineError::GeometryParseError("Failed to convert WKT to geometry".to_string()))
}

fn position_to_coordinate(position: &[f64]) -> Result<LatLngZ, PolylineError> {
    match position {
        [lng, lat] => Ok(LatLngZ::new(*lat, *lng)),
        [lng, lat, z, ..] => Ok(LatLngZ::with_z(*lat, *lng, *z)),
        _ => Err(PolylineError::GeometryParseError(format!(
            "position needs at least 2 values, got {}",
            position.len()
        ))),
    }
}

/// Extracts the vertices of a point-like or line geometry as coordinates.
///
/// GeoJSON positions keep their third value as `z`. WKT goes through
/// `geo_types`, which is 2D, so `z` is 0.
pub fn parse_coordinates(s: &str) -> Result<Vec<LatLngZ>, PolylineError> {
    let trimmed = s.trim();
    if !trimmed.starts_with('{') {
        return geometry_coordinates(&parse_wkt(trimmed)?);
    }

    match geojson_root(trimmed)?.value {
        geojson::Value::Point(position) => Ok(vec![position_to_coordinate(&position)?]),
        geojson::Value::MultiPoint(positions) | geojson::Value::LineString(positions) => positions
            .iter()
            .map(|p| position_to_coordinate(p))
            .collect(),
        _ => Err(PolylineError::GeometryParseError(
            "only LineString, Point and MultiPoint can be encoded".to_string(),
        )),
    }
}

/// Vertices of a `LineString`, `Point` or `MultiPoint` (x = lng, y = lat).
pub(crate) fn geometry_coordinates(geom: &Geometry<f64>) -> Result<Vec<LatLngZ>, PolylineError> {
    match geom {
        Geometry::LineString(line) => Ok(line.coords().map(LatLngZ::from).collect()),
        Geometry::Point(pt) => Ok(vec![LatLngZ::from(pt)]),
        Geometry::MultiPoint(points) => Ok(points.iter().map(LatLngZ::from).collect()),
        _ => Err(PolylineError::GeometryParseError(
            "only LineString, Point and MultiPoint can be encoded".to_string(),
        )),
    }
}

use crate::codec::Header;
use crate::error::PolylineError;
use crate::geom::parse::geometry_coordinates;
use crate::polyline::Polyline;
use geo_types::{Coord, Geometry, LineString};
use wkt::ToWkt;

impl Polyline {
    /// Builds a polyline from a `LineString`, `Point` or `MultiPoint`.
    ///
    /// # Example
    /// ```
    /// use flexpolyline_rs::{Header, Polyline, parse_geometry};
    ///
    /// # fn main() -> Result<(), flexpolyline_rs::PolylineError> {
    /// let geom = parse_geometry("LINESTRING(8.6982122 50.1022829, 8.6956695 50.1020076)")?;
    /// let polyline = Polyline::from_geometry(&geom, Header::default())?;
    /// assert_eq!(polyline.encode()?, "BFoz5xJ67i1B1B7P");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_geometry(geom: &Geometry<f64>, header: Header) -> Result<Self, PolylineError> {
        Ok(Self::new(header, geometry_coordinates(geom)?))
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(self.coordinates.iter().copied().map(Coord::from).collect())
    }

    /// 2D WKT `LINESTRING`; any third dimension is dropped.
    pub fn to_wkt(&self) -> String {
        self.to_line_string().wkt_string()
    }

    /// GeoJSON `LineString`. Positions are `[lng, lat]`, or `[lng, lat, z]`
    /// when the header declares a third dimension.
    pub fn to_geojson(&self) -> geojson::Geometry {
        if !self.header.third_dim.is_present() {
            return geojson::Geometry::from(&self.to_line_string());
        }
        let positions = self
            .coordinates
            .iter()
            .map(|c| vec![c.lng, c.lat, c.z])
            .collect();
        geojson::Geometry::new(geojson::Value::LineString(positions))
    }
}

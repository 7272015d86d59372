use crate::codec::Header;
use crate::error::PolylineError;
use crate::geom::parse_coordinates;
use crate::polyline::Polyline;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "LINESTRING(...)")
    #[default]
    Wkt,
    /// GeoJSON format
    GeoJson,
}

#[derive(Debug, Clone)]
pub struct CsvPolylineConfig {
    /// Column read by the conversion: geometry when encoding, polylines when decoding.
    pub column: String,
    pub exclude_columns: Vec<String>,
    pub header: Header,
    pub geometry_format: GeometryFormat,
}

impl CsvPolylineConfig {
    /// Create config reading from `column`.
    ///
    /// # Example
    /// ```
    /// use flexpolyline_rs::{CsvPolylineConfig, GeometryFormat, Header, ThirdDimension};
    ///
    /// let config = CsvPolylineConfig::new("route")
    ///     .header(Header::new(6).third_dimension(ThirdDimension::Elevation, 1))
    ///     .exclude(vec!["notes".into()])
    ///     .geometry_format(GeometryFormat::GeoJson);
    /// ```
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            exclude_columns: Vec::new(),
            header: Header::default(),
            geometry_format: GeometryFormat::default(),
        }
    }

    /// Header used when encoding. Ignored by decoding, which uses each polyline's own header.
    pub fn header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    // Geometry written by decoding.
    pub fn geometry_format(mut self, format: GeometryFormat) -> Self {
        self.geometry_format = format;
        self
    }
}

pub trait CsvPolylines {
    fn to_polyline_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPolylineConfig,
    ) -> Result<usize, PolylineError>;

    fn to_geometry_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPolylineConfig,
    ) -> Result<usize, PolylineError>;
}

impl<P: AsRef<Path>> CsvPolylines for P {
    fn to_polyline_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPolylineConfig,
    ) -> Result<usize, PolylineError> {
        csv_encode_polylines(self, output_path, config)
    }

    fn to_geometry_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPolylineConfig,
    ) -> Result<usize, PolylineError> {
        csv_decode_polylines(self, output_path, config)
    }
}

/// Rewrites a CSV row by row, replacing the configured column with a new leading one.
fn transform_csv<F>(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvPolylineConfig,
    output_column: &str,
    mut convert: F,
) -> Result<usize, PolylineError>
where
    F: FnMut(&str) -> Result<String, PolylineError>,
{
    if config.column.is_empty() {
        return Err(PolylineError::CsvError(
            "Column name cannot be empty".to_string(),
        ));
    }

    let file = File::open(csv_path).map_err(|e| PolylineError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| PolylineError::CsvError(e.to_string()))?
        .clone();

    let source_idx = headers
        .iter()
        .position(|h| h == config.column)
        .ok_or_else(|| PolylineError::CsvError(format!("Column '{}' not found", config.column)))?;

    let mut exclude_indices = HashSet::new();
    exclude_indices.insert(source_idx);
    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    // Rows go to a temporary file next to the output, which only replaces it on success.
    let output_path = output_path.as_ref();
    let output_dir = output_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staging = NamedTempFile::new_in(output_dir)
        .map_err(|e| PolylineError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(staging);

    let mut header_row: Vec<&str> = vec![output_column];
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| PolylineError::CsvError(e.to_string()))?;

    let mut rows = 0;
    for result in reader.records() {
        let record = result.map_err(|e| PolylineError::CsvError(e.to_string()))?;
        let value = record.get(source_idx).ok_or_else(|| {
            PolylineError::CsvError(format!("Missing column at index {}", source_idx))
        })?;

        let mut row: Vec<String> = vec![convert(value)?];
        for (i, field) in record.iter().enumerate() {
            if !exclude_indices.contains(&i) {
                row.push(field.to_string());
            }
        }
        writer
            .write_record(&row)
            .map_err(|e| PolylineError::CsvError(e.to_string()))?;
        rows += 1;
    }

    let staging = writer
        .into_inner()
        .map_err(|e| PolylineError::IoError(e.to_string()))?;
    staging
        .persist(output_path)
        .map_err(|e| PolylineError::IoError(e.to_string()))?;

    debug!(rows, column = %config.column, output = output_column, "converted csv");
    Ok(rows)
}

/// Encodes the geometry column (WKT or GeoJSON) of a CSV file into a leading `polyline` column.
///
/// Streams rows to the output; returns the number of rows written.
///
/// ```no_run
/// use flexpolyline_rs::{csv_encode_polylines, CsvPolylineConfig};
///
/// let config = CsvPolylineConfig::new("geometry").exclude(vec!["Geo Point".into()]);
/// csv_encode_polylines("routes.csv", "encoded.csv", &config).unwrap();
/// ```
pub fn csv_encode_polylines(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvPolylineConfig,
) -> Result<usize, PolylineError> {
    config.header.validate()?;
    transform_csv(csv_path, output_path, config, "polyline", |value| {
        Polyline::new(config.header, parse_coordinates(value)?).encode()
    })
}

/// Decodes the polyline column of a CSV file into a leading `geometry` column.
pub fn csv_decode_polylines(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvPolylineConfig,
) -> Result<usize, PolylineError> {
    transform_csv(csv_path, output_path, config, "geometry", |value| {
        let polyline = Polyline::decode(value.trim())?;
        Ok(match config.geometry_format {
            GeometryFormat::Wkt => polyline.to_wkt(),
            GeometryFormat::GeoJson => polyline.to_geojson().to_string(),
        })
    })
}

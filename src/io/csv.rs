use crate::error::GeoboxError;
use crate::geobox::Geobox;
use crate::geom::parse_geometry;
use crate::index::DEFAULT_DEPTH;
use csv::StringRecord;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Rows encoded together before being written out
const BATCH_SIZE: usize = 4096;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to geobox conversion.
#[derive(Debug, Clone)]
pub struct CsvGeoboxConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub depth: u32,
    pub include_cell_geometry: Option<GeometryFormat>,
}

impl CsvGeoboxConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use geobox::CsvGeoboxConfig;
    ///
    /// let config = CsvGeoboxConfig::new("geometry", 24);
    /// ```
    pub fn new(geometry_column: impl Into<String>, depth: u32) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            depth,
            include_cell_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use geobox::CsvGeoboxConfig;
    ///
    /// let config = CsvGeoboxConfig::from_coords("Longitude", "Latitude", 32);
    /// ```
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        depth: u32,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            depth,
            include_cell_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Include the cell polygon of each code in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

impl Default for CsvGeoboxConfig {
    fn default() -> Self {
        Self::from_coords("longitude", "latitude", DEFAULT_DEPTH)
    }
}

pub trait CsvToGeobox {
    fn to_geobox_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeoboxConfig,
    ) -> Result<(), GeoboxError>;
}

impl<P: AsRef<Path>> CsvToGeobox for P {
    fn to_geobox_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeoboxConfig,
    ) -> Result<(), GeoboxError> {
        csv_to_geobox_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

fn find_column(headers: &StringRecord, name: &str, label: &str) -> Result<usize, GeoboxError> {
    if name.is_empty() {
        return Err(GeoboxError::CsvError(format!(
            "{} column name cannot be empty",
            label
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| GeoboxError::CsvError(format!("{} column '{}' not found", label, name)))
}

fn parse_coordinate(record: &StringRecord, idx: usize, label: &str) -> Result<f64, GeoboxError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| {
            GeoboxError::CsvError(format!("Missing {} column at index {}", label, idx))
        })?
        .trim();

    raw.parse()
        .map_err(|_| GeoboxError::CsvError(format!("Invalid {}: '{}'", label, raw)))
}

fn encode_record(
    record: &StringRecord,
    source: &SourceIndices,
    depth: u32,
) -> Result<Vec<Geobox>, GeoboxError> {
    match source {
        SourceIndices::Geometry(idx) => {
            let geom_str = record.get(*idx).ok_or_else(|| {
                GeoboxError::CsvError(format!("Missing geometry column at index {}", idx))
            })?;
            let geom = parse_geometry(geom_str)?;
            Ok(Geobox::from_geometry(geom, depth))
        }
        SourceIndices::Coordinates { lon_idx, lat_idx } => {
            let lon = parse_coordinate(record, *lon_idx, "longitude")?;
            let lat = parse_coordinate(record, *lat_idx, "latitude")?;
            Ok(vec![Geobox::with_depth(lon, lat, depth)])
        }
    }
}

fn write_batch<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    records: &[StringRecord],
    source: &SourceIndices,
    exclude_indices: &HashSet<usize>,
    config: &CsvGeoboxConfig,
) -> Result<usize, GeoboxError> {
    let encoded: Vec<Vec<Geobox>> = records
        .par_iter()
        .map(|record| encode_record(record, source, config.depth))
        .collect::<Result<_, _>>()?;

    let mut written = 0;
    for (record, boxes) in records.iter().zip(encoded) {
        if boxes.is_empty() {
            log::warn!(
                "skipping row at line {}: geometry has no encodable point",
                record.position().map_or(0, |p| p.line())
            );
            continue;
        }

        for gbox in boxes {
            let mut row: Vec<String> = vec![gbox.code().to_string(), gbox.id()];

            if let Some(format) = config.include_cell_geometry {
                let polygon = gbox.to_polygon();
                row.push(match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                });
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| GeoboxError::CsvError(e.to_string()))?;
            written += 1;
        }
    }

    Ok(written)
}

/// Converts a CSV file with geometry or longitude/latitude columns to a CSV with geobox codes.
///
/// Each output row starts with `geobox_code` and `geobox_id`, then
/// `geobox_geometry` when requested, then the remaining input columns.
/// Source columns are always dropped. Rows are read and encoded in batches,
/// so memory stays bounded for large files.
///
/// # Example
///
/// ```no_run
/// use geobox::{csv_to_geobox_csv, CsvGeoboxConfig, GeometryFormat};
///
/// let config = CsvGeoboxConfig::from_coords("Longitude", "Latitude", 32)
///     .exclude(vec!["Notes".into()])
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_geobox_csv("landmarks.csv", "landmarks_geobox.csv", &config).unwrap();
/// ```
pub fn csv_to_geobox_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvGeoboxConfig,
) -> Result<(), GeoboxError> {
    let file = File::open(csv_path).map_err(|e| GeoboxError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| GeoboxError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = find_column(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = find_column(&headers, lon_column, "Longitude")?;
            let lat_idx = find_column(&headers, lat_column, "Latitude")?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| GeoboxError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["geobox_code", "geobox_id"];
    if config.include_cell_geometry.is_some() {
        header_row.push("geobox_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| GeoboxError::CsvError(e.to_string()))?;

    let mut batch: Vec<StringRecord> = Vec::with_capacity(BATCH_SIZE);
    let mut rows_read = 0usize;
    let mut rows_written = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| GeoboxError::CsvError(e.to_string()))?;
        batch.push(record);
        rows_read += 1;

        if batch.len() == BATCH_SIZE {
            rows_written += write_batch(
                &mut writer,
                &batch,
                &source_indices,
                &exclude_indices,
                config,
            )?;
            batch.clear();
            log::debug!("encoded {} rows so far", rows_read);
        }
    }
    if !batch.is_empty() {
        rows_written += write_batch(
            &mut writer,
            &batch,
            &source_indices,
            &exclude_indices,
            config,
        )?;
    }

    writer
        .flush()
        .map_err(|e| GeoboxError::CsvError(e.to_string()))?;

    log::debug!(
        "csv conversion finished: {} rows read, {} geobox rows written at depth {}",
        rows_read,
        rows_written,
        config.depth
    );
    Ok(())
}

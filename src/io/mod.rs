pub mod arrow;
pub mod csv;
pub mod parquet;

pub use self::arrow::GeoboxesToArrow;
pub use self::csv::{
    CoordinateSource, CsvGeoboxConfig, CsvToGeobox, GeometryFormat, csv_to_geobox_csv,
};
pub use self::parquet::{GeoboxesToGeoParquet, write_geoparquet};

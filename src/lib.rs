//! # geobox
//!
//! Z-order geocoding: a longitude/latitude pair is turned into a signed 64-bit
//! code by bisecting the longitude range [-180, 180] and the latitude range
//! [-90, 90] once per depth step and interleaving the two bits each step
//! produces. Nearby coordinates share long code prefixes.
//!
//! ### 1. `Geobox` - Single Coordinate
//!
//! ```
//! use geobox::Geobox;
//!
//! let gbox = Geobox::new(12.481563961993402, 41.87643118161227);
//! assert_eq!(gbox.code(), -4195692029019287352);
//! println!("{} {}", gbox.id(), gbox.geostring(18));
//! ```
//!
//! ### 2. `compute_code` - The Bare Algorithm
//!
//! ```
//! use geobox::compute_code;
//!
//! assert_eq!(compute_code(0.0, 0.0, 1), 0);
//! assert_eq!(compute_code(12.481563961993402, 41.87643118161227, 4), 197);
//! ```
//!
//! ### 3. `CsvToGeobox` - CSV File Conversion
//!
//! ```no_run
//! use geobox::{CsvGeoboxConfig, CsvToGeobox, GeometryFormat};
//!
//! let config = CsvGeoboxConfig::new("geometry", 24)
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_geobox_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod coord;
pub mod error;
pub mod geobox;
pub mod geom;
pub mod index;
pub mod io;

pub use coord::{Coordinate, validate_wgs84};
pub use error::GeoboxError;
pub use geobox::Geobox;
pub use geom::{parse_geojson, parse_geometry, parse_wkt};
pub use index::{
    Bisection, DEFAULT_DEPTH, DEFAULT_GEOSTRING_PRECISION, Encoding, IDENTIFIER_VERSION,
    LAT_BOUNDS, LON_BOUNDS, MAX_DEPTH, bisect, compute_code, decode_identifier, encode_cell,
    encode_geostring, generate_identifier,
};
pub use io::{
    CoordinateSource, CsvGeoboxConfig, CsvToGeobox, GeoboxesToArrow, GeoboxesToGeoParquet,
    GeometryFormat, csv_to_geobox_csv, write_geoparquet,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Geometry, point};

    #[test]
    fn test_end_to_end_workflow() -> Result<(), GeoboxError> {
        let gbox = Geobox::try_new(12.481563961993402, 41.87643118161227)?;

        assert_eq!(gbox.code(), compute_code(gbox.longitude(), gbox.latitude(), 32));

        let (version, depth, code) = decode_identifier(&gbox.id())?;
        assert_eq!(version, IDENTIFIER_VERSION);
        assert_eq!(depth, DEFAULT_DEPTH);
        assert_eq!(code, gbox.code());

        let batch = vec![gbox].to_record_batch()?;
        assert_eq!(batch.num_rows(), 1);
        Ok(())
    }

    #[test]
    fn test_parse_then_encode() -> Result<(), GeoboxError> {
        let geom = parse_geometry("POINT(12.481563961993402 41.87643118161227)")?;
        let boxes = Geobox::from_geometry(geom, DEFAULT_DEPTH);

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].code(), -4195692029019287352);
        Ok(())
    }

    #[test]
    fn test_using_geo_types_macros() {
        let pt = point! { x: -0.1275, y: 51.5072 };
        let boxes = Geobox::from_geometry(Geometry::Point(pt), 8);

        assert_eq!(boxes[0].code(), 31467);
        assert!(boxes[0].bounds().to_polygon().exterior().coords().count() == 5);
    }

    #[test]
    fn test_nearby_points_share_prefix() {
        let a = compute_code(2.3358, 48.8610, 32) as u64;
        let b = compute_code(2.3359, 48.8611, 32) as u64;
        let far = compute_code(-74.0060, 40.7128, 32) as u64;

        assert!((a ^ b).leading_zeros() > (a ^ far).leading_zeros());
        assert!((a ^ b).leading_zeros() >= 20);
    }

    #[test]
    fn test_geostring_and_code_agree_on_hemisphere() {
        for (lon, lat) in [(12.48, 41.87), (-151.2, -33.8), (0.0, 51.48)] {
            let code = compute_code(lon, lat, DEFAULT_DEPTH);
            let prefix = encode_geostring(lon, lat, 1);
            assert_eq!(code < 0, prefix == "e" && lon > 0.0);
        }
    }

    #[test]
    fn test_encoders_across_threads() -> Result<(), String> {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || Geobox::new(10.0 * i as f64, 5.0 * i as f64).code())
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let code = handle
                .join()
                .map_err(|_| format!("encoder thread {} panicked", i))?;
            assert_eq!(code, compute_code(10.0 * i as f64, 5.0 * i as f64, 32));
        }
        Ok(())
    }
}

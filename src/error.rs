/// Error type for geobox operations.
///
/// Encoding itself never fails; these variants come from the validating
/// constructors, identifier decoding, and the file conversion layers.
#[derive(Debug, PartialEq)]
pub enum GeoboxError {
    /// The depth is outside the supported range (1-32).
    InvalidDepth(u32),
    /// Longitude is outside [-180, 180].
    LongitudeOutOfRange(f64),
    /// Latitude is outside [-90, 90].
    LatitudeOutOfRange(f64),
    /// Longitude or latitude is NaN or infinite.
    NonFiniteCoordinate,
    /// The identifier has an invalid length.
    InvalidIdentifierLength,
    /// The identifier checksum validation failed.
    InvalidChecksum,
    /// The identifier version is not supported.
    UnsupportedVersion(u8),
    /// Failed to decode Base64 identifier.
    Base64DecodeError,
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for GeoboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoboxError::InvalidDepth(d) => write!(f, "Invalid depth: {}", d),
            GeoboxError::LongitudeOutOfRange(lon) => {
                write!(f, "Longitude out of range [-180, 180]: {}", lon)
            }
            GeoboxError::LatitudeOutOfRange(lat) => {
                write!(f, "Latitude out of range [-90, 90]: {}", lat)
            }
            GeoboxError::NonFiniteCoordinate => write!(f, "Coordinate is not finite"),
            GeoboxError::InvalidIdentifierLength => write!(f, "Invalid identifier length"),
            GeoboxError::InvalidChecksum => write!(f, "Invalid checksum"),
            GeoboxError::UnsupportedVersion(v) => write!(f, "Unsupported version: {}", v),
            GeoboxError::Base64DecodeError => write!(f, "Base64 decode error"),
            GeoboxError::IoError(msg) => write!(f, "IO error: {}", msg),
            GeoboxError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            GeoboxError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for GeoboxError {}

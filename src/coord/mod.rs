use crate::error::GeoboxError;
use crate::index::{LAT_BOUNDS, LON_BOUNDS};
use geo_types::Point;

/// Trait for types that can provide a longitude/latitude pair.
///
/// Implemented for `(f64, f64)` tuples (longitude first) and
/// `geo_types::Point<f64>`, so encoding functions accept either.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// Checks that a coordinate is finite and inside the WGS84 longitude/latitude ranges.
///
/// Bounds are inclusive, so the antimeridian and the poles are accepted.
pub fn validate_wgs84<C: Coordinate>(coord: &C) -> Result<(), GeoboxError> {
    let (lon, lat) = (coord.x(), coord.y());

    if !lon.is_finite() || !lat.is_finite() {
        return Err(GeoboxError::NonFiniteCoordinate);
    }
    if lon < LON_BOUNDS[0] || lon > LON_BOUNDS[1] {
        return Err(GeoboxError::LongitudeOutOfRange(lon));
    }
    if lat < LAT_BOUNDS[0] || lat > LAT_BOUNDS[1] {
        return Err(GeoboxError::LatitudeOutOfRange(lat));
    }

    Ok(())
}

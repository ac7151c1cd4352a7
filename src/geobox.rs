use crate::coord::{Coordinate, validate_wgs84};
use crate::error::GeoboxError;
use crate::index::{
    DEFAULT_DEPTH, MAX_DEPTH, encode_cell, encode_geostring, generate_identifier,
};
use crate::io::arrow::GeoboxesToArrow;
use crate::io::parquet::GeoboxesToGeoParquet;
use arrow_array::RecordBatch;
use geo::{Centroid, Distance, Haversine};
use geo_types::{Geometry, Point, Polygon, Rect};
use geoarrow_array::array::{PointArray, PolygonArray};
use geojson::{Feature, JsonObject};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::path::Path;

/// A coordinate bound to its interleaved Z-order code.
///
/// The code is computed once, at construction, by bisecting the longitude
/// range [-180, 180] and the latitude range [-90, 90] `depth` times and
/// interleaving the resulting bits (longitude on odd positions, latitude on
/// even ones). The value never changes afterwards.
///
/// # Example
///
/// ```
/// use geobox::Geobox;
///
/// let gbox = Geobox::new(12.481563961993402, 41.87643118161227);
/// assert_eq!(gbox.depth(), 32);
/// assert_eq!(gbox.code(), -4195692029019287352);
/// assert_eq!(gbox.coordinate(), (12.481563961993402, 41.87643118161227));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geobox {
    longitude: f64,
    latitude: f64,
    depth: u32,
    code: i64,
    #[serde(skip)]
    bounds: Rect<f64>,
}

impl Geobox {
    /// Encodes a coordinate at the default depth of 32.
    ///
    /// Inputs are not validated; see [`Geobox::try_new`] for the checked form.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self::with_depth(longitude, latitude, DEFAULT_DEPTH)
    }

    /// Encodes a coordinate with `depth` bisection steps per axis.
    ///
    /// Any input is accepted. Depths above 32 wrap around the 64-bit code and
    /// a depth of 0 yields code 0.
    ///
    /// # Example
    /// ```
    /// use geobox::Geobox;
    ///
    /// let coarse = Geobox::with_depth(12.481563961993402, 41.87643118161227, 4);
    /// assert_eq!(coarse.code(), 197);
    /// ```
    pub fn with_depth(longitude: f64, latitude: f64, depth: u32) -> Self {
        let encoding = encode_cell(longitude, latitude, depth);

        Self {
            longitude,
            latitude,
            depth,
            code: encoding.code,
            bounds: encoding.bounds,
        }
    }

    /// Checked variant of [`Geobox::new`].
    pub fn try_new(longitude: f64, latitude: f64) -> Result<Self, GeoboxError> {
        Self::try_with_depth(longitude, latitude, DEFAULT_DEPTH)
    }

    /// Checked variant of [`Geobox::with_depth`].
    ///
    /// Rejects non-finite values, coordinates outside the WGS84 ranges and
    /// depths outside 1-32. Accepted inputs encode exactly as the unchecked
    /// constructor would.
    ///
    /// # Example
    /// ```
    /// use geobox::{Geobox, GeoboxError};
    ///
    /// assert!(Geobox::try_with_depth(12.48, 41.87, 16).is_ok());
    /// assert_eq!(
    ///     Geobox::try_with_depth(12.48, 41.87, 40),
    ///     Err(GeoboxError::InvalidDepth(40))
    /// );
    /// ```
    pub fn try_with_depth(longitude: f64, latitude: f64, depth: u32) -> Result<Self, GeoboxError> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(GeoboxError::InvalidDepth(depth));
        }
        validate_wgs84(&(longitude, latitude))?;

        Ok(Self::with_depth(longitude, latitude, depth))
    }

    /// Encodes anything that provides a longitude/latitude pair.
    ///
    /// # Example
    /// ```
    /// use geobox::Geobox;
    /// use geo_types::Point;
    ///
    /// let from_tuple = Geobox::from_coord(&(2.3358, 48.861), 24);
    /// let from_point = Geobox::from_coord(&Point::new(2.3358, 48.861), 24);
    /// assert_eq!(from_tuple.code(), from_point.code());
    /// ```
    pub fn from_coord(coord: &impl Coordinate, depth: u32) -> Self {
        Self::with_depth(coord.x(), coord.y(), depth)
    }

    /// Encodes a slice of coordinates in parallel, preserving order.
    pub fn from_coords<C: Coordinate + Sync>(coords: &[C], depth: u32) -> Vec<Self> {
        coords
            .par_iter()
            .map(|c| Self::from_coord(c, depth))
            .collect()
    }

    /// Encodes an arbitrary `geo_types::Geometry`.
    ///
    /// Points encode as themselves and multipoints encode every member.
    /// Lines, polygons and rectangles encode their centroid; multi-lines and
    /// multipolygons encode the centroid of each member. Collections recurse.
    /// Empty shapes without a centroid produce nothing.
    pub fn from_geometry(geom: Geometry<f64>, depth: u32) -> Vec<Self> {
        match geom {
            Geometry::Point(pt) => vec![Self::from_coord(&pt, depth)],
            Geometry::MultiPoint(mp) => mp.0.iter().map(|pt| Self::from_coord(pt, depth)).collect(),
            Geometry::Line(line) => vec![Self::from_coord(&line.centroid(), depth)],
            Geometry::LineString(line) => line
                .centroid()
                .map(|c| Self::from_coord(&c, depth))
                .into_iter()
                .collect(),
            Geometry::MultiLineString(mls) => mls
                .0
                .iter()
                .filter_map(|line| line.centroid())
                .map(|c| Self::from_coord(&c, depth))
                .collect(),
            Geometry::Polygon(poly) => poly
                .centroid()
                .map(|c| Self::from_coord(&c, depth))
                .into_iter()
                .collect(),
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .filter_map(|poly| poly.centroid())
                .map(|c| Self::from_coord(&c, depth))
                .collect(),
            Geometry::Rect(rect) => vec![Self::from_coord(&rect.centroid(), depth)],
            Geometry::Triangle(tri) => vec![Self::from_coord(&tri.centroid(), depth)],
            Geometry::GeometryCollection(gc) => gc
                .0
                .into_iter()
                .flat_map(|g| Self::from_geometry(g, depth))
                .collect(),
        }
    }

    /// Number of bisection steps per axis.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The original `(longitude, latitude)` pair.
    pub fn coordinate(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    /// The interleaved signed 64-bit code.
    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// The original coordinate as a point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// The cell left after the final bisection step.
    ///
    /// At depth 0 this is the whole longitude/latitude domain.
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    /// The cell as a closed polygon, suitable for WKT or GeoJSON output.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Great-circle distance in metres between the two encoded coordinates.
    ///
    /// # Example
    /// ```
    /// use geobox::Geobox;
    ///
    /// let rome = Geobox::new(12.481563961993402, 41.87643118161227);
    /// let paris = Geobox::new(2.335861599932855, 48.86102675689321);
    /// assert!((rome.distance_to(&paris) - 1_107_860.9).abs() < 1.0);
    /// ```
    pub fn distance_to(&self, other: &Geobox) -> f64 {
        Haversine.distance(self.point(), other.point())
    }

    /// Great-circle length in metres of the cell's south-west to north-east diagonal.
    pub fn cell_diagonal(&self) -> f64 {
        Haversine.distance(Point::from(self.bounds.min()), Point::from(self.bounds.max()))
    }

    /// URL-safe identifier carrying depth and code.
    pub fn id(&self) -> String {
        generate_identifier(self.depth, self.code)
    }

    /// Hemisphere-prefixed alphabet rendering of the coordinate.
    pub fn geostring(&self, precision: usize) -> String {
        encode_geostring(self.longitude, self.latitude, precision)
    }

    /// A GeoJSON point feature with `code`, `depth` and `id` properties.
    pub fn to_geojson_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("code".to_string(), json!(self.code));
        properties.insert("depth".to_string(), json!(self.depth));
        properties.insert("id".to_string(), json!(self.id()));

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.point())),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// Converts this geobox's coordinate to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this geobox's cell to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this geobox to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, GeoboxError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this geobox to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeoboxError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

impl fmt::Display for Geobox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

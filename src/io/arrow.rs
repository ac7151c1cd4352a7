use crate::error::GeoboxError;
use crate::geobox::Geobox;
use arrow_array::{Float64Array, Int64Array, RecordBatch, StringArray, UInt32Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`Geobox`]es to Arrow arrays.
///
/// Implemented for `[Geobox]` and `Vec<Geobox>`.
pub trait GeoboxesToArrow {
    /// Converts the encoded coordinates to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts the cells to an Arrow PolygonArray.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts to a RecordBatch with id, code, depth, longitude, latitude, and point geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, GeoboxError>;
}

impl GeoboxesToArrow for [Geobox] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for gbox in self {
            builder.push_point(Some(&gbox.point()));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|g: &Geobox| g.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, GeoboxError> {
        let point_array = self.to_arrow_points();
        let ids: StringArray = self.iter().map(|g| Some(g.id())).collect();
        let codes: Int64Array = self.iter().map(|g| Some(g.code())).collect();
        let depths: UInt32Array = self.iter().map(|g| Some(g.depth())).collect();
        let longitudes: Float64Array = self.iter().map(|g| Some(g.longitude())).collect();
        let latitudes: Float64Array = self.iter().map(|g| Some(g.latitude())).collect();

        let geometry_field = point_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("code", DataType::Int64, false),
            Field::new("depth", DataType::UInt32, false),
            Field::new("longitude", DataType::Float64, false),
            Field::new("latitude", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(ids),
                Arc::new(codes),
                Arc::new(depths),
                Arc::new(longitudes),
                Arc::new(latitudes),
                Arc::new(point_array.into_arrow()),
            ],
        )
        .map_err(|e| GeoboxError::IoError(e.to_string()))
    }
}

impl GeoboxesToArrow for Vec<Geobox> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, GeoboxError> {
        self.as_slice().to_record_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::Array;
    use geoarrow_array::GeoArrowArray;

    fn sample() -> Vec<Geobox> {
        vec![
            Geobox::new(12.481563961993402, 41.87643118161227),
            Geobox::new(2.335861599932855, 48.86102675689321),
            Geobox::with_depth(0.0, 51.48, 16),
        ]
    }

    #[test]
    fn test_geoboxes_to_arrow_points() {
        let point_array = sample().to_arrow_points();
        assert_eq!(point_array.len(), 3);
    }

    #[test]
    fn test_geoboxes_to_arrow_polygons() {
        let polygon_array = sample().as_slice().to_arrow_polygons();
        assert_eq!(polygon_array.len(), 3);
    }

    #[test]
    fn test_record_batch_columns() -> Result<(), GeoboxError> {
        let boxes = sample();
        let batch = boxes.to_record_batch()?;

        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 6);

        let codes = batch
            .column_by_name("code")
            .and_then(|c| c.as_any().downcast_ref::<Int64Array>())
            .ok_or_else(|| GeoboxError::IoError("missing code column".to_string()))?;
        assert_eq!(codes.value(0), -4195692029019287352);
        assert_eq!(codes.value(2), boxes[2].code());

        let depths = batch
            .column_by_name("depth")
            .and_then(|c| c.as_any().downcast_ref::<UInt32Array>())
            .ok_or_else(|| GeoboxError::IoError("missing depth column".to_string()))?;
        assert_eq!(depths.value(2), 16);
        assert_eq!(depths.null_count(), 0);
        Ok(())
    }

    #[test]
    fn test_single_geobox_record_batch() -> Result<(), GeoboxError> {
        let batch = Geobox::new(-0.1275, 51.5072).to_record_batch()?;
        assert_eq!(batch.num_rows(), 1);
        Ok(())
    }
}

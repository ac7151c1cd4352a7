use crate::error::GeoboxError;
use crate::geobox::Geobox;
use crate::io::arrow::GeoboxesToArrow;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;

/// Writes a record batch with a GeoArrow geometry column as a WKB-encoded GeoParquet file.
///
/// Batches from [`GeoboxesToArrow::to_record_batch`] carry the encoded
/// coordinates as points in EPSG:4326, next to their `code`, `depth` and `id`.
pub fn write_geoparquet(batch: &RecordBatch, path: impl AsRef<Path>) -> Result<(), GeoboxError> {
    let path = path.as_ref();
    let schema = batch.schema();

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();

    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&schema, &options)
        .map_err(|e| GeoboxError::IoError(e.to_string()))?;

    let file = File::create(path).map_err(|e| GeoboxError::IoError(e.to_string()))?;
    let mut writer = ArrowWriter::try_new(file, encoder.target_schema(), None)
        .map_err(|e| GeoboxError::IoError(e.to_string()))?;

    let encoded_batch = encoder
        .encode_record_batch(batch)
        .map_err(|e| GeoboxError::IoError(e.to_string()))?;

    writer
        .write(&encoded_batch)
        .map_err(|e| GeoboxError::IoError(e.to_string()))?;

    let kv_metadata = encoder
        .into_keyvalue()
        .map_err(|e| GeoboxError::IoError(e.to_string()))?;

    writer.append_key_value_metadata(kv_metadata);
    writer
        .finish()
        .map_err(|e| GeoboxError::IoError(e.to_string()))?;

    log::debug!(
        "wrote {} geobox rows to {}",
        batch.num_rows(),
        path.display()
    );
    Ok(())
}

/// Trait for writing collections of [`Geobox`]es straight to GeoParquet.
pub trait GeoboxesToGeoParquet: GeoboxesToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeoboxError>;
}

impl GeoboxesToGeoParquet for [Geobox] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeoboxError> {
        let batch = self.to_record_batch()?;
        write_geoparquet(&batch, path)
    }
}

impl GeoboxesToGeoParquet for Vec<Geobox> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeoboxError> {
        self.as_slice().to_geoparquet(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_geoboxes_to_geoparquet() -> Result<(), GeoboxError> {
        let boxes = Geobox::from_coords(
            &[(12.481563961993402, 41.87643118161227), (-0.1275, 51.5072)],
            24,
        );

        let dir = tempdir().map_err(|e| GeoboxError::IoError(e.to_string()))?;
        let path = dir.path().join("geoboxes.parquet");

        boxes.to_geoparquet(&path)?;

        assert!(path.exists());
        let metadata = std::fs::metadata(&path).map_err(|e| GeoboxError::IoError(e.to_string()))?;
        assert!(metadata.len() > 0);
        Ok(())
    }

    #[test]
    fn test_single_geobox_to_geoparquet() -> Result<(), GeoboxError> {
        let dir = tempdir().map_err(|e| GeoboxError::IoError(e.to_string()))?;
        let path = dir.path().join("single.parquet");

        Geobox::new(2.335861599932855, 48.86102675689321).to_geoparquet(&path)?;

        assert!(path.exists());
        Ok(())
    }
}

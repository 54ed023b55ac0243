//! I/O operations for viswal feature collections
//!
//! This crate reads GeoJSON into viswal features and writes annotated
//! features back out, either as one collection or one document per feature.

pub mod error;
pub mod document;

pub use document::*;
pub use error::*;

use std::fs;
use std::path::{Path, PathBuf};
use viswal_core::{Feature, FeatureCollection};

/// Trait for reading feature collections from files
pub trait FeatureReader {
    fn read_features<P: AsRef<Path>>(path: P) -> Result<FeatureCollection>;
}

/// Trait for writing feature collections to files
pub trait FeatureWriter {
    fn write_features<P: AsRef<Path>>(collection: &FeatureCollection, path: P) -> Result<()>;
}

/// GeoJSON file format
pub struct GeoJsonFormat;

impl FeatureReader for GeoJsonFormat {
    fn read_features<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let bytes = fs::read(path)?;
        let collection = parse_feature_collection(&bytes)?;
        tracing::debug!(path = %path.display(), features = collection.len(), "read features");
        Ok(collection)
    }
}

impl FeatureWriter for GeoJsonFormat {
    fn write_features<P: AsRef<Path>>(collection: &FeatureCollection, path: P) -> Result<()> {
        fs::write(path.as_ref(), encode_feature_collection(collection, false)?)?;
        Ok(())
    }
}

/// Auto-detect format and read a feature collection
pub fn read_features<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("geojson") | Some("json") => GeoJsonFormat::read_features(path),
        _ => Err(IoError::InvalidFormat {
            format: format!("Unsupported feature format: {:?}", path.extension()),
        }),
    }
}

/// Auto-detect format and write a feature collection
pub fn write_features<P: AsRef<Path>>(collection: &FeatureCollection, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("geojson") | Some("json") => GeoJsonFormat::write_features(collection, path),
        _ => Err(IoError::InvalidFormat {
            format: format!("Unsupported feature format: {:?}", path.extension()),
        }),
    }
}

/// File name for one feature of a split collection: its index, then its
/// `name` property reduced to file-safe characters
pub fn feature_file_name(index: usize, feature: &Feature) -> String {
    let slug: String = feature
        .name()
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if slug.is_empty() {
        format!("{:05}.geojson", index)
    } else {
        format!("{:05}-{}.geojson", index, slug)
    }
}

/// Write every feature as its own GeoJSON Feature document under `dir`.
///
/// Returns the written paths in feature order.
pub fn write_split<P: AsRef<Path>>(collection: &FeatureCollection, dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let path = dir.join(feature_file_name(i, feature));
            fs::write(&path, encode_feature(feature)?)?;
            Ok(path)
        })
        .collect()
}

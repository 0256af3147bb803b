//! Shared types serialized into the session manifest.
//!
//! These types flow between every command (scan → tag → list → export) via
//! the session JSON file and must stay stable across all of them.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Sentinel for any metadata field that could not be read.
///
/// Every absent or unparseable EXIF value becomes exactly this literal —
/// extraction degrades field-by-field, never record-by-record.
pub const UNKNOWN: &str = "Unknown";

/// Normalized capture metadata for one image.
///
/// Every field is a string; missing values hold [`UNKNOWN`]. The `date` is
/// `YYYY-MM-DD` and `time` is zero-padded `HH:MM`, both derived from the
/// EXIF `DateTimeOriginal` tag (`YYYY:MM:DD HH:MM:SS`) when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub filename: String,
    pub date: String,
    pub time: String,
    /// `"<latitude>, <longitude>"` when both GPS tags are present — raw
    /// coordinates, no reverse geocoding.
    pub location: String,
    pub camera: String,
    pub lens: String,
    pub iso: String,
    pub aperture: String,
    pub shutter_speed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl ImageMetadata {
    /// Metadata with every field defaulted to [`UNKNOWN`].
    ///
    /// The starting point for extraction and the end state for files whose
    /// EXIF table cannot be read at all.
    pub fn unknown(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            date: UNKNOWN.to_string(),
            time: UNKNOWN.to_string(),
            location: UNKNOWN.to_string(),
            camera: UNKNOWN.to_string(),
            lens: UNKNOWN.to_string(),
            iso: UNKNOWN.to_string(),
            aperture: UNKNOWN.to_string(),
            shutter_speed: UNKNOWN.to_string(),
            width: None,
            height: None,
        }
    }
}

/// One loaded image.
///
/// Ids are 1-based positions within the load batch — not stable identifiers;
/// a rescan reassigns them. Tags are free text, insertion-ordered, unique
/// within the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: u32,
    /// Source path relative to the scanned directory.
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub metadata: ImageMetadata,
}

impl ImageRecord {
    /// Build a displayable `data:` URI from the image bytes.
    ///
    /// Derived on demand and never written into the session manifest — the
    /// encoded bytes are a viewing artifact, not session state.
    pub fn display_uri(&self, source_root: &Path) -> io::Result<String> {
        use base64::Engine as _;
        let bytes = std::fs::read(source_root.join(&self.path))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(format!("data:{};base64,{}", mime_for(&self.path), encoded))
    }
}

/// Media type by file extension, for `data:` URIs.
fn mime_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unknown_metadata_has_sentinel_everywhere() {
        let meta = ImageMetadata::unknown("IMG_0001.jpg");
        assert_eq!(meta.filename, "IMG_0001.jpg");
        for field in [
            &meta.date,
            &meta.time,
            &meta.location,
            &meta.camera,
            &meta.lens,
            &meta.iso,
            &meta.aperture,
            &meta.shutter_speed,
        ] {
            assert_eq!(field, UNKNOWN);
        }
        assert_eq!(meta.width, None);
        assert_eq!(meta.height, None);
    }

    #[test]
    fn record_roundtrips_through_json() {
        let record = ImageRecord {
            id: 3,
            path: "IMG_0003.jpg".to_string(),
            tags: vec!["deer".to_string(), "dusk".to_string()],
            metadata: ImageMetadata::unknown("IMG_0003.jpg"),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ImageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn empty_tags_omitted_from_json() {
        let record = ImageRecord {
            id: 1,
            path: "a.jpg".to_string(),
            tags: vec![],
            metadata: ImageMetadata::unknown("a.jpg"),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("\"tags\""));

        // Deserializing without the field yields an empty vec
        let back: ImageRecord = serde_json::from_str(&json).unwrap();
        assert!(back.tags.is_empty());
    }

    #[test]
    fn display_uri_encodes_file_bytes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("cam.png"), b"not really a png").unwrap();

        let record = ImageRecord {
            id: 1,
            path: "cam.png".to_string(),
            tags: vec![],
            metadata: ImageMetadata::unknown("cam.png"),
        };
        let uri = record.display_uri(tmp.path()).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        use base64::Engine as _;
        let payload = uri.rsplit(',').next().unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(decoded, b"not really a png");
    }

    #[test]
    fn display_uri_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let record = ImageRecord {
            id: 1,
            path: "gone.jpg".to_string(),
            tags: vec![],
            metadata: ImageMetadata::unknown("gone.jpg"),
        };
        assert!(record.display_uri(tmp.path()).is_err());
    }

    #[test]
    fn mime_defaults_to_jpeg_for_unrecognized_extension() {
        assert_eq!(mime_for("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("photo.PNG"), "image/png");
        assert_eq!(mime_for("photo.gif"), "image/gif");
        assert_eq!(mime_for("photo"), "image/jpeg");
    }
}

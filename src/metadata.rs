//! EXIF metadata extraction.
//!
//! One extractor serves every byte source: the scan stage reads files from
//! disk, tests hand in buffers directly — both go through
//! [`extract_from_bytes`]. There is deliberately no second per-environment
//! implementation; path-based extraction is just `read(path)` plus the byte
//! extractor.
//!
//! ## Contract
//!
//! Extraction never raises a user-visible error. Whatever goes wrong —
//! unreadable file, no EXIF container in the bytes, an individual tag
//! missing — the affected fields degrade to the literal `"Unknown"`
//! ([`crate::types::UNKNOWN`]) and the rest keep their values.
//!
//! ## Tags read
//!
//! | Field | EXIF tag |
//! |-------|----------|
//! | date, time | `DateTimeOriginal` (`YYYY:MM:DD HH:MM:SS`, split on the first space) |
//! | location | `GPSLatitude` + `GPSLongitude` (joined with `", "`; both required) |
//! | camera | `Model` |
//! | lens | `LensModel` |
//! | iso | `PhotographicSensitivity` (ISOSpeedRatings in older EXIF) |
//! | aperture | `FNumber` |
//! | shutter_speed | `ExposureTime` |
//! | width, height | `PixelXDimension` / `PixelYDimension`, falling back to the decoded image header |

use crate::types::{ImageMetadata, UNKNOWN};
use exif::{Exif, In, Reader, Tag, Value};
use std::io::Cursor;
use std::path::Path;

/// Source of normalized metadata for image bytes.
///
/// The production implementation is [`ExifMetadataReader`]. The trait exists
/// so batch-load tests can substitute canned metadata without crafting real
/// EXIF payloads; it is `Sync` because the scan stage fans out over rayon.
pub trait MetadataReader: Sync {
    /// Extract metadata from one image's raw bytes. Total — never fails.
    fn extract(&self, bytes: &[u8], filename: &str) -> ImageMetadata;
}

/// Production reader backed by the `kamadak-exif` decoder.
#[derive(Debug, Default)]
pub struct ExifMetadataReader;

impl MetadataReader for ExifMetadataReader {
    fn extract(&self, bytes: &[u8], filename: &str) -> ImageMetadata {
        extract_from_bytes(bytes, filename)
    }
}

/// Extract metadata from an in-memory image buffer.
pub fn extract_from_bytes(bytes: &[u8], filename: &str) -> ImageMetadata {
    let mut meta = ImageMetadata::unknown(filename);

    if let Ok(exif) = Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        if let Some(datetime) = ascii_field(&exif, Tag::DateTimeOriginal) {
            let (date, time) = split_datetime(&datetime);
            meta.date = date;
            meta.time = time;
        }

        if let Some(location) = gps_location(&exif) {
            meta.location = location;
        }

        if let Some(camera) = ascii_field(&exif, Tag::Model) {
            meta.camera = camera;
        }
        if let Some(lens) = ascii_field(&exif, Tag::LensModel) {
            meta.lens = lens;
        }
        if let Some(iso) = display_field(&exif, Tag::PhotographicSensitivity) {
            meta.iso = iso;
        }
        if let Some(aperture) = display_field(&exif, Tag::FNumber) {
            meta.aperture = aperture;
        }
        if let Some(shutter) = display_field(&exif, Tag::ExposureTime) {
            meta.shutter_speed = shutter;
        }

        meta.width = display_field(&exif, Tag::PixelXDimension);
        meta.height = display_field(&exif, Tag::PixelYDimension);
    }

    // Dimension fallback: the EXIF table may be absent or carry no pixel
    // dimension tags while the image header still knows its size.
    if meta.width.is_none() || meta.height.is_none() {
        if let Some((w, h)) = header_dimensions(bytes) {
            meta.width.get_or_insert(w.to_string());
            meta.height.get_or_insert(h.to_string());
        }
    }

    meta
}

/// Extract metadata for a file on disk.
///
/// An unreadable file yields the all-`"Unknown"` record for its filename —
/// the caller's batch proceeds regardless.
pub fn extract_from_path(path: &Path) -> ImageMetadata {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match std::fs::read(path) {
        Ok(bytes) => extract_from_bytes(&bytes, &filename),
        Err(_) => ImageMetadata::unknown(&filename),
    }
}

/// Read an ASCII tag as a trimmed string.
///
/// Prefers the raw ASCII bytes over the display formatter so values like
/// camera models come out exactly as written by the firmware.
fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let text = match field.value {
        Value::Ascii(ref lines) => lines
            .first()
            .map(|line| String::from_utf8_lossy(line).trim().to_string())?,
        _ => field.display_value().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Read any tag through its display formatter (`f/5.6`, `1/250`, ...).
fn display_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let text = field.display_value().to_string();
    (!text.is_empty()).then_some(text)
}

/// Join latitude and longitude descriptions when both tags are present.
fn gps_location(exif: &Exif) -> Option<String> {
    let lat = exif.get_field(Tag::GPSLatitude, In::PRIMARY)?;
    let lon = exif.get_field(Tag::GPSLongitude, In::PRIMARY)?;
    Some(format!(
        "{}, {}",
        lat.display_value().with_unit(exif),
        lon.display_value().with_unit(exif)
    ))
}

/// Split EXIF `YYYY:MM:DD HH:MM:SS` into (`YYYY-MM-DD`, `HH:MM`).
///
/// The date part swaps its colon separators for dashes; the time part keeps
/// only the zero-padded `HH:MM` prefix used by the filter engine. A value
/// without a space yields an `"Unknown"` time.
fn split_datetime(datetime: &str) -> (String, String) {
    match datetime.trim().split_once(' ') {
        Some((date, time)) => {
            // get() rather than indexing: corrupt EXIF bytes can put a
            // multi-byte char across index 5, which must not panic a batch
            let time = time.get(..5).unwrap_or(time);
            (date.replace(':', "-"), time.to_string())
        }
        None => (datetime.trim().replace(':', "-"), UNKNOWN.to_string()),
    }
}

/// Pixel dimensions from the image header, without decoding pixel data.
fn header_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

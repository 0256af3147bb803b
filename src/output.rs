//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is information-centric, not file-centric. The primary line for
//! every record is its id and filename; capture metadata and tags are
//! secondary context on indented lines below it. This makes `scan` and
//! `list` output readable as a collection inventory while still letting
//! users trace rows back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Loaded 3 images from trail-cams/
//! 001 IMG_0001.jpg
//!     Date: 2023-06-01 14:30
//!     Location: Forest Edge
//!     Camera: TrailCam X200
//! ...
//! ```
//!
//! ## List
//!
//! ```text
//! 001 IMG_0001.jpg  [deer, dusk]
//!     2023-06-01 14:30  Forest Edge
//! ...
//! Showing 2 of 14 images (page 1)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::scan::LoadEvent;
use crate::session::Session;
use crate::types::{ImageRecord, UNKNOWN};

/// Format a record id as 3-digit zero-padded.
fn format_id(id: u32) -> String {
    format!("{:0>3}", id)
}

/// `[tag, tag]` suffix, empty string for untagged records.
fn tag_suffix(record: &ImageRecord) -> String {
    if record.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", record.tags.join(", "))
    }
}

/// Date and time on one line, collapsing double-Unknown to a single token.
fn when(record: &ImageRecord) -> String {
    let meta = &record.metadata;
    if meta.date == UNKNOWN && meta.time == UNKNOWN {
        UNKNOWN.to_string()
    } else {
        format!("{} {}", meta.date, meta.time)
    }
}

// ============================================================================
// Load progress
// ============================================================================

/// One progress line per finished extraction task.
pub fn format_load_event(event: &LoadEvent) -> String {
    format!("  [{}/{}] {}", event.loaded, event.total, event.filename)
}

// ============================================================================
// Scan inventory
// ============================================================================

/// Format the post-scan inventory: every record with its capture context.
pub fn format_scan_output(session: &Session) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Loaded {} images from {}",
        session.records.len(),
        session.source.display()
    ));

    for record in &session.records {
        lines.push(format!("{} {}", format_id(record.id), record.path));
        lines.push(format!("    Date: {}", when(record)));
        lines.push(format!("    Location: {}", record.metadata.location));
        lines.push(format!("    Camera: {}", record.metadata.camera));
    }

    lines
}

pub fn print_scan_output(session: &Session) {
    for line in format_scan_output(session) {
        println!("{}", line);
    }
}

// ============================================================================
// Filtered listing
// ============================================================================

/// Format one page of the filtered view plus a footer summarizing the cut.
///
/// `total` is the full collection size, `matched` the filtered-view size
/// before pagination.
pub fn format_list_output(
    page_records: &[&ImageRecord],
    matched: usize,
    total: usize,
    page_number: usize,
) -> Vec<String> {
    let mut lines = Vec::new();

    if matched == 0 {
        lines.push("No images found".to_string());
        lines.push("Try adjusting your filters or rescanning the directory.".to_string());
        return lines;
    }

    for record in page_records {
        lines.push(format!(
            "{} {}{}",
            format_id(record.id),
            record.path,
            tag_suffix(record)
        ));
        lines.push(format!(
            "    {}  {}",
            when(record),
            record.metadata.location
        ));
    }

    lines.push(format!(
        "Showing {} of {} images ({} total, page {})",
        page_records.len(),
        matched,
        total,
        page_number
    ));
    lines
}

pub fn print_list_output(
    page_records: &[&ImageRecord],
    matched: usize,
    total: usize,
    page_number: usize,
) {
    for line in format_list_output(page_records, matched, total, page_number) {
        println!("{}", line);
    }
}

// ============================================================================
// Record detail
// ============================================================================

/// Format the full metadata card for one record.
pub fn format_record_detail(record: &ImageRecord) -> Vec<String> {
    let meta = &record.metadata;
    let mut lines = vec![
        format!("{} {}", format_id(record.id), record.path),
        format!("    Date: {}", meta.date),
        format!("    Time: {}", meta.time),
        format!("    Location: {}", meta.location),
        format!("    Camera: {}", meta.camera),
        format!("    Lens: {}", meta.lens),
        format!("    ISO: {}", meta.iso),
        format!("    Aperture: {}", meta.aperture),
        format!("    Shutter: {}", meta.shutter_speed),
    ];
    if let (Some(w), Some(h)) = (&meta.width, &meta.height) {
        lines.push(format!("    Dimensions: {}x{}", w, h));
    }
    lines.push(if record.tags.is_empty() {
        "    Tags: (none)".to_string()
    } else {
        format!("    Tags: {}", record.tags.join(", "))
    });
    lines
}

pub fn print_record_detail(record: &ImageRecord) {
    for line in format_record_detail(record) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageMetadata;
    use std::path::PathBuf;

    fn record(id: u32, tags: &[&str]) -> ImageRecord {
        let filename = format!("IMG_{id:04}.jpg");
        let mut metadata = ImageMetadata::unknown(&filename);
        metadata.date = "2023-06-01".to_string();
        metadata.time = "14:30".to_string();
        metadata.location = "Forest Edge".to_string();
        metadata.camera = "TrailCam X200".to_string();
        ImageRecord {
            id,
            path: filename.clone(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            metadata,
        }
    }

    #[test]
    fn load_event_shows_counter_and_filename() {
        let event = LoadEvent {
            filename: "IMG_0007.jpg".to_string(),
            loaded: 7,
            total: 12,
        };
        assert_eq!(format_load_event(&event), "  [7/12] IMG_0007.jpg");
    }

    #[test]
    fn scan_output_leads_with_count_and_source() {
        let session = Session::new(PathBuf::from("trail-cams"), vec![record(1, &[])]);
        let lines = format_scan_output(&session);
        assert_eq!(lines[0], "Loaded 1 images from trail-cams");
        assert_eq!(lines[1], "001 IMG_0001.jpg");
        assert_eq!(lines[2], "    Date: 2023-06-01 14:30");
        assert_eq!(lines[3], "    Location: Forest Edge");
    }

    #[test]
    fn list_output_shows_tags_inline() {
        let r = record(2, &["deer", "dusk"]);
        let lines = format_list_output(&[&r], 1, 5, 1);
        assert_eq!(lines[0], "002 IMG_0002.jpg  [deer, dusk]");
        assert_eq!(lines[1], "    2023-06-01 14:30  Forest Edge");
        assert_eq!(lines[2], "Showing 1 of 1 images (5 total, page 1)");
    }

    #[test]
    fn list_output_empty_view_suggests_adjusting_filters() {
        let lines = format_list_output(&[], 0, 5, 1);
        assert_eq!(lines[0], "No images found");
        assert!(lines[1].contains("filters"));
    }

    #[test]
    fn detail_card_collapses_unknown_dimensions() {
        let r = record(1, &[]);
        let lines = format_record_detail(&r);
        assert!(lines.iter().all(|l| !l.contains("Dimensions")));
        assert!(lines.contains(&"    Tags: (none)".to_string()));
    }

    #[test]
    fn detail_card_shows_dimensions_when_both_known() {
        let mut r = record(1, &["fox"]);
        r.metadata.width = Some("4000".to_string());
        r.metadata.height = Some("3000".to_string());
        let lines = format_record_detail(&r);
        assert!(lines.contains(&"    Dimensions: 4000x3000".to_string()));
        assert!(lines.contains(&"    Tags: fox".to_string()));
    }

    #[test]
    fn unknown_date_and_time_collapse_to_single_token() {
        let mut r = record(1, &[]);
        r.metadata.date = UNKNOWN.to_string();
        r.metadata.time = UNKNOWN.to_string();
        assert_eq!(when(&r), UNKNOWN);
    }
}

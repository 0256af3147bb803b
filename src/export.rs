//! Tag-assignment export.
//!
//! The one artifact the tool produces besides its own session manifest: a
//! JSON document of `[{ "id": n, "tags": [...] }, ...]` over the **full**
//! collection, tagged or not — downstream analysis wants the untagged rows
//! too. The default filename is `wildlife_tags.json` (configurable).

use crate::types::ImageRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagExportEntry {
    pub id: u32,
    pub tags: Vec<String>,
}

/// Project the collection down to its tag assignments, in collection order.
pub fn export_entries(records: &[ImageRecord]) -> Vec<TagExportEntry> {
    records
        .iter()
        .map(|r| TagExportEntry {
            id: r.id,
            tags: r.tags.clone(),
        })
        .collect()
}

/// Serialize the export document.
pub fn to_json(records: &[ImageRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string(&export_entries(records))?)
}

/// Write the export document to `path`.
pub fn write_export(records: &[ImageRecord], path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_json(records)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageMetadata;
    use tempfile::TempDir;

    fn record(id: u32, tags: &[&str]) -> ImageRecord {
        let filename = format!("IMG_{id:04}.jpg");
        ImageRecord {
            id,
            path: filename.clone(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            metadata: ImageMetadata::unknown(&filename),
        }
    }

    #[test]
    fn export_document_matches_expected_shape() {
        let records = vec![record(1, &["fox"]), record(2, &[])];
        let json = to_json(&records).unwrap();
        assert_eq!(json, r#"[{"id":1,"tags":["fox"]},{"id":2,"tags":[]}]"#);
    }

    #[test]
    fn export_includes_untagged_records() {
        let records = vec![record(1, &[]), record(2, &["boar", "night"])];
        let entries = export_entries(&records);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].tags.is_empty());
        assert_eq!(entries[1].tags, vec!["boar", "night"]);
    }

    #[test]
    fn export_preserves_collection_order() {
        let records = vec![record(3, &[]), record(1, &[]), record(2, &[])];
        let ids: Vec<u32> = export_entries(&records).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn empty_collection_exports_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn write_export_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("exports/wildlife_tags.json");
        write_export(&[record(1, &["fox"])], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<TagExportEntry> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0].id, 1);
        assert_eq!(parsed[0].tags, vec!["fox"]);
    }
}

//! Session manifest: the loaded collection and its tag mutations.
//!
//! A session is one batch load's worth of [`ImageRecord`]s plus the source
//! directory they came from, serialized as JSON between commands. `scan`
//! rewrites the whole file from scratch — sessions are never merged with a
//! previous load, matching the collection's create-fresh lifecycle.
//!
//! Tag mutations address records by id and edit the record in place. Adds
//! are idempotent (a duplicate changes nothing), removals of absent tags are
//! no-ops, and insertion order is preserved for display.

use crate::types::ImageRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session manifest error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no session found at {0}; run `focal-point scan` first")]
    NotFound(PathBuf),
    #[error("no image with id {0} in the current session")]
    NoSuchImage(u32),
    #[error("tag must not be empty")]
    EmptyTag,
}

/// One batch load and its tag state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Directory the records were loaded from.
    pub source: PathBuf,
    pub records: Vec<ImageRecord>,
}

impl Session {
    pub fn new(source: PathBuf, records: Vec<ImageRecord>) -> Self {
        Self { source, records }
    }

    /// Read a session manifest from disk.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        if !path.exists() {
            return Err(SessionError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the session manifest, replacing any previous one.
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn record(&self, id: u32) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn record_mut(&mut self, id: u32) -> Result<&mut ImageRecord, SessionError> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SessionError::NoSuchImage(id))
    }

    /// Attach a tag to one record. Returns whether the tag was new.
    ///
    /// Adding a tag the record already carries leaves it unchanged.
    pub fn add_tag(&mut self, id: u32, tag: &str) -> Result<bool, SessionError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(SessionError::EmptyTag);
        }
        let record = self.record_mut(id)?;
        if record.tags.iter().any(|t| t == tag) {
            return Ok(false);
        }
        record.tags.push(tag.to_string());
        Ok(true)
    }

    /// Remove a tag from one record. Returns whether anything was removed.
    pub fn remove_tag(&mut self, id: u32, tag: &str) -> Result<bool, SessionError> {
        let record = self.record_mut(id)?;
        let before = record.tags.len();
        record.tags.retain(|t| t != tag);
        Ok(record.tags.len() != before)
    }

    /// Apply one tag across a selection of records.
    ///
    /// Ids not present in the session are skipped, mirroring a selection
    /// that outlived a reload. Returns how many records newly gained the tag.
    pub fn bulk_tag(&mut self, ids: &[u32], tag: &str) -> Result<usize, SessionError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(SessionError::EmptyTag);
        }
        let mut added = 0;
        for &id in ids {
            match self.add_tag(id, tag) {
                Ok(true) => added += 1,
                Ok(false) | Err(SessionError::NoSuchImage(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageMetadata;
    use tempfile::TempDir;

    fn session_with(ids: &[u32]) -> Session {
        let records = ids
            .iter()
            .map(|&id| {
                let filename = format!("IMG_{id:04}.jpg");
                ImageRecord {
                    id,
                    path: filename.clone(),
                    tags: Vec::new(),
                    metadata: ImageMetadata::unknown(&filename),
                }
            })
            .collect();
        Session::new(PathBuf::from("/cams"), records)
    }

    // =========================================================================
    // Tag mutations
    // =========================================================================

    #[test]
    fn add_tag_appends_in_insertion_order() {
        let mut session = session_with(&[1]);
        assert!(session.add_tag(1, "deer").unwrap());
        assert!(session.add_tag(1, "dusk").unwrap());
        assert_eq!(session.record(1).unwrap().tags, vec!["deer", "dusk"]);
    }

    #[test]
    fn add_tag_is_idempotent() {
        let mut session = session_with(&[1]);
        assert!(session.add_tag(1, "deer").unwrap());
        assert!(!session.add_tag(1, "deer").unwrap());
        assert_eq!(session.record(1).unwrap().tags, vec!["deer"]);
    }

    #[test]
    fn add_tag_trims_whitespace() {
        let mut session = session_with(&[1]);
        session.add_tag(1, "  deer  ").unwrap();
        assert!(!session.add_tag(1, "deer").unwrap());
        assert_eq!(session.record(1).unwrap().tags, vec!["deer"]);
    }

    #[test]
    fn add_empty_tag_is_rejected() {
        let mut session = session_with(&[1]);
        assert!(matches!(
            session.add_tag(1, "   "),
            Err(SessionError::EmptyTag)
        ));
    }

    #[test]
    fn add_tag_to_unknown_id_is_an_error() {
        let mut session = session_with(&[1]);
        assert!(matches!(
            session.add_tag(42, "deer"),
            Err(SessionError::NoSuchImage(42))
        ));
    }

    #[test]
    fn remove_tag_deletes_only_that_tag() {
        let mut session = session_with(&[1]);
        session.add_tag(1, "deer").unwrap();
        session.add_tag(1, "dusk").unwrap();
        assert!(session.remove_tag(1, "deer").unwrap());
        assert_eq!(session.record(1).unwrap().tags, vec!["dusk"]);
    }

    #[test]
    fn remove_absent_tag_is_a_noop() {
        let mut session = session_with(&[1]);
        session.add_tag(1, "deer").unwrap();
        assert!(!session.remove_tag(1, "fox").unwrap());
        assert_eq!(session.record(1).unwrap().tags, vec!["deer"]);
    }

    #[test]
    fn bulk_tag_skips_missing_ids_and_duplicates() {
        let mut session = session_with(&[1, 2, 3]);
        session.add_tag(2, "fox").unwrap();

        let added = session.bulk_tag(&[1, 2, 99], "fox").unwrap();
        assert_eq!(added, 1);
        assert_eq!(session.record(1).unwrap().tags, vec!["fox"]);
        assert_eq!(session.record(2).unwrap().tags, vec!["fox"]);
        assert!(session.record(3).unwrap().tags.is_empty());
    }

    #[test]
    fn bulk_tag_rejects_empty_tag() {
        let mut session = session_with(&[1]);
        assert!(matches!(
            session.bulk_tag(&[1], ""),
            Err(SessionError::EmptyTag)
        ));
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state/session.json");

        let mut session = session_with(&[1, 2]);
        session.add_tag(1, "deer").unwrap();
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn load_missing_session_reports_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Session::load(&tmp.path().join("session.json"));
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[test]
    fn load_corrupt_session_reports_json_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Session::load(&path), Err(SessionError::Json(_))));
    }
}

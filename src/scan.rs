//! Directory listing and parallel batch load.
//!
//! One batch load (re)populates the whole session from a chosen directory:
//!
//! ```text
//! list files → one extraction task per file (rayon fan-out) → join → Session
//! ```
//!
//! The fan-out is all-or-nothing: the assembled collection is published only
//! after every task finishes. The only cross-task state is a monotonically
//! increasing counter feeding the optional progress channel. A single file's
//! failure never fails the batch — that record degrades to all-`"Unknown"`
//! metadata and the rest proceed. There is no cancellation and no timeout;
//! a started load runs to completion.
//!
//! Ids are assigned 1-based by listing order (filename sort) and are reused
//! across reloads — they identify a record within one batch, nothing more.

use crate::metadata::MetadataReader;
use crate::session::Session;
use crate::types::{ImageMetadata, ImageRecord};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;

/// Extensions accepted by the directory listing, matched case-insensitively.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Progress report for one completed extraction task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEvent {
    pub filename: String,
    /// Files finished so far, including this one.
    pub loaded: usize,
    pub total: usize,
}

/// List image filenames in `dir`, sorted, non-recursive.
///
/// A missing or unreadable directory degrades to an empty listing with a
/// note on stderr — never an error the caller has to handle.
pub fn list_image_files(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("cannot read directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| has_image_extension(name))
        .collect();

    files.sort();
    files
}

fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Load every image under `dir` into a fresh [`Session`].
///
/// Extraction fans out one task per file over rayon; record order follows
/// the sorted listing regardless of completion order. Completed-task counts
/// go to `progress` as each extraction finishes.
pub fn load_directory(
    dir: &Path,
    reader: &impl MetadataReader,
    progress: Option<Sender<LoadEvent>>,
) -> Session {
    let files = list_image_files(dir);
    let total = files.len();
    let completed = AtomicUsize::new(0);

    let records: Vec<ImageRecord> = files
        .par_iter()
        .enumerate()
        .map(|(index, filename)| {
            let metadata = match std::fs::read(dir.join(filename)) {
                Ok(bytes) => reader.extract(&bytes, filename),
                // Unreadable file: degrade, don't fail the batch
                Err(_) => ImageMetadata::unknown(filename),
            };

            let loaded = completed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(tx) = &progress {
                // A dropped receiver just means nobody is watching
                let _ = tx.send(LoadEvent {
                    filename: filename.clone(),
                    loaded,
                    total,
                });
            }

            ImageRecord {
                id: (index + 1) as u32,
                path: filename.clone(),
                tags: Vec::new(),
                metadata,
            }
        })
        .collect();

    Session::new(dir.to_path_buf(), records)
}

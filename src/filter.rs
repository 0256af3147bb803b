//! Filter engine over the loaded image collection.
//!
//! [`filter`] is a pure function from (records, [`FilterSpec`]) to the
//! surviving records: total, deterministic, no side effects, one pass over
//! the input with every predicate re-evaluated per record. The filtered view
//! is always recomputed from scratch — never patched incrementally — so it
//! stays a pure function of its two inputs.
//!
//! ## Predicates
//!
//! A record passes iff ALL active predicates hold:
//!
//! 1. Tag substring — some tag contains the query, case-insensitively.
//! 2. Date range — inclusive, over the record's `YYYY-MM-DD` date.
//! 3. Time range — inclusive, over the record's `HH:MM` time.
//! 4. Locations — exact membership when the set is non-empty.
//! 5. Tag presence — [`TagPresence`] three-state toggle.
//!
//! ## "Unknown" policy
//!
//! A record whose date or time is the `"Unknown"` sentinel (or otherwise
//! unparseable) fails any *active* date/time range — unknown capture times
//! never sneak through a range the user asked for. With no range set, such
//! records pass.
//!
//! Ordering of the output preserves input order. Pagination is not this
//! module's business; [`page`] is a separate downstream slice helper.

use crate::types::ImageRecord;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeSet;

/// Three-state tagged/untagged toggle.
///
/// A single enumeration instead of two booleans, so the contradictory
/// "only tagged AND only untagged" state cannot be represented at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagPresence {
    /// No constraint on tag presence.
    #[default]
    Any,
    /// Only records with at least one tag.
    TaggedOnly,
    /// Only records with no tags.
    UntaggedOnly,
}

/// User-chosen predicates narrowing the displayed collection.
///
/// The default spec is fully open: every record passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against each tag.
    pub tag_substring: Option<String>,
    /// Inclusive capture-date range.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Inclusive capture-time range.
    pub time_range: Option<(NaiveTime, NaiveTime)>,
    /// Acceptable location strings, exact match. Empty = no constraint.
    pub locations: BTreeSet<String>,
    pub presence: TagPresence,
}

impl FilterSpec {
    /// True when no predicate is active — filtering would be the identity.
    pub fn is_open(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply `spec` to `records`, keeping survivors in input order.
pub fn filter<'a>(records: &'a [ImageRecord], spec: &FilterSpec) -> Vec<&'a ImageRecord> {
    records.iter().filter(|r| matches(r, spec)).collect()
}

/// Evaluate all predicates for one record, conjunctively.
fn matches(record: &ImageRecord, spec: &FilterSpec) -> bool {
    if let Some(ref query) = spec.tag_substring {
        if !query.is_empty() && !tag_contains(&record.tags, query) {
            return false;
        }
    }

    if let Some((start, end)) = spec.date_range {
        match NaiveDate::parse_from_str(&record.metadata.date, "%Y-%m-%d") {
            Ok(date) if start <= date && date <= end => {}
            // "Unknown" or malformed dates fail an active range
            _ => return false,
        }
    }

    if let Some((start, end)) = spec.time_range {
        match NaiveTime::parse_from_str(&record.metadata.time, "%H:%M") {
            Ok(time) if start <= time && time <= end => {}
            _ => return false,
        }
    }

    if !spec.locations.is_empty() && !spec.locations.contains(&record.metadata.location) {
        return false;
    }

    match spec.presence {
        TagPresence::Any => true,
        TagPresence::TaggedOnly => !record.tags.is_empty(),
        TagPresence::UntaggedOnly => record.tags.is_empty(),
    }
}

fn tag_contains(tags: &[String], query: &str) -> bool {
    let query = query.to_lowercase();
    tags.iter().any(|t| t.to_lowercase().contains(&query))
}

/// Slice one grid page out of an already-filtered view.
///
/// Pages are 1-based; a page past the end is empty. Purely a downstream
/// display operation — the engine itself never paginates.
pub fn page<'a>(
    filtered: &[&'a ImageRecord],
    page_number: usize,
    per_page: usize,
) -> Vec<&'a ImageRecord> {
    let start = page_number.saturating_sub(1).saturating_mul(per_page);
    filtered
        .iter()
        .skip(start)
        .take(per_page)
        .copied()
        .collect()
}

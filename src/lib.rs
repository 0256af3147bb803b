//! # Focal Point
//!
//! A command-line companion for wildlife camera work: load a directory of
//! trail-cam images, read their EXIF metadata, attach free-text tags, filter
//! by tag/date/time/location, and export the tag assignments as a JSON
//! document.
//!
//! # Architecture: Session Pipeline
//!
//! Every command operates on a **session manifest** — one JSON file holding
//! the loaded collection and its tag state:
//!
//! ```text
//! 1. scan     directory  →  session.json   (EXIF extraction, parallel fan-out)
//! 2. tag      session    →  session.json   (in-place tag mutation by id)
//! 3. list     session    →  stdout         (pure filtering + grid paging)
//! 4. export   session    →  wildlife_tags.json
//! ```
//!
//! The session is rebuilt wholesale by every `scan` — there is no merge with
//! a previous load. Ids are 1-based positions within one batch and carry no
//! identity across rescans.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Directory listing + parallel batch load with progress events |
//! | [`metadata`] | EXIF extraction — one extractor for every byte source, degrades to `"Unknown"` |
//! | [`filter`] | Pure filter engine: tag/date/time/location/presence predicates, conjunctive |
//! | [`session`] | Session manifest load/save and tag mutations (add/remove/bulk) |
//! | [`export`] | The `[{id, tags}]` export document |
//! | [`config`] | `config.toml` loading and validation (grid page size, export name) |
//! | [`types`] | Shared record types serialized into the session manifest |
//! | [`output`] | CLI output formatting — pure `format_*` functions + print wrappers |
//!
//! # Design Decisions
//!
//! ## Extraction Never Fails
//!
//! Wildlife cameras produce messy files: stripped EXIF, truncated writes,
//! firmware quirks. A batch load must survive all of it, so extraction is
//! total — each unreadable value degrades to the `"Unknown"` sentinel
//! field-by-field and the batch proceeds. Errors are reserved for things the
//! user must act on (missing session, bad config, unknown record id).
//!
//! ## Filtering Is Recomputed, Never Patched
//!
//! The filtered view is always a pure function of (collection, spec):
//! [`filter::filter`] re-evaluates every predicate on every record per call.
//! At trail-cam collection sizes a linear pass is instant, and recomputation
//! removes an entire class of view/collection consistency bugs.
//!
//! ## Three-State Presence Toggle
//!
//! "Only tagged" and "only untagged" are one enum
//! ([`filter::TagPresence`]), not two booleans — the contradictory
//! both-set state is unrepresentable, and the CLI rejects the flag
//! combination outright.
//!
//! ## Unknown vs. Range Filters
//!
//! A record whose date or time is `"Unknown"` fails any active date/time
//! range. The alternative — letting unparseable values pass — silently mixes
//! undated frames into a dawn-patrol query, which is exactly what a range
//! filter exists to prevent.

pub mod config;
pub mod export;
pub mod filter;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod session;
pub mod types;

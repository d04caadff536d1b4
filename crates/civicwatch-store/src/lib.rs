//! # civicwatch-store
//!
//! Storage boundary for issue records.
//!
//! This crate provides:
//! - `MemoryStore`: canonical in-memory state with deterministic
//!   queries (filter/sort/limit, share-token lookup, proximity)
//! - JSONL read/write (portable persistence, atomic replace)
//! - lock-scoped mutation (`transition_issue_jsonl`,
//!   `record_view_jsonl`) so concurrent updates serialize
//! - aggregate statistics for the dashboard
//!
//! The core engine computes next states on snapshots; this crate owns
//! persistence and the consistency of concurrent updates.
//!
//! ## Data model
//!
//! ```text
//! JSONL (on disk, one line per issue)
//!     <-> hydrate / flush
//! MemoryStore (deterministic in-memory projection)
//! ```

pub mod atomic;
pub mod geo;
pub mod jsonl;
pub mod memory;
pub mod stats;

pub use atomic::{
    AtomicMutationError, TransitionJsonlError, TransitionRequest, mutate_store_jsonl,
    record_view_jsonl, store_lock_path, transition_issue_jsonl,
};
pub use geo::distance_miles;
pub use jsonl::{
    JsonlError, read_issues, read_issues_from_path, write_issues, write_issues_to_path,
};
pub use memory::{IssueQuery, MemoryStore, StoreError};
pub use stats::{IssueStats, collect_stats};

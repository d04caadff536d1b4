//! # civicwatch-core
//!
//! Routing engine for civic issue reports.
//!
//! This crate provides:
//! - `ZoneDirectory`: coordinates -> administrative ward
//! - `ResponsibilityTable`: (ward, category) -> department/contractor
//! - `SlaPolicy`: per-category deadlines and the derived overdue predicate
//! - lifecycle: the `open -> acknowledged -> resolved` state machine
//!   with its append-only timeline
//! - `EnrichmentPipeline`: raw submission -> fully routed issue record
//!
//! Everything here is synchronous, storage-agnostic pure computation
//! over caller-owned snapshots. Persistence and the consistency of
//! concurrent updates live in `civicwatch-store`.
//!
//! ## Data flow
//!
//! ```text
//! RawSubmission
//!     -> resolve_zone -> resolve responsibility -> compute_deadline
//!     -> Issue { status: open, timeline: [creation event] }
//! ```

pub mod config;
pub mod enrich;
pub mod issue;
pub mod lifecycle;
pub mod responsibility;
pub mod sla;
pub mod zone;

pub use config::{ConfigError, EngineConfig};
pub use enrich::{
    Enrichment, EnrichmentPipeline, RawSubmission, UnroutedReason, generate_share_token,
};
pub use issue::{
    Category, Issue, IssueStatus, ParseCategoryError, ParseSeverityError, ParseStatusError,
    Severity, TimelineEvent,
};
pub use lifecycle::{
    CREATION_EVENT_DESCRIPTION, SYSTEM_ACTOR, TransitionError, apply_transition, creation_event,
    transition_allowed,
};
pub use responsibility::{Responsibility, ResponsibilityTable};
pub use sla::{
    DEFAULT_ACKNOWLEDGEMENT_HOURS, DEFAULT_RESOLUTION_HOURS, SlaPolicy,
    is_acknowledgement_overdue, is_overdue, time_remaining,
};
pub use zone::{LatitudeBand, Zone, ZoneDirectory, valid_coordinates};

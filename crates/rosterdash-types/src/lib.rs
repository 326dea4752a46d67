//! Shared type definitions for the Rosterdash dashboard.
//!
//! This crate is the single source of truth for the records the REST API
//! returns, the bodies it accepts, and the overview payload the summary
//! builder produces. Types flow downstream to `TypeScript` via `ts-rs` for
//! the presentation layer.
//!
//! # Modules
//!
//! - [`ids`] -- Integer identifier wrappers for teams and players
//! - [`enums`] -- Sort direction, sortable fields, rating tiers
//! - [`structs`] -- `Team`, `Player`, and their create/update drafts
//! - [`summary`] -- The dashboard overview payload

pub mod enums;
pub mod ids;
pub mod structs;
pub mod summary;

// Re-export all public types at crate root for convenience.
pub use enums::{PlayerField, RatingTier, SortDirection, TeamField, UnknownField};
pub use ids::{PlayerId, TeamId};
pub use structs::{Player, PlayerDraft, Team, TeamDraft};
pub use summary::{
    DashboardSummary, GroupCount, GroupCounts, NO_PLAYER, PlaceholderMetrics, RatingBucket,
};

//! Client-side logic of the Rosterdash dashboard.
//!
//! Everything here is pure and synchronous: it takes decoded records and
//! user input and produces table rows, summaries, and request bodies. The
//! HTTP side lives in `rosterdash-client`.
//!
//! # Modules
//!
//! - [`collate`] -- Locale-style string ordering for text columns.
//! - [`config`] -- Dashboard settings loaded from `rosterdash.yaml`.
//! - [`error`] -- [`CoreError`] for form submission and draft decoding.
//! - [`form`] -- Form text coercion schema and submission gating.
//! - [`normalize`] -- Tolerant decoding of list and record payloads.
//! - [`query`] -- Search and sort over loaded collections.
//! - [`store`] -- Loaded collections and per-table view state.
//! - [`summary`] -- Aggregate statistics for the overview page.
//!
//! [`CoreError`]: error::CoreError

pub mod collate;
pub mod config;
pub mod error;
pub mod form;
pub mod normalize;
pub mod query;
pub mod store;
pub mod summary;

pub use config::{ConfigError, DashboardConfig, SummaryConfig};
pub use error::CoreError;
pub use form::{
    FREE_AGENT_OPTION, FieldSpec, FormMode, FormSession, FormText, PlayerForm, TeamForm, coerce_form,
};
pub use query::{FieldValue, Query, Record, SortState, apply, compare_values, filter, sort_rows};
pub use store::{Collection, Identified, LoadStatus, TeamLabel, ViewState, team_label};
pub use summary::SummaryBuilder;

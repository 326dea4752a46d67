//! HTTP side of the Rosterdash dashboard.
//!
//! # Modules
//!
//! - [`config`] -- [`ClientConfig`] from environment variables.
//! - [`error`] -- [`ClientError`], the failure taxonomy of API calls.
//! - [`gateway`] -- [`ApiClient`] and the [`Resource`] trait.
//! - [`dashboard`] -- Joined teams/players load feeding the summary.
//! - [`editor`] -- Create, edit, and delete applied to view state on success.

pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod gateway;

pub use config::ClientConfig;
pub use dashboard::{Dashboard, load_dashboard};
pub use editor::EntityForm;
pub use error::ClientError;
pub use gateway::{ApiClient, Resource};

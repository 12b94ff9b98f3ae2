//! Issue tracker integration
//!
//! The tracker adapter uses a trait-based design for vendor abstraction: the
//! pipeline consumes normalized [`crate::domain::issue`] records and performs
//! no network or auth logic itself.

pub mod client;
pub mod jira;
pub mod models;
pub mod traits;

pub use client::TrackerClient;
pub use jira::JiraVendor;
pub use traits::TrackerVendor;

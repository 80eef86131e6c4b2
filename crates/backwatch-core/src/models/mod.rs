//! Data models for plan records.
//!
//! Two shapes of the same record live here:
//!
//! - [`RawPlan`]: the record exactly as the backup API's monitoring endpoint
//!   returns it, with loosely typed counters
//! - [`Plan`]: the normalized record the classifier works on, produced by
//!   [`crate::normalize`]
//!
//! Neither is persisted; both are rebuilt on every evaluation pass.

pub mod plan;
pub mod raw;

pub use plan::Plan;
pub use raw::{parse_records, RawPlan};

//! Core domain entities.
//!
//! - [`LinkRecord`] - A short code mapped to its target URL, with click count and optional expiry

pub mod link;

pub use link::LinkRecord;

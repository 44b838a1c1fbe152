//! The tabular data engine.
//!
//! Raw text is split line by line ([`split`]), typed cell by cell
//! ([`inference`]) and assembled into an immutable [`table::Table`]. Profiling,
//! querying and aggregation are pure functions over a built table.

pub mod aggregate;
pub mod inference;
pub mod profile;
pub mod query;
pub mod regexes;
pub mod split;
pub mod table;

//! Statistics aggregation.
//!
//! This module fetches the six resource summaries concurrently and
//! merges them into the statistics view model.

pub mod aggregator;

pub use aggregator::aggregate;

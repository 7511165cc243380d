//! Aggregation over the in-memory dataset.
//!
//! Both aggregators are pure functions over an injected record slice;
//! they hold no state between calls.

pub mod aggregator;

pub use aggregator::*;

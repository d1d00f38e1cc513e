//! Article pipeline: relevance filter, title dedup, relationship scoring.
//!
//! Raw candidates pass through [`relevance`] before entering the pool,
//! [`dedup`] collapses near-identical stories into the canonical set, and
//! [`scoring`] discovers weighted relationships across that set.

pub mod dedup;
pub mod relevance;
pub mod scoring;
pub mod timestamp;

//! Error surface for [`crate::compute`].
//!
//! `compute` never panics on caller-supplied coordinates; invalid
//! arguments are reported as a typed error instead of the source
//! design's null-result-plus-sentinel-length convention.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeError {
    #[error("start/goal index out of bounds for a {width}x{height} grid")]
    OutOfBounds { width: usize, height: usize },

    #[error("search aborted after expanding {expanded} nodes (limit {limit})")]
    ExpansionLimitReached { expanded: u64, limit: u64 },
}

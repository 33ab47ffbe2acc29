pub mod heap;
pub mod heuristics;
pub mod search;

pub use heap::IndexedPriorityQueue;
pub use heuristics::{estimate, precise_distance};
pub use search::{compute, PathOutcome};

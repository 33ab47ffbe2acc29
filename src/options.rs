//! Ambient search configuration.
//!
//! Mirrors the shape of a production search-options struct (defaults,
//! `Serialize`/`Deserialize` for config files, a documented constant per
//! field) without adding any of the terrain/cost features the
//! specification rules out — the only knobs here are a safety valve
//! against pathological maps and a choice of admissible heuristic.

use serde::{Deserialize, Serialize};

/// Cap on node expansions before `compute` gives up. Guards against a
/// map that is technically finite but large enough to run effectively
/// forever; does not change the result on any map small enough to
/// finish under the cap.
pub const DEFAULT_MAX_EXPANSIONS: u64 = 1_000_000;

/// Which admissible estimate drives the open-set ordering. Both are
/// admissible and consistent for the eight-connected uniform grid;
/// octile is tighter and costs one extra multiply per evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heuristic {
    Chebyshev,
    Octile,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Chebyshev
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    pub max_expansions: u64,
    pub heuristic: Heuristic,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            heuristic: Heuristic::default(),
        }
    }
}

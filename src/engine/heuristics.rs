//! Distance metrics used by the search: an admissible estimate for the
//! open-set priority, and the exact cost between two jump points that
//! lie on a shared straight or diagonal ray.

use crate::options::Heuristic;

/// Admissible estimate from `a` to `b`. Chebyshev (`max(|dx|, |dy|)`) is
/// admissible and consistent for the eight-connected uniform grid when
/// diagonal steps cost the same as straight ones relative to Euclidean
/// truth, though loose; octile (`max(d) + (sqrt(2) - 1) * min(d)`) is a
/// tighter bound with no correctness change, and is the tuning knob
/// `SearchLimits::heuristic` selects.
pub fn estimate(a: (i64, i64), b: (i64, i64), heuristic: Heuristic) -> f64 {
    let dx = (a.0 - b.0).unsigned_abs() as f64;
    let dy = (a.1 - b.1).unsigned_abs() as f64;
    match heuristic {
        Heuristic::Chebyshev => dx.max(dy),
        Heuristic::Octile => {
            let dmin = dx.min(dy);
            let dmax = dx.max(dy);
            dmax + (std::f64::consts::SQRT_2 - 1.0) * dmin
        }
    }
}

/// Exact distance between `a` and `b`. JPS only ever records jump-point
/// pairs that are collinear along a straight or pure-diagonal ray, so
/// this is the true path length between them, not merely a bound:
/// Euclidean when both axes differ (a diagonal run), Manhattan when only
/// one does (a straight run, where it degenerates to `|dx| + |dy|`).
pub fn precise_distance(a: (i64, i64), b: (i64, i64)) -> f64 {
    let dx = (a.0 - b.0).unsigned_abs() as f64;
    let dy = (a.1 - b.1).unsigned_abs() as f64;
    if dx != 0.0 && dy != 0.0 {
        (dx * dx + dy * dy).sqrt()
    } else {
        dx + dy
    }
}

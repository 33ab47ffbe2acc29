//! The Jump Point Search engine: forced-neighbor detection, the jump
//! routine, the arrival-direction successor filter, the main search
//! loop, and jump-point path interpolation.

use tracing::{debug, trace};

use crate::direction::Direction;
use crate::engine::heap::IndexedPriorityQueue;
use crate::engine::heuristics::{estimate, precise_distance};
use crate::error::ComputeError;
use crate::grid::Grid;
use crate::options::SearchLimits;

/// Result of a successful or unsuccessful `compute` call that does not
/// itself represent an invalid-argument error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// Goal-first sequence of tile indices; the start tile is excluded.
    Found(Vec<usize>),
    /// The open set emptied without reaching the goal.
    NoPath,
}

/// `a ⇒ b ≡ ¬a ∨ b`.
#[inline]
fn implies(a: bool, b: bool) -> bool {
    !a || b
}

/// Forced-neighbor predicate for a cell `c` reached while traveling in
/// direction `dir`. `c` is expressed in signed coordinates so the
/// lookahead probes (`dir ± 2`, `dir ± 3`) can step off-grid and simply
/// read as not enterable rather than wrapping.
fn has_forced_neighbours(grid: &Grid, c: (i64, i64), dir: Direction) -> bool {
    let p = |k: i64| -> bool {
        let (nx, ny) = dir.rotate(k).step(c);
        grid.enterable_signed(nx, ny)
    };
    if dir.is_cardinal() {
        !implies(p(-1), p(-2)) || !implies(p(1), p(2))
    } else {
        !implies(p(-2), p(-3)) || !implies(p(2), p(3))
    }
}

/// Jumps along a cardinal (straight) direction from `from`, returning
/// the first jump point, the goal, or `None` on hitting an obstacle or
/// the grid boundary. Never recurses: a straight run is pure tail
/// iteration.
fn jump_straight(grid: &Grid, goal: (i64, i64), dir: Direction, from: (i64, i64)) -> Option<(i64, i64)> {
    let mut current = from;
    loop {
        let next = dir.step(current);
        if !grid.enterable_signed(next.0, next.1) {
            return None;
        }
        current = next;
        if current == goal {
            return Some(current);
        }
        if has_forced_neighbours(grid, current, dir) {
            return Some(current);
        }
    }
}

/// Jumps from `from` in direction `dir`, returning the first jump
/// point. For a diagonal direction, each step additionally probes both
/// orthogonal components before continuing the diagonal tail; the cell
/// at which an orthogonal probe succeeds is itself the recorded jump
/// point, not the orthogonal jump point it found. Implemented
/// iteratively (the diagonal tail call in spec terms), since a
/// recursive straight-line jump would risk overflowing the stack on a
/// long unobstructed run.
fn jump(grid: &Grid, goal: (i64, i64), dir: Direction, from: (i64, i64)) -> Option<(i64, i64)> {
    if dir.is_cardinal() {
        return jump_straight(grid, goal, dir, from);
    }
    let mut current = from;
    loop {
        let next = dir.step(current);
        if !grid.enterable_signed(next.0, next.1) {
            return None;
        }
        current = next;
        if current == goal {
            return Some(current);
        }
        if has_forced_neighbours(grid, current, dir) {
            return Some(current);
        }
        if jump_straight(grid, goal, dir.rotate(-1), current).is_some() {
            return Some(current);
        }
        if jump_straight(grid, goal, dir.rotate(1), current).is_some() {
            return Some(current);
        }
    }
}

/// Whether `d` is worth trying when the current node was arrived at
/// from direction `d_from` (`None` for the start node, which tries all
/// eight).
fn is_optimal_turn(d: Direction, d_from: Option<Direction>) -> bool {
    let Some(d_from) = d_from else { return true };
    if d == d_from {
        return true;
    }
    if d_from.is_diagonal() {
        d == d_from.rotate(1) || d == d_from.rotate(-1) || d == d_from.rotate(2) || d == d_from.rotate(-2)
    } else {
        d == d_from.rotate(1) || d == d_from.rotate(-1)
    }
}

/// Walks `came_from` from `goal` back to `start`, regenerating the
/// tiles a jump-point pair skipped over by stepping one cell at a time
/// toward the current target and re-targeting at each recorded jump
/// point. Returns the path goal-first, start excluded.
fn reconstruct(grid: &Grid, start: usize, goal: usize, came_from: &[Option<u32>]) -> Vec<usize> {
    let mut target = grid.to_coord(goal);
    let mut i = grid.to_coord(goal);
    let mut out = Vec::new();
    loop {
        i = step_one_toward(i, target);
        let i_index = grid.to_index(i.0, i.1);
        out.push(i_index);
        if i == target {
            if let Some(parent) = came_from[i_index] {
                target = grid.to_coord(parent as usize);
            }
        }
        if i_index == start {
            break;
        }
    }
    out.pop();
    out
}

fn step_one_toward(c: (usize, usize), t: (usize, usize)) -> (usize, usize) {
    let cx = c.0 as i64;
    let cy = c.1 as i64;
    let tx = t.0 as i64;
    let ty = t.1 as i64;
    let nx = cx + (tx - cx).signum();
    let ny = cy + (ty - cy).signum();
    (nx as usize, ny as usize)
}

/// Runs Jump Point Search from `start` to `goal` over `grid`.
///
/// Returns `Err(ComputeError::OutOfBounds)` when either endpoint is
/// outside `[0, W*H)`. Otherwise returns `Ok(PathOutcome::Found(path))`
/// with a goal-first, start-excluded tile sequence, or
/// `Ok(PathOutcome::NoPath)` when the open set empties first.
pub fn compute(
    grid: &Grid,
    start: usize,
    goal: usize,
    limits: &SearchLimits,
) -> Result<PathOutcome, ComputeError> {
    let n = grid.len();
    if start >= n || goal >= n {
        return Err(ComputeError::OutOfBounds { width: grid.width(), height: grid.height() });
    }

    let goal_coord = {
        let (x, y) = grid.to_coord(goal);
        (x as i64, y as i64)
    };

    let mut g_score = vec![f64::INFINITY; n];
    let mut came_from: Vec<Option<u32>> = vec![None; n];
    let mut closed = vec![false; n];
    let mut open = IndexedPriorityQueue::with_capacity(n);

    g_score[start] = 0.0;
    let start_coord = {
        let (x, y) = grid.to_coord(start);
        (x as i64, y as i64)
    };
    open.insert(start as u32, estimate(start_coord, goal_coord, limits.heuristic));

    let mut expanded: u64 = 0;

    while let Some((cur, _)) = open.peek_min() {
        let cur = cur as usize;
        if cur == goal {
            debug!(expanded, "jps search reached goal");
            return Ok(PathOutcome::Found(reconstruct(grid, start, goal, &came_from)));
        }
        open.pop_min();
        closed[cur] = true;
        expanded += 1;
        if expanded > limits.max_expansions {
            return Err(ComputeError::ExpansionLimitReached { expanded, limit: limits.max_expansions });
        }

        let cur_coord = {
            let (x, y) = grid.to_coord(cur);
            (x as i64, y as i64)
        };
        let d_from = came_from[cur].and_then(|parent| {
            let (px, py) = grid.to_coord(parent as usize);
            Direction::of_move((px as i64, py as i64), cur_coord)
        });

        for &d in Direction::ALL.iter() {
            if !is_optimal_turn(d, d_from) {
                continue;
            }
            let Some(jp_coord) = jump(grid, goal_coord, d, cur_coord) else { continue };
            debug_assert!(grid.contained_signed(jp_coord.0, jp_coord.1));
            let jp = grid.to_index(jp_coord.0 as usize, jp_coord.1 as usize);
            if closed[jp] {
                continue;
            }
            relax(grid, goal_coord, &mut open, &mut g_score, &mut came_from, cur, jp, limits);
        }
    }

    debug!(expanded, "jps search exhausted open set without reaching goal");
    Ok(PathOutcome::NoPath)
}

#[allow(clippy::too_many_arguments)]
fn relax(
    grid: &Grid,
    goal_coord: (i64, i64),
    open: &mut IndexedPriorityQueue,
    g_score: &mut [f64],
    came_from: &mut [Option<u32>],
    cur: usize,
    jp: usize,
    limits: &SearchLimits,
) {
    let cur_coord = {
        let (x, y) = grid.to_coord(cur);
        (x as i64, y as i64)
    };
    let jp_coord = {
        let (x, y) = grid.to_coord(jp);
        (x as i64, y as i64)
    };
    let tentative = g_score[cur] + precise_distance(cur_coord, jp_coord);
    if !open.contains(jp as u32) {
        g_score[jp] = tentative;
        came_from[jp] = Some(cur as u32);
        let priority = tentative + estimate(jp_coord, goal_coord, limits.heuristic);
        trace!(jp, priority, "relax: inserting new jump point");
        open.insert(jp as u32, priority);
    } else if g_score[jp] > tentative {
        let old_priority = open.priority_of(jp as u32);
        let old_g = g_score[jp];
        came_from[jp] = Some(cur as u32);
        g_score[jp] = tentative;
        trace!(jp, "relax: lowering existing jump point");
        open.change_priority(jp as u32, old_priority - old_g + tentative);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Heuristic;

    fn open_grid(w: usize, h: usize) -> Grid {
        Grid::new(vec![true; w * h], w, h)
    }

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let h = rows.len();
        let w = rows[0].len();
        let mut cells = Vec::with_capacity(w * h);
        for row in rows {
            for ch in row.chars() {
                cells.push(ch != '0');
            }
        }
        Grid::new(cells, w, h)
    }

    #[test]
    fn forced_neighbour_cardinal_detects_blocked_orthogonal_with_open_diagonal() {
        // Moving east with north blocked one step ahead but northeast open.
        let g = grid_from_rows(&["010", "111", "111"]);
        // y=0 row "010": (0,0) open,(1,0) blocked,(2,0) open.
        assert!(has_forced_neighbours(&g, (0, 1), Direction::E));
    }

    #[test]
    fn forced_neighbour_open_grid_is_never_forced() {
        let g = open_grid(5, 5);
        for d in Direction::ALL {
            assert!(!has_forced_neighbours(&g, (2, 2), d));
        }
    }

    #[test]
    fn jump_straight_line_reaches_goal_directly() {
        let g = open_grid(5, 1);
        let goal = (4, 0);
        let jp = jump(&g, goal, Direction::E, (0, 0));
        assert_eq!(jp, Some((4, 0)));
    }

    #[test]
    fn jump_diagonal_reaches_goal_directly_on_open_grid() {
        let g = open_grid(5, 5);
        let goal = (4, 4);
        let jp = jump(&g, goal, Direction::SE, (0, 0));
        assert_eq!(jp, Some((4, 4)));
    }

    #[test]
    fn jump_stops_at_grid_boundary_without_a_jump_point() {
        let g = open_grid(3, 1);
        let goal = (100, 100);
        assert_eq!(jump(&g, goal, Direction::E, (0, 0)), None);
    }

    #[test]
    fn optimal_turn_allows_all_directions_from_start() {
        for d in Direction::ALL {
            assert!(is_optimal_turn(d, None));
        }
    }

    #[test]
    fn optimal_turn_restricts_cardinal_arrival_to_three_directions() {
        let allowed: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| is_optimal_turn(d, Some(Direction::E)))
            .collect();
        assert_eq!(allowed, vec![Direction::E, Direction::NE, Direction::SE]);
    }

    #[test]
    fn optimal_turn_restricts_diagonal_arrival_to_five_directions() {
        let allowed: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| is_optimal_turn(d, Some(Direction::SE)))
            .collect();
        assert_eq!(allowed.len(), 5);
        assert!(allowed.contains(&Direction::SE));
        assert!(allowed.contains(&Direction::E));
        assert!(allowed.contains(&Direction::S));
    }

    #[test]
    fn compute_rejects_out_of_range_indices() {
        let g = open_grid(3, 3);
        let limits = SearchLimits::default();
        let err = compute(&g, 0, 9, &limits).unwrap_err();
        assert_eq!(err, ComputeError::OutOfBounds { width: 3, height: 3 });
    }

    #[test]
    fn compute_straight_diagonal_s1() {
        let g = open_grid(5, 5);
        let limits = SearchLimits::default();
        let start = g.to_index(0, 0);
        let goal = g.to_index(4, 4);
        let outcome = compute(&g, start, goal, &limits).unwrap();
        let expected = vec![
            g.to_index(4, 4),
            g.to_index(3, 3),
            g.to_index(2, 2),
            g.to_index(1, 1),
        ];
        assert_eq!(outcome, PathOutcome::Found(expected));
    }

    #[test]
    fn compute_unreachable_blocked_column_s3() {
        let mut cells = vec![true; 25];
        for y in 0..5 {
            cells[2 + y * 5] = false;
        }
        let g = Grid::new(cells, 5, 5);
        let limits = SearchLimits::default();
        let start = g.to_index(0, 0);
        let goal = g.to_index(4, 4);
        assert_eq!(compute(&g, start, goal, &limits).unwrap(), PathOutcome::NoPath);
    }

    #[test]
    fn compute_identical_start_and_goal_s4() {
        let g = open_grid(5, 5);
        let limits = SearchLimits::default();
        let start = g.to_index(2, 2);
        let outcome = compute(&g, start, start, &limits).unwrap();
        assert_eq!(outcome, PathOutcome::Found(Vec::new()));
    }

    #[test]
    fn compute_one_step_adjacency_s5() {
        let g = open_grid(5, 5);
        let limits = SearchLimits::default();
        let start = g.to_index(2, 2);
        let goal = g.to_index(2, 3);
        let outcome = compute(&g, start, goal, &limits).unwrap();
        assert_eq!(outcome, PathOutcome::Found(vec![goal]));
    }

    #[test]
    fn heuristic_choice_does_not_change_whether_a_path_is_found() {
        let g = open_grid(6, 6);
        let start = g.to_index(0, 0);
        let goal = g.to_index(5, 5);
        let cheby = compute(&g, start, goal, &SearchLimits { heuristic: Heuristic::Chebyshev, ..SearchLimits::default() }).unwrap();
        let octile = compute(&g, start, goal, &SearchLimits { heuristic: Heuristic::Octile, ..SearchLimits::default() }).unwrap();
        assert!(matches!(cheby, PathOutcome::Found(_)));
        assert!(matches!(octile, PathOutcome::Found(_)));
    }

    #[test]
    fn expansion_limit_is_reported_as_an_error() {
        let g = open_grid(50, 50);
        let start = g.to_index(0, 0);
        let goal = g.to_index(49, 49);
        let limits = SearchLimits { max_expansions: 0, ..SearchLimits::default() };
        let err = compute(&g, start, goal, &limits).unwrap_err();
        assert!(matches!(err, ComputeError::ExpansionLimitReached { .. }));
    }
}

//! Eight-compass direction encoding and coordinate stepping.
//!
//! Directions are the integers `0..8` in the fixed order
//! `N, NE, E, SE, S, SW, W, NW` (even = cardinal, odd = diagonal). The
//! forced-neighbor check and the optimal-turn filter both rotate this
//! encoding by small negative and positive offsets (`dir - 2`, `dir + 3`,
//! ...), so every rotation here goes through [`rem_euclid`], never the
//! sign-preserving `%` a careless port would reach for.

use std::ops::Add;

/// One of the eight compass directions, or the "no arrival direction"
/// sentinel used for the start node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction(u8);

/// `(dx, dy)` unit steps for directions `0..8`, `y` increasing southward
/// to match `i = x + y * W` row-major layout.
const STEPS: [(i64, i64); 8] = [
    (0, -1),  // 0 N
    (1, -1),  // 1 NE
    (1, 0),   // 2 E
    (1, 1),   // 3 SE
    (0, 1),   // 4 S
    (-1, 1),  // 5 SW
    (-1, 0),  // 6 W
    (-1, -1), // 7 NW
];

impl Direction {
    pub const N: Direction = Direction(0);
    pub const NE: Direction = Direction(1);
    pub const E: Direction = Direction(2);
    pub const SE: Direction = Direction(3);
    pub const S: Direction = Direction(4);
    pub const SW: Direction = Direction(5);
    pub const W: Direction = Direction(6);
    pub const NW: Direction = Direction(7);

    /// All eight directions in encoding order.
    pub const ALL: [Direction; 8] = [
        Direction(0),
        Direction(1),
        Direction(2),
        Direction(3),
        Direction(4),
        Direction(5),
        Direction(6),
        Direction(7),
    ];

    /// Builds a direction from a raw offset, normalizing via true
    /// (Euclidean) modulo so negative offsets like `dir - 3` land in
    /// `0..8` rather than producing a negative remainder.
    pub fn from_offset(raw: i64) -> Direction {
        Direction(raw.rem_euclid(8) as u8)
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }

    pub fn is_diagonal(self) -> bool {
        self.0 % 2 == 1
    }

    pub fn is_cardinal(self) -> bool {
        !self.is_diagonal()
    }

    /// `(dx, dy)` unit step for this direction.
    pub fn delta(self) -> (i64, i64) {
        STEPS[self.0 as usize]
    }

    /// Unit-step neighbor of `coord` in this direction.
    pub fn step(self, coord: (i64, i64)) -> (i64, i64) {
        let (dx, dy) = self.delta();
        (coord.0 + dx, coord.1 + dy)
    }

    /// Rotates this direction by `k` steps (may be negative), via true
    /// modulo.
    pub fn rotate(self, k: i64) -> Direction {
        Direction::from_offset(self.0 as i64 + k)
    }

    /// Direction of travel from `from` to `to`, where the two cells
    /// differ by at most one step in each axis. Returns `None` when
    /// `from == to`.
    pub fn of_move(from: (i64, i64), to: (i64, i64)) -> Option<Direction> {
        let dx = (to.0 - from.0).signum();
        let dy = (to.1 - from.1).signum();
        if dx == 0 && dy == 0 {
            return None;
        }
        STEPS
            .iter()
            .position(|&s| s == (dx, dy))
            .map(|idx| Direction(idx as u8))
    }
}

impl Add<i64> for Direction {
    type Output = Direction;
    fn add(self, rhs: i64) -> Direction {
        self.rotate(rhs)
    }
}

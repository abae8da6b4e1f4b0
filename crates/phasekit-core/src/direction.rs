//! The four axis-aligned unit steps of a 4-connected grid.

/// Axis-aligned unit step on a row-major grid.
///
/// Rows grow downwards, so [`Direction::Up`] decreases the row index.
/// Variants are declared in clockwise order as seen on screen, which is the
/// order [`Direction::cw`] cycles through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// One row up (row - 1).
    Up = 0,
    /// One column right (col + 1).
    Right = 1,
    /// One row down (row + 1).
    Down = 2,
    /// One column left (col - 1).
    Left = 3,
}

/// All four directions in clockwise order, starting at [`Direction::Up`].
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

impl Direction {
    /// Returns the `(row_offset, col_offset)` for this direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Position in [`DIRECTIONS`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rotate a quarter turn clockwise.
    pub const fn cw(self) -> Direction {
        DIRECTIONS[(self as usize + 1) % 4]
    }

    /// Rotate a quarter turn counter-clockwise.
    pub const fn ccw(self) -> Direction {
        DIRECTIONS[(self as usize + 3) % 4]
    }

    /// The opposite direction.
    pub const fn opposite(self) -> Direction {
        DIRECTIONS[(self as usize + 2) % 4]
    }

    /// Bit used when several directions are packed into one byte.
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

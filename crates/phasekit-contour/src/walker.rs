//! Finite-state machine for clockwise boundary walking.
//!
//! The walker stands on an edge segment: a pixel `p` of the traced region
//! together with the side `d` of `p` that faces the other side. It always
//! heads `d.cw()`, so the traced region stays on its right-hand side.
//!
//! At the end of each segment two pixels decide the next state:
//!
//! ```text
//!          d
//!          ^
//!   +-----+-----+
//!   |  ·  |  q  |      q = r + d   (diagonal, ahead and across the edge)
//!   +-----+-----+
//!   |  p  |  r  | ---> heading = d.cw()
//!   +-----+-----+      r = p + heading
//! ```
//!
//! | `r` in region | `q` in region | turn       | next state          |
//! |---------------|---------------|------------|---------------------|
//! | no            | (ignored)     | `Right`    | `(p, d.cw())`       |
//! | yes           | no            | `Straight` | `(r, d)`            |
//! | yes           | yes           | `Left`     | `(q, d.ccw())`      |
//!
//! `q` is only consulted once `r` is known to be in the region, so two
//! pixels touching at a corner are never joined: the walk follows
//! 4-connectivity.

use phasekit_core::{Direction, Index2};

/// One transition of the boundary walker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Convex corner: stay on the pixel, move to its next side.
    Right,
    /// Continue along the same side on the next pixel.
    Straight,
    /// Concave corner: step diagonally onto the pixel across the corner.
    Left,
}

impl Turn {
    /// Transition table keyed by the membership of the ahead pixel `r` and
    /// the diagonal pixel `q`.
    pub const fn decide(ahead_inside: bool, diagonal_inside: bool) -> Turn {
        match (ahead_inside, diagonal_inside) {
            (false, _) => Turn::Right,
            (true, false) => Turn::Straight,
            (true, true) => Turn::Left,
        }
    }
}

/// Position of the boundary walker: a pixel and the open side it stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WalkState {
    /// Current pixel.
    pub pixel: Index2,
    /// Side of `pixel` facing away from the traced region.
    pub side: Direction,
}

impl WalkState {
    /// Walk heading: the side rotated a quarter turn clockwise.
    pub const fn heading(&self) -> Direction {
        self.side.cw()
    }

    /// Signed coordinates of the ahead pixel `r`.
    pub fn ahead(&self) -> (isize, isize) {
        let (hr, hc) = self.heading().offset();
        (self.pixel.row as isize + hr, self.pixel.col as isize + hc)
    }

    /// Signed coordinates of the diagonal pixel `q`.
    pub fn diagonal(&self) -> (isize, isize) {
        let (ar, ac) = self.ahead();
        let (dr, dc) = self.side.offset();
        (ar + dr, ac + dc)
    }

    /// Apply `turn`, returning the next state.
    ///
    /// Returns `None` if the move would leave the non-negative quadrant;
    /// callers check the upper grid bounds themselves.
    pub fn advance(&self, turn: Turn) -> Option<WalkState> {
        let (row, col, side) = match turn {
            Turn::Right => {
                return Some(WalkState {
                    pixel: self.pixel,
                    side: self.side.cw(),
                })
            }
            Turn::Straight => {
                let (r, c) = self.ahead();
                (r, c, self.side)
            }
            Turn::Left => {
                let (r, c) = self.diagonal();
                (r, c, self.side.ccw())
            }
        };
        if row < 0 || col < 0 {
            return None;
        }
        Some(WalkState {
            pixel: Index2::new(row as usize, col as usize),
            side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        assert_eq!(Turn::decide(false, false), Turn::Right);
        assert_eq!(Turn::decide(false, true), Turn::Right);
        assert_eq!(Turn::decide(true, false), Turn::Straight);
        assert_eq!(Turn::decide(true, true), Turn::Left);
    }

    #[test]
    fn heading_keeps_region_on_the_right() {
        // Standing on the top side of a pixel, the walker heads right.
        let s = WalkState {
            pixel: Index2::new(3, 3),
            side: Direction::Up,
        };
        assert_eq!(s.heading(), Direction::Right);
        assert_eq!(s.ahead(), (3, 4));
        assert_eq!(s.diagonal(), (2, 4));
    }

    #[test]
    fn advance_each_turn() {
        let s = WalkState {
            pixel: Index2::new(3, 3),
            side: Direction::Up,
        };
        assert_eq!(
            s.advance(Turn::Right),
            Some(WalkState {
                pixel: Index2::new(3, 3),
                side: Direction::Right
            })
        );
        assert_eq!(
            s.advance(Turn::Straight),
            Some(WalkState {
                pixel: Index2::new(3, 4),
                side: Direction::Up
            })
        );
        assert_eq!(
            s.advance(Turn::Left),
            Some(WalkState {
                pixel: Index2::new(2, 4),
                side: Direction::Left
            })
        );
    }

    #[test]
    fn advance_off_grid_is_none() {
        let s = WalkState {
            pixel: Index2::new(0, 0),
            side: Direction::Down,
        };
        // Heading left from column 0.
        assert_eq!(s.advance(Turn::Straight), None);
        assert!(s.advance(Turn::Right).is_some());
    }

    #[test]
    fn four_right_turns_return_home() {
        let start = WalkState {
            pixel: Index2::new(1, 1),
            side: Direction::Up,
        };
        let mut s = start;
        for _ in 0..4 {
            s = s.advance(Turn::Right).unwrap();
        }
        assert_eq!(s, start);
    }
}

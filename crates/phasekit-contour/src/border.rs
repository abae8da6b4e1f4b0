//! Ordering edge pixels into a closed clockwise contour.

use crate::edges::{find_edges, EdgeMap, Region};
use crate::walker::{Turn, WalkState};
use phasekit_core::{Direction, Grid, Index2, Mask, PhaseError};

/// An ordered closed loop of boundary pixels.
///
/// Consecutive pixels touch (4- or 8-connected) and the last pixel touches
/// the first. The traced region lies on the right-hand side of the walk, so
/// an inside contour runs clockwise on screen (rows growing downwards) and
/// an outside contour runs anticlockwise around the hole left by Ω.
///
/// A pixel may appear more than once where the region is one pixel wide.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Contour {
    pixels: Vec<Index2>,
    sides: Vec<Direction>,
}

impl Contour {
    /// Pixels in walk order.
    pub fn pixels(&self) -> &[Index2] {
        &self.pixels
    }

    /// Open side on which the walk entered each pixel.
    pub fn sides(&self) -> &[Direction] {
        &self.sides
    }

    /// Number of pixels in the loop.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// `true` for the empty contour.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Iterate over the pixels in walk order.
    pub fn iter(&self) -> impl Iterator<Item = Index2> + '_ {
        self.pixels.iter().copied()
    }

    /// Consecutive pixel pairs including the closing pair `(last, first)`.
    pub fn steps(&self) -> impl Iterator<Item = (Index2, Index2)> + '_ {
        let n = self.pixels.len();
        (0..n).map(move |k| (self.pixels[k], self.pixels[(k + 1) % n]))
    }

    /// Shoelace area of the loop with `x = col`, `y = row`.
    ///
    /// Positive for clockwise-on-screen loops, negative for anticlockwise.
    pub fn signed_area(&self) -> f64 {
        let twice: f64 = self
            .steps()
            .map(|(a, b)| a.col as f64 * b.row as f64 - b.col as f64 * a.row as f64)
            .sum();
        twice / 2.0
    }

    /// Mark the contour pixels on a mask of the given shape.
    pub fn to_mask(&self, rows: usize, cols: usize) -> Result<Mask, PhaseError> {
        let mut mask = Grid::new(rows, cols, false)?;
        for p in self.iter() {
            match mask.get_mut(p) {
                Some(cell) => *cell = true,
                None => {
                    return Err(PhaseError::DimensionMismatch {
                        what: "contour pixel vs mask",
                        expected: (rows, cols),
                        found: (p.row + 1, p.col + 1),
                    })
                }
            }
        }
        Ok(mask)
    }
}

/// Trace the clockwise border of Ω (`outside = false`) or of its complement
/// (`outside = true`).
///
/// The walk starts on the first pixel, in row-major order, that is open
/// upwards; that pixel is a topmost boundary point. It ends when it returns
/// to that start, and every edge segment found by [`find_edges`] must have
/// been visited on the way.
///
/// # Errors
///
/// [`PhaseError::StructuralBoundary`] when:
/// - Ω is empty in inside mode;
/// - in outside mode the border would have to run along the grid frame
///   (Ω touches the frame);
/// - some edge segments lie on a second loop (a disconnected region or one
///   with holes).
///
/// In outside mode a full or empty mask has no border inside the grid and
/// yields an empty contour.
///
/// # Examples
///
/// ```
/// use phasekit_contour::find_cw_border;
/// use phasekit_core::{Grid, Index2};
///
/// let mask = Grid::from_fn(4, 5, |i| (1..3).contains(&i.row) && (1..4).contains(&i.col)).unwrap();
/// let border = find_cw_border(&mask, false).unwrap();
/// assert_eq!(border.pixels()[0], Index2::new(1, 1));
/// assert_eq!(border.len(), 6);
/// assert!(border.signed_area() > 0.0);
/// ```
pub fn find_cw_border(mask: &Mask, outside: bool) -> Result<Contour, PhaseError> {
    let edges = find_edges(mask, outside);
    if edges.is_empty() {
        if outside {
            log::debug!(
                "outside border of {}x{} mask is empty",
                mask.rows(),
                mask.cols()
            );
            return Ok(Contour::default());
        }
        return Err(PhaseError::StructuralBoundary {
            reason: "region is empty".to_string(),
        });
    }
    let contour = walk(&edges, Region::new(mask, outside))?;
    log::debug!(
        "traced {} border: {} pixels over {} edge segments",
        if outside { "outside" } else { "inside" },
        contour.len(),
        edges.segment_count()
    );
    Ok(contour)
}

fn walk(edges: &EdgeMap, region: Region<'_>) -> Result<Contour, PhaseError> {
    let start_pixel = match edges.get(Direction::Up).first() {
        Some(&p) => p,
        None => {
            return Err(PhaseError::StructuralBoundary {
                reason: "no upward-open edge pixel to start from".to_string(),
            })
        }
    };
    let start = WalkState {
        pixel: start_pixel,
        side: Direction::Up,
    };
    let total = edges.segment_count();
    let mut visited = edges.bits().map(|_| 0u8);
    let mut visited_count = 0usize;
    let mut pixels = Vec::new();
    let mut sides = Vec::new();
    let mut state = start;

    loop {
        let bit = state.side.bit();
        let seen = &mut visited[state.pixel];
        if *seen & bit != 0 {
            return Err(PhaseError::StructuralBoundary {
                reason: format!(
                    "walk revisited ({}, {}) side {:?} before closing",
                    state.pixel.row, state.pixel.col, state.side
                ),
            });
        }
        *seen |= bit;
        visited_count += 1;

        if pixels.last() != Some(&state.pixel) {
            pixels.push(state.pixel);
            sides.push(state.side);
        }

        let (ar, ac) = state.ahead();
        let (qr, qc) = state.diagonal();
        let turn = Turn::decide(
            region.contains_signed(ar, ac),
            region.contains_signed(qr, qc),
        );
        let next = state
            .advance(turn)
            .filter(|s| edges.has_edge(s.pixel, s.side))
            .ok_or_else(|| PhaseError::StructuralBoundary {
                reason: format!(
                    "border leaves the grid at ({}, {}); the domain touches the frame",
                    state.pixel.row, state.pixel.col
                ),
            })?;

        if next == start {
            break;
        }
        state = next;
    }

    if pixels.len() > 1 && pixels.last() == pixels.first() {
        pixels.pop();
        sides.pop();
    }

    if visited_count != total {
        return Err(PhaseError::StructuralBoundary {
            reason: format!(
                "{} of {} edge segments lie on another loop; the region is disconnected or has holes",
                total - visited_count,
                total
            ),
        });
    }

    Ok(Contour { pixels, sides })
}

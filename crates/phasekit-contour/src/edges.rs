//! Edge-pixel detection.

use indexmap::IndexMap;
use phasekit_core::{Direction, Grid, Index2, Mask, DIRECTIONS};

/// The side of a mask being traced.
///
/// Pixels beyond the grid frame always count as outside Ω: in inside mode
/// the frame therefore produces edges, in outside mode it never does.
#[derive(Clone, Copy, Debug)]
pub struct Region<'a> {
    mask: &'a Mask,
    outside: bool,
}

impl<'a> Region<'a> {
    /// Ω itself (`outside = false`) or its complement (`outside = true`).
    pub fn new(mask: &'a Mask, outside: bool) -> Self {
        Self { mask, outside }
    }

    /// Membership test for a possibly off-grid signed coordinate.
    #[inline]
    pub fn contains_signed(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return self.outside;
        }
        match self.mask.get(Index2::new(row as usize, col as usize)) {
            Some(&inside) => inside != self.outside,
            None => self.outside,
        }
    }

    /// Membership test for an on-grid pixel.
    #[inline]
    pub fn contains(&self, idx: Index2) -> bool {
        self.contains_signed(idx.row as isize, idx.col as isize)
    }

    /// Membership of the pixel one step from `idx` in direction `dir`.
    #[inline]
    pub fn contains_step(&self, idx: Index2, dir: Direction) -> bool {
        let (dr, dc) = dir.offset();
        self.contains_signed(idx.row as isize + dr, idx.col as isize + dc)
    }
}

/// Edge pixels of a region, grouped by the direction in which they border
/// the other side.
///
/// Lists are in row-major scan order. A pixel bordering the other side in
/// several directions (a corner) appears in several lists.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    lists: IndexMap<Direction, Vec<Index2>>,
    bits: Grid<u8>,
}

impl EdgeMap {
    /// Edge pixels open towards `dir`.
    pub fn get(&self, dir: Direction) -> &[Index2] {
        self.lists.get(&dir).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over `(direction, pixels)` in clockwise order from `Up`.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &[Index2])> + '_ {
        self.lists.iter().map(|(&d, v)| (d, v.as_slice()))
    }

    /// `true` if `idx` is an edge pixel open towards `dir`.
    #[inline]
    pub fn has_edge(&self, idx: Index2, dir: Direction) -> bool {
        self.bits
            .get(idx)
            .map(|&b| b & dir.bit() != 0)
            .unwrap_or(false)
    }

    /// `true` if `idx` is open in at least one direction.
    #[inline]
    pub fn is_edge_pixel(&self, idx: Index2) -> bool {
        self.bits.get(idx).map(|&b| b != 0).unwrap_or(false)
    }

    /// Packed direction bits per pixel (see [`Direction::bit`]).
    pub fn bits(&self) -> &Grid<u8> {
        &self.bits
    }

    /// Total number of edge segments (pixel, direction) over all lists.
    pub fn segment_count(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    /// `true` if there are no edge pixels.
    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }

    /// Distinct edge pixels in row-major order.
    pub fn pixels(&self) -> Vec<Index2> {
        self.bits
            .iter_indexed()
            .filter(|(_, &b)| b != 0)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Edge pixels as a mask of the same shape as the source mask.
    pub fn to_mask(&self) -> Mask {
        self.bits.map(|&b| b != 0)
    }
}

/// Find the edge pixels of Ω (`outside = false`) or of its complement
/// (`outside = true`).
///
/// A pixel of the traced region is an edge pixel in direction `d` when its
/// neighbour across `d` is not in the region. Off-grid neighbours count as
/// outside Ω.
pub fn find_edges(mask: &Mask, outside: bool) -> EdgeMap {
    let region = Region::new(mask, outside);
    let mut lists: IndexMap<Direction, Vec<Index2>> =
        DIRECTIONS.iter().map(|&d| (d, Vec::new())).collect();
    let mut bits = mask.map(|_| 0u8);

    for row in 0..mask.rows() {
        for col in 0..mask.cols() {
            let idx = Index2::new(row, col);
            if !region.contains(idx) {
                continue;
            }
            for d in DIRECTIONS {
                if !region.contains_step(idx, d) {
                    bits[idx] |= d.bit();
                    if let Some(list) = lists.get_mut(&d) {
                        list.push(idx);
                    }
                }
            }
        }
    }

    EdgeMap { lists, bits }
}

/// Edge pixels of Ω itself; shorthand for `find_edges(mask, false)`.
pub fn find_set_edges(mask: &Mask) -> EdgeMap {
    find_edges(mask, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasekit_test_utils::rect_mask;

    #[test]
    fn interior_rectangle_edges() {
        let m = rect_mask((6, 7), 1..4, 2..6);
        let e = find_set_edges(&m);
        assert_eq!(e.get(Direction::Up).len(), 4);
        assert_eq!(e.get(Direction::Down).len(), 4);
        assert_eq!(e.get(Direction::Left).len(), 3);
        assert_eq!(e.get(Direction::Right).len(), 3);
        assert_eq!(e.segment_count(), 14);
        // 3x4 block: every pixel except the two interior ones.
        assert_eq!(e.pixels().len(), 10);
        assert!(e.has_edge(Index2::new(1, 2), Direction::Up));
        assert!(e.has_edge(Index2::new(1, 2), Direction::Left));
        assert!(!e.is_edge_pixel(Index2::new(2, 3)));
    }

    #[test]
    fn frame_counts_as_edge_inside() {
        let full = Grid::new(3, 4, true).unwrap();
        let e = find_set_edges(&full);
        assert_eq!(
            e.get(Direction::Up),
            &[
                Index2::new(0, 0),
                Index2::new(0, 1),
                Index2::new(0, 2),
                Index2::new(0, 3),
            ]
        );
        assert_eq!(e.pixels().len(), 10);
    }

    #[test]
    fn frame_is_not_an_edge_outside() {
        let full = Grid::new(3, 4, true).unwrap();
        assert!(find_edges(&full, true).is_empty());
        let empty = Grid::new(3, 4, false).unwrap();
        assert!(find_edges(&empty, true).is_empty());
        assert!(find_edges(&empty, false).is_empty());
    }

    #[test]
    fn outside_edges_face_the_domain() {
        let m = rect_mask((5, 5), 2..3, 2..3);
        let e = find_edges(&m, true);
        assert_eq!(e.get(Direction::Down), &[Index2::new(1, 2)]);
        assert_eq!(e.get(Direction::Up), &[Index2::new(3, 2)]);
        assert_eq!(e.get(Direction::Right), &[Index2::new(2, 1)]);
        assert_eq!(e.get(Direction::Left), &[Index2::new(2, 3)]);
        let order: Vec<Direction> = e.iter().map(|(d, _)| d).collect();
        assert_eq!(order, DIRECTIONS.to_vec());
    }

    #[test]
    fn region_membership_off_grid() {
        let m = rect_mask((3, 3), 0..3, 0..3);
        let inside = Region::new(&m, false);
        let outside = Region::new(&m, true);
        assert!(!inside.contains_signed(-1, 0));
        assert!(outside.contains_signed(-1, 0));
        assert!(!inside.contains_signed(0, 3));
        assert!(inside.contains(Index2::new(2, 2)));
        assert!(!outside.contains(Index2::new(2, 2)));
    }
}

//! Border tracing on synthetic apertures.

use phasekit_contour::{find_cw_border, find_edges};
use phasekit_core::{Index2, PhaseError};
use phasekit_test_utils::{circle_mask, rect_mask};
use proptest::prelude::*;

#[test]
fn disc_border_is_closed_and_clockwise() {
    let r = 20.0;
    let mask = circle_mask((50, 50), 24.5, 24.5, r);
    let contour = find_cw_border(&mask, false).unwrap();

    let n = contour.len() as f64;
    assert!(n > 4.0 * r && n < 12.0 * r, "{n} border pixels");
    assert!(contour.signed_area() > 0.0);

    // Consecutive pixels, including the closing pair, are 8-neighbours.
    for (a, b) in contour.steps() {
        assert!(a.touches(b), "{a:?} -> {b:?}");
    }

    // Every pixel with an edge appears on the contour and nothing else does.
    let edge_pixels = find_edges(&mask, false).to_mask();
    assert_eq!(contour.to_mask(50, 50).unwrap(), edge_pixels);
}

#[test]
fn outside_border_wraps_the_disc() {
    let mask = circle_mask((40, 40), 19.5, 19.5, 12.0);
    let inner = find_cw_border(&mask, false).unwrap();
    let outer = find_cw_border(&mask, true).unwrap();
    assert!(outer.signed_area() < 0.0);
    assert!(outer.len() > inner.len());
    assert!(outer.iter().all(|p| !mask[p]));
}

#[test]
fn hole_is_not_traceable() {
    let mask = rect_mask((20, 20), 2..18, 2..18)
        .and(&rect_mask((20, 20), 8..12, 8..12).not())
        .unwrap();
    assert!(matches!(
        find_cw_border(&mask, false),
        Err(PhaseError::StructuralBoundary { .. })
    ));
}

proptest! {
    #[test]
    fn rectangle_perimeter(
        top in 0usize..6,
        left in 0usize..6,
        h in 2usize..10,
        w in 2usize..10,
    ) {
        let shape = (16, 16);
        let mask = rect_mask(shape, top..top + h, left..left + w);
        let contour = find_cw_border(&mask, false).unwrap();
        prop_assert_eq!(contour.len(), 2 * (h + w) - 4);
        prop_assert_eq!(contour.pixels()[0], Index2::new(top, left));
        let distinct = contour.to_mask(16, 16).unwrap().count();
        prop_assert_eq!(distinct, contour.len());
    }
}

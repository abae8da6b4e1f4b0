//! Phase wrapping into the principal interval.

use phasekit_core::Field;
use std::f64::consts::{PI, TAU};

/// Wrap `x` into (−π, π] by subtracting the nearest multiple of 2π.
///
/// `phwrap(π) == π` and `phwrap(−π) == π`; the function is exactly
/// idempotent.
///
/// ```
/// use phasekit_unwrap::phwrap;
/// use std::f64::consts::PI;
///
/// assert_eq!(phwrap(1.0), 1.0);
/// assert!((phwrap(4.0) - (4.0 - 2.0 * PI)).abs() < 1e-15);
/// assert_eq!(phwrap(-PI), PI);
/// ```
#[inline]
pub fn phwrap(x: f64) -> f64 {
    let y = x - TAU * (x / TAU).round();
    if y <= -PI {
        y + TAU
    } else if y > PI {
        y - TAU
    } else {
        y
    }
}

/// Apply [`phwrap`] to every pixel.
pub fn wrap_field(field: &Field) -> Field {
    field.map(|&v| phwrap(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Distance on the circle between two angles.
    fn circular_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn interval_endpoints() {
        assert_eq!(phwrap(PI), PI);
        assert_eq!(phwrap(-PI), PI);
        assert!(circular_distance(phwrap(3.0 * PI), PI) < 1e-12);
        assert_eq!(phwrap(0.0), 0.0);
        assert_eq!(phwrap(TAU), 0.0);
    }

    #[test]
    fn ramp_matches_reference_values() {
        let expected = [
            1.0,
            2.0,
            3.0,
            -2.2831853071795867,
            -1.2831853071795865,
            -0.28318530717958645,
            0.7168146928204135,
            1.7168146928204135,
            2.7168146928204133,
            -2.566370614359173,
        ];
        for (k, e) in expected.iter().enumerate() {
            assert!((phwrap((k + 1) as f64) - e).abs() < 1e-12);
        }
    }

    #[test]
    fn wrap_field_is_pointwise() {
        let f = Field::from_vec(1, 3, vec![0.5, 7.0, -7.0]).unwrap();
        let w = wrap_field(&f);
        assert_eq!(w.as_slice()[0], 0.5);
        assert!((w.as_slice()[1] - (7.0 - TAU)).abs() < 1e-12);
        assert!((w.as_slice()[2] + (7.0 - TAU)).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn output_in_principal_interval(x in -1e6f64..1e6) {
            let y = phwrap(x);
            prop_assert!(y > -PI && y <= PI, "phwrap({}) = {}", x, y);
        }

        #[test]
        fn idempotent(x in -1e6f64..1e6) {
            let y = phwrap(x);
            prop_assert_eq!(phwrap(y), y);
        }

        #[test]
        fn periodic(x in -1e3f64..1e3, k in -50i32..50) {
            let shifted = phwrap(x + TAU * k as f64);
            prop_assert!(circular_distance(shifted, phwrap(x)) < 1e-9);
        }

        #[test]
        fn differs_by_multiple_of_two_pi(x in -1e4f64..1e4) {
            let k = (x - phwrap(x)) / TAU;
            prop_assert!((k - k.round()).abs() < 1e-9);
        }
    }
}

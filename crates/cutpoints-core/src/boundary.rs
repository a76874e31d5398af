//! Boundary test between adjacent values and threshold placement.

use crate::point::LabelCounts;

/// Return `true` when a cut is required between two adjacent values.
///
/// The two count vectors are summed element-wise; a boundary exists iff more
/// than one label is present in the union. Two values whose combined
/// examples all share one class belong to the same pure range.
#[must_use]
pub fn is_boundary(a: &LabelCounts, b: &LabelCounts) -> bool {
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .filter(|&(&x, &y)| x > 0 || y > 0)
        .take(2)
        .count()
        > 1
}

/// Threshold between two adjacent values.
///
/// Returns the non-NaN operand when exactly one of them is NaN, and the
/// arithmetic mean otherwise.
#[must_use]
pub fn midpoint(x: f64, y: f64) -> f64 {
    match (x.is_nan(), y.is_nan()) {
        (true, false) => y,
        (false, true) => x,
        _ => (x + y) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_boundary, midpoint};
    use crate::point::LabelCounts;

    fn counts(v: &[u64]) -> LabelCounts {
        LabelCounts::new(v.to_vec())
    }

    // --- is_boundary ---

    #[test]
    fn same_single_label_is_not_boundary() {
        assert!(!is_boundary(&counts(&[5, 0]), &counts(&[3, 0])));
    }

    #[test]
    fn different_single_labels_is_boundary() {
        assert!(is_boundary(&counts(&[5, 0]), &counts(&[0, 5])));
    }

    #[test]
    fn mixed_left_side_is_boundary() {
        // The union already holds two labels even though `b` is pure.
        assert!(is_boundary(&counts(&[2, 1, 0]), &counts(&[4, 0, 0])));
    }

    #[test]
    fn all_zero_is_not_boundary() {
        assert!(!is_boundary(&counts(&[0, 0, 0]), &counts(&[0, 0, 0])));
    }

    #[test]
    fn one_sided_zero_vector() {
        assert!(!is_boundary(&counts(&[0, 0, 7]), &counts(&[0, 0, 0])));
        assert!(is_boundary(&counts(&[0, 3, 7]), &counts(&[0, 0, 0])));
    }

    #[test]
    fn boundary_law_matches_positive_positions() {
        let pairs = [
            ([1u64, 0, 0, 0], [0u64, 0, 0, 1]),
            ([0, 0, 2, 0], [0, 0, 9, 0]),
            ([0, 0, 0, 0], [1, 1, 0, 0]),
            ([3, 0, 0, 0], [0, 0, 0, 0]),
        ];
        for (a, b) in pairs {
            let positive = a.iter().zip(&b).filter(|&(&x, &y)| x + y > 0).count();
            assert_eq!(
                is_boundary(&counts(&a), &counts(&b)),
                positive > 1,
                "a = {a:?}, b = {b:?}"
            );
        }
    }

    #[test]
    fn saturated_counts_do_not_overflow() {
        assert!(!is_boundary(&counts(&[u64::MAX, 0]), &counts(&[u64::MAX, 0])));
        assert!(is_boundary(&counts(&[u64::MAX, 0]), &counts(&[1, 1])));
    }

    #[test]
    fn boundary_is_symmetric() {
        let a = counts(&[1, 0, 4]);
        let b = counts(&[0, 0, 2]);
        assert_eq!(is_boundary(&a, &b), is_boundary(&b, &a));
    }

    // --- midpoint ---

    #[test]
    fn midpoint_of_finite_values() {
        assert!((midpoint(2.0, 3.0) - 2.5).abs() < f64::EPSILON);
        assert!((midpoint(-1.0, 1.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn midpoint_right_nan_returns_left() {
        assert_eq!(midpoint(4.0, f64::NAN), 4.0);
    }

    #[test]
    fn midpoint_left_nan_returns_right() {
        assert_eq!(midpoint(f64::NAN, -2.5), -2.5);
    }

    #[test]
    fn midpoint_both_nan_is_nan() {
        assert!(midpoint(f64::NAN, f64::NAN).is_nan());
    }
}

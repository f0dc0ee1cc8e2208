//! Utility functions for the Relab harness.
//!
//! Small numeric helpers shared by the response reshaper and by analysis
//! code preparing engine outputs for display.

/// Return the exact integer square root of `m`, or `None` if `m` is not a
/// perfect square.
///
/// # Examples
///
/// ```
/// use relab::utils::perfect_square_root;
///
/// assert_eq!(perfect_square_root(4), Some(2));
/// assert_eq!(perfect_square_root(144), Some(12));
/// assert_eq!(perfect_square_root(20), None);
/// ```
#[inline]
pub fn perfect_square_root(m: usize) -> Option<usize> {
    let r = (m as f64).sqrt().floor() as usize;
    // floating sqrt can land one off near the boundary
    for candidate in r.saturating_sub(1)..=r.saturating_add(1) {
        if candidate.checked_mul(candidate) == Some(m) {
            return Some(candidate);
        }
    }
    None
}

/// Min/max scale a sequence into `[0, 1]`.
///
/// A constant (or empty) sequence maps to all zeros rather than dividing by
/// a zero range.
///
/// # Examples
///
/// ```
/// use relab::utils::normalize;
///
/// assert_eq!(normalize(&[2.0, 4.0, 6.0]), vec![0.0, 0.5, 1.0]);
/// assert_eq!(normalize(&[3.0, 3.0]), vec![0.0, 0.0]);
/// ```
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_square_root() {
        assert_eq!(perfect_square_root(0), Some(0));
        assert_eq!(perfect_square_root(1), Some(1));
        assert_eq!(perfect_square_root(4), Some(2));
        assert_eq!(perfect_square_root(9), Some(3));
        assert_eq!(perfect_square_root(2), None);
        assert_eq!(perfect_square_root(20), None);
        assert_eq!(perfect_square_root(99), None);
        assert_eq!(perfect_square_root(10_000), Some(100));
    }

    #[test]
    fn test_perfect_square_root_large() {
        let m = 65_536usize;
        assert_eq!(perfect_square_root(m * m), Some(m));
        assert_eq!(perfect_square_root(m * m + 1), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&[0.0, 5.0, 10.0]), vec![0.0, 0.5, 1.0]);
        assert_eq!(normalize(&[-1.0, 1.0]), vec![0.0, 1.0]);
    }

    #[test]
    fn test_normalize_degenerate() {
        assert_eq!(normalize(&[]), Vec::<f64>::new());
        assert_eq!(normalize(&[7.0]), vec![0.0]);
        assert_eq!(normalize(&[2.0, 2.0, 2.0]), vec![0.0, 0.0, 0.0]);
    }
}

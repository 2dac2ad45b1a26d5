//! Permutation by circular shift.
//!
//! Binding and bundling are both commutative, so order information in an
//! n-gram is injected by rotating the accumulated vector one position right
//! before each new sample is bound in.

/// Rotate a vector one position to the right.
///
/// `result[0] = v[L-1]` and `result[i] = v[i-1]` for `i > 0`.
///
/// # Examples
///
/// ```
/// use emg_hdc::vsa::circ_shift;
///
/// assert_eq!(circ_shift(&[1.0, 2.0, 3.0, 4.0]), vec![4.0, 1.0, 2.0, 3.0]);
/// ```
#[must_use]
pub fn circ_shift(v: &[f64]) -> Vec<f64> {
    let mut result = v.to_vec();
    circ_shift_in_place(&mut result);
    result
}

/// Rotate a vector one position to the right, in place.
pub fn circ_shift_in_place(v: &mut [f64]) {
    if !v.is_empty() {
        v.rotate_right(1);
    }
}

//! Bundle operation (superposition via element-wise sum).
//!
//! Bundling combines vectors into one that is similar to all inputs. Sums are
//! kept unthresholded: associative-memory rows and multi-window prototypes
//! accumulate real-valued totals.

use crate::error::{check_len, Result};

/// Bundle two vectors element-wise: `c[i] = a[i] + b[i]`.
///
/// # Errors
///
/// Returns [`HdcError::DimensionMismatch`](crate::HdcError::DimensionMismatch)
/// if the vectors differ in length.
///
/// # Examples
///
/// ```
/// use emg_hdc::vsa::entrywise_sum;
///
/// let c = entrywise_sum(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
/// assert_eq!(c, vec![6.0, 8.0, 10.0, 12.0]);
/// ```
pub fn entrywise_sum(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_len(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Add `other` into `accumulator` in place.
///
/// # Errors
///
/// Returns [`HdcError::DimensionMismatch`](crate::HdcError::DimensionMismatch)
/// if the vectors differ in length.
pub fn bundle_assign(accumulator: &mut [f64], other: &[f64]) -> Result<()> {
    check_len(accumulator.len(), other.len())?;
    for (acc, x) in accumulator.iter_mut().zip(other) {
        *acc += x;
    }
    Ok(())
}

//! Similarity measures for real-valued hypervectors.
//!
//! These functions measure how similar two vectors are, used for the novelty
//! gate during training and nearest-class search during prediction.

use crate::error::{check_len, HdcError, Result};

/// Compute the dot product of two vectors.
///
/// # Errors
///
/// Returns [`HdcError::DimensionMismatch`] if the vectors differ in length.
///
/// # Examples
///
/// ```
/// use emg_hdc::vsa::dot_product;
///
/// let dot = dot_product(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
/// assert!((dot - 70.0).abs() < 1e-12);
/// ```
pub fn dot_product(a: &[f64], b: &[f64]) -> Result<f64> {
    check_len(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Compute the Euclidean norm of a vector.
///
/// The norm is zero only for the zero vector.
#[must_use]
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where:
/// - 1.0 = same direction
/// - 0.0 = orthogonal
/// - -1.0 = opposite
///
/// # Formula
///
/// ```text
/// cos(a, b) = (a · b) / (||a|| * ||b||)
/// ```
///
/// # Errors
///
/// Returns [`HdcError::DimensionMismatch`] if the vectors differ in length and
/// [`HdcError::DegenerateVector`] if either operand has zero norm.
///
/// # Examples
///
/// ```
/// use emg_hdc::vsa::cos_angle;
///
/// let sim = cos_angle(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]).unwrap();
/// assert!((sim - 0.96886).abs() < 1e-4);
///
/// assert!(cos_angle(&[0.0, 0.0], &[1.0, 1.0]).is_err());
/// ```
pub fn cos_angle(a: &[f64], b: &[f64]) -> Result<f64> {
    let dot = dot_product(a, b)?;
    let denom = norm(a) * norm(b);

    if denom == 0.0 || !denom.is_finite() {
        return Err(HdcError::DegenerateVector);
    }

    Ok(dot / denom)
}

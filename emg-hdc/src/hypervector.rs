//! Owned real-valued hypervector.
//!
//! A [`Hypervector`] is a fixed-length sequence of `f64` components. It covers
//! both regimes used by the classifier:
//!
//! - **bipolar seeds**: every component is -1 or +1 (item memories)
//! - **accumulators**: unconstrained real sums (records, n-grams, AM rows)
//!
//! The methods are thin typed wrappers over the slice algebra in [`crate::vsa`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::vsa;

/// A dense real-valued hypervector.
///
/// # Examples
///
/// ```
/// use emg_hdc::Hypervector;
///
/// let a = Hypervector::from_vec(vec![1.0, -1.0, 1.0, -1.0]);
/// let b = Hypervector::from_vec(vec![1.0, 1.0, -1.0, -1.0]);
///
/// let bound = a.bind(&b).unwrap();
/// assert_eq!(bound.as_slice(), &[1.0, -1.0, -1.0, 1.0]);
/// assert!(a.is_bipolar());
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypervector {
    data: Vec<f64>,
}

impl Hypervector {
    /// Create a zero vector with `dim` components.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    /// Wrap an existing component vector.
    #[must_use]
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Copy components from a slice.
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the vector has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the components.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Borrow the components mutably.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the vector and return its components.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        vsa::norm(&self.data)
    }

    /// Cosine similarity with another vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length or either is zero.
    pub fn cosine(&self, other: &Self) -> Result<f64> {
        vsa::cos_angle(&self.data, &other.data)
    }

    /// Bind with another vector (element-wise product).
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length.
    pub fn bind(&self, other: &Self) -> Result<Self> {
        vsa::entrywise_product(&self.data, &other.data).map(Self::from_vec)
    }

    /// Bundle with another vector (element-wise sum).
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length.
    pub fn bundle(&self, other: &Self) -> Result<Self> {
        vsa::entrywise_sum(&self.data, &other.data).map(Self::from_vec)
    }

    /// Bundle another vector into this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length.
    pub fn bundle_assign(&mut self, other: &[f64]) -> Result<()> {
        vsa::bundle_assign(&mut self.data, other)
    }

    /// Return a copy rotated one position to the right.
    #[must_use]
    pub fn permuted(&self) -> Self {
        Self::from_vec(vsa::circ_shift(&self.data))
    }

    /// Rotate one position to the right, in place.
    pub fn permute(&mut self) {
        vsa::circ_shift_in_place(&mut self.data);
    }

    /// Sum of all components.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Check whether every component is -1 or +1.
    #[must_use]
    pub fn is_bipolar(&self) -> bool {
        self.data.iter().all(|&x| x == 1.0 || x == -1.0)
    }

    /// Check whether every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&x| x == 0.0)
    }

    /// Count components that differ from `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length.
    pub fn hamming_distance(&self, other: &Self) -> Result<usize> {
        crate::error::check_len(self.len(), other.len())?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .filter(|(a, b)| a != b)
            .count())
    }
}

impl AsRef<[f64]> for Hypervector {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}

impl From<Vec<f64>> for Hypervector {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}

impl fmt::Debug for Hypervector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hypervector(dims={}, norm={:.3}, sum={:.1})",
            self.len(),
            self.norm(),
            self.sum()
        )
    }
}

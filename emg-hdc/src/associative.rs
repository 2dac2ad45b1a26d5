//! Associative memory: one prototype accumulator per class.
//!
//! Prototypes start at zero and only ever grow by bundling accepted n-grams.
//! During training each candidate n-gram passes a novelty gate: it is added
//! to its class only while it is still dissimilar enough from the prototype
//! (cosine similarity below the cutting angle). A class with an all-zero
//! prototype has nothing to compare against and accepts its first n-gram
//! unconditionally.

use crate::arena::HvTable;
use crate::error::{check_len, HdcError, Result};
use crate::hypervector::Hypervector;
use crate::vsa;

/// Outcome of offering an n-gram to a class prototype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    /// The n-gram was bundled into the prototype.
    Accepted {
        /// Similarity before accumulation, `None` for an empty prototype.
        similarity: Option<f64>,
    },
    /// The n-gram was already well represented and was discarded.
    Redundant {
        /// Similarity to the prototype.
        similarity: f64,
    },
}

impl Admission {
    /// Whether the n-gram was accumulated.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Per-class prototype hypervectors with accepted-pattern counts.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociativeMemory {
    prototypes: HvTable,
    counts: Vec<usize>,
}

impl AssociativeMemory {
    /// Create a zero-initialized memory.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] if `num_classes` is zero and
    /// [`HdcError::AllocationFailure`] if the table cannot be allocated.
    pub fn new(num_classes: usize, dimension: usize) -> Result<Self> {
        if num_classes == 0 {
            return Err(HdcError::InvalidArgument(
                "associative memory needs at least one class".into(),
            ));
        }
        Ok(Self {
            prototypes: HvTable::zeros("associative memory", num_classes, dimension)?,
            counts: vec![0; num_classes],
        })
    }

    /// Number of classes.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    /// Prototype dimension.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.prototypes.dim()
    }

    /// Number of n-grams accumulated into each class.
    #[must_use]
    pub fn pattern_counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of n-grams accumulated into `class`.
    #[must_use]
    pub fn pattern_count(&self, class: usize) -> usize {
        self.counts.get(class).copied().unwrap_or(0)
    }

    /// Copy of a class prototype.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] for an unknown class.
    pub fn prototype(&self, class: usize) -> Result<Hypervector> {
        self.prototypes.get(class)
    }

    /// Whether a class prototype is still all-zero.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] for an unknown class.
    pub fn is_empty_class(&self, class: usize) -> Result<bool> {
        Ok(vsa::norm(self.prototypes.row(class)?) == 0.0)
    }

    /// Cosine similarity of `hv` to a class prototype.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::DegenerateVector`] if either vector is zero.
    pub fn similarity(&self, class: usize, hv: &[f64]) -> Result<f64> {
        vsa::cos_angle(hv, self.prototypes.row(class)?)
    }

    /// Unconditionally bundle `hv` into a class prototype.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown class or a dimension mismatch.
    pub fn accumulate(&mut self, class: usize, hv: &[f64]) -> Result<()> {
        vsa::bundle_assign(self.prototypes.row_mut(class)?, hv)?;
        self.counts[class] += 1;
        Ok(())
    }

    /// Offer `hv` to a class through the novelty gate.
    ///
    /// The n-gram is accumulated if the prototype is empty or if its cosine
    /// similarity to the prototype is below `cutting_angle`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown class, a dimension mismatch, or a zero
    /// `hv` ([`HdcError::DegenerateVector`]).
    pub fn offer(&mut self, class: usize, hv: &[f64], cutting_angle: f64) -> Result<Admission> {
        check_len(self.dimension(), hv.len())?;
        if vsa::norm(hv) == 0.0 {
            return Err(HdcError::DegenerateVector);
        }

        if self.is_empty_class(class)? {
            self.accumulate(class, hv)?;
            return Ok(Admission::Accepted { similarity: None });
        }

        let similarity = self.similarity(class, hv)?;
        if similarity < cutting_angle {
            self.accumulate(class, hv)?;
            Ok(Admission::Accepted {
                similarity: Some(similarity),
            })
        } else {
            Ok(Admission::Redundant { similarity })
        }
    }

    /// Find the class whose prototype is most similar to `hv`.
    ///
    /// Classes with an empty prototype are skipped. Ties resolve to the lowest
    /// class index.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::DegenerateVector`] if `hv` is zero or no class has
    /// been trained.
    pub fn nearest(&self, hv: &[f64]) -> Result<(usize, f64)> {
        check_len(self.dimension(), hv.len())?;

        let mut best: Option<(usize, f64)> = None;
        for (class, row) in self.prototypes.iter().enumerate() {
            if vsa::norm(row) == 0.0 {
                continue;
            }
            let sim = vsa::cos_angle(hv, row)?;
            if best.map_or(true, |(_, best_sim)| sim > best_sim) {
                best = Some((class, sim));
            }
        }

        best.ok_or(HdcError::DegenerateVector)
    }
}

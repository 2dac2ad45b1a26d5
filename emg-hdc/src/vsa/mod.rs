//! Vector Symbolic Architecture (VSA) primitives on real-valued hypervectors.
//!
//! This module provides the hyperdimensional computing algebra used by the
//! encoder and the associative memory:
//!
//! - **Bind**: Association (element-wise product, self-inverse on bipolar vectors)
//! - **Bundle**: Superposition (element-wise sum)
//! - **Permute**: Order injection (circular shift by one position)
//! - **Similarity**: Dot product, norm and cosine similarity
//!
//! All functions work on plain `f64` slices and reject operands of unequal
//! length with [`HdcError::DimensionMismatch`](crate::HdcError::DimensionMismatch).
//!
//! ## References
//!
//! - Kanerva, P. "Hyperdimensional Computing: An Introduction"
//! - Rahimi, A. et al. "Hyperdimensional Biosignal Processing: A Case Study for EMG-based Hand Gesture Recognition"

mod bind;
mod bundle;
mod permute;
mod similarity;

pub use bind::{bind_assign, entrywise_product};
pub use bundle::{bundle_assign, entrywise_sum};
pub use permute::{circ_shift, circ_shift_in_place};
pub use similarity::{cos_angle, dot_product, norm};

//! Hyperdimensional computing classifier for multi-channel EMG gesture recognition.
//!
//! This crate encodes windows of quantized EMG amplitudes into high-dimensional
//! bipolar hypervectors and classifies them against per-class prototypes
//! accumulated during training.
//!
//! # Features
//!
//! - **VSA algebra**: bind (element-wise product), bundle (element-wise sum),
//!   permute (circular shift) and cosine similarity over `f64` hypervectors
//! - **Item memories**: seeded channel codebook (iM) and continuous amplitude
//!   codebook (CiM) stored in contiguous tables
//! - **N-gram encoding**: per-sample records folded over a sliding window
//! - **Training**: associative memory with a cosine-similarity novelty gate
//! - **Prediction**: nearest-prototype classification with accuracy reporting
//!
//! # Quick Start
//!
//! ```rust
//! use emg_hdc::{build_trained_model, predict, HdcConfig};
//!
//! let config = HdcConfig::default()
//!     .with_num_classes(2)
//!     .with_dimension(2000)
//!     .with_ngram_size(3)
//!     .with_max_level(10)
//!     .with_precision(10.0);
//!
//! // Two gestures with distinct constant amplitude profiles
//! let samples = [
//!     vec![vec![0.1, 0.2, 0.1, 0.2]; 20],
//!     vec![vec![0.9, 0.8, 0.9, 0.8]; 20],
//! ]
//! .concat();
//! let labels = [vec![0; 20], vec![1; 20]].concat();
//!
//! let model = build_trained_model(&labels, &samples, &config)?;
//! let report = predict(&model, &labels, &samples, 3, 10.0)?;
//! assert_eq!(report.accuracy_excluding_transitions, Some(1.0));
//! # Ok::<(), emg_hdc::HdcError>(())
//! ```
//!
//! # Encoding
//!
//! ```text
//! record(s) = Σ_c  CiM[floor(s[c] * precision)] ⊙ iM[c]
//! ngram(w)  = ρ(...ρ(ρ(record(w_1)) ⊙ record(w_2))...) ⊙ record(w_N)
//! ```
//!
//! # Feature Flags
//!
//! - `default`: No additional features
//! - `parallel`: Encode and classify prediction windows on rayon's thread pool

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)] // Bipolar components are exact

pub mod arena;
pub mod associative;
pub mod config;
pub mod encoder;
mod error;
pub mod hypervector;
pub mod item_memory;
pub mod model;
pub mod predict;
pub mod random;
pub mod train;
pub mod vsa;

pub use arena::HvTable;
pub use associative::{Admission, AssociativeMemory};
pub use config::HdcConfig;
pub use encoder::{compute_ngram, compute_sum_hv, NgramEncoder};
pub use error::{HdcError, Result};
pub use hypervector::Hypervector;
pub use item_memory::{lookup_item_memory, ItemMemory};
pub use model::{release_model, Classification, TrainedModel};
pub use predict::{hdc_predict, predict, PredictionReport};
pub use train::{build_trained_model, hdc_train, hdc_train_with_rng, TrainingReport};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use emg_hdc::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::HdcConfig;
    pub use crate::hypervector::Hypervector;
    pub use crate::model::{Classification, TrainedModel};
    pub use crate::predict::{hdc_predict, PredictionReport};
    pub use crate::train::{build_trained_model, hdc_train, TrainingReport};
    pub use crate::vsa::{circ_shift, cos_angle, dot_product, entrywise_product, entrywise_sum};
    pub use crate::{HdcError, Result};
}

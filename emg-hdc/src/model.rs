//! The trained classifier.
//!
//! A [`TrainedModel`] exclusively owns its item memories and associative
//! memory. It is immutable once built: prediction borrows it read-only, so
//! repeated queries over the same data always give the same answers.

use tracing::debug;

use crate::associative::AssociativeMemory;
use crate::config::HdcConfig;
use crate::encoder::NgramEncoder;
use crate::error::Result;
use crate::hypervector::Hypervector;
use crate::item_memory::ItemMemory;
use crate::train::TrainingReport;

/// Predicted class of a single window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Predicted class label.
    pub label: usize,
    /// Cosine similarity to the winning prototype.
    pub similarity: f64,
}

/// A trained HDC classifier.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    config: HdcConfig,
    item_memory: ItemMemory,
    am: AssociativeMemory,
    report: TrainingReport,
}

impl TrainedModel {
    pub(crate) fn new(
        config: HdcConfig,
        item_memory: ItemMemory,
        am: AssociativeMemory,
        report: TrainingReport,
    ) -> Self {
        Self {
            config,
            item_memory,
            am,
            report,
        }
    }

    /// The configuration the model was trained with.
    #[must_use]
    pub const fn config(&self) -> &HdcConfig {
        &self.config
    }

    /// The channel and amplitude codebooks.
    #[must_use]
    pub const fn item_memory(&self) -> &ItemMemory {
        &self.item_memory
    }

    /// The class prototypes.
    #[must_use]
    pub const fn associative_memory(&self) -> &AssociativeMemory {
        &self.am
    }

    /// Statistics from training.
    #[must_use]
    pub const fn training_report(&self) -> &TrainingReport {
        &self.report
    }

    /// Number of classes.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.am.num_classes()
    }

    /// Encoder over this model's item memories.
    #[must_use]
    pub const fn encoder(&self, precision: f64) -> NgramEncoder<'_> {
        NgramEncoder::new(&self.item_memory, precision)
    }

    /// Encode a window with the model's own precision.
    ///
    /// # Errors
    ///
    /// See [`NgramEncoder::ngram`].
    pub fn encode<S: AsRef<[f64]>>(&self, window: &[S]) -> Result<Hypervector> {
        self.encoder(self.config.precision).ngram(window)
    }

    /// Classify a window with the model's own precision.
    ///
    /// # Errors
    ///
    /// Returns encoding errors, or [`HdcError::DegenerateVector`] if the window
    /// encodes to zero or no class was trained.
    ///
    /// [`HdcError::DegenerateVector`]: crate::HdcError::DegenerateVector
    pub fn classify<S: AsRef<[f64]>>(&self, window: &[S]) -> Result<Classification> {
        self.classify_with_precision(window, self.config.precision)
    }

    /// Classify a window, quantizing with `precision`.
    ///
    /// Ties between classes resolve to the lowest label.
    ///
    /// # Errors
    ///
    /// See [`classify`](Self::classify).
    pub fn classify_with_precision<S: AsRef<[f64]>>(
        &self,
        window: &[S],
        precision: f64,
    ) -> Result<Classification> {
        let ngram = self.encoder(precision).ngram(window)?;
        let (label, similarity) = self.am.nearest(ngram.as_slice())?;
        Ok(Classification { label, similarity })
    }

    /// Release the model and every table it owns.
    pub fn release(self) {
        debug!(
            classes = self.am.num_classes(),
            dimension = self.item_memory.dimension(),
            "releasing HDC model"
        );
    }
}

/// Release a trained model.
///
/// Equivalent to [`TrainedModel::release`].
pub fn release_model(model: TrainedModel) {
    model.release();
}

//! Training: accumulate novel n-grams into per-class prototypes.
//!
//! The labelled buffer is scanned with a window of `ngram_size` samples. A
//! window is eligible only if its first and last labels agree; otherwise it
//! straddles a gesture transition and the scan jumps ahead `ngram_size - 1`
//! samples, since no overlapping window can lie inside one class either.
//!
//! Acceptance depends on the prototype built so far, so the scan is strictly
//! sequential: the same data in the same order always yields the same model.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::associative::{Admission, AssociativeMemory};
use crate::config::HdcConfig;
use crate::encoder::NgramEncoder;
use crate::error::{check_len, HdcError, Result};
use crate::item_memory::ItemMemory;
use crate::model::TrainedModel;

/// Statistics gathered while training.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Eligible windows that were encoded.
    pub windows_examined: usize,
    /// N-grams bundled into a prototype.
    pub accepted: usize,
    /// N-grams discarded by the cutting angle.
    pub redundant: usize,
    /// Windows skipped because they straddle a label transition.
    pub transition_skips: usize,
    /// Windows skipped because an amplitude had no CiM level.
    pub out_of_range_skips: usize,
    /// Windows skipped because their n-gram was the zero vector.
    pub degenerate_skips: usize,
    /// Accepted n-grams per class.
    pub patterns_per_class: Vec<usize>,
}

impl TrainingReport {
    /// Fraction of examined windows that were accepted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn acceptance_rate(&self) -> f64 {
        if self.windows_examined == 0 {
            0.0
        } else {
            self.accepted as f64 / self.windows_examined as f64
        }
    }
}

/// Train a model, seeding the item memories from `config.seed`.
///
/// # Errors
///
/// Returns [`HdcError::InvalidArgument`] for a bad configuration, labels out
/// of range or a buffer shorter than one n-gram, [`HdcError::DimensionMismatch`]
/// if labels and samples disagree in length or a sample has the wrong channel
/// count, and [`HdcError::AllocationFailure`] if a table cannot be allocated.
///
/// # Examples
///
/// ```
/// use emg_hdc::{hdc_train, HdcConfig};
///
/// let config = HdcConfig::default()
///     .with_num_classes(2)
///     .with_dimension(1000)
///     .with_ngram_size(2)
///     .with_max_level(10)
///     .with_precision(10.0);
///
/// let samples = vec![
///     vec![0.1; 4], vec![0.1; 4], vec![0.1; 4],
///     vec![0.9; 4], vec![0.9; 4], vec![0.9; 4],
/// ];
/// let labels = vec![0, 0, 0, 1, 1, 1];
///
/// let model = hdc_train(&labels, &samples, &config).unwrap();
/// assert_eq!(model.training_report().patterns_per_class, vec![1, 1]);
/// ```
pub fn hdc_train<S: AsRef<[f64]>>(
    labels: &[usize],
    samples: &[S],
    config: &HdcConfig,
) -> Result<TrainedModel> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    hdc_train_with_rng(labels, samples, config, &mut rng)
}

/// Train a model drawing the item memories from a caller-owned RNG.
///
/// `config.seed` is ignored.
///
/// # Errors
///
/// See [`hdc_train`].
pub fn hdc_train_with_rng<S: AsRef<[f64]>, R: Rng>(
    labels: &[usize],
    samples: &[S],
    config: &HdcConfig,
    rng: &mut R,
) -> Result<TrainedModel> {
    let _span = tracing::debug_span!(
        "hdc_train",
        samples = samples.len(),
        classes = config.num_classes,
        dimension = config.dimension
    )
    .entered();

    config.validate()?;
    validate_batch(labels, samples, config.num_classes, config.ngram_size)?;

    let item_memory = ItemMemory::build(
        config.dimension,
        config.num_channels,
        config.max_level,
        rng,
    )?;
    let mut am = AssociativeMemory::new(config.num_classes, config.dimension)?;
    let encoder = NgramEncoder::new(&item_memory, config.precision);

    let n = config.ngram_size;
    let jump = (n - 1).max(1);
    let mut report = TrainingReport::default();

    let mut i = 0;
    while i + n <= samples.len() {
        let label = labels[i];
        if label != labels[i + n - 1] {
            report.transition_skips += 1;
            i += jump;
            continue;
        }

        report.windows_examined += 1;
        let outcome = encoder
            .ngram(&samples[i..i + n])
            .and_then(|ngram| am.offer(label, ngram.as_slice(), config.cutting_angle));

        match outcome {
            Ok(Admission::Accepted { .. }) => report.accepted += 1,
            Ok(Admission::Redundant { .. }) => report.redundant += 1,
            Err(HdcError::KeyOutOfRange { key, len }) => {
                debug!(window = i, key, len, "skipping window with out-of-range amplitude");
                report.out_of_range_skips += 1;
            }
            Err(HdcError::DegenerateVector) => {
                debug!(window = i, "skipping window with zero n-gram");
                report.degenerate_skips += 1;
            }
            Err(e) => return Err(e),
        }
        i += 1;
    }

    report.patterns_per_class = am.pattern_counts().to_vec();

    let skipped = report.out_of_range_skips + report.degenerate_skips;
    if skipped > 0 {
        warn!(
            out_of_range = report.out_of_range_skips,
            degenerate = report.degenerate_skips,
            "training windows skipped"
        );
    }
    debug!(
        accepted = report.accepted,
        redundant = report.redundant,
        transitions = report.transition_skips,
        "training scan complete"
    );
    info!(
        patterns = ?report.patterns_per_class,
        acceptance = report.acceptance_rate(),
        "trained HDC model"
    );

    Ok(TrainedModel::new(config.clone(), item_memory, am, report))
}

/// Build a trained model from a labelled sample buffer.
///
/// # Errors
///
/// See [`hdc_train`].
pub fn build_trained_model<S: AsRef<[f64]>>(
    labels: &[usize],
    samples: &[S],
    config: &HdcConfig,
) -> Result<TrainedModel> {
    hdc_train(labels, samples, config)
}

/// Check the shape of a labelled batch.
pub(crate) fn validate_batch<S: AsRef<[f64]>>(
    labels: &[usize],
    samples: &[S],
    num_classes: usize,
    ngram_size: usize,
) -> Result<()> {
    check_len(samples.len(), labels.len())?;

    if ngram_size == 0 {
        return Err(HdcError::InvalidArgument("ngram_size must be > 0".into()));
    }
    if samples.len() < ngram_size {
        return Err(HdcError::InvalidArgument(format!(
            "buffer of {} samples is shorter than one {ngram_size}-gram",
            samples.len()
        )));
    }
    if let Some((pos, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= num_classes) {
        return Err(HdcError::InvalidArgument(format!(
            "label {label} at sample {pos} out of range for {num_classes} classes"
        )));
    }

    Ok(())
}

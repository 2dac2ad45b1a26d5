//! Prediction: classify every window of a labelled test buffer and score it.
//!
//! Every start `i` with `i + ngram_size <= len` is evaluated. The ground truth
//! of a window is the most frequent label inside it (ties go to the lowest
//! label). A window whose first and last labels differ is a *transition
//! window*; it counts toward the overall accuracy but not toward the accuracy
//! excluding transitions.
//!
//! A window with an amplitude outside the item memory is skipped. A window
//! that cannot be compared at all, because its n-gram is zero or the model
//! has no trained class, fails the whole run with
//! [`HdcError::DegenerateVector`].
//!
//! Encoding and classification of windows are independent of each other, so
//! with the `parallel` feature they run on rayon's thread pool. Tallying is
//! always sequential and the result is identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{HdcError, Result};
use crate::model::{Classification, TrainedModel};
use crate::train::validate_batch;

/// Accuracy figures for one prediction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    /// Correct windows over all evaluated windows, in [0, 1].
    pub accuracy: f64,
    /// Correct windows over evaluated non-transition windows, in [0, 1].
    ///
    /// `None` when every evaluated window straddles a transition.
    pub accuracy_excluding_transitions: Option<f64>,
    /// Windows encoded and classified.
    pub evaluated: usize,
    /// Evaluated windows whose prediction matched the ground truth.
    pub correct: usize,
    /// Evaluated windows that straddle a label transition.
    pub transition_windows: usize,
    /// Correctly classified transition windows.
    pub correct_transitions: usize,
    /// Windows skipped for out-of-range amplitudes.
    pub skipped: usize,
    /// Predicted label per window start; `None` where the window was skipped.
    pub predictions: Vec<Option<usize>>,
}

/// Ground truth for a window: its most frequent label, lowest on ties.
#[must_use]
pub fn window_label(labels: &[usize]) -> Option<usize> {
    let max = *labels.iter().max()?;
    let mut counts = vec![0usize; max + 1];
    for &l in labels {
        counts[l] += 1;
    }
    // `max_by_key` keeps the last maximum, so scan in reverse for the lowest.
    counts
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|&(_, &c)| c)
        .map(|(label, _)| label)
}

/// Classify every window of a test buffer and report accuracy.
///
/// # Errors
///
/// Returns [`HdcError::InvalidArgument`] for a zero `ngram_size`, a bad
/// `precision`, labels out of range or a buffer shorter than one n-gram,
/// [`HdcError::DimensionMismatch`] if labels and samples disagree in length or
/// a sample has the wrong channel count, [`HdcError::DegenerateVector`] if the
/// model has no trained class or a window encodes to zero, and
/// [`HdcError::NoEligibleWindows`] if every window had to be skipped.
///
/// # Examples
///
/// ```
/// use emg_hdc::{hdc_predict, hdc_train, HdcConfig};
///
/// let config = HdcConfig::default()
///     .with_num_classes(2)
///     .with_dimension(1000)
///     .with_ngram_size(2)
///     .with_max_level(10)
///     .with_precision(10.0);
///
/// let samples = [vec![vec![0.1; 4]; 5], vec![vec![0.9; 4]; 5]].concat();
/// let labels = [vec![0; 5], vec![1; 5]].concat();
///
/// let model = hdc_train(&labels, &samples, &config).unwrap();
/// let report = hdc_predict(&model, &labels, &samples, 2, 10.0).unwrap();
/// assert_eq!(report.accuracy_excluding_transitions, Some(1.0));
/// ```
pub fn hdc_predict<S: AsRef<[f64]> + Sync>(
    model: &TrainedModel,
    labels: &[usize],
    samples: &[S],
    ngram_size: usize,
    precision: f64,
) -> Result<PredictionReport> {
    let _span = tracing::debug_span!("hdc_predict", samples = samples.len(), ngram_size).entered();

    validate_batch(labels, samples, model.num_classes(), ngram_size)?;
    if !precision.is_finite() || precision <= 0.0 {
        return Err(HdcError::InvalidArgument(format!(
            "precision must be finite and > 0, got {precision}"
        )));
    }
    let patterns = model.associative_memory().pattern_counts();
    if patterns.iter().all(|&c| c == 0) {
        return Err(HdcError::DegenerateVector);
    }

    let num_windows = samples.len() - ngram_size + 1;
    let classify = |start: usize| {
        model.classify_with_precision(&samples[start..start + ngram_size], precision)
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<Classification>> =
        (0..num_windows).into_par_iter().map(classify).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<Classification>> = (0..num_windows).map(classify).collect();

    let mut report = PredictionReport {
        predictions: Vec::with_capacity(num_windows),
        ..PredictionReport::default()
    };

    for (start, outcome) in outcomes.into_iter().enumerate() {
        let window_labels = &labels[start..start + ngram_size];
        let predicted = match outcome {
            Ok(c) => c.label,
            Err(e) if e.is_recoverable() => {
                report.skipped += 1;
                report.predictions.push(None);
                continue;
            }
            Err(e) => return Err(e),
        };

        let is_transition = window_labels[0] != window_labels[ngram_size - 1];
        let is_correct = window_label(window_labels) == Some(predicted);

        report.evaluated += 1;
        report.predictions.push(Some(predicted));
        if is_transition {
            report.transition_windows += 1;
        }
        if is_correct {
            report.correct += 1;
            if is_transition {
                report.correct_transitions += 1;
            }
        }
    }

    if report.evaluated == 0 {
        return Err(HdcError::NoEligibleWindows);
    }
    if report.skipped > 0 {
        warn!(skipped = report.skipped, "prediction windows skipped");
    }

    report.accuracy = ratio(report.correct, report.evaluated).unwrap_or_default();
    report.accuracy_excluding_transitions = ratio(
        report.correct - report.correct_transitions,
        report.evaluated - report.transition_windows,
    );

    info!(
        accuracy = report.accuracy,
        accuracy_excluding_transitions = ?report.accuracy_excluding_transitions,
        evaluated = report.evaluated,
        "prediction complete"
    );

    Ok(report)
}

/// Predict over a test buffer.
///
/// Same as [`hdc_predict`].
///
/// # Errors
///
/// See [`hdc_predict`].
pub fn predict<S: AsRef<[f64]> + Sync>(
    model: &TrainedModel,
    labels: &[usize],
    samples: &[S],
    ngram_size: usize,
    precision: f64,
) -> Result<PredictionReport> {
    hdc_predict(model, labels, samples, ngram_size, precision)
}

impl TrainedModel {
    /// Predict over a test buffer with the model's own n-gram size and precision.
    ///
    /// # Errors
    ///
    /// See [`hdc_predict`].
    pub fn predict<S: AsRef<[f64]> + Sync>(
        &self,
        labels: &[usize],
        samples: &[S],
    ) -> Result<PredictionReport> {
        hdc_predict(
            self,
            labels,
            samples,
            self.config().ngram_size,
            self.config().precision,
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

//! N-gram encoding of multi-channel sample windows.
//!
//! Each sample is turned into a *record* by binding every channel's amplitude
//! level with the channel identity and bundling across channels:
//!
//! ```text
//! record(s) = Σ_c  CiM[q(s[c])] ⊙ iM[c]
//! ```
//!
//! A window of `N` samples is folded into one n-gram, rotating the running
//! result before each new record is bound in so that order matters:
//!
//! ```text
//! g_1 = record(s_1)
//! g_k = ρ(g_{k-1}) ⊙ record(s_k)
//! ```

use tracing::warn;

use crate::error::{check_len, HdcError, Result};
use crate::hypervector::Hypervector;
use crate::item_memory::ItemMemory;
use crate::vsa;

/// Encoder bound to a model's item memories.
///
/// All outputs are freshly allocated; nothing aliases the item memory tables.
#[derive(Debug, Clone, Copy)]
pub struct NgramEncoder<'a> {
    memory: &'a ItemMemory,
    precision: f64,
}

impl<'a> NgramEncoder<'a> {
    /// Create an encoder over `memory` with the given quantization precision.
    #[must_use]
    pub const fn new(memory: &'a ItemMemory, precision: f64) -> Self {
        Self { memory, precision }
    }

    /// Hypervector dimension produced by this encoder.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.memory.dimension()
    }

    /// Encode one multi-channel sample.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::DimensionMismatch`] if the sample does not have one
    /// value per channel and [`HdcError::KeyOutOfRange`] if an amplitude has no
    /// CiM level.
    pub fn record(&self, sample: &[f64]) -> Result<Hypervector> {
        check_len(self.memory.num_channels(), sample.len())?;

        let mut record = Hypervector::zeros(self.dimension());
        for (&value, identity) in sample.iter().zip(self.memory.im().iter()) {
            let level = self.memory.level_row(value, self.precision)?;
            for ((acc, l), id) in record.as_mut_slice().iter_mut().zip(level).zip(identity) {
                *acc += l * id;
            }
        }

        Ok(record)
    }

    /// Encode a window of consecutive samples into one n-gram.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] for an empty window, otherwise any
    /// error from [`record`](Self::record).
    pub fn ngram<S: AsRef<[f64]>>(&self, window: &[S]) -> Result<Hypervector> {
        let (first, rest) = window
            .split_first()
            .ok_or_else(|| HdcError::InvalidArgument("cannot encode an empty window".into()))?;

        let mut ngram = self.record(first.as_ref())?;
        for sample in rest {
            let record = self.record(sample.as_ref())?;
            ngram.permute();
            vsa::bind_assign(ngram.as_mut_slice(), record.as_slice())?;
        }

        Ok(ngram)
    }

    /// Bundle the n-grams of every sliding window of `ngram_size` samples.
    ///
    /// Windows whose encoding fails with a recoverable error (an amplitude
    /// outside the item memory) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] if `ngram_size` is zero or longer
    /// than the buffer, and propagates non-recoverable encoding errors.
    pub fn sum_hv<S: AsRef<[f64]>>(&self, buffer: &[S], ngram_size: usize) -> Result<Hypervector> {
        if ngram_size == 0 || ngram_size > buffer.len() {
            return Err(HdcError::InvalidArgument(format!(
                "ngram_size {ngram_size} does not fit a buffer of {} samples",
                buffer.len()
            )));
        }

        let mut sum = Hypervector::zeros(self.dimension());
        let mut skipped = 0usize;
        for window in buffer.windows(ngram_size) {
            match self.ngram(window) {
                Ok(ngram) => sum.bundle_assign(ngram.as_slice())?,
                Err(e) if e.is_recoverable() => skipped += 1,
                Err(e) => return Err(e),
            }
        }

        if skipped > 0 {
            warn!(skipped, "windows skipped while bundling sum hypervector");
        }

        Ok(sum)
    }
}

/// Encode a window of samples into one n-gram.
///
/// Free-function form of [`NgramEncoder::ngram`].
///
/// # Errors
///
/// See [`NgramEncoder::ngram`].
pub fn compute_ngram<S: AsRef<[f64]>>(
    window: &[S],
    memory: &ItemMemory,
    precision: f64,
) -> Result<Hypervector> {
    NgramEncoder::new(memory, precision).ngram(window)
}

/// Bundle the n-grams of every sliding window in `buffer`.
///
/// Free-function form of [`NgramEncoder::sum_hv`].
///
/// # Errors
///
/// See [`NgramEncoder::sum_hv`].
pub fn compute_sum_hv<S: AsRef<[f64]>>(
    buffer: &[S],
    memory: &ItemMemory,
    ngram_size: usize,
    precision: f64,
) -> Result<Hypervector> {
    NgramEncoder::new(memory, precision).sum_hv(buffer, ngram_size)
}

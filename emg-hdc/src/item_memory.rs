//! Item memories: the fixed random codebooks of the encoder.
//!
//! Two tables are built once per model from a single seeded RNG:
//!
//! - **iM** (item memory): one random bipolar hypervector per channel. The
//!   rows are independent, so they are nearly orthogonal in high dimension.
//! - **CiM** (continuous item memory): one bipolar hypervector per amplitude
//!   quantization level `0..=max_level`. Neighbouring levels differ by one
//!   block of flipped signs, so similarity falls off linearly with level
//!   distance.
//!
//! ## CiM layout
//!
//! ```text
//! b        = floor(D / (2 * max_level))
//! CiM[0]   = base
//! CiM[i]   = CiM[i-1] with signs flipped at perm[(i-1)*b .. i*b]   (i >= 1)
//! ```
//!
//! `perm` is a single random permutation of `0..D`, so the flipped blocks are
//! disjoint and `hamming(CiM[i], CiM[j]) == |i - j| * b`. The trailing
//! `D - max_level * b` positions are never flipped. `CiM[max_level]` differs
//! from `CiM[0]` in `max_level * b <= D / 2` positions.

use rand::Rng;
use tracing::debug;

use crate::arena::HvTable;
use crate::error::{HdcError, Result};
use crate::hypervector::Hypervector;
use crate::random::{gen_random_hv, rand_perm};

/// The channel and amplitude codebooks of a trained model.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMemory {
    /// Continuous item memory, one row per quantization level.
    cim: HvTable,
    /// Channel item memory, one row per channel.
    im: HvTable,
    /// Number of components flipped between neighbouring levels.
    block_size: usize,
}

impl ItemMemory {
    /// Build both item memories.
    ///
    /// The iM rows are drawn first (channel order), then the CiM base vector,
    /// then the CiM flip permutation.
    ///
    /// # Arguments
    ///
    /// * `dimension` - Hypervector dimension (even, at least `2 * max_level`)
    /// * `num_channels` - Number of iM rows
    /// * `max_level` - Highest CiM level; the CiM has `max_level + 1` rows
    /// * `rng` - Random source, consumed deterministically
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] for a bad shape and
    /// [`HdcError::AllocationFailure`] if a table cannot be allocated. No
    /// partially built memory is returned.
    pub fn build<R: Rng>(
        dimension: usize,
        num_channels: usize,
        max_level: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let _span = tracing::debug_span!("item_memory_build", dimension, num_channels, max_level)
            .entered();

        if dimension == 0 || dimension % 2 != 0 {
            return Err(HdcError::InvalidArgument(format!(
                "dimension must be even and > 0, got {dimension}"
            )));
        }
        if num_channels == 0 {
            return Err(HdcError::InvalidArgument("num_channels must be > 0".into()));
        }
        if max_level == 0 {
            return Err(HdcError::InvalidArgument("max_level must be > 0".into()));
        }
        let block_size = dimension / (2 * max_level);
        if block_size == 0 {
            return Err(HdcError::InvalidArgument(format!(
                "dimension {dimension} too small for {max_level} levels"
            )));
        }

        let mut im = HvTable::zeros("channel item memory", num_channels, dimension)?;
        for channel in 0..num_channels {
            let hv = gen_random_hv(dimension, rng)?;
            im.set_row(channel, hv.as_slice())?;
        }

        let mut cim = HvTable::zeros("continuous item memory", max_level + 1, dimension)?;
        let mut current = gen_random_hv(dimension, rng)?.into_vec();
        let flip_order = rand_perm(dimension, rng)?;

        cim.set_row(0, &current)?;
        for (level, block) in flip_order
            .chunks_exact(block_size)
            .take(max_level)
            .enumerate()
        {
            for &pos in block {
                current[pos] = -current[pos];
            }
            cim.set_row(level + 1, &current)?;
        }

        debug!(block_size, levels = max_level + 1, "item memories built");

        Ok(Self {
            cim,
            im,
            block_size,
        })
    }

    /// Hypervector dimension.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.cim.dim()
    }

    /// Number of channels.
    #[must_use]
    pub const fn num_channels(&self) -> usize {
        self.im.rows()
    }

    /// Number of quantization levels (`max_level + 1`).
    #[must_use]
    pub const fn num_levels(&self) -> usize {
        self.cim.rows()
    }

    /// Number of components flipped between neighbouring levels.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// The continuous item memory table.
    #[must_use]
    pub const fn cim(&self) -> &HvTable {
        &self.cim
    }

    /// The channel item memory table.
    #[must_use]
    pub const fn im(&self) -> &HvTable {
        &self.im
    }

    /// Copy of the CiM row for a raw amplitude.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::KeyOutOfRange`] if the quantized key has no level.
    pub fn lookup_level(&self, raw: f64, precision: f64) -> Result<Hypervector> {
        lookup_item_memory(&self.cim, raw, precision)
    }

    /// Copy of the iM row for a channel.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] if `channel >= num_channels()`.
    pub fn channel(&self, channel: usize) -> Result<Hypervector> {
        self.im.get(channel)
    }

    /// Borrowed CiM row for a raw amplitude.
    pub(crate) fn level_row(&self, raw: f64, precision: f64) -> Result<&[f64]> {
        let key = quantize(raw, precision, self.cim.rows())?;
        self.cim.row(key)
    }
}

/// Quantize a raw amplitude to a table key: `floor(raw * precision)`.
///
/// # Errors
///
/// Returns [`HdcError::KeyOutOfRange`] if the key is negative, non-finite or
/// `>= len`.
///
/// # Examples
///
/// ```
/// use emg_hdc::item_memory::quantize;
///
/// assert_eq!(quantize(0.57, 20.0, 22).unwrap(), 11);
/// assert!(quantize(1.2, 20.0, 22).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn quantize(raw: f64, precision: f64, len: usize) -> Result<usize> {
    let scaled = (raw * precision).floor();

    if !scaled.is_finite() {
        let key = if scaled.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        return Err(HdcError::KeyOutOfRange { key, len });
    }

    if scaled < 0.0 || scaled >= len as f64 {
        return Err(HdcError::KeyOutOfRange {
            key: scaled as i64,
            len,
        });
    }

    Ok(scaled as usize)
}

/// Look up a raw amplitude in an item memory table, returning a copy.
///
/// # Errors
///
/// Returns [`HdcError::KeyOutOfRange`] if `floor(raw * precision)` is not a
/// row of `table`.
pub fn lookup_item_memory(table: &HvTable, raw: f64, precision: f64) -> Result<Hypervector> {
    let key = quantize(raw, precision, table.rows())?;
    table.get(key)
}

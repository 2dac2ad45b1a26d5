//! Hyperparameters for building and querying an HDC classifier.
//!
//! [`HdcConfig`] is the single configuration record passed from the caller
//! (typically a CLI or data-loading layer) into [`build_trained_model`].
//!
//! [`build_trained_model`]: crate::build_trained_model

use serde::{Deserialize, Serialize};

use crate::error::{HdcError, Result};

/// Default number of EMG channels.
pub const DEFAULT_NUM_CHANNELS: usize = 4;

/// Configuration for HDC training and prediction.
///
/// # Example
///
/// ```
/// use emg_hdc::HdcConfig;
///
/// let config = HdcConfig::default()
///     .with_dimension(2000)
///     .with_ngram_size(3)
///     .with_cutting_angle(0.85);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HdcConfig {
    /// Number of gesture classes. Labels must lie in `0..num_classes`.
    pub num_classes: usize,

    /// Hypervector dimension `D`. Must be even.
    pub dimension: usize,

    /// Number of consecutive samples combined into one n-gram.
    pub ngram_size: usize,

    /// Highest quantization level of the continuous item memory.
    pub max_level: usize,

    /// Amplitude scale applied before quantization: `key = floor(x * precision)`.
    pub precision: f64,

    /// Novelty gate: an n-gram is accumulated only if its cosine similarity
    /// to the class prototype is below this value.
    pub cutting_angle: f64,

    /// Number of EMG channels per sample.
    pub num_channels: usize,

    /// Seed for item memory generation.
    pub seed: u64,
}

impl Default for HdcConfig {
    fn default() -> Self {
        Self {
            num_classes: 5,
            dimension: 10_000,
            ngram_size: 4,
            max_level: 21,
            precision: 20.0,
            cutting_angle: 0.9,
            num_channels: DEFAULT_NUM_CHANNELS,
            seed: 42,
        }
    }
}

impl HdcConfig {
    /// Set the number of classes.
    #[must_use]
    pub const fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    /// Set the hypervector dimension.
    #[must_use]
    pub const fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the n-gram size.
    #[must_use]
    pub const fn with_ngram_size(mut self, ngram_size: usize) -> Self {
        self.ngram_size = ngram_size;
        self
    }

    /// Set the highest quantization level.
    #[must_use]
    pub const fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set the quantization precision.
    #[must_use]
    pub const fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Set the novelty cutting angle.
    #[must_use]
    pub const fn with_cutting_angle(mut self, cutting_angle: f64) -> Self {
        self.cutting_angle = cutting_angle;
        self
    }

    /// Set the number of channels.
    #[must_use]
    pub const fn with_num_channels(mut self, num_channels: usize) -> Self {
        self.num_channels = num_channels;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Size of each flipped block in the continuous item memory.
    #[must_use]
    pub const fn cim_block_size(&self) -> usize {
        if self.max_level == 0 {
            0
        } else {
            self.dimension / (2 * self.max_level)
        }
    }

    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.num_classes == 0 {
            return Err(invalid("num_classes must be > 0"));
        }
        if self.dimension == 0 || self.dimension % 2 != 0 {
            return Err(invalid(format!(
                "dimension must be even and > 0, got {}",
                self.dimension
            )));
        }
        if self.ngram_size == 0 {
            return Err(invalid("ngram_size must be > 0"));
        }
        if self.max_level == 0 {
            return Err(invalid("max_level must be > 0"));
        }
        if self.cim_block_size() == 0 {
            return Err(invalid(format!(
                "dimension {} too small for {} levels (need at least {})",
                self.dimension,
                self.max_level,
                2 * self.max_level
            )));
        }
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(invalid(format!(
                "precision must be finite and > 0, got {}",
                self.precision
            )));
        }
        if !self.cutting_angle.is_finite() {
            return Err(invalid("cutting_angle must be finite"));
        }
        if self.num_channels == 0 {
            return Err(invalid("num_channels must be > 0"));
        }
        Ok(())
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON and validate. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] for malformed JSON or invalid values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| invalid(format!("malformed configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid(detail: impl Into<String>) -> HdcError {
    HdcError::InvalidArgument(detail.into())
}

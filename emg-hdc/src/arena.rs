//! Contiguous storage for tables of equal-length hypervectors.
//!
//! Item memories and the associative memory are fixed-shape tables: a known
//! number of rows, each `dim` components long. [`HvTable`] keeps them in one
//! allocation sliced into rows, indexed by quantization level, channel or
//! class id.
//!
//! ```text
//! data: [ row 0 (dim) | row 1 (dim) | ... | row n-1 (dim) ]
//! ```

use std::fmt;

use crate::error::{check_len, HdcError, Result};
use crate::hypervector::Hypervector;

/// Allocate `len` copies of `value`, reporting exhaustion as an error.
pub(crate) fn try_filled<T: Clone>(what: &'static str, len: usize, value: T) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| HdcError::AllocationFailure {
            what,
            requested: len,
        })?;
    buf.resize(len, value);
    Ok(buf)
}

/// A row-major table of hypervectors backed by a single `Vec<f64>`.
#[derive(Clone, PartialEq)]
pub struct HvTable {
    data: Vec<f64>,
    rows: usize,
    dim: usize,
}

impl HvTable {
    /// Allocate a zero-filled table.
    ///
    /// # Arguments
    ///
    /// * `what` - Table name reported on allocation failure
    /// * `rows` - Number of rows
    /// * `dim` - Components per row
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::AllocationFailure`] if `rows * dim` overflows or the
    /// allocator cannot reserve the storage.
    pub fn zeros(what: &'static str, rows: usize, dim: usize) -> Result<Self> {
        let requested = rows
            .checked_mul(dim)
            .ok_or(HdcError::AllocationFailure {
                what,
                requested: usize::MAX,
            })?;

        let data = try_filled(what, requested, 0.0)?;
        Ok(Self { data, rows, dim })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Components per row.
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Borrow a row.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] if `index >= rows()`.
    pub fn row(&self, index: usize) -> Result<&[f64]> {
        let range = self.range(index)?;
        Ok(&self.data[range])
    }

    /// Borrow a row mutably.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] if `index >= rows()`.
    pub fn row_mut(&mut self, index: usize) -> Result<&mut [f64]> {
        let range = self.range(index)?;
        Ok(&mut self.data[range])
    }

    /// Copy a row out as an owned hypervector.
    ///
    /// # Errors
    ///
    /// Returns [`HdcError::InvalidArgument`] if `index >= rows()`.
    pub fn get(&self, index: usize) -> Result<Hypervector> {
        self.row(index).map(Hypervector::from_slice)
    }

    /// Overwrite a row.
    ///
    /// # Errors
    ///
    /// Returns an error if `index >= rows()` or `values` has the wrong length.
    pub fn set_row(&mut self, index: usize, values: &[f64]) -> Result<()> {
        check_len(self.dim, values.len())?;
        self.row_mut(index)?.copy_from_slice(values);
        Ok(())
    }

    /// Iterate over rows in index order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        // `chunks_exact(0)` panics, and a zero-width table has no data anyway.
        self.data
            .chunks_exact(self.dim.max(1))
            .take(if self.dim == 0 { 0 } else { self.rows })
    }

    fn range(&self, index: usize) -> Result<std::ops::Range<usize>> {
        if index >= self.rows {
            return Err(HdcError::InvalidArgument(format!(
                "row {index} out of bounds for table of {} rows",
                self.rows
            )));
        }
        let start = index * self.dim;
        Ok(start..start + self.dim)
    }
}

impl fmt::Debug for HvTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HvTable(rows={}, dim={})", self.rows, self.dim)
    }
}

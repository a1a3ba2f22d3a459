//! # Error Types
//!
//! Two tiers of failure exist in this crate:
//!
//! - **Contract violations**: out-of-range indexing, copying between series of
//!   different lengths, a reversed integral interval, appending to a frozen
//!   series. These are programming errors in the caller, surfaced as typed
//!   errors rather than aborting the process.
//! - **Environmental failures**: a missing profile file or an unwritable
//!   directory. Callers recover locally by falling back to a zeroed curve.

use std::io;
use thiserror::Error;

/// Errors raised by [`crate::float_series::FloatSeries`] and
/// [`crate::point_series::PointSeries`].
#[derive(Error, Debug)]
pub enum SeriesError {
    /// Index past the end of the series
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Element-wise copy between series of different lengths
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Integral requested with `x2 < x1`
    #[error("invalid interval {x1}..={x2}")]
    InvalidInterval { x1: usize, x2: usize },

    /// Operation needs a growable series but this one is fixed size
    #[error("series is fixed size")]
    FixedSize,

    /// Operation needs a fixed-size series but this one is growable
    #[error("series is not fixed size")]
    NotFixedSize,

    /// Series has already been appended to and can no longer be frozen
    #[error("series has variable-size data")]
    VariableSizeInUse,

    /// Reading or writing the CSV file failed
    #[error("series IO: {0}")]
    Io(#[from] io::Error),
}

impl SeriesError {
    /// True for the programming-error tier, false for environmental failures.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, SeriesError::Io(_))
    }
}

/// Errors raised by [`crate::profile::ProfileStore`].
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A query or file operation needs a config id and none is set
    #[error("no config id set")]
    NoConfigId,

    /// Underlying curve operation failed
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Profile file operations failed
    #[error("profile IO: {0}")]
    Io(#[from] io::Error),
}

//! Error types and result utilities for cochleagram analysis.

use thiserror::Error;

/// Convenience type alias for results that may contain CochleagramError
pub type CochleagramResult<T> = Result<T, CochleagramError>;

/// Error types that can occur during cochleagram analysis.
#[derive(Error, Debug)]
pub enum CochleagramError {
    /// Error that occurs when invalid parameters are provided to an operation.
    ///
    /// This includes cases like a non-positive sampling rate, a hop size that
    /// rounds to zero samples, or a channel frequency that is not finite.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),

    /// Error that occurs when array dimensions don't match expected values.
    ///
    /// This happens when a genuinely two-dimensional array is passed where a
    /// one-dimensional signal or channel-frequency vector is required.
    #[error("Dimension mismatch error: {0}")]
    DimensionMismatch(String),

    /// Error that occurs when a channel's requested bandwidth is too narrow
    /// for the analysis window.
    ///
    /// The kernel shape parameter is only real when the channel bandwidth
    /// parameter exceeds the window's own bandwidth parameter; narrower
    /// requests are rejected rather than clamped.
    #[error("Bandwidth too narrow error: {0}")]
    BandwidthTooNarrow(String),
}

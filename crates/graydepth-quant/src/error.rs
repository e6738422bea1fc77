//! Error types for graydepth-quant

use thiserror::Error;

/// Errors that can occur during quantization, dithering, and masking
#[derive(Debug, Error)]
pub enum QuantError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graydepth_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// More bins than the output colormap can index
    #[error("too many bins: {bins} bins for a colormap of {capacity} entries")]
    TooManyBins { bins: usize, capacity: usize },

    /// Two rasters that must match in size do not
    #[error("size mismatch: {w1}x{h1} vs {w2}x{h2}")]
    SizeMismatch { w1: u32, h1: u32, w2: u32, h2: u32 },

    /// Source carries a colormap where plain gray is required
    #[error("source must not have a colormap")]
    UnsupportedColormap,
}

/// Result type for quantization operations
pub type QuantResult<T> = Result<T, QuantError>;

//! Error types for graydepth-core
//!
//! Provides a unified error type for all operations in the core crate.
//!
//! # See also
//!
//! C Leptonica uses integer return codes and `L_WARNING` / `L_ERROR` macros.
//! This module replaces those with Rust's `Result<T, Error>` pattern.

use thiserror::Error;

/// graydepth core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid pixel depth
    #[error("invalid pixel depth: {0} bpp")]
    InvalidDepth(u32),

    /// Colormap not allowed for this depth
    #[error("colormap not allowed for depth {0} bpp")]
    ColormapNotAllowed(u32),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Unsupported pixel depth for this operation
    #[error("unsupported pixel depth: {0} bpp")]
    UnsupportedDepth(u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed
    #[error("memory allocation failed")]
    AllocationFailed,
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

//! graydepth - Bit-depth reduction for gray and color rasters
//!
//! Facade over the workspace crates: the raster containers from
//! `graydepth-core` and the quantization engine from `graydepth-quant`.
//!
//! # Example
//!
//! ```
//! use graydepth::{Pix, PixelDepth};
//!
//! let pix = Pix::new(64, 32, PixelDepth::Bit8).unwrap();
//! let binary = graydepth::quant::dither_to_binary(&pix).unwrap();
//! assert_eq!(binary.depth(), PixelDepth::Bit1);
//! assert_eq!(binary.width(), 64);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use graydepth_core::*;

// Re-export the engine as a module to keep its names grouped
pub use graydepth_quant as quant;

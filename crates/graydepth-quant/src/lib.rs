//! graydepth quant - Reduce gray rasters to fewer bits per pixel
//!
//! This crate turns 8 bpp grayscale (and, for masks, 32 bpp RGB) rasters
//! into 1, 2, 4 or 8 bpp output:
//!
//! - **Tables** ([`table`]): gray-to-index and gray-to-target lookup tables
//! - **Dithering** ([`dither`]): Floyd-Steinberg error diffusion to 1 or 2 bpp,
//!   computed directly or through lookup tables
//! - **Thresholding** ([`threshold`]): fixed and per-pixel binarization,
//!   uniform multi-level quantization, and snapping to an existing colormap
//! - **Arbitrary bins** ([`arb`]): quantization into bins with caller-given edges
//! - **Masks** ([`mask`]): 1 bpp masks selected by value, band or color distance
//!
//! # See also
//!
//! C Leptonica: `grayquant.c`

pub mod arb;
pub mod dither;
pub mod error;
mod gray;
pub mod mask;
pub mod table;
pub mod threshold;

// Re-export core types
pub use graydepth_core;

// Re-export error types
pub use error::{QuantError, QuantResult};

// Re-export table construction
pub use table::{GrayQuantTable, make_gray_quant_index_table, make_gray_quant_target_table};

// Re-export dithering
pub use dither::{
    // Types
    DEFAULT_CLIP_LOWER_1,
    DEFAULT_CLIP_LOWER_2,
    DEFAULT_CLIP_UPPER_1,
    DEFAULT_CLIP_UPPER_2,
    DirectDither,
    DitherMethod,
    DitherOptions,
    DitherTarget,
    Ditherer,
    LutDither,
    Quantized,
    // Functions
    dither,
    dither_to_2bpp,
    dither_to_2bpp_spec,
    dither_to_binary,
    dither_to_binary_lut,
    dither_to_binary_spec,
};

// Re-export thresholding
pub use threshold::{
    gray_quant_from_cmap, threshold_on_8bpp, threshold_to_2bpp, threshold_to_4bpp,
    threshold_to_binary, var_threshold_to_binary,
};

// Re-export arbitrary binning
pub use arb::{
    ARB_SAMPLE_TARGET, make_gray_quant_colormap_arb, make_gray_quant_table_arb, threshold_gray_arb,
};

// Re-export mask generation
pub use mask::{
    DistanceMetric, generate_mask_by_band, generate_mask_by_band_32, generate_mask_by_discr_32,
    generate_mask_by_value,
};

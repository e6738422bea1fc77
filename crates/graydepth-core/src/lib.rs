//! graydepth core - Raster containers for bit-depth reduction
//!
//! This crate provides the data structures that the quantization engine
//! reads and produces:
//!
//! - [`Pix`] / [`PixMut`] - Packed raster image (immutable / mutable)
//! - [`PixelDepth`] - Depth tag with per-depth packing strategy
//! - [`PixColormap`] - Color palette for indexed images
//! - [`Numa`] - Numeric array, used for ordered bin boundaries
//!
//! # See also
//!
//! C Leptonica: `pix.h`, `environ.h` (struct definitions)

pub mod colormap;
pub mod error;
pub mod numa;
pub mod pix;

pub use colormap::{PixColormap, RgbaQuad};
pub use error::{Error, Result};
pub use numa::{Numa, SortOrder};
pub use pix::{Pix, PixMut, PixelDepth, RemoveColormapTarget};

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
///
/// # See also
///
/// C Leptonica: color component macros in `pix.h`
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Perceptual weights used when flattening color to gray.
    ///
    /// C Leptonica: `L_RED_WEIGHT`, `L_GREEN_WEIGHT`, `L_BLUE_WEIGHT`
    pub const RED_WEIGHT: f32 = 0.3;
    pub const GREEN_WEIGHT: f32 = 0.5;
    pub const BLUE_WEIGHT: f32 = 0.2;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Weighted gray value of an RGB triple, rounded to nearest.
    #[inline]
    pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
        let val = RED_WEIGHT * r as f32 + GREEN_WEIGHT * g as f32 + BLUE_WEIGHT * b as f32 + 0.5;
        val.min(255.0) as u8
    }

}

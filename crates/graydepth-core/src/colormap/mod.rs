//! PixColormap - Color palette for indexed images
//!
//! A colormap is used with 1, 2, 4, and 8 bpp images to map
//! pixel values to RGBA colors.
//!
//! # See also
//!
//! C Leptonica: `colormap.c`

mod convert;
mod query;

use crate::error::{Error, Result};

/// RGBA color entry
///
/// # See also
///
/// C Leptonica: `RGBA_QUAD` in `pix.h`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbaQuad {
    /// Blue component (stored first for BMP compatibility)
    pub blue: u8,
    /// Green component
    pub green: u8,
    /// Red component
    pub red: u8,
    /// Alpha component
    pub alpha: u8,
}

impl RgbaQuad {
    /// Create a new RGBA color
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an RGB color (alpha = 255)
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create a grayscale color
    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Sum of the three color channels, used to rank entries by intensity.
    #[inline]
    pub(crate) fn intensity(&self) -> u32 {
        self.red as u32 + self.green as u32 + self.blue as u32
    }
}

/// Colormap for indexed images
///
/// Entries are indexed in insertion order. The capacity is `2^depth`.
///
/// # See also
///
/// C Leptonica: `PIXCMAP` in `pix.h`, `pixcmapCreate()` in `colormap.c`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixColormap {
    colors: Vec<RgbaQuad>,
    depth: u32,
}

impl PixColormap {
    /// Create a new, empty colormap for the specified depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] unless `depth` is 1, 2, 4, or 8.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapCreate()`
    pub fn new(depth: u32) -> Result<Self> {
        if !matches!(depth, 1 | 2 | 4 | 8) {
            return Err(Error::InvalidDepth(depth));
        }
        Ok(Self {
            colors: Vec::with_capacity(1 << depth),
            depth,
        })
    }

    /// Create a colormap of `nlevels` equally spaced grays, black first.
    ///
    /// Entry `i` is `255 * i / (nlevels - 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `nlevels < 2` or
    /// `nlevels > 2^depth`.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapCreateLinear()`
    pub fn create_linear(depth: u32, nlevels: usize) -> Result<Self> {
        let mut cmap = Self::new(depth)?;
        if nlevels < 2 || nlevels > cmap.max_entries() {
            return Err(Error::InvalidParameter(format!(
                "nlevels {nlevels} not in [2, {}]",
                cmap.max_entries()
            )));
        }
        for i in 0..nlevels {
            let val = (255 * i / (nlevels - 1)) as u8;
            cmap.colors.push(RgbaQuad::gray(val));
        }
        Ok(cmap)
    }

    /// Get the depth
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Get the number of colors
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get maximum number of entries
    #[inline]
    pub fn max_entries(&self) -> usize {
        1 << self.depth
    }

    /// Get a color by index
    pub fn get(&self, index: usize) -> Option<&RgbaQuad> {
        self.colors.get(index)
    }

    /// Get a mutable color by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut RgbaQuad> {
        self.colors.get_mut(index)
    }

    /// Add a color to the colormap, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the colormap is full.
    pub fn add_color(&mut self, color: RgbaQuad) -> Result<usize> {
        if self.colors.len() >= self.max_entries() {
            return Err(Error::InvalidParameter(format!(
                "colormap full ({} entries)",
                self.max_entries()
            )));
        }
        self.colors.push(color);
        Ok(self.colors.len() - 1)
    }

    /// Add an RGB color
    pub fn add_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<usize> {
        self.add_color(RgbaQuad::rgb(r, g, b))
    }

    /// Set a color at an existing index
    pub fn set_color(&mut self, index: usize, color: RgbaQuad) -> Result<()> {
        let len = self.colors.len();
        let entry = self
            .colors
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *entry = color;
        Ok(())
    }

    /// Get RGB values at index
    pub fn get_rgb(&self, index: usize) -> Option<(u8, u8, u8)> {
        self.colors.get(index).map(|c| (c.red, c.green, c.blue))
    }

    /// Get all colors as a slice
    pub fn colors(&self) -> &[RgbaQuad] {
        &self.colors
    }
}

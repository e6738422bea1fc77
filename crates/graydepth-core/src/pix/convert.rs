//! Colormap removal
//!
//! Indexed rasters are flattened before any value-based quantization so
//! that thresholds and bins apply to intensities, not palette indices.
//!
//! # See also
//!
//! C Leptonica: `pixconv.c` (`pixRemoveColormap`)

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Target type for colormap removal.
///
/// # See also
///
/// C Leptonica: `REMOVE_CMAP_TO_GRAYSCALE` in `pix.h`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveColormapTarget {
    /// Convert to 8 bpp grayscale
    ToGrayscale,
}

impl Pix {
    /// Remove colormap and convert to specified target format.
    ///
    /// Gray values use the weights in [`color::rgb_to_gray`]. Pixel values
    /// with no colormap entry map to 0. Resolution is carried over.
    /// An image without a colormap is returned as a deep copy.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixRemoveColormap()` in `pixconv.c`
    pub fn remove_colormap(&self, target: RemoveColormapTarget) -> Result<Pix> {
        let Some(cmap) = self.colormap() else {
            return Ok(self.deep_clone());
        };

        let d = self.depth();
        if !d.colormap_allowed() {
            return Err(Error::UnsupportedDepth(d.bits()));
        }

        let max_entries = 1usize << d.bits();
        let (out_depth, lut): (PixelDepth, Vec<u32>) = match target {
            RemoveColormapTarget::ToGrayscale => {
                let mut graymap = vec![0u32; max_entries];
                for (slot, c) in graymap.iter_mut().zip(cmap.colors()) {
                    *slot = color::rgb_to_gray(c.red, c.green, c.blue) as u32;
                }
                (PixelDepth::Bit8, graymap)
            }
        };

        let mut out = PixMut::new(self.width(), self.height(), out_depth)?;
        out.copy_resolution_from(self);
        for y in 0..self.height() {
            let src = self.row_data(y);
            let dst = out.row_data_mut(y);
            for x in 0..self.width() {
                let val = d.read(src, x) as usize;
                out_depth.write(dst, x, lut[val]);
            }
        }
        Ok(out.into())
    }
}

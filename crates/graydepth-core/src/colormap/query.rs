//! PixColormap query functions
//!
//! Lookups the quantizers run against a colormap: nearest gray entry,
//! intensity rank, minimum storage depth, and color detection.
//!
//! # See also
//!
//! C Leptonica: `colormap.c`

use super::{PixColormap, RgbaQuad};
use crate::error::{Error, Result};

impl PixColormap {
    /// Check whether any entry has unequal color channels.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapHasColor()` in `colormap.c`
    pub fn has_color(&self) -> bool {
        self.colors()
            .iter()
            .any(|c| c.red != c.green || c.red != c.blue)
    }

    /// Smallest raster depth (2, 4, or 8) able to index every entry.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGetMinDepth()` in `colormap.c`
    pub fn min_depth(&self) -> u32 {
        match self.len() {
            0..=4 => 2,
            5..=16 => 4,
            _ => 8,
        }
    }

    /// Index of the entry whose green channel is closest to `val`.
    ///
    /// Ties go to the lowest index. Returns `None` for an empty colormap.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGetNearestGrayIndex()` in `colormap.c`
    pub fn find_nearest_gray(&self, val: u8) -> Option<usize> {
        self.colors()
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| (c.green as i32 - val as i32).abs())
            .map(|(i, _)| i)
    }

    /// Index of the entry at intensity `rank` (0.0 darkest, 1.0 lightest).
    ///
    /// Intensity is the channel sum. Equal intensities keep index order.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapGetRankIntensity()` in `colormap.c`
    pub fn get_rank_intensity(&self, rank: f32) -> Result<usize> {
        if !(0.0..=1.0).contains(&rank) {
            return Err(Error::InvalidParameter(format!(
                "rank {rank} not in [0.0, 1.0]"
            )));
        }
        if self.is_empty() {
            return Err(Error::InvalidParameter("colormap is empty".into()));
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| self.colors()[i].intensity());
        let pos = ((rank * (order.len() - 1) as f32) + 0.5) as usize;
        Ok(order[pos.min(order.len() - 1)])
    }

    /// Force the darkest entry to black and/or the lightest to white.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapSetBlackAndWhite()` in `colormap.c`
    pub fn set_black_and_white(&mut self, set_black: bool, set_white: bool) -> Result<()> {
        if set_black {
            let index = self.get_rank_intensity(0.0)?;
            self.set_color(index, RgbaQuad::gray(0))?;
        }
        if set_white {
            let index = self.get_rank_intensity(1.0)?;
            self.set_color(index, RgbaQuad::gray(255))?;
        }
        Ok(())
    }
}

//! Per-pixel dithering arithmetic

use super::{DitherTarget, Ditherer, Quantized};

/// Ditherer that computes the level and error shares for every pixel.
///
/// # See also
///
/// C Leptonica: `ditherToBinaryLineLow()` in `grayquantlow.c`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectDither {
    target: DitherTarget,
    lower_clip: u8,
    upper_clip: u8,
}

impl DirectDither {
    /// Create a ditherer for `target` with the given clip distances.
    pub fn new(target: DitherTarget, lower_clip: u8, upper_clip: u8) -> Self {
        Self {
            target,
            lower_clip,
            upper_clip,
        }
    }
}

impl Ditherer for DirectDither {
    fn target(&self) -> DitherTarget {
        self.target
    }

    fn quantize(&self, val: u8) -> Quantized {
        let snapped = |pixel| Quantized {
            pixel,
            share38: 0,
            share14: 0,
        };
        // lower clip wins when the two clip zones overlap
        if val <= self.lower_clip {
            return snapped(self.target.darkest());
        }
        if val >= 255 - self.upper_clip {
            return snapped(self.target.lightest());
        }

        let (pixel, level) = self.target.nearest_level(val);
        let (share38, share14) = self.target.split_error(val as i32 - level);
        Quantized {
            pixel,
            share38,
            share14,
        }
    }
}

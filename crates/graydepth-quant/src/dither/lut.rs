//! Table-driven dithering
//!
//! The output value and both error shares depend only on the buffered
//! value, so all three are tabulated once per pass.
//!
//! # See also
//!
//! C Leptonica: `make8To1DitherTables()`, `make8To2DitherTables()` in
//! `grayquantlow.c`

use super::{DitherTarget, Ditherer, Quantized};

/// Ditherer that looks up the level and error shares in 256-entry tables.
#[derive(Debug, Clone)]
pub struct LutDither {
    target: DitherTarget,
    tabval: [u8; 256],
    tab38: [i16; 256],
    tab14: [i16; 256],
}

impl LutDither {
    /// Build the tables for `target` with the given clip distances.
    pub fn new(target: DitherTarget, lower_clip: u8, upper_clip: u8) -> Self {
        let mut tabval = [0u8; 256];
        let mut tab38 = [0i16; 256];
        let mut tab14 = [0i16; 256];

        let entries = tabval.iter_mut().zip(tab38.iter_mut()).zip(tab14.iter_mut());
        for (i, ((val, e38), e14)) in entries.enumerate() {
            let (pixel, level) = target.nearest_level(i as u8);
            let (s38, s14) = target.split_error(i as i32 - level);
            *val = pixel as u8;
            *e38 = s38 as i16;
            *e14 = s14 as i16;
        }

        let upper = (255 - upper_clip) as usize..;
        tabval[upper.clone()].fill(target.lightest() as u8);
        tab38[upper.clone()].fill(0);
        tab14[upper].fill(0);
        // written last so that it wins where the zones overlap
        let lower = ..=lower_clip as usize;
        tabval[lower].fill(target.darkest() as u8);
        tab38[lower].fill(0);
        tab14[lower].fill(0);

        Self {
            target,
            tabval,
            tab38,
            tab14,
        }
    }
}

impl Ditherer for LutDither {
    fn target(&self) -> DitherTarget {
        self.target
    }

    #[inline]
    fn quantize(&self, val: u8) -> Quantized {
        let i = val as usize;
        Quantized {
            pixel: self.tabval[i] as u32,
            share38: self.tab38[i] as i32,
            share14: self.tab14[i] as i32,
        }
    }
}

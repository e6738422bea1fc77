//! Quantization tables for linear thresholds of grayscale images
//!
//! A [`GrayQuantTable`] maps each of the 256 input gray levels either to a
//! colormap index or to a reduced target gray value. The tables are pure
//! functions of their parameters and are built fresh for every call.
//!
//! # See also
//!
//! C Leptonica: `grayquant.c` (`makeGrayQuantIndexTable`,
//! `makeGrayQuantTargetTable`)

use crate::{QuantError, QuantResult};
use graydepth_core::{Pix, PixMut, PixelDepth};
use std::ops::Index;

/// Lookup table from an 8-bit gray value to a quantized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayQuantTable {
    tab: [u8; 256],
}

impl GrayQuantTable {
    pub(crate) fn from_array(tab: [u8; 256]) -> Self {
        Self { tab }
    }

    /// Quantized value for input level `val`.
    #[inline]
    pub fn get(&self, val: u8) -> u8 {
        self.tab[val as usize]
    }

    /// All 256 entries, indexed by input level.
    pub fn as_slice(&self) -> &[u8] {
        &self.tab
    }

    /// Map every pixel of an 8 bpp gray raster through the table.
    ///
    /// The output has depth `depth`, the source resolution, and no colormap.
    pub(crate) fn apply(&self, pixg: &Pix, depth: PixelDepth) -> QuantResult<PixMut> {
        let mut pixd = PixMut::new(pixg.width(), pixg.height(), depth)?;
        pixd.copy_resolution_from(pixg);
        for y in 0..pixg.height() {
            let lines = pixg.row_data(y);
            let lined = pixd.row_data_mut(y);
            for x in 0..pixg.width() {
                let val = PixelDepth::Bit8.read(lines, x) as u8;
                depth.write(lined, x, self.get(val) as u32);
            }
        }
        Ok(pixd)
    }
}

impl Index<usize> for GrayQuantTable {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.tab[index]
    }
}

/// Bin of `val` among `nlevels` equally spaced levels.
///
/// The upper edge of bin `j` is `255 * (2j + 1) / (2 * nlevels - 2)`, so
/// each level sits at the center of its bin.
fn level_of(val: u32, nlevels: u32) -> u32 {
    (0..nlevels)
        .find(|&j| val <= 255 * (2 * j + 1) / (2 * nlevels - 2))
        .unwrap_or(nlevels - 1)
}

fn check_levels(nlevels: u32, max: u32) -> QuantResult<()> {
    if !(2..=max).contains(&nlevels) {
        return Err(QuantError::InvalidParameters(format!(
            "nlevels {nlevels} not in [2, {max}]"
        )));
    }
    Ok(())
}

/// Make a table mapping input gray level to colormap index.
///
/// `nlevels` is in `[2, 256]`. The table is typically used with a linear
/// colormap of `nlevels` entries.
///
/// # See also
///
/// C Leptonica: `makeGrayQuantIndexTable()` in `grayquant.c`
pub fn make_gray_quant_index_table(nlevels: u32) -> QuantResult<GrayQuantTable> {
    check_levels(nlevels, 256)?;
    let mut tab = [0u8; 256];
    for (i, slot) in tab.iter_mut().enumerate() {
        *slot = level_of(i as u32, nlevels) as u8;
    }
    Ok(GrayQuantTable::from_array(tab))
}

/// Make a table mapping input gray level to a thresholded gray level.
///
/// `depth` is the destination depth (2, 4, or 8) and `nlevels` is in
/// `[2, 2^depth]`. Targets span the full range of the destination:
/// level `j` maps to `(2^depth - 1) * j / (nlevels - 1)`.
///
/// For `depth < 8` the level count is always `2^depth`; a smaller count
/// needs a colormap and [`make_gray_quant_index_table`].
///
/// # See also
///
/// C Leptonica: `makeGrayQuantTargetTable()` in `grayquant.c`
pub fn make_gray_quant_target_table(nlevels: u32, depth: u32) -> QuantResult<GrayQuantTable> {
    if !matches!(depth, 2 | 4 | 8) {
        return Err(QuantError::UnsupportedDepth {
            expected: "2, 4 or 8 bpp",
            actual: depth,
        });
    }
    let maxval = (1u32 << depth) - 1;
    check_levels(nlevels, maxval + 1)?;
    let nlevels = if depth < 8 { 1 << depth } else { nlevels };

    let mut tab = [0u8; 256];
    for (i, slot) in tab.iter_mut().enumerate() {
        let j = level_of(i as u32, nlevels);
        *slot = (maxval * j / (nlevels - 1)) as u8;
    }
    Ok(GrayQuantTable::from_array(tab))
}

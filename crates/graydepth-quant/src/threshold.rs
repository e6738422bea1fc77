//! Pixelwise thresholding of gray images
//!
//! - Binarization with a fixed or per-pixel threshold
//! - Thresholding to 2, 4, or 8 bpp with equally spaced levels
//! - Quantization to the nearest gray of a given colormap
//!
//! Unlike dithering, every output pixel depends on its source pixel alone.
//!
//! # See also
//!
//! C Leptonica: `grayquant.c` (`pixThresholdToBinary`,
//! `pixVarThresholdToBinary`, `pixThresholdTo2bpp`, `pixThresholdTo4bpp`,
//! `pixThresholdOn8bpp`, `pixGrayQuantFromCmap`)

use crate::gray::{require_8bpp, without_colormap};
use crate::table::{GrayQuantTable, make_gray_quant_index_table, make_gray_quant_target_table};
use crate::{QuantError, QuantResult};
use graydepth_core::pix::set_data_bit_val;
use graydepth_core::{Pix, PixColormap, PixMut, PixelDepth};
use tracing::warn;

/// Binarize a 4 or 8 bpp image: a pixel below `thresh` becomes 1.
///
/// `thresh` must be in `[0, 16]` for 4 bpp and `[0, 256]` for 8 bpp.
/// A colormapped source is flattened to 8 bpp gray first; a 4 bpp
/// threshold is then scaled by 16.
///
/// # See also
///
/// C Leptonica: `pixThresholdToBinary()` in `grayquant.c`
pub fn threshold_to_binary(pixs: &Pix, thresh: i32) -> QuantResult<Pix> {
    let d = pixs.depth();
    let max = match d {
        PixelDepth::Bit4 => 16,
        PixelDepth::Bit8 => 256,
        _ => {
            return Err(QuantError::UnsupportedDepth {
                expected: "4 or 8 bpp",
                actual: d.bits(),
            });
        }
    };
    if !(0..=max).contains(&thresh) {
        return Err(QuantError::InvalidParameters(format!(
            "thresh {thresh} not in [0, {max}] for {} bpp",
            d.bits()
        )));
    }

    let pixg = without_colormap(pixs)?;
    let scale = if pixs.has_colormap() && d == PixelDepth::Bit4 { 16 } else { 1 };
    let thresh = (thresh * scale) as u32;

    let gd = pixg.depth();
    let mut pixd = PixMut::new(pixs.width(), pixs.height(), PixelDepth::Bit1)?;
    pixd.copy_resolution_from(pixs);
    for y in 0..pixg.height() {
        let lines = pixg.row_data(y);
        let lined = pixd.row_data_mut(y);
        for x in 0..pixg.width() {
            if gd.read(lines, x) < thresh {
                set_data_bit_val(lined, x);
            }
        }
    }
    Ok(pixd.into())
}

/// Binarize against a per-pixel threshold raster.
///
/// A pixel of `pixs` below the matching pixel of `pixg` becomes 1. Both
/// rasters are 8 bpp and equal in size.
///
/// # See also
///
/// C Leptonica: `pixVarThresholdToBinary()` in `grayquant.c`
pub fn var_threshold_to_binary(pixs: &Pix, pixg: &Pix) -> QuantResult<Pix> {
    if pixs.width() != pixg.width() || pixs.height() != pixg.height() {
        return Err(QuantError::SizeMismatch {
            w1: pixs.width(),
            h1: pixs.height(),
            w2: pixg.width(),
            h2: pixg.height(),
        });
    }
    require_8bpp(pixs)?;
    require_8bpp(pixg)?;

    let mut pixd = PixMut::new(pixs.width(), pixs.height(), PixelDepth::Bit1)?;
    pixd.copy_resolution_from(pixs);
    for y in 0..pixs.height() {
        let (lines, lineg) = (pixs.row_data(y), pixg.row_data(y));
        let lined = pixd.row_data_mut(y);
        for x in 0..pixs.width() {
            if PixelDepth::Bit8.read(lines, x) < PixelDepth::Bit8.read(lineg, x) {
                set_data_bit_val(lined, x);
            }
        }
    }
    Ok(pixd.into())
}

/// Shared body of the 2 and 4 bpp thresholders.
fn threshold_to_low_depth(
    pixs: &Pix,
    nlevels: u32,
    cmapflag: bool,
    depth: PixelDepth,
) -> QuantResult<Pix> {
    require_8bpp(pixs)?;
    let maxlevels = 1u32 << depth.bits();
    if !(2..=maxlevels).contains(&nlevels) {
        return Err(QuantError::InvalidParameters(format!(
            "nlevels {nlevels} not in [2, {maxlevels}]"
        )));
    }

    let tab: GrayQuantTable = if cmapflag {
        make_gray_quant_index_table(nlevels)?
    } else {
        make_gray_quant_target_table(maxlevels, depth.bits())?
    };

    let pixg = without_colormap(pixs)?;
    let mut pixd = tab.apply(&pixg, depth)?;
    if cmapflag {
        // entries beyond nlevels stay free for the caller
        pixd.set_colormap(Some(PixColormap::create_linear(depth.bits(), nlevels as usize)?))?;
    }
    Ok(pixd.into())
}

/// Threshold 8 bpp gray to 2 bpp.
///
/// With `cmapflag`, `nlevels` (2 to 4) equally spaced grays are used and a
/// linear colormap is attached. Without, `nlevels` is ignored after
/// validation and the full 0..=3 range is used.
///
/// # See also
///
/// C Leptonica: `pixThresholdTo2bpp()` in `grayquant.c`
pub fn threshold_to_2bpp(pixs: &Pix, nlevels: u32, cmapflag: bool) -> QuantResult<Pix> {
    threshold_to_low_depth(pixs, nlevels, cmapflag, PixelDepth::Bit2)
}

/// Threshold 8 bpp gray to 4 bpp, with `nlevels` in 2 to 16.
///
/// # See also
///
/// C Leptonica: `pixThresholdTo4bpp()` in `grayquant.c`
pub fn threshold_to_4bpp(pixs: &Pix, nlevels: u32, cmapflag: bool) -> QuantResult<Pix> {
    threshold_to_low_depth(pixs, nlevels, cmapflag, PixelDepth::Bit4)
}

/// Requantize 8 bpp gray to `nlevels` (2 to 256) equally spaced levels.
///
/// With `cmapflag` the result stores level indices and a linear colormap;
/// without, it stores the target gray values directly.
///
/// # See also
///
/// C Leptonica: `pixThresholdOn8bpp()` in `grayquant.c`
pub fn threshold_on_8bpp(pixs: &Pix, nlevels: u32, cmapflag: bool) -> QuantResult<Pix> {
    require_8bpp(pixs)?;
    let tab = if cmapflag {
        make_gray_quant_index_table(nlevels)?
    } else {
        make_gray_quant_target_table(nlevels, 8)?
    };

    let pixg = without_colormap(pixs)?;
    let mut pixd = tab.apply(&pixg, PixelDepth::Bit8)?;
    if cmapflag {
        pixd.set_colormap(Some(PixColormap::create_linear(8, nlevels as usize)?))?;
    }
    Ok(pixd.into())
}

/// Quantize 8 bpp gray to the nearest gray entry of `cmap`.
///
/// The output depth is the larger of `mindepth` (2, 4, or 8) and the
/// smallest depth that can index `cmap`. A colormap with color is first
/// reduced to gray with weights 0.3, 0.5, 0.2. A source that already has a
/// colormap is returned as an unchanged copy.
///
/// # See also
///
/// C Leptonica: `pixGrayQuantFromCmap()` in `grayquant.c`
pub fn gray_quant_from_cmap(pixs: &Pix, cmap: &PixColormap, mindepth: u32) -> QuantResult<Pix> {
    if pixs.has_colormap() {
        warn!("source already has a colormap; returning a copy");
        return Ok(pixs.deep_clone());
    }
    require_8bpp(pixs)?;
    if !matches!(mindepth, 2 | 4 | 8) {
        return Err(QuantError::InvalidParameters(format!(
            "mindepth {mindepth} not in {{2, 4, 8}}"
        )));
    }
    if cmap.is_empty() {
        return Err(QuantError::InvalidParameters("colormap is empty".into()));
    }

    let gray = if cmap.has_color() {
        warn!("converting colormap colors to gray");
        cmap.color_to_gray(0.3, 0.5, 0.2)?
    } else {
        cmap.clone()
    };

    let mut tab = [0u8; 256];
    for (i, slot) in tab.iter_mut().enumerate() {
        *slot = gray.find_nearest_gray(i as u8).unwrap_or(0) as u8;
    }

    let depth = cmap.min_depth().max(mindepth);
    let mut cmapd = PixColormap::new(depth)?;
    for c in gray.colors() {
        cmapd.add_color(*c)?;
    }

    let mut pixd = GrayQuantTable::from_array(tab).apply(pixs, PixelDepth::from_bits(depth)?)?;
    pixd.set_colormap(Some(cmapd))?;
    Ok(pixd.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_row(vals: &[u8]) -> Pix {
        let mut pm = PixMut::new(vals.len() as u32, 1, PixelDepth::Bit8).unwrap();
        for (x, &v) in vals.iter().enumerate() {
            pm.set_pixel(x as u32, 0, v as u32).unwrap();
        }
        pm.into()
    }

    fn row_values(pix: &Pix) -> Vec<u32> {
        (0..pix.width()).map(|x| pix.get_pixel(x, 0).unwrap()).collect()
    }

    #[test]
    fn test_threshold_to_binary_128() {
        let pixd = threshold_to_binary(&gray_row(&[0, 127, 128, 255]), 128).unwrap();
        assert_eq!(pixd.depth(), PixelDepth::Bit1);
        assert_eq!(row_values(&pixd), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_threshold_to_binary_extremes() {
        let pix = gray_row(&[0, 255]);
        assert_eq!(row_values(&threshold_to_binary(&pix, 0).unwrap()), vec![0, 0]);
        assert_eq!(row_values(&threshold_to_binary(&pix, 256).unwrap()), vec![1, 1]);
        assert!(threshold_to_binary(&pix, 257).is_err());
        assert!(threshold_to_binary(&pix, -1).is_err());
    }

    #[test]
    fn test_threshold_to_binary_4bpp() {
        let mut pm = PixMut::new(3, 1, PixelDepth::Bit4).unwrap();
        pm.set_pixel(0, 0, 3).unwrap();
        pm.set_pixel(1, 0, 8).unwrap();
        pm.set_pixel(2, 0, 15).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(row_values(&threshold_to_binary(&pix, 8).unwrap()), vec![1, 0, 0]);
        assert!(threshold_to_binary(&pix, 17).is_err());
    }

    #[test]
    fn test_threshold_to_binary_cmapped_4bpp_scales() {
        let mut pm = PixMut::new(2, 1, PixelDepth::Bit4).unwrap();
        pm.set_colormap(Some(PixColormap::create_linear(4, 16).unwrap()))
            .unwrap();
        pm.set_pixel(0, 0, 7).unwrap(); // gray 119
        pm.set_pixel(1, 0, 8).unwrap(); // gray 136
        let pix: Pix = pm.into();
        // 8 * 16 = 128
        assert_eq!(row_values(&threshold_to_binary(&pix, 8).unwrap()), vec![1, 0]);
    }

    #[test]
    fn test_var_threshold() {
        let pixs = gray_row(&[10, 20, 30]);
        let pixg = gray_row(&[20, 20, 20]);
        let pixd = var_threshold_to_binary(&pixs, &pixg).unwrap();
        assert_eq!(row_values(&pixd), vec![1, 0, 0]);

        let other = gray_row(&[1, 2]);
        assert!(matches!(
            var_threshold_to_binary(&pixs, &other),
            Err(QuantError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_threshold_to_2bpp() {
        let pix = gray_row(&[0, 100, 200, 255]);
        let full = threshold_to_2bpp(&pix, 3, false).unwrap();
        assert_eq!(full.depth(), PixelDepth::Bit2);
        assert!(!full.has_colormap());
        assert_eq!(row_values(&full), vec![0, 1, 2, 3]);

        let idx = threshold_to_2bpp(&pix, 3, true).unwrap();
        assert_eq!(row_values(&idx), vec![0, 1, 2, 2]);
        assert_eq!(idx.colormap().unwrap().len(), 3);

        assert!(threshold_to_2bpp(&pix, 5, true).is_err());
        assert!(threshold_to_2bpp(&pix, 1, false).is_err());
    }

    #[test]
    fn test_threshold_on_8bpp() {
        let pix = gray_row(&[0, 0x3f, 0x40, 0xc0]);
        let direct = threshold_on_8bpp(&pix, 3, false).unwrap();
        assert_eq!(row_values(&direct), vec![0, 0, 0x7f, 0xff]);
        let indexed = threshold_on_8bpp(&pix, 3, true).unwrap();
        assert_eq!(row_values(&indexed), vec![0, 0, 1, 2]);
        assert_eq!(indexed.colormap().unwrap().get_rgb(1), Some((127, 127, 127)));
    }

    #[test]
    fn test_gray_quant_from_cmap() {
        let mut cmap = PixColormap::new(8).unwrap();
        for v in [0u8, 100, 200] {
            cmap.add_rgb(v, v, v).unwrap();
        }
        let pixd = gray_quant_from_cmap(&gray_row(&[10, 60, 140, 250]), &cmap, 2).unwrap();
        assert_eq!(pixd.depth(), PixelDepth::Bit2);
        assert_eq!(row_values(&pixd), vec![0, 1, 1, 2]);
        assert_eq!(pixd.colormap().unwrap().len(), 3);

        let pixd = gray_quant_from_cmap(&gray_row(&[10]), &cmap, 8).unwrap();
        assert_eq!(pixd.depth(), PixelDepth::Bit8);
        assert!(gray_quant_from_cmap(&gray_row(&[10]), &cmap, 3).is_err());
    }

    #[test]
    fn test_gray_quant_from_cmap_copies_cmapped_source() {
        let mut pm = PixMut::new(2, 1, PixelDepth::Bit2).unwrap();
        pm.set_colormap(Some(PixColormap::create_linear(2, 4).unwrap()))
            .unwrap();
        pm.set_pixel(1, 0, 3).unwrap();
        let pix: Pix = pm.into();
        let cmap = PixColormap::create_linear(8, 16).unwrap();
        let out = gray_quant_from_cmap(&pix, &cmap, 2).unwrap();
        assert_eq!(out.depth(), PixelDepth::Bit2);
        assert_eq!(out.data(), pix.data());
        assert_ne!(out.data().as_ptr(), pix.data().as_ptr());
    }
}

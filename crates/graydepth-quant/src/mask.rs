//! Binary masks selected by pixel value
//!
//! Each generator returns a 1 bpp raster the size of the source, with ON
//! pixels where the source pixel matches the selection.
//!
//! # See also
//!
//! C Leptonica: `grayquant.c` (`pixGenerateMaskByValue`,
//! `pixGenerateMaskByBand`, `pixGenerateMaskByBand32`,
//! `pixGenerateMaskByDiscr32`)

use crate::gray::without_colormap;
use crate::{QuantError, QuantResult};
use graydepth_core::color::extract_rgb;
use graydepth_core::pix::set_data_bit_val;
use graydepth_core::{Pix, PixMut, PixelDepth};

/// Distance used by [`generate_mask_by_discr_32`].
///
/// # See also
///
/// C Leptonica: `L_MANHATTAN_DISTANCE`, `L_EUCLIDEAN_DISTANCE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Sum of absolute channel differences
    #[default]
    Manhattan,
    /// Sum of squared channel differences
    Euclidean,
}

impl DistanceMetric {
    fn distance(self, a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
        let diffs = [
            a.0 as i32 - b.0 as i32,
            a.1 as i32 - b.1 as i32,
            a.2 as i32 - b.2 as i32,
        ];
        match self {
            DistanceMetric::Manhattan => diffs.iter().map(|d| d.unsigned_abs()).sum(),
            DistanceMetric::Euclidean => diffs.iter().map(|d| (d * d) as u32).sum(),
        }
    }
}

/// 4 or 8 bpp view for the gray masks: with `usecmap` false a colormap is
/// flattened to 8 bpp gray, otherwise the stored indices are used.
fn mask_source(pixs: &Pix, usecmap: bool) -> QuantResult<Pix> {
    let d = pixs.depth();
    if d != PixelDepth::Bit4 && d != PixelDepth::Bit8 {
        return Err(QuantError::UnsupportedDepth {
            expected: "4 or 8 bpp",
            actual: d.bits(),
        });
    }
    if usecmap {
        Ok(pixs.clone())
    } else {
        without_colormap(pixs)
    }
}

/// Set a mask bit wherever `select` accepts the source pixel.
fn build_mask(pixg: &Pix, select: impl Fn(u32) -> bool) -> QuantResult<Pix> {
    let d = pixg.depth();
    let mut pixd = PixMut::new(pixg.width(), pixg.height(), PixelDepth::Bit1)?;
    pixd.copy_resolution_from(pixg);
    for y in 0..pixg.height() {
        let lineg = pixg.row_data(y);
        let lined = pixd.row_data_mut(y);
        for x in 0..pixg.width() {
            if select(d.read(lineg, x)) {
                set_data_bit_val(lined, x);
            }
        }
    }
    Ok(pixd.into())
}

/// Mask of the pixels equal to `val`.
///
/// `val` must be valid for the depth examined: `[0, 15]` at 4 bpp,
/// `[0, 255]` at 8 bpp.
///
/// # See also
///
/// C Leptonica: `pixGenerateMaskByValue()` in `grayquant.c`
pub fn generate_mask_by_value(pixs: &Pix, val: i32, usecmap: bool) -> QuantResult<Pix> {
    let pixg = mask_source(pixs, usecmap)?;
    let maxval = pixg.depth().max_value() as i32;
    if !(0..=maxval).contains(&val) {
        return Err(QuantError::InvalidParameters(format!(
            "val {val} out of {} bpp range",
            pixg.depth().bits()
        )));
    }
    let val = val as u32;
    build_mask(&pixg, |v| v == val)
}

/// Mask of the pixels inside (`inband`) or outside `[lower, upper]`.
///
/// Requires `0 <= lower <= upper <= maxval` for the depth examined.
///
/// # See also
///
/// C Leptonica: `pixGenerateMaskByBand()` in `grayquant.c`
pub fn generate_mask_by_band(
    pixs: &Pix,
    lower: i32,
    upper: i32,
    inband: bool,
    usecmap: bool,
) -> QuantResult<Pix> {
    if lower < 0 || lower > upper {
        return Err(QuantError::InvalidParameters(format!(
            "band [{lower}, {upper}] is empty or negative"
        )));
    }
    let pixg = mask_source(pixs, usecmap)?;
    let maxval = pixg.depth().max_value() as i32;
    if upper > maxval {
        return Err(QuantError::InvalidParameters(format!(
            "upper {upper} exceeds {maxval} at {} bpp",
            pixg.depth().bits()
        )));
    }

    let band = lower as u32..=upper as u32;
    build_mask(&pixg, |v| band.contains(&v) == inband)
}

/// Mask of 32 bpp pixels whose every channel lies within
/// `[ref - delm, ref + delp]` of the matching channel of `refval`.
///
/// # See also
///
/// C Leptonica: `pixGenerateMaskByBand32()` in `grayquant.c`
pub fn generate_mask_by_band_32(
    pixs: &Pix,
    refval: u32,
    delm: i32,
    delp: i32,
) -> QuantResult<Pix> {
    require_32bpp(pixs)?;
    if delm < 0 || delp < 0 {
        return Err(QuantError::InvalidParameters(
            "delm and delp must be >= 0".into(),
        ));
    }

    // per-channel band, clamped to the channel range
    let band = |refc: u8| {
        let lower = (refc as i32).saturating_sub(delm).max(0) as u8;
        let upper = (refc as i32).saturating_add(delp).min(255) as u8;
        lower..=upper
    };
    let (rref, gref, bref) = extract_rgb(refval);
    let (rband, gband, bband) = (band(rref), band(gref), band(bref));
    build_mask(pixs, |pixel| {
        let (r, g, b) = extract_rgb(pixel);
        rband.contains(&r) && gband.contains(&g) && bband.contains(&b)
    })
}

/// Mask of 32 bpp pixels strictly closer to `refval1` than to `refval2`.
///
/// Equidistant pixels are not set.
///
/// # See also
///
/// C Leptonica: `pixGenerateMaskByDiscr32()` in `grayquant.c`
pub fn generate_mask_by_discr_32(
    pixs: &Pix,
    refval1: u32,
    refval2: u32,
    metric: DistanceMetric,
) -> QuantResult<Pix> {
    require_32bpp(pixs)?;
    let ref1 = extract_rgb(refval1);
    let ref2 = extract_rgb(refval2);
    build_mask(pixs, |pixel| {
        let rgb = extract_rgb(pixel);
        metric.distance(rgb, ref1) < metric.distance(rgb, ref2)
    })
}

fn require_32bpp(pixs: &Pix) -> QuantResult<()> {
    if pixs.depth() != PixelDepth::Bit32 {
        return Err(QuantError::UnsupportedDepth {
            expected: "32 bpp",
            actual: pixs.depth().bits(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graydepth_core::color::compose_rgb;
    use graydepth_core::PixColormap;

    fn gray_row(vals: &[u8]) -> Pix {
        let mut pm = PixMut::new(vals.len() as u32, 1, PixelDepth::Bit8).unwrap();
        for (x, &v) in vals.iter().enumerate() {
            pm.set_pixel(x as u32, 0, v as u32).unwrap();
        }
        pm.into()
    }

    fn rgb_row(vals: &[(u8, u8, u8)]) -> Pix {
        let mut pm = PixMut::new(vals.len() as u32, 1, PixelDepth::Bit32).unwrap();
        for (x, &(r, g, b)) in vals.iter().enumerate() {
            pm.set_pixel(x as u32, 0, compose_rgb(r, g, b)).unwrap();
        }
        pm.into()
    }

    fn bits(pix: &Pix) -> Vec<u32> {
        (0..pix.width()).map(|x| pix.get_pixel(x, 0).unwrap()).collect()
    }

    #[test]
    fn test_mask_by_value() {
        let pixd = generate_mask_by_value(&gray_row(&[5, 7, 5, 255]), 5, false).unwrap();
        assert_eq!(bits(&pixd), vec![1, 0, 1, 0]);
        assert!(generate_mask_by_value(&gray_row(&[5]), 256, false).is_err());
    }

    #[test]
    fn test_mask_by_band() {
        let pix = gray_row(&[40, 50, 75, 100, 101]);
        let inband = generate_mask_by_band(&pix, 50, 100, true, false).unwrap();
        assert_eq!(bits(&inband), vec![0, 1, 1, 1, 0]);
        let outband = generate_mask_by_band(&pix, 50, 100, false, false).unwrap();
        assert_eq!(bits(&outband), vec![1, 0, 0, 0, 1]);

        assert!(generate_mask_by_band(&pix, 60, 50, true, false).is_err());
        assert!(generate_mask_by_band(&pix, -1, 50, true, false).is_err());
        assert!(generate_mask_by_band(&pix, 0, 256, true, false).is_err());
    }

    #[test]
    fn test_mask_usecmap_selects_indices_or_grays() {
        let mut pm = PixMut::new(2, 1, PixelDepth::Bit4).unwrap();
        pm.set_colormap(Some(PixColormap::create_linear(4, 16).unwrap()))
            .unwrap();
        pm.set_pixel(0, 0, 2).unwrap(); // gray 34
        pm.set_pixel(1, 0, 15).unwrap(); // gray 255
        let pix: Pix = pm.into();

        assert_eq!(bits(&generate_mask_by_value(&pix, 2, true).unwrap()), vec![1, 0]);
        assert_eq!(bits(&generate_mask_by_value(&pix, 34, false).unwrap()), vec![1, 0]);
        // index range applies when the colormap is kept
        assert!(generate_mask_by_value(&pix, 34, true).is_err());
        assert!(generate_mask_by_band(&pix, 0, 200, true, true).is_err());
    }

    #[test]
    fn test_mask_by_band_32() {
        let pix = rgb_row(&[(100, 100, 100), (90, 110, 100), (89, 100, 100), (100, 111, 100)]);
        let pixd = generate_mask_by_band_32(&pix, compose_rgb(100, 100, 100), 10, 10).unwrap();
        assert_eq!(bits(&pixd), vec![1, 1, 0, 0]);
        assert!(generate_mask_by_band_32(&pix, 0, -1, 0).is_err());
        assert!(generate_mask_by_band_32(&gray_row(&[1]), 0, 1, 1).is_err());
    }

    #[test]
    fn test_mask_by_band_32_huge_deltas() {
        let pix = rgb_row(&[(200, 200, 200)]);
        let refval = compose_rgb(100, 100, 100);
        let pixd = generate_mask_by_band_32(&pix, refval, 0, i32::MAX).unwrap();
        assert_eq!(bits(&pixd), vec![1]);

        let pix = rgb_row(&[(0, 0, 0), (255, 255, 255), (0, 128, 255)]);
        let pixd = generate_mask_by_band_32(&pix, refval, i32::MAX, i32::MAX).unwrap();
        assert_eq!(bits(&pixd), vec![1, 1, 1]);
        let pixd = generate_mask_by_band_32(&pix, refval, i32::MAX, 0).unwrap();
        assert_eq!(bits(&pixd), vec![1, 0, 0]);
    }

    #[test]
    fn test_mask_by_discr_32() {
        let black = compose_rgb(0, 0, 0);
        let white = compose_rgb(255, 255, 255);
        // third pixel: manhattan 300 vs 465, euclidean 90000 vs 43350
        let pix = rgb_row(&[(10, 10, 10), (250, 250, 250), (0, 45, 255)]);
        let manhattan =
            generate_mask_by_discr_32(&pix, black, white, DistanceMetric::Manhattan).unwrap();
        assert_eq!(bits(&manhattan), vec![1, 0, 1]);
        let euclidean =
            generate_mask_by_discr_32(&pix, black, white, DistanceMetric::Euclidean).unwrap();
        assert_eq!(bits(&euclidean), vec![1, 0, 0]);
    }

    #[test]
    fn test_mask_by_discr_32_tie_not_set() {
        let pix = rgb_row(&[(50, 50, 50)]);
        let pixd = generate_mask_by_discr_32(
            &pix,
            compose_rgb(40, 50, 50),
            compose_rgb(60, 50, 50),
            DistanceMetric::Euclidean,
        )
        .unwrap();
        assert_eq!(bits(&pixd), vec![0]);
    }
}

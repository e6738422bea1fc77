//! Arbitrary (non-uniform) gray binning
//!
//! Bins are given by a sorted sequence of boundaries: `n` boundaries make
//! `n + 1` half-open bins `[0, b0), [b0, b1), ..., [b(n-1), 255]`. Each bin
//! becomes one gray colormap entry, placed either at the bin center or at
//! the average of the pixels that fall into it.
//!
//! # See also
//!
//! C Leptonica: `grayquant.c` (`makeGrayQuantTableArb`,
//! `makeGrayQuantColormapArb`, `pixThresholdGrayArb`)

use crate::gray::{require_8bpp, without_colormap};
use crate::table::GrayQuantTable;
use crate::{QuantError, QuantResult};
use graydepth_core::{Numa, Pix, PixColormap, PixelDepth, SortOrder};
use tracing::{debug, warn};

/// Target sample count when averaging pixels per bin.
///
/// The sampling stride is chosen so that roughly this many pixels are read.
pub const ARB_SAMPLE_TARGET: f64 = 30000.0;

fn check_outdepth(outdepth: u32) -> QuantResult<()> {
    if !matches!(outdepth, 1 | 2 | 4 | 8) {
        return Err(QuantError::InvalidParameters(format!(
            "outdepth {outdepth} not in {{1, 2, 4, 8}}"
        )));
    }
    Ok(())
}

fn check_capacity(bins: usize, outdepth: u32) -> QuantResult<()> {
    let capacity = 1usize << outdepth;
    if bins > capacity {
        return Err(QuantError::TooManyBins { bins, capacity });
    }
    Ok(())
}

fn gray_colormap(outdepth: u32, values: impl IntoIterator<Item = u32>) -> QuantResult<PixColormap> {
    let mut cmap = PixColormap::new(outdepth)?;
    for val in values {
        let val = val as u8;
        cmap.add_rgb(val, val, val)?;
    }
    Ok(cmap)
}

/// Build the bin table and a bin-center colormap from bin boundaries.
///
/// `boundaries` must be sorted increasing with values in `[0, 255]`.
/// Entry `i` of the colormap is the midpoint of bin `i`.
///
/// # Errors
///
/// - [`QuantError::TooManyBins`] if `boundaries.len() + 1 > 2^outdepth`
/// - [`QuantError::InvalidParameters`] for unsorted or out-of-range
///   boundaries, or `outdepth` not in {1, 2, 4, 8}
///
/// # See also
///
/// C Leptonica: `makeGrayQuantTableArb()` in `grayquant.c`
pub fn make_gray_quant_table_arb(
    boundaries: &Numa,
    outdepth: u32,
) -> QuantResult<(GrayQuantTable, PixColormap)> {
    check_outdepth(outdepth)?;
    let n = boundaries.len();
    check_capacity(n + 1, outdepth)?;
    if !boundaries.is_sorted(SortOrder::Increasing) {
        return Err(QuantError::InvalidParameters(
            "bin boundaries must be sorted increasing".into(),
        ));
    }

    let mut tab = [0u8; 256];
    let mut centers = Vec::with_capacity(n + 1);
    let mut jstart = 0usize;
    for i in 0..n {
        let val = boundaries.get_i32(i).unwrap_or(0);
        if !(0..=255).contains(&val) {
            return Err(QuantError::InvalidParameters(format!(
                "bin boundary {val} not in [0, 255]"
            )));
        }
        let val = val as usize;
        centers.push(((jstart + val) / 2) as u32);
        tab[jstart..val].fill(i as u8);
        jstart = val;
    }
    centers.push(((jstart + 255) / 2) as u32);
    tab[jstart..].fill(n as u8);

    Ok((GrayQuantTable::from_array(tab), gray_colormap(outdepth, centers)?))
}

/// Build a colormap holding the average gray of the pixels in each bin.
///
/// `tab` maps gray to bin index, as made by [`make_gray_quant_table_arb`];
/// the bin count is `tab[255] + 1`. Pixels are sampled on a grid with
/// stride `max(1, round(sqrt(w * h / ARB_SAMPLE_TARGET)))`. A bin with no
/// samples gets the midpoint between its smallest input level and the next
/// bin's smallest input level (255 for the last bin). A colormapped
/// source is sampled through its gray rendering.
///
/// # Errors
///
/// - [`QuantError::InvalidParameters`] if `outdepth` is not in {1, 2, 4, 8}
/// - [`QuantError::TooManyBins`] if the table has more than `2^outdepth` bins
///
/// # See also
///
/// C Leptonica: `makeGrayQuantColormapArb()` in `grayquant.c`
pub fn make_gray_quant_colormap_arb(
    pixs: &Pix,
    tab: &GrayQuantTable,
    outdepth: u32,
) -> QuantResult<PixColormap> {
    require_8bpp(pixs)?;
    check_outdepth(outdepth)?;
    let nbins = tab[255] as usize + 1;
    check_capacity(nbins, outdepth)?;
    let pixg = without_colormap(pixs)?;

    let (w, h) = (pixg.width(), pixg.height());
    let factor = ((w as f64 * h as f64 / ARB_SAMPLE_TARGET).sqrt() + 0.5) as usize;
    let factor = factor.max(1);
    debug!(nbins, factor, "sampling bin averages");

    let mut count = vec![0u64; nbins];
    let mut sum = vec![0u64; nbins];
    for y in (0..h).step_by(factor) {
        let line = pixg.row_data(y);
        for x in (0..w).step_by(factor) {
            let val = PixelDepth::Bit8.read(line, x);
            let bin = tab[val as usize] as usize;
            count[bin] += 1;
            sum[bin] += val as u64;
        }
    }

    // smallest gray value that falls into each bin
    let mut binstart = vec![0u32; nbins];
    let mut index = 1usize;
    for i in 1..256 {
        if tab[i] as usize == index {
            binstart[index] = i as u32;
            index += 1;
        }
    }

    let values = (0..nbins).map(|i| {
        if count[i] > 0 {
            (sum[i] / count[i]) as u32
        } else if i + 1 < nbins {
            (binstart[i] + binstart[i + 1]) / 2
        } else {
            (binstart[i] + 255) / 2
        }
    });
    gray_colormap(outdepth, values)
}

/// Quantize 8 bpp gray into arbitrary bins, producing a colormapped raster.
///
/// - `boundaries`: up to 255 bin edges, in any order
/// - `outdepth`: 0 to pick the smallest of 2, 4, 8 that holds the bins,
///   or 2, 4, 8 explicitly; a depth too small for the bins is raised to 8
/// - `use_average`: colormap entries are bin averages instead of centers
/// - `set_black`, `set_white`: force the darkest / lightest entry to pure
///   black / white
///
/// # See also
///
/// C Leptonica: `pixThresholdGrayArb()` in `grayquant.c`
pub fn threshold_gray_arb(
    pixs: &Pix,
    boundaries: &Numa,
    outdepth: u32,
    use_average: bool,
    set_black: bool,
    set_white: bool,
) -> QuantResult<Pix> {
    require_8bpp(pixs)?;
    if pixs.has_colormap() {
        return Err(QuantError::UnsupportedColormap);
    }
    let n = boundaries.len();
    if n > 255 {
        return Err(QuantError::InvalidParameters(format!(
            "{n} bin boundaries; at most 255 allowed"
        )));
    }
    if !matches!(outdepth, 0 | 2 | 4 | 8) {
        return Err(QuantError::InvalidParameters(format!(
            "outdepth {outdepth} not in {{0, 2, 4, 8}}"
        )));
    }

    let outdepth = match outdepth {
        0 if n <= 3 => 2,
        0 if n <= 15 => 4,
        0 => 8,
        d if n + 1 > 1 << d => {
            warn!(outdepth = d, bins = n + 1, "outdepth too small; using 8 bpp");
            8
        }
        d => d,
    };

    let sorted = boundaries.sort(SortOrder::Increasing);
    let (tab, mut cmap) = make_gray_quant_table_arb(&sorted, outdepth)?;
    if use_average {
        cmap = make_gray_quant_colormap_arb(pixs, &tab, outdepth)?;
    }
    cmap.set_black_and_white(set_black, set_white)?;

    let mut pixd = tab.apply(pixs, PixelDepth::from_bits(outdepth)?)?;
    pixd.set_colormap(Some(cmap))?;
    Ok(pixd.into())
}

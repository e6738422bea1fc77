//! Error-diffusion dithering of 8 bpp gray to 1 or 2 bpp
//!
//! An analog of Floyd-Steinberg error diffusion. Each pixel is snapped to
//! the nearest output level and the residual is pushed to the three
//! unprocessed neighbors:
//!
//! ```text
//!        X   3/8
//!   3/8  1/4
//! ```
//!
//! i.e. 3/8 to the right, 3/8 below and 1/4 diagonally below-right.
//! Buffered values saturate at 0 and 255 after every addition.
//!
//! Values within `lower_clip` of black or `upper_clip` of white are snapped
//! without propagating any error. This suppresses the snake patterns that
//! plain error diffusion leaves in nearly black or nearly white regions,
//! at the cost of not reproducing grays in those ranges.
//!
//! # Strategies
//!
//! Two [`Ditherer`] implementations produce identical output:
//!
//! - [`DirectDither`]: decides level and error shares per pixel
//! - [`LutDither`]: precomputes level and shares for all 256 buffered values
//!
//! # See also
//!
//! C Leptonica: `grayquant.c` (`pixDitherToBinary`, `pixDitherTo2bpp`),
//! `grayquantlow.c` (`ditherToBinaryLow`, `ditherTo2bppLow`)

mod direct;
mod lut;

pub use direct::DirectDither;
pub use lut::LutDither;

use crate::gray::{require_8bpp, without_colormap};
use crate::{QuantError, QuantResult};
use graydepth_core::{Pix, PixColormap, PixMut, PixelDepth};
use tracing::debug;

/// Default clip distance to black for binary dithering.
pub const DEFAULT_CLIP_LOWER_1: i32 = 10;
/// Default clip distance to white for binary dithering.
pub const DEFAULT_CLIP_UPPER_1: i32 = 10;
/// Default clip distance to black for 2 bpp dithering.
pub const DEFAULT_CLIP_LOWER_2: i32 = 5;
/// Default clip distance to white for 2 bpp dithering.
pub const DEFAULT_CLIP_UPPER_2: i32 = 5;

/// Output depth of a dithering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherTarget {
    /// 1 bpp; ON pixels are black
    #[default]
    Binary,
    /// 2 bpp; values 0..=3 stand for grays 0, 85, 170, 255
    TwoBit,
}

impl DitherTarget {
    /// Depth of the dithered raster.
    pub fn depth(self) -> PixelDepth {
        match self {
            DitherTarget::Binary => PixelDepth::Bit1,
            DitherTarget::TwoBit => PixelDepth::Bit2,
        }
    }

    /// Default `(lower_clip, upper_clip)` for this target.
    pub fn default_clips(self) -> (i32, i32) {
        match self {
            DitherTarget::Binary => (DEFAULT_CLIP_LOWER_1, DEFAULT_CLIP_UPPER_1),
            DitherTarget::TwoBit => (DEFAULT_CLIP_LOWER_2, DEFAULT_CLIP_UPPER_2),
        }
    }

    /// Output value of the black level.
    pub(crate) fn darkest(self) -> u32 {
        match self {
            DitherTarget::Binary => 1,
            DitherTarget::TwoBit => 0,
        }
    }

    /// Output value of the white level.
    pub(crate) fn lightest(self) -> u32 {
        match self {
            DitherTarget::Binary => 0,
            DitherTarget::TwoBit => 3,
        }
    }

    /// Nearest level for buffered value `val`, as (output value, gray value).
    pub(crate) fn nearest_level(self, val: u8) -> (u32, i32) {
        match self {
            DitherTarget::Binary => {
                if val < 128 {
                    (1, 0)
                } else {
                    (0, 255)
                }
            }
            DitherTarget::TwoBit => match val {
                0..=42 => (0, 0),
                43..=127 => (1, 85),
                128..=212 => (2, 170),
                _ => (3, 255),
            },
        }
    }

    /// Split residual `err` into its (3/8, 1/4) shares.
    ///
    /// Binary truncates toward zero; 2 bpp rounds halves away from zero.
    pub(crate) fn split_error(self, err: i32) -> (i32, i32) {
        match self {
            DitherTarget::Binary => (3 * err / 8, err / 4),
            DitherTarget::TwoBit => {
                if err >= 0 {
                    ((3 * err + 4) / 8, (err + 2) / 4)
                } else {
                    ((3 * err - 4) / 8, (err - 2) / 4)
                }
            }
        }
    }
}

/// Which [`Ditherer`] implementation a pass uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherMethod {
    /// Per-pixel arithmetic ([`DirectDither`])
    #[default]
    Direct,
    /// Precomputed lookup tables ([`LutDither`])
    Lut,
}

/// Options for [`dither`].
#[derive(Debug, Clone)]
pub struct DitherOptions {
    /// Output depth
    pub target: DitherTarget,
    /// Values at or below this are snapped to black without error (0..=255)
    pub lower_clip: i32,
    /// Values at or above `255 - upper_clip` are snapped to white (0..=255)
    pub upper_clip: i32,
    /// Strategy
    pub method: DitherMethod,
    /// Attach a linear 4-entry gray colormap (2 bpp only)
    pub cmap: bool,
}

impl DitherOptions {
    /// Options for `target` with its default clip distances.
    pub fn new(target: DitherTarget) -> Self {
        let (lower_clip, upper_clip) = target.default_clips();
        Self {
            target,
            lower_clip,
            upper_clip,
            method: DitherMethod::default(),
            cmap: false,
        }
    }
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self::new(DitherTarget::Binary)
    }
}

/// Outcome of quantizing one buffered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantized {
    /// Value written to the output raster
    pub pixel: u32,
    /// Error share added to the right and lower neighbors
    pub share38: i32,
    /// Error share added to the lower-right neighbor
    pub share14: i32,
}

/// An error-diffusion strategy.
///
/// Implementors decide, for each buffered value, the output pixel and the
/// error shares; the row traversal and line buffers are common.
pub trait Ditherer {
    /// Output depth this ditherer produces.
    fn target(&self) -> DitherTarget;

    /// Quantize one buffered value (source plus diffused error).
    fn quantize(&self, val: u8) -> Quantized;

    /// Dither an 8 bpp raster. A colormap is flattened to gray first.
    fn dither_pix(&self, pixs: &Pix) -> QuantResult<Pix> {
        Ok(diffuse(pixs, self)?.into())
    }
}

#[inline]
fn saturating_add(val: u8, delta: i32) -> u8 {
    (val as i32 + delta).clamp(0, 255) as u8
}

fn load_row(pixg: &Pix, y: u32, buf: &mut [u8]) {
    let line = pixg.row_data(y);
    for (x, slot) in buf.iter_mut().enumerate() {
        *slot = PixelDepth::Bit8.read(line, x as u32) as u8;
    }
}

/// Run one error-diffusion pass with two swapped line buffers.
fn diffuse<D: Ditherer + ?Sized>(pixs: &Pix, ditherer: &D) -> QuantResult<PixMut> {
    require_8bpp(pixs)?;
    let pixg = without_colormap(pixs)?;

    let (w, h) = (pixg.width(), pixg.height());
    let depth = ditherer.target().depth();
    let mut pixd = PixMut::new(w, h, depth)?;
    pixd.copy_resolution_from(pixs);

    let w = w as usize;
    let mut cur = vec![0u8; w];
    let mut next = vec![0u8; w];
    load_row(&pixg, 0, &mut cur);

    for y in 0..h {
        let has_next = y + 1 < h;
        if has_next {
            load_row(&pixg, y + 1, &mut next);
        }
        let lined = pixd.row_data_mut(y);
        for x in 0..w {
            let q = ditherer.quantize(cur[x]);
            depth.write(lined, x as u32, q.pixel);
            let has_right = x + 1 < w;
            if has_right {
                cur[x + 1] = saturating_add(cur[x + 1], q.share38);
            }
            if has_next {
                next[x] = saturating_add(next[x], q.share38);
                if has_right {
                    next[x + 1] = saturating_add(next[x + 1], q.share14);
                }
            }
        }
        std::mem::swap(&mut cur, &mut next);
    }

    Ok(pixd)
}

fn check_clip(name: &str, clip: i32) -> QuantResult<u8> {
    u8::try_from(clip)
        .map_err(|_| QuantError::InvalidParameters(format!("{name} {clip} not in [0, 255]")))
}

/// Dither an 8 bpp raster as configured by `options`.
///
/// # Errors
///
/// - [`QuantError::UnsupportedDepth`] unless the source is 8 bpp
/// - [`QuantError::InvalidParameters`] for a clip outside `[0, 255]`, or a
///   colormap requested for binary output
///
/// # See also
///
/// C Leptonica: `pixDitherToBinarySpec()`, `pixDitherTo2bppSpec()`
pub fn dither(pixs: &Pix, options: &DitherOptions) -> QuantResult<Pix> {
    let lower = check_clip("lower_clip", options.lower_clip)?;
    let upper = check_clip("upper_clip", options.upper_clip)?;
    if options.cmap && options.target == DitherTarget::Binary {
        return Err(QuantError::InvalidParameters(
            "colormap output requires the 2 bpp target".into(),
        ));
    }
    require_8bpp(pixs)?;

    debug!(
        target_depth = options.target.depth().bits(),
        lower_clip = lower,
        upper_clip = upper,
        method = ?options.method,
        width = pixs.width(),
        height = pixs.height(),
        "dithering"
    );

    let mut pixd = match options.method {
        DitherMethod::Direct => diffuse(pixs, &DirectDither::new(options.target, lower, upper))?,
        DitherMethod::Lut => diffuse(pixs, &LutDither::new(options.target, lower, upper))?,
    };
    if options.cmap {
        pixd.set_colormap(Some(PixColormap::create_linear(2, 4)?))?;
    }
    Ok(pixd.into())
}

/// Dither 8 bpp gray to binary with the default clip distances.
///
/// ON pixels in the result are black.
///
/// # See also
///
/// C Leptonica: `pixDitherToBinary()` in `grayquant.c`
pub fn dither_to_binary(pixs: &Pix) -> QuantResult<Pix> {
    dither_to_binary_spec(pixs, DEFAULT_CLIP_LOWER_1, DEFAULT_CLIP_UPPER_1)
}

/// Dither 8 bpp gray to binary with explicit clip distances in `[0, 255]`.
///
/// # See also
///
/// C Leptonica: `pixDitherToBinarySpec()` in `grayquant.c`
pub fn dither_to_binary_spec(pixs: &Pix, lower_clip: i32, upper_clip: i32) -> QuantResult<Pix> {
    let options = DitherOptions {
        lower_clip,
        upper_clip,
        ..DitherOptions::new(DitherTarget::Binary)
    };
    dither(pixs, &options)
}

/// Dither 8 bpp gray to binary through lookup tables.
///
/// A negative clip distance selects the default for that end.
///
/// # See also
///
/// C Leptonica: `pixDitherToBinaryLUT()` in `grayquant.c`
pub fn dither_to_binary_lut(pixs: &Pix, lower_clip: i32, upper_clip: i32) -> QuantResult<Pix> {
    let options = DitherOptions {
        lower_clip: if lower_clip < 0 { DEFAULT_CLIP_LOWER_1 } else { lower_clip },
        upper_clip: if upper_clip < 0 { DEFAULT_CLIP_UPPER_1 } else { upper_clip },
        method: DitherMethod::Lut,
        ..DitherOptions::new(DitherTarget::Binary)
    };
    dither(pixs, &options)
}

/// Dither 8 bpp gray to 2 bpp with the default clip distances.
///
/// With `cmapflag`, the result carries the colormap 0, 85, 170, 255.
///
/// # See also
///
/// C Leptonica: `pixDitherTo2bpp()` in `grayquant.c`
pub fn dither_to_2bpp(pixs: &Pix, cmapflag: bool) -> QuantResult<Pix> {
    dither_to_2bpp_spec(pixs, DEFAULT_CLIP_LOWER_2, DEFAULT_CLIP_UPPER_2, cmapflag)
}

/// Dither 8 bpp gray to 2 bpp with explicit clip distances in `[0, 255]`.
///
/// # See also
///
/// C Leptonica: `pixDitherTo2bppSpec()` in `grayquant.c`
pub fn dither_to_2bpp_spec(
    pixs: &Pix,
    lower_clip: i32,
    upper_clip: i32,
    cmapflag: bool,
) -> QuantResult<Pix> {
    let options = DitherOptions {
        lower_clip,
        upper_clip,
        method: DitherMethod::Lut,
        cmap: cmapflag,
        ..DitherOptions::new(DitherTarget::TwoBit)
    };
    dither(pixs, &options)
}

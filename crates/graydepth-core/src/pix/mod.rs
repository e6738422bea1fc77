//! PIX - The packed raster container
//!
//! The `Pix` structure is the image type consumed and produced by the
//! quantization engine. It supports the depths the engine reads and writes
//! and an optional colormap.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - For 32-bit images, color order is RGBA (red in MSB)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, copy into a `PixMut` via [`Pix::to_mut`],
//! then convert back with `Into<Pix>`.
//!
//! # See also
//!
//! - C Leptonica: `pix.h` (struct `Pix`), `pix1.c` (creation/destruction)
//! - Pixel access: `GET_DATA_*` / `SET_DATA_*` macros in `arrayaccess.h`

mod access;
mod convert;

pub use access::*;
pub use convert::RemoveColormapTarget;

use crate::colormap::PixColormap;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
///
/// Each variant is also the packing strategy for rows of that depth; see
/// [`PixelDepth::read`] and [`PixelDepth::write`].
///
/// # See also
///
/// C Leptonica: `pix.h` depth field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 2-bit image (4 levels)
    Bit2 = 2,
    /// 4-bit image (16 levels)
    Bit4 = 4,
    /// 8-bit grayscale or indexed color
    Bit8 = 8,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1, 2, 4, 8, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            2 => Ok(PixelDepth::Bit2),
            4 => Ok(PixelDepth::Bit4),
            8 => Ok(PixelDepth::Bit8),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Check if a colormap is allowed for this depth.
    ///
    /// Colormaps are supported for 1, 2, 4, and 8 bpp images only.
    pub fn colormap_allowed(self) -> bool {
        !matches!(self, PixelDepth::Bit32)
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// 32-bit words per line
    wpl: u32,
    /// X resolution (ppi), 0 if unknown
    xres: i32,
    /// Y resolution (ppi), 0 if unknown
    yres: i32,
    /// Optional colormap for indexed images (1, 2, 4, 8 bpp)
    colormap: Option<PixColormap>,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl PixData {
    fn alloc(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = compute_wpl(width, depth)?;
        let data_size = (wpl as usize)
            .checked_mul(height as usize)
            .ok_or(Error::AllocationFailed)?;

        Ok(PixData {
            width,
            height,
            depth,
            wpl,
            xres: 0,
            yres: 0,
            colormap: None,
            data: vec![0u32; data_size],
        })
    }

    fn duplicate(&self) -> Self {
        PixData {
            width: self.width,
            height: self.height,
            depth: self.depth,
            wpl: self.wpl,
            xres: self.xres,
            yres: self.yres,
            colormap: self.colormap.clone(),
            data: self.data.clone(),
        }
    }
}

/// Compute words per line for given width and depth.
///
/// Uses u64 arithmetic so that oversized rows are reported instead of
/// wrapping.
#[inline]
fn compute_wpl(width: u32, depth: PixelDepth) -> Result<u32> {
    let bits_per_line = u64::from(width) * u64::from(depth.bits());
    u32::try_from(bits_per_line.div_ceil(32)).map_err(|_| Error::AllocationFailed)
}

/// PIX - Packed raster image
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use graydepth_core::{Pix, PixelDepth};
///
/// // Create a new 8-bit grayscale image
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
///
/// # See also
///
/// C Leptonica: `struct Pix` in `pix.h`, creation via `pixCreate()` in `pix1.c`
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::AllocationFailed`] if the raster cannot be addressed.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixCreate()` in `pix1.c`
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut::new(width, height, depth)?.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the X resolution (ppi).
    #[inline]
    pub fn xres(&self) -> i32 {
        self.inner.xres
    }

    /// Get the Y resolution (ppi).
    #[inline]
    pub fn yres(&self) -> i32 {
        self.inner.yres
    }

    /// Check whether this image has a colormap attached.
    #[inline]
    pub fn has_colormap(&self) -> bool {
        self.inner.colormap.is_some()
    }

    /// Get a reference to the image's colormap, if present.
    #[inline]
    pub fn colormap(&self) -> Option<&PixColormap> {
        self.inner.colormap.as_ref()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Check if two PIX have the same width, height, and depth.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixSizesEqual()` in `pix1.c`
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixCopy()` in `pix1.c`
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.inner.duplicate()),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.duplicate(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new, zeroed, exclusively owned raster.
    ///
    /// # Errors
    ///
    /// Same as [`Pix::new`].
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::alloc(width, height, depth)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Set both resolutions.
    pub fn set_resolution(&mut self, xres: i32, yres: i32) {
        self.inner.xres = xres;
        self.inner.yres = yres;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    /// Get a reference to the image's colormap, if present.
    #[inline]
    pub fn colormap(&self) -> Option<&PixColormap> {
        self.inner.colormap.as_ref()
    }

    /// Set or remove the colormap.
    ///
    /// Colormaps are only valid for 1, 2, 4, and 8 bpp images, and the
    /// colormap depth must match the image depth.
    pub fn set_colormap(&mut self, cmap: Option<PixColormap>) -> Result<()> {
        if let Some(ref cm) = cmap {
            if !self.inner.depth.colormap_allowed() {
                return Err(Error::ColormapNotAllowed(self.inner.depth.bits()));
            }
            if cm.depth() != self.inner.depth.bits() {
                return Err(Error::InvalidParameter(format!(
                    "colormap depth {} does not match image depth {}",
                    cm.depth(),
                    self.inner.depth.bits()
                )));
            }
        }
        self.inner.colormap = cmap;
        Ok(())
    }

    /// Copy resolution (xres, yres) from another PIX.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixCopyResolution()` in `pix1.c`
    pub fn copy_resolution_from(&mut self, src: &Pix) {
        self.inner.xres = src.inner.xres;
        self.inner.yres = src.inner.yres;
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

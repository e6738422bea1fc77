//! Source preparation shared by the quantizers

use crate::{QuantError, QuantResult};
use graydepth_core::{Pix, PixelDepth, RemoveColormapTarget};

/// Fail unless `pix` has depth 8.
pub(crate) fn require_8bpp(pix: &Pix) -> QuantResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(QuantError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Gray view of `pix`: a colormapped raster is flattened to 8 bpp gray,
/// anything else is shared as is.
pub(crate) fn without_colormap(pix: &Pix) -> QuantResult<Pix> {
    if pix.has_colormap() {
        Ok(pix.remove_colormap(RemoveColormapTarget::ToGrayscale)?)
    } else {
        Ok(pix.clone())
    }
}

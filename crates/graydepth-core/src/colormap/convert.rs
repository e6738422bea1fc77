//! PixColormap conversion
//!
//! # See also
//!
//! C Leptonica: `colormap.c` (`pixcmapColorToGray`)

use super::{PixColormap, RgbaQuad};
use crate::error::{Error, Result};

impl PixColormap {
    /// Create a gray copy of this colormap using weighted channels.
    ///
    /// Weights must be non-negative. Weights that do not sum to 1.0 are
    /// normalized; all-zero weights become equal thirds. Alpha is kept.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapColorToGray()` in `colormap.c`
    pub fn color_to_gray(&self, rwt: f32, gwt: f32, bwt: f32) -> Result<Self> {
        if rwt < 0.0 || gwt < 0.0 || bwt < 0.0 {
            return Err(Error::InvalidParameter(
                "weights must be non-negative".into(),
            ));
        }

        let sum = rwt + gwt + bwt;
        let (rwt, gwt, bwt) = if sum == 0.0 {
            (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)
        } else {
            (rwt / sum, gwt / sum, bwt / sum)
        };

        let mut gray = self.clone();
        for c in &mut gray.colors {
            let val = rwt * c.red as f32 + gwt * c.green as f32 + bwt * c.blue as f32 + 0.5;
            let val = val.min(255.0) as u8;
            *c = RgbaQuad::new(val, val, val, c.alpha);
        }
        Ok(gray)
    }
}

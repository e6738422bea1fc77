//! Synthetic test rasters
//!
//! Deterministic stand-ins for the photographs and scans used by the
//! Leptonica regression programs.

use crate::error::TestResult;
use graydepth_core::{color, Pix, PixMut, PixelDepth};

/// Linear congruential generator, same constants as Numerical Recipes.
struct Lcg(u32);

impl Lcg {
    fn next_byte(&mut self) -> u8 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 24) as u8
    }
}

/// 8 bpp image from row-major sample values.
///
/// # Panics
///
/// Panics if `values.len() != width * height`.
pub fn from_values_8bpp(width: u32, height: u32, values: &[u8]) -> TestResult<Pix> {
    assert_eq!(values.len(), (width * height) as usize);
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    for (i, &v) in values.iter().enumerate() {
        let i = i as u32;
        pm.set_pixel_unchecked(i % width, i / width, v as u32);
    }
    Ok(pm.into())
}

/// 8 bpp image with every pixel set to `val`.
pub fn constant_8bpp(width: u32, height: u32, val: u8) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    let word = u32::from_be_bytes([val; 4]);
    pm.data_mut().fill(word);
    Ok(pm.into())
}

/// 8 bpp horizontal ramp from 0 at the left edge to 255 at the right.
pub fn gradient_8bpp(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    let span = width.saturating_sub(1).max(1);
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, 255 * x / span);
        }
    }
    Ok(pm.into())
}

/// 8 bpp diagonal ramp, `(x + y)` scaled onto `[0, 255]`.
pub fn diagonal_8bpp(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    let span = (width + height).saturating_sub(2).max(1);
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, 255 * (x + y) / span);
        }
    }
    Ok(pm.into())
}

/// 8 bpp uniform noise; the same seed always gives the same image.
pub fn noise_8bpp(width: u32, height: u32, seed: u32) -> TestResult<Pix> {
    let mut rng = Lcg(seed);
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, rng.next_byte() as u32);
        }
    }
    Ok(pm.into())
}

/// 32 bpp RGB noise; the same seed always gives the same image.
pub fn noise_32bpp(width: u32, height: u32, seed: u32) -> TestResult<Pix> {
    let mut rng = Lcg(seed);
    let mut pm = PixMut::new(width, height, PixelDepth::Bit32)?;
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = (rng.next_byte(), rng.next_byte(), rng.next_byte());
            pm.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
        }
    }
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let pix = gradient_8bpp(64, 2).unwrap();
        assert_eq!(pix.get_pixel(0, 1), Some(0));
        assert_eq!(pix.get_pixel(63, 1), Some(255));
    }

    #[test]
    fn test_noise_is_deterministic() {
        let a = noise_8bpp(17, 9, 42).unwrap();
        let b = noise_8bpp(17, 9, 42).unwrap();
        let c = noise_8bpp(17, 9, 43).unwrap();
        assert_eq!(a.data(), b.data());
        assert_ne!(a.data(), c.data());
    }

    #[test]
    fn test_constant_and_values() {
        let pix = constant_8bpp(5, 2, 0x7f).unwrap();
        assert_eq!(pix.get_pixel(4, 1), Some(0x7f));
        let pix = from_values_8bpp(3, 1, &[1, 2, 3]).unwrap();
        assert_eq!(pix.get_pixel(2, 0), Some(3));
    }
}

//! Numa - Numeric arrays
//!
//! Arrays of floating-point numbers. The quantizers use them to pass
//! ordered bin boundaries.
//!
//! # See also
//!
//! C Leptonica: `numabasic.c`

mod sort;

pub use sort::SortOrder;

use crate::error::{Error, Result};

/// Array of floating-point numbers
///
/// # See also
///
/// C Leptonica: `struct Numa` in `environ.h`, `numaCreate()` in `numabasic.c`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Numa {
    data: Vec<f32>,
}

impl Numa {
    /// Create a new empty Numa
    ///
    /// # See also
    ///
    /// C Leptonica: `numaCreate()`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Numa from a vector of values
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Create a Numa from a slice of i32 values
    ///
    /// # See also
    ///
    /// C Leptonica: `numaCreateFromIArray()`
    pub fn from_i32_slice(data: &[i32]) -> Self {
        Self {
            data: data.iter().map(|&v| v as f32).collect(),
        }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a value by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    /// Get a value as i32, rounded to nearest (halves away from zero).
    ///
    /// # See also
    ///
    /// C Leptonica: `numaGetIValue()`
    pub fn get_i32(&self, index: usize) -> Option<i32> {
        self.get(index)
            .map(|v| if v >= 0.0 { (v + 0.5) as i32 } else { (v - 0.5) as i32 })
    }

    /// Append a value
    pub fn push(&mut self, val: f32) {
        self.data.push(val);
    }

    /// Set the value at an existing index
    pub fn set(&mut self, index: usize, val: f32) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = val;
        Ok(())
    }

    /// Get the values as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut na = Numa::new();
        assert!(na.is_empty());
        na.push(1.5);
        na.push(-2.5);
        na.push(7.0);
        assert_eq!(na.len(), 3);
        assert_eq!(na.get(0), Some(1.5));
        assert_eq!(na.get(3), None);
    }

    #[test]
    fn test_get_i32_rounding() {
        let na = Numa::from_vec(vec![1.4, 1.5, -1.4, -1.5, 200.0]);
        assert_eq!(na.get_i32(0), Some(1));
        assert_eq!(na.get_i32(1), Some(2));
        assert_eq!(na.get_i32(2), Some(-1));
        assert_eq!(na.get_i32(3), Some(-2));
        assert_eq!(na.get_i32(4), Some(200));
    }

    #[test]
    fn test_set() {
        let mut na = Numa::from_i32_slice(&[10, 20]);
        na.set(1, 30.0).unwrap();
        assert_eq!(na.as_slice(), &[10.0, 30.0]);
        assert!(na.set(2, 1.0).is_err());
    }
}

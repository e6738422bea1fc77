//! Numa sorting
//!
//! # See also
//!
//! C Leptonica: `numafunc1.c` (`numaSort`, `numaIsSorted`)

use super::Numa;

/// Sort direction.
///
/// # See also
///
/// C Leptonica: `L_SORT_INCREASING`, `L_SORT_DECREASING`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest first).
    Increasing,
    /// Sort in descending order (largest first).
    Decreasing,
}

impl Numa {
    /// Return a sorted copy. The sort is stable.
    ///
    /// # See also
    ///
    /// C Leptonica: `numaSort()`
    pub fn sort(&self, order: SortOrder) -> Numa {
        let mut data = self.data.clone();
        match order {
            SortOrder::Increasing => data.sort_by(|a, b| a.total_cmp(b)),
            SortOrder::Decreasing => data.sort_by(|a, b| b.total_cmp(a)),
        }
        Numa::from_vec(data)
    }

    /// Check whether the values are already in `order`.
    ///
    /// # See also
    ///
    /// C Leptonica: `numaIsSorted()`
    pub fn is_sorted(&self, order: SortOrder) -> bool {
        self.data.windows(2).all(|w| match order {
            SortOrder::Increasing => w[0] <= w[1],
            SortOrder::Decreasing => w[0] >= w[1],
        })
    }
}

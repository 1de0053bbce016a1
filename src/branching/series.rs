//! ActivitySeries: owned, non-negative integer activity over time.
//!
//! Purpose
//! -------
//! Carry the output of the simulator and the subsampling emulator, and the
//! input of the MR estimator, as a single owned type. Index `t` is the
//! discrete time step; values are population counts, so non-negativity is
//! enforced by the element type (`u64`).
//!
//! Conventions
//! -----------
//! - Components never share or mutate a series; every producer returns a
//!   freshly owned `ActivitySeries`.
//! - Conversions to `f64` allocate a new `Array1<f64>`; the estimator works
//!   directly on the integer slice.
use ndarray::Array1;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivitySeries {
    values: Array1<u64>,
}

impl ActivitySeries {
    /// Wrap an existing array of counts.
    ///
    /// Arrays that are not in standard layout (for example after
    /// `invert_axis`) are copied into a contiguous buffer in logical order.
    pub fn new(values: Array1<u64>) -> Self {
        if values.is_standard_layout() {
            return Self { values };
        }
        Self { values: values.as_standard_layout().into_owned() }
    }

    /// Build a series from a plain vector of counts.
    pub fn from_vec(values: Vec<u64>) -> Self {
        Self { values: Array1::from_vec(values) }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the counts as an array view.
    pub fn values(&self) -> &Array1<u64> {
        &self.values
    }

    /// Borrow the counts as a contiguous slice.
    ///
    /// Every constructor stores a standard-layout array and no method hands
    /// out mutable access, so the fallback branch is unreachable.
    pub fn as_slice(&self) -> &[u64] {
        self.values.as_slice().unwrap_or(&[])
    }

    /// Time-averaged activity, or `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        Some(sum / self.values.len() as f64)
    }

    /// Copy the counts into a floating-point array.
    pub fn to_f64(&self) -> Array1<f64> {
        self.values.mapv(|v| v as f64)
    }

    pub fn into_inner(self) -> Array1<u64> {
        self.values
    }
}

impl From<Vec<u64>> for ActivitySeries {
    fn from(values: Vec<u64>) -> Self {
        Self::from_vec(values)
    }
}

impl AsRef<[u64]> for ActivitySeries {
    fn as_ref(&self) -> &[u64] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Axis;

    #[test]
    // Purpose
    // -------
    // Basic accessors agree with the wrapped data.
    //
    // Given
    // -----
    // - The series [2, 4, 6].
    //
    // Expect
    // ------
    // - len 3, mean 4.0, slice and f64 copy match the input.
    fn accessors_reflect_wrapped_counts() {
        let series = ActivitySeries::from_vec(vec![2, 4, 6]);

        assert_eq!(series.len(), 3);
        assert_eq!(series.mean(), Some(4.0));
        assert_eq!(series.as_slice(), &[2, 4, 6]);
        assert_eq!(series.to_f64().to_vec(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    // Purpose
    // -------
    // A reversed-stride array keeps every count and its logical order.
    //
    // Given
    // -----
    // - 0..200 as an `Array1` with its axis inverted.
    //
    // Expect
    // ------
    // - Length 200; the slice reads 199, 198, ..., 0; the mean is 99.5.
    fn non_standard_layout_is_normalized() {
        // Arrange
        let mut values: Array1<u64> = (0..200).collect();
        values.invert_axis(Axis(0));

        // Act
        let series = ActivitySeries::new(values);

        // Assert
        let expected: Vec<u64> = (0..200).rev().collect();
        assert_eq!(series.len(), 200);
        assert_eq!(series.as_slice(), expected.as_slice());
        assert_eq!(series.mean(), Some(99.5));
    }

    #[test]
    // Purpose
    // -------
    // An empty series has no mean rather than NaN.
    //
    // Given
    // -----
    // - `ActivitySeries::default()`.
    //
    // Expect
    // ------
    // - `is_empty()` and `mean() == None`.
    fn empty_series_has_no_mean() {
        let series = ActivitySeries::default();
        assert!(series.is_empty());
        assert_eq!(series.mean(), None);
    }
}

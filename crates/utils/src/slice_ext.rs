use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt {
    /// Find the minimum value in float arrays
    ///
    /// Only provides the minimum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use mcdist_utils::SliceExt;
    /// # use mcdist_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_min(), Ok(0.5));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_min(), Err(Error::UndefinedValues));
    /// assert_eq!([1.1, f64::INFINITY, 2.2].try_min(), Err(Error::UndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_min(), Err(Error::EmptySlice));
    /// ```
    ///
    /// The float primitives do not implement `Ord` due to `NaN` being
    /// incomparable, so `min()` on a collection of floats is not implemented
    /// in the standard library. This extension uses `total_cmp` to always
    /// produce an ordering in accordance with the totalOrder predicate defined
    /// in the IEEE 754 (2008 revision) floating point standard.
    fn try_min(&self) -> Result<f64>;

    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use mcdist_utils::SliceExt;
    /// # use mcdist_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_max(), Err(Error::UndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_max(), Err(Error::EmptySlice));
    /// ```
    fn try_max(&self) -> Result<f64>;

    /// Check that every value is strictly greater than the one before it
    ///
    /// Grids of distribution boundaries must be strictly increasing, so this
    /// is the common validation used by the constructor of anything tabular.
    /// Slices of fewer than two values are trivially sorted.
    ///
    /// ```rust
    /// # use mcdist_utils::SliceExt;
    /// assert!([0.1, 1.0, 20.0].is_strictly_increasing());
    /// assert!(![0.1, 1.0, 1.0].is_strictly_increasing());
    /// assert!(![0.1, f64::NAN, 20.0].is_strictly_increasing());
    /// ```
    fn is_strictly_increasing(&self) -> bool;

    /// Find the index of the interval containing `value` in a sorted grid
    ///
    /// Intervals are `grid[i] <= value <= grid[i+1]`, with values on a shared
    /// edge belonging to the interval below. Uses a binary search, so the
    /// grid must already be sorted into increasing order.
    ///
    /// ```rust
    /// # use mcdist_utils::SliceExt;
    /// let grid = vec![0.0, 0.1, 1.0, 20.0];
    ///
    /// // Find values in the array
    /// assert_eq!(grid.find_interval(0.0 ), Ok(0));
    /// assert_eq!(grid.find_interval(0.5 ), Ok(1));
    /// assert_eq!(grid.find_interval(1.0 ), Ok(1));
    /// assert_eq!(grid.find_interval(20.0), Ok(2));
    ///
    /// // Values outside the grid bounds are an error case
    /// assert!(grid.find_interval(-1.0).is_err());
    /// assert!(grid.find_interval(21.0).is_err());
    /// ```
    fn find_interval(&self, value: f64) -> Result<usize>;
}

impl SliceExt for [f64] {
    fn try_min(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::UndefinedValues);
        };

        if let Some(v) = self.iter().min_by(|a, b| a.total_cmp(b)).copied() {
            Ok(v)
        } else {
            Err(Error::EmptySlice)
        }
    }

    fn try_max(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::UndefinedValues);
        };

        if let Some(v) = self.iter().max_by(|a, b| a.total_cmp(b)).copied() {
            Ok(v)
        } else {
            Err(Error::EmptySlice)
        }
    }

    fn is_strictly_increasing(&self) -> bool {
        // NaN comparisons are always false, so undefined values fail here too
        self.windows(2).all(|pair| pair[0] < pair[1])
    }

    fn find_interval(&self, value: f64) -> Result<usize> {
        // make sure there are enough edges to bound an interval
        let n = self.len();
        if n < 2 {
            return Err(Error::LengthBelowMinimum {
                length: n,
                minimum: 2,
            });
        }

        let lower_bound = self[0];
        let upper_bound = self[n - 1];

        // is the value relevant?
        if value < lower_bound || value > upper_bound {
            return Err(Error::OutsideOfBounds {
                value,
                lower_bound,
                upper_bound,
            });
        }

        // number of grid points strictly below the value
        let below = self.partition_point(|edge| *edge < value);

        // a value on the lowest edge has nothing below it, every other value
        // belongs to the interval under its insertion point
        if below == 0 {
            Ok(0)
        } else {
            Ok(below - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_edges_belong_to_the_bin_below() {
        let grid = [1.0, 2.0, 3.0];
        assert_eq!(grid.find_interval(2.0), Ok(0));
        assert_eq!(grid.find_interval(3.0), Ok(1));
        assert_eq!(grid.find_interval(2.5), Ok(1));
    }

    #[test]
    fn interval_needs_at_least_two_edges() {
        assert_eq!(
            [1.0].find_interval(1.0),
            Err(Error::LengthBelowMinimum {
                length: 1,
                minimum: 2
            })
        );
    }

    #[test]
    fn out_of_bounds_reports_the_limits() {
        let grid = [1.0, 2.0];
        assert_eq!(
            grid.find_interval(0.5),
            Err(Error::OutsideOfBounds {
                value: 0.5,
                lower_bound: 1.0,
                upper_bound: 2.0
            })
        );
    }

    #[test]
    fn monotonicity_rejects_ties() {
        assert!([-1.0, 0.0, 0.999999].is_strictly_increasing());
        assert!(![0.0, 0.0].is_strictly_increasing());
        assert!([].is_strictly_increasing());
        assert!([42.0].is_strictly_increasing());
    }
}

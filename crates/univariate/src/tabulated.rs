// external crates
use itertools::Itertools;
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_rng::RandomSource;
use mcdist_utils::SliceExt;

// internal modules
use crate::distribution::{TabularUnivariate, Univariate};
use crate::error::{Error, Result};

/// A pointwise tabulated density on a strictly increasing grid
///
/// Dependent values are interpolated linearly between grid points. The
/// normalised density and exact piecewise-quadratic cumulative are fixed
/// at construction, so evaluation never renormalises and
/// [`sample_with_random_number`](TabularUnivariate::sample_with_random_number)
/// inverts the cumulative exactly (quadratic per segment, linear where the
/// density is flat).
///
/// ```rust
/// # use mcdist_univariate::{Tabulated, Univariate, TabularUnivariate};
/// let ramp = Tabulated::new([0.0, 1.0, 2.0], [0.0, 1.0, 1.0]).unwrap();
///
/// assert_eq!(ramp.evaluate(0.5), 0.5);
/// assert_eq!(ramp.cdf(2.0), 1.0);
/// assert_eq!(ramp.sample_with_random_number(1.0 / 3.0), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tabulated {
    grid: Vec<f64>,
    values: Vec<f64>,
    pdf: Vec<f64>,
    cdf: Vec<f64>,
}

impl Tabulated {
    /// A tabulated density from parallel grid and value arrays
    ///
    /// The grid must be finite and strictly increasing with at least two
    /// points; values must be finite, nonnegative, and not all zero.
    pub fn new(grid: impl Into<Vec<f64>>, values: impl Into<Vec<f64>>) -> Result<Self> {
        let grid = grid.into();
        let values = values.into();
        validate_grid(&grid, &values)?;

        // trapezoid cumulative over the raw values
        let mut cdf = Vec::with_capacity(grid.len());
        cdf.push(0.0);
        let mut running = 0.0;
        for ((x0, x1), (v0, v1)) in grid
            .iter()
            .tuple_windows()
            .zip(values.iter().tuple_windows())
        {
            running += 0.5 * (v0 + v1) * (x1 - x0);
            cdf.push(running);
        }

        let norm = running;
        let pdf = values.iter().map(|v| v / norm).collect();
        let mut cdf: Vec<f64> = cdf.into_iter().map(|c| c / norm).collect();
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Ok(Self {
            grid,
            values,
            pdf,
            cdf,
        })
    }

    /// Independent variable grid
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Raw dependent values at the grid points
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Univariate for Tabulated {
    fn evaluate(&self, x: f64) -> f64 {
        interpolate_on_grid(&self.grid, &self.values, x)
    }

    fn pdf(&self, x: f64) -> f64 {
        interpolate_on_grid(&self.grid, &self.pdf, x)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.grid[0] {
            0.0
        } else if x >= self.grid[self.grid.len() - 1] {
            1.0
        } else {
            cumulative_on_grid(&self.grid, &self.pdf, &self.cdf, x)
        }
    }

    fn sample(&self, source: &mut dyn RandomSource) -> f64 {
        self.sample_with_random_number(source.next())
    }

    fn lower_bound(&self) -> f64 {
        self.grid[0]
    }

    fn upper_bound(&self) -> f64 {
        self.grid[self.grid.len() - 1]
    }

    fn is_tabular(&self) -> bool {
        true
    }

    fn is_continuous(&self) -> bool {
        true
    }
}

impl TabularUnivariate for Tabulated {
    fn sample_with_random_number(&self, random: f64) -> f64 {
        self.sample_bin_with_random_number(random).0
    }

    fn sample_bin_with_random_number(&self, random: f64) -> (f64, usize) {
        debug_assert!((0.0..=1.0).contains(&random));
        invert_cumulative(&self.grid, &self.pdf, &self.cdf, random)
    }
}

/// Validate parallel grid/value arrays for the tabulated types
pub(crate) fn validate_grid(grid: &[f64], values: &[f64]) -> Result<()> {
    if grid.len() < 2 {
        return Err(Error::LengthBelowMinimum {
            length: grid.len(),
            minimum: 2,
        });
    }
    if grid.len() != values.len() {
        return Err(Error::LengthMismatch {
            expected: grid.len(),
            found: values.len(),
        });
    }
    if let Some(index) = grid.iter().position(|g| !g.is_finite()) {
        return Err(Error::UndefinedValue(index));
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(Error::UndefinedValue(index));
    }
    if let Some((index, _)) = grid.iter().tuple_windows().find_position(|(a, b)| a >= b) {
        return Err(Error::GridNotIncreasing(index + 1));
    }
    if let Some(value) = values.iter().find(|v| **v < 0.0) {
        return Err(Error::NegativeValue(*value));
    }
    if values.iter().all(|v| *v == 0.0) {
        return Err(Error::AllValuesZero);
    }
    Ok(())
}

/// Lin-lin interpolation of `values` over `grid`, `0.0` outside
pub(crate) fn interpolate_on_grid(grid: &[f64], values: &[f64], x: f64) -> f64 {
    let Ok(i) = grid.find_interval(x) else {
        return 0.0;
    };
    let fraction = (x - grid[i]) / (grid[i + 1] - grid[i]);
    values[i] + fraction * (values[i + 1] - values[i])
}

/// Piecewise-quadratic cumulative for `x` inside the grid range
pub(crate) fn cumulative_on_grid(grid: &[f64], pdf: &[f64], cdf: &[f64], x: f64) -> f64 {
    let Ok(i) = grid.find_interval(x) else {
        return if x < grid[0] { 0.0 } else { 1.0 };
    };
    let distance = x - grid[i];
    let slope = (pdf[i + 1] - pdf[i]) / (grid[i + 1] - grid[i]);
    cdf[i] + pdf[i] * distance + 0.5 * slope * distance * distance
}

/// Exact inversion of a piecewise-quadratic cumulative
///
/// Returns the sample and the segment index it fell in. A variate on a
/// tabulated cumulative value returns that grid point exactly, so `0.0`
/// maps to the first grid point and `1.0` to the last (within round-off).
pub(crate) fn invert_cumulative(
    grid: &[f64],
    pdf: &[f64],
    cdf: &[f64],
    random: f64,
) -> (f64, usize) {
    let segments = grid.len() - 1;
    let below = cdf.partition_point(|c| *c <= random);
    let i = below.saturating_sub(1).min(segments - 1);

    let excess = random - cdf[i];
    if excess <= 0.0 {
        return (grid[i], i);
    }

    let slope = (pdf[i + 1] - pdf[i]) / (grid[i + 1] - grid[i]);
    let sample = if slope == 0.0 {
        grid[i] + excess / pdf[i]
    } else {
        let discriminant = pdf[i] * pdf[i] + 2.0 * slope * excess;
        grid[i] + (discriminant.max(0.0).sqrt() - pdf[i]) / slope
    };
    (sample, i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp() -> Tabulated {
        Tabulated::new([0.0, 1.0, 2.0], [0.0, 1.0, 1.0]).unwrap()
    }

    #[test]
    fn construction_normalises() {
        let ramp = ramp();
        assert_eq!(ramp.pdf(1.0), 2.0 / 3.0);
        assert_eq!(ramp.cdf(1.0), 1.0 / 3.0);
        assert_eq!(ramp.cdf(2.0), 1.0);
    }

    #[test]
    fn cumulative_is_quadratic_on_a_ramp() {
        let ramp = ramp();
        // density rises linearly, so mass grows with the square
        assert_relative_eq!(ramp.cdf(0.5), 1.0 / 12.0, max_relative = 1e-14);
        assert_eq!(ramp.cdf(-1.0), 0.0);
        assert_eq!(ramp.cdf(3.0), 1.0);
    }

    #[test]
    fn inversion_lands_on_grid_points() {
        let ramp = ramp();
        assert_eq!(ramp.sample_bin_with_random_number(0.0), (0.0, 0));
        assert_eq!(ramp.sample_bin_with_random_number(1.0 / 3.0), (1.0, 1));
        assert_relative_eq!(
            ramp.sample_with_random_number(1.0),
            2.0,
            max_relative = 1e-14
        );
    }

    #[test]
    fn inversion_matches_the_cumulative_inside_segments() {
        let ramp = ramp();
        for random in [0.1, 0.25, 0.6, 0.9] {
            let (sample, _) = ramp.sample_bin_with_random_number(random);
            assert_relative_eq!(ramp.cdf(sample), random, max_relative = 1e-12);
        }
    }

    #[test]
    fn subrange_scales_the_variate() {
        let ramp = ramp();
        // limit at the upper bound reproduces the unrestricted sample
        assert_eq!(
            ramp.sample_with_random_number_in_subrange(0.4, 2.0),
            ramp.sample_with_random_number(0.4)
        );
        assert_eq!(
            ramp.sample_with_random_number_in_subrange(0.4, 5.0),
            ramp.sample_with_random_number(0.4)
        );
        // limit below it compresses samples under the limit
        let restricted = ramp.sample_with_random_number_in_subrange(1.0, 1.0);
        assert_relative_eq!(restricted, 1.0, max_relative = 1e-14);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert!(matches!(
            Tabulated::new([0.0], [1.0]),
            Err(Error::LengthBelowMinimum { .. })
        ));
        assert!(matches!(
            Tabulated::new([0.0, 1.0, 1.0], [1.0, 1.0, 1.0]),
            Err(Error::GridNotIncreasing(2))
        ));
        assert!(matches!(
            Tabulated::new([0.0, 1.0], [1.0, -0.5]),
            Err(Error::NegativeValue(_))
        ));
        assert!(matches!(
            Tabulated::new([0.0, 1.0], [0.0, 0.0]),
            Err(Error::AllValuesZero)
        ));
        assert!(matches!(
            Tabulated::new([0.0, 1.0], [1.0]),
            Err(Error::LengthMismatch { .. })
        ));
    }
}

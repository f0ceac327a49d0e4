// external crates
use itertools::Itertools;
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_interp::CUTOFF_COSINE;
use mcdist_rng::RandomSource;

// internal modules
use crate::distribution::{TabularUnivariate, Univariate};
use crate::error::{Error, Result};
use crate::tabulated::{cumulative_on_grid, interpolate_on_grid, invert_cumulative, validate_grid};

/// Elastic scattering cosines coupling a tabulated grid to an analytic tail
///
/// Angular cross section data tabulates the scattering cosine up to the
/// cutoff `0.999999`; beyond it the distribution continues analytically as
/// a screened Rutherford peak with density proportional to
/// `1 / (1 + eta - mu)^2`, where `eta` is the Moliere screening parameter.
/// The `cutoff_ratio` fixes how much probability sits below the cutoff, so
/// the tabulated part integrates to `cutoff_ratio` and the tail to the
/// remainder.
///
/// Tail samples invert the screened Rutherford cumulative in closed form:
/// a variate exactly on the cutoff ratio returns the cutoff cosine, and a
/// variate approaching one approaches the forward peak `mu = 1`.
///
/// ```rust
/// # use mcdist_univariate::{CoupledElastic, TabularUnivariate, Univariate};
/// let elastic = CoupledElastic::new(
///     vec![-1.0, 0.0, 0.999999],
///     vec![0.5, 0.5, 0.5],
///     1e-6,
///     0.9,
/// )
/// .unwrap();
///
/// assert_eq!(elastic.sample_with_random_number(0.9), 0.999999);
/// assert_eq!(elastic.cdf(1.0), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoupledElastic {
    grid: Vec<f64>,
    values: Vec<f64>,
    pdf: Vec<f64>,
    cdf: Vec<f64>,
    eta: f64,
    cutoff_ratio: f64,
}

impl CoupledElastic {
    /// Couple a tabulated cosine grid to a screened Rutherford tail
    ///
    /// The grid must be a valid tabulated density ending exactly on the
    /// cutoff cosine `0.999999`, `eta` positive and finite, and
    /// `cutoff_ratio` in `(0, 1]`. A ratio of exactly one leaves no
    /// probability in the tail.
    pub fn new(
        grid: impl Into<Vec<f64>>,
        values: impl Into<Vec<f64>>,
        eta: f64,
        cutoff_ratio: f64,
    ) -> Result<Self> {
        let grid = grid.into();
        let values = values.into();
        validate_grid(&grid, &values)?;
        debug_assert!(grid[0] >= -1.0);

        if !eta.is_finite() || eta <= 0.0 {
            return Err(Error::InvalidScreening(eta));
        }
        if !(cutoff_ratio > 0.0 && cutoff_ratio <= 1.0) {
            return Err(Error::InvalidCutoffRatio(cutoff_ratio));
        }
        let last = grid[grid.len() - 1];
        if last != CUTOFF_COSINE {
            return Err(Error::GridEndsOffCutoff {
                found: last,
                expected: CUTOFF_COSINE,
            });
        }

        // tabulated part rescaled to carry exactly the cutoff ratio
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

        let scale = cutoff_ratio / running;
        let pdf = values.iter().map(|v| v * scale).collect();
        let mut cdf: Vec<f64> = cdf.into_iter().map(|c| c * scale).collect();
        if let Some(last) = cdf.last_mut() {
            *last = cutoff_ratio;
        }

        Ok(Self {
            grid,
            values,
            pdf,
            cdf,
            eta,
            cutoff_ratio,
        })
    }

    /// Moliere screening parameter of the tail
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// Probability mass tabulated below the cutoff cosine
    pub fn cutoff_ratio(&self) -> f64 {
        self.cutoff_ratio
    }

    /// Cosine where the tabulated grid hands over to the tail
    pub fn cutoff_cosine(&self) -> f64 {
        CUTOFF_COSINE
    }

    /// Tabulated cosine grid
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Normalisation of the tail density `C / (1 + eta - mu)^2`
    fn tail_coefficient(&self) -> f64 {
        let above = 1.0 + self.eta - CUTOFF_COSINE;
        (1.0 - self.cutoff_ratio) * self.eta * above / (1.0 - CUTOFF_COSINE)
    }

    /// Scale between normalised densities and the raw tabulated values
    fn raw_scale(&self) -> f64 {
        let mass: f64 = self
            .grid
            .iter()
            .tuple_windows()
            .zip(self.values.iter().tuple_windows())
            .map(|((x0, x1), (v0, v1))| 0.5 * (v0 + v1) * (x1 - x0))
            .sum();
        mass / self.cutoff_ratio
    }
}

impl Univariate for CoupledElastic {
    fn evaluate(&self, x: f64) -> f64 {
        if x <= CUTOFF_COSINE {
            interpolate_on_grid(&self.grid, &self.values, x)
        } else if x <= 1.0 {
            let peak = 1.0 + self.eta - x;
            self.tail_coefficient() / (peak * peak) * self.raw_scale()
        } else {
            0.0
        }
    }

    fn pdf(&self, x: f64) -> f64 {
        if x <= CUTOFF_COSINE {
            interpolate_on_grid(&self.grid, &self.pdf, x)
        } else if x <= 1.0 {
            let peak = 1.0 + self.eta - x;
            self.tail_coefficient() / (peak * peak)
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.grid[0] {
            0.0
        } else if x >= 1.0 {
            1.0
        } else if x == CUTOFF_COSINE {
            self.cutoff_ratio
        } else if x > CUTOFF_COSINE {
            let tail = 1.0 / (1.0 + self.eta - x) - 1.0 / (1.0 + self.eta - CUTOFF_COSINE);
            self.cutoff_ratio + self.tail_coefficient() * tail
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
        if self.cutoff_ratio == 1.0 {
            CUTOFF_COSINE
        } else {
            1.0
        }
    }

    fn is_tabular(&self) -> bool {
        true
    }

    fn is_continuous(&self) -> bool {
        true
    }
}

impl TabularUnivariate for CoupledElastic {
    fn sample_with_random_number(&self, random: f64) -> f64 {
        self.sample_bin_with_random_number(random).0
    }

    fn sample_bin_with_random_number(&self, random: f64) -> (f64, usize) {
        debug_assert!((0.0..=1.0).contains(&random));
        if random < self.cutoff_ratio || self.cutoff_ratio == 1.0 {
            return invert_cumulative(&self.grid, &self.pdf, &self.cdf, random);
        }

        // closed-form inversion of the screened Rutherford cumulative; the
        // tail reports the segment index one past the tabulated segments
        let v = (random - self.cutoff_ratio) / (1.0 - self.cutoff_ratio);
        let sample = if v == 0.0 {
            CUTOFF_COSINE
        } else {
            let above = 1.0 + self.eta - CUTOFF_COSINE;
            let sample = 1.0 + self.eta - self.eta * above / (self.eta + v * (1.0 - CUTOFF_COSINE));
            sample.min(1.0)
        };
        (sample, self.grid.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat() -> CoupledElastic {
        CoupledElastic::new(vec![-1.0, 0.0, CUTOFF_COSINE], vec![0.5, 0.5, 0.5], 1e-6, 0.9)
            .unwrap()
    }

    #[test]
    fn tabulated_part_carries_the_cutoff_ratio() {
        let elastic = flat();
        assert_eq!(elastic.cdf(CUTOFF_COSINE), 0.9);
        assert_eq!(elastic.cdf(1.0), 1.0);
        assert_eq!(elastic.cdf(-1.0), 0.0);
    }

    #[test]
    fn tail_cumulative_is_monotone() {
        let elastic = flat();
        let mid = elastic.cdf(0.9999995);
        assert!(mid > 0.9 && mid < 1.0);
        assert!(elastic.cdf(0.9999998) > mid);
    }

    #[test]
    fn inversion_pins_the_handover_points() {
        let elastic = flat();
        assert_eq!(elastic.sample_with_random_number(0.0), -1.0);
        assert_eq!(elastic.sample_with_random_number(0.9), CUTOFF_COSINE);

        let u = elastic.cdf(0.0);
        assert_eq!(elastic.sample_with_random_number(u), 0.0);
    }

    #[test]
    fn tail_reaches_the_forward_peak() {
        let elastic = flat();
        let (sample, segment) = elastic.sample_bin_with_random_number(1.0 - 1e-15);
        assert_relative_eq!(sample, 1.0, max_relative = 1e-14);
        assert_eq!(segment, 2);
        assert!(sample <= 1.0);
    }

    #[test]
    fn tail_samples_match_the_cumulative() {
        let elastic = flat();
        for random in [0.92, 0.95, 0.99] {
            let sample = elastic.sample_with_random_number(random);
            assert!(sample > CUTOFF_COSINE);
            assert_relative_eq!(elastic.cdf(sample), random, max_relative = 1e-9);
        }
    }

    #[test]
    fn full_ratio_leaves_no_tail() {
        let elastic =
            CoupledElastic::new(vec![-1.0, CUTOFF_COSINE], vec![1.0, 1.0], 1e-6, 1.0).unwrap();
        assert_eq!(elastic.upper_bound(), CUTOFF_COSINE);
        assert_eq!(elastic.pdf(0.9999995), 0.0);
        assert_relative_eq!(
            elastic.sample_with_random_number(1.0),
            CUTOFF_COSINE,
            max_relative = 1e-14
        );
    }

    #[test]
    fn rejects_a_grid_off_the_cutoff() {
        assert!(matches!(
            CoupledElastic::new(vec![-1.0, 0.0, 1.0], vec![1.0, 1.0, 1.0], 1e-6, 0.9),
            Err(Error::GridEndsOffCutoff { .. })
        ));
        assert!(matches!(
            CoupledElastic::new(vec![-1.0, CUTOFF_COSINE], vec![1.0, 1.0], 0.0, 0.9),
            Err(Error::InvalidScreening(_))
        ));
        assert!(matches!(
            CoupledElastic::new(vec![-1.0, CUTOFF_COSINE], vec![1.0, 1.0], 1e-6, 0.0),
            Err(Error::InvalidCutoffRatio(_))
        ));
    }
}

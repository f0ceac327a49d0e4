// external crates
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_rng::RandomSource;

// internal modules
use crate::distribution::{TabularUnivariate, Univariate};
use crate::error::{Error, Result};

/// A flat distribution over a closed interval
///
/// The dependent `value` is returned by [`evaluate`](Univariate::evaluate)
/// anywhere inside `[lower, upper]`; the normalised density is the usual
/// `1 / (upper - lower)` regardless of `value`.
///
/// ```rust
/// # use mcdist_univariate::{Uniform, Univariate, TabularUnivariate};
/// let flat = Uniform::new(-1.0, 1.0, 2.0).unwrap();
///
/// assert_eq!(flat.evaluate(0.0), 2.0);
/// assert_eq!(flat.pdf(0.0), 0.5);
/// assert_eq!(flat.sample_with_random_number(0.25), -0.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Uniform {
    lower: f64,
    upper: f64,
    value: f64,
}

impl Uniform {
    /// A flat distribution returning `value` over `[lower, upper]`
    ///
    /// The bounds must be finite and ordered, and the dependent value
    /// positive and finite.
    pub fn new(lower: f64, upper: f64, value: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(Error::InvertedBounds { lower, upper });
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::NegativeValue(value));
        }
        Ok(Self {
            lower,
            upper,
            value,
        })
    }
}

impl Univariate for Uniform {
    fn evaluate(&self, x: f64) -> f64 {
        if (self.lower..=self.upper).contains(&x) {
            self.value
        } else {
            0.0
        }
    }

    fn pdf(&self, x: f64) -> f64 {
        if (self.lower..=self.upper).contains(&x) {
            1.0 / (self.upper - self.lower)
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.lower {
            0.0
        } else if x >= self.upper {
            1.0
        } else {
            (x - self.lower) / (self.upper - self.lower)
        }
    }

    fn sample(&self, source: &mut dyn RandomSource) -> f64 {
        self.sample_with_random_number(source.next())
    }

    fn lower_bound(&self) -> f64 {
        self.lower
    }

    fn upper_bound(&self) -> f64 {
        self.upper
    }

    fn is_tabular(&self) -> bool {
        true
    }

    fn is_continuous(&self) -> bool {
        true
    }
}

impl TabularUnivariate for Uniform {
    fn sample_with_random_number(&self, random: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&random));
        if random == 0.0 {
            return self.lower;
        }
        self.lower + random * (self.upper - self.lower)
    }

    fn sample_bin_with_random_number(&self, random: f64) -> (f64, usize) {
        (self.sample_with_random_number(random), 0)
    }
}

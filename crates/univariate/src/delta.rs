// external crates
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_rng::RandomSource;

// internal modules
use crate::distribution::{TabularUnivariate, Univariate};
use crate::error::{Error, Result};

/// A point mass at a single location
///
/// Every sample is the location and no variates are consumed drawing it.
/// The cumulative steps from `0.0` to `1.0` at the location, and
/// [`evaluate`](Univariate::evaluate) returns the stored multiplier there.
///
/// A point mass is tabular but not continuous, so it can never serve as a
/// conditional in the bivariate interpolation engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    location: f64,
    multiplier: f64,
}

impl Delta {
    /// A point mass of weight `multiplier` at `location`
    pub fn new(location: f64, multiplier: f64) -> Result<Self> {
        if !location.is_finite() {
            return Err(Error::UndefinedValue(0));
        }
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(Error::NegativeValue(multiplier));
        }
        Ok(Self {
            location,
            multiplier,
        })
    }
}

impl Univariate for Delta {
    fn evaluate(&self, x: f64) -> f64 {
        if x == self.location {
            self.multiplier
        } else {
            0.0
        }
    }

    fn pdf(&self, x: f64) -> f64 {
        if x == self.location {
            1.0
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.location {
            0.0
        } else {
            1.0
        }
    }

    fn sample(&self, _source: &mut dyn RandomSource) -> f64 {
        self.location
    }

    fn lower_bound(&self) -> f64 {
        self.location
    }

    fn upper_bound(&self) -> f64 {
        self.location
    }

    fn is_tabular(&self) -> bool {
        true
    }

    fn is_continuous(&self) -> bool {
        false
    }
}

impl TabularUnivariate for Delta {
    fn sample_with_random_number(&self, random: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&random));
        self.location
    }

    fn sample_bin_with_random_number(&self, random: f64) -> (f64, usize) {
        (self.sample_with_random_number(random), 0)
    }
}

// external crates
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_rng::RandomSource;

// internal modules
use crate::distribution::Univariate;
use crate::error::{Error, Result};

/// A truncated exponential decay `multiplier * exp(-rate x)`
///
/// The support is `[lower, upper]`, where the upper bound may be
/// `f64::INFINITY` for an untruncated tail. Samples invert the cumulative
/// analytically from a single variate.
///
/// The decay is continuous but carries no grid, so only [`Univariate`] is
/// implemented; the deterministic tabular operations are unavailable and
/// the type cannot enter grid-based machinery.
///
/// ```rust
/// # use mcdist_univariate::{Exponential, Univariate};
/// let decay = Exponential::new(1.0, 2.0, 0.0, f64::INFINITY).unwrap();
///
/// assert_eq!(decay.evaluate(0.0), 1.0);
/// assert!(decay.cdf(1.0) > 0.86);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exponential {
    multiplier: f64,
    rate: f64,
    lower: f64,
    upper: f64,
}

impl Exponential {
    /// An exponential decay of the given `rate` truncated to `[lower, upper]`
    pub fn new(multiplier: f64, rate: f64, lower: f64, upper: f64) -> Result<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(Error::NegativeValue(multiplier));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::NegativeValue(rate));
        }
        if !lower.is_finite() || upper.is_nan() || lower >= upper {
            return Err(Error::InvertedBounds { lower, upper });
        }
        Ok(Self {
            multiplier,
            rate,
            lower,
            upper,
        })
    }

    /// Probability mass of the truncated support, before normalisation
    ///
    /// `1 - exp(-rate (upper - lower))`, which is exactly `1.0` for an
    /// untruncated tail.
    fn truncated_mass(&self) -> f64 {
        1.0 - (-self.rate * (self.upper - self.lower)).exp()
    }
}

impl Univariate for Exponential {
    fn evaluate(&self, x: f64) -> f64 {
        if (self.lower..=self.upper).contains(&x) {
            self.multiplier * (-self.rate * x).exp()
        } else {
            0.0
        }
    }

    fn pdf(&self, x: f64) -> f64 {
        if (self.lower..=self.upper).contains(&x) {
            self.rate * (-self.rate * (x - self.lower)).exp() / self.truncated_mass()
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
            (1.0 - (-self.rate * (x - self.lower)).exp()) / self.truncated_mass()
        }
    }

    fn sample(&self, source: &mut dyn RandomSource) -> f64 {
        let random = source.next();
        self.lower - (1.0 - random * self.truncated_mass()).ln() / self.rate
    }

    fn lower_bound(&self) -> f64 {
        self.lower
    }

    fn upper_bound(&self) -> f64 {
        self.upper
    }

    fn is_tabular(&self) -> bool {
        false
    }

    fn is_continuous(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mcdist_rng::SequenceSource;

    #[test]
    fn inversion_matches_the_cumulative() {
        let decay = Exponential::new(2.0, 1.5, 0.5, 4.0).unwrap();
        let mut source = SequenceSource::new(vec![0.0, 0.3, 0.9]);

        assert_eq!(decay.sample(&mut source), 0.5);
        for _ in 0..2 {
            let sample = decay.sample(&mut source);
            assert!((0.5..=4.0).contains(&sample));
        }

        source.reset();
        source.next();
        let sample = decay.sample(&mut source);
        assert_relative_eq!(decay.cdf(sample), 0.3, max_relative = 1e-12);
    }

    #[test]
    fn untruncated_tail_normalises_to_one() {
        let decay = Exponential::new(1.0, 2.0, 0.0, f64::INFINITY).unwrap();
        assert_eq!(decay.cdf(f64::INFINITY), 1.0);
        assert_relative_eq!(decay.pdf(0.0), 2.0, max_relative = 1e-14);
    }

    #[test]
    fn rejects_nonpositive_rates() {
        assert!(matches!(
            Exponential::new(1.0, 0.0, 0.0, 1.0),
            Err(Error::NegativeValue(_))
        ));
    }
}

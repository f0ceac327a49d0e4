// external crates
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_rng::RandomSource;

// internal modules
use crate::delta::Delta;
use crate::distribution::{TabularUnivariate, Univariate};
use crate::elastic::CoupledElastic;
use crate::tabulated::Tabulated;
use crate::uniform::Uniform;

/// Any of the tabular distribution types, in one serialisable value
///
/// Collections mixing distribution kinds hold this enum rather than a
/// trait object, keeping the set closed and serde round-trips exact. Every
/// [`Univariate`] and [`TabularUnivariate`] operation dispatches to the
/// wrapped type.
///
/// ```rust
/// # use mcdist_univariate::{AnyTabular, Uniform, Univariate};
/// let any = AnyTabular::from(Uniform::new(0.0, 2.0, 1.0).unwrap());
///
/// assert!(any.is_continuous());
/// assert_eq!(any.pdf(1.0), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnyTabular {
    /// Flat value over a closed interval
    Uniform(Uniform),
    /// Point mass at a single location
    Delta(Delta),
    /// Lin-lin pointwise density on a grid
    Tabulated(Tabulated),
    /// Tabulated cosines coupled to a screened Rutherford tail
    CoupledElastic(CoupledElastic),
}

impl AnyTabular {
    fn inner(&self) -> &dyn TabularUnivariate {
        match self {
            Self::Uniform(d) => d,
            Self::Delta(d) => d,
            Self::Tabulated(d) => d,
            Self::CoupledElastic(d) => d,
        }
    }
}

impl From<Uniform> for AnyTabular {
    fn from(distribution: Uniform) -> Self {
        Self::Uniform(distribution)
    }
}

impl From<Delta> for AnyTabular {
    fn from(distribution: Delta) -> Self {
        Self::Delta(distribution)
    }
}

impl From<Tabulated> for AnyTabular {
    fn from(distribution: Tabulated) -> Self {
        Self::Tabulated(distribution)
    }
}

impl From<CoupledElastic> for AnyTabular {
    fn from(distribution: CoupledElastic) -> Self {
        Self::CoupledElastic(distribution)
    }
}

impl Univariate for AnyTabular {
    fn evaluate(&self, x: f64) -> f64 {
        self.inner().evaluate(x)
    }

    fn pdf(&self, x: f64) -> f64 {
        self.inner().pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.inner().cdf(x)
    }

    fn sample(&self, source: &mut dyn RandomSource) -> f64 {
        self.inner().sample(source)
    }

    fn lower_bound(&self) -> f64 {
        self.inner().lower_bound()
    }

    fn upper_bound(&self) -> f64 {
        self.inner().upper_bound()
    }

    fn is_tabular(&self) -> bool {
        self.inner().is_tabular()
    }

    fn is_continuous(&self) -> bool {
        self.inner().is_continuous()
    }
}

impl TabularUnivariate for AnyTabular {
    fn sample_with_random_number(&self, random: f64) -> f64 {
        self.inner().sample_with_random_number(random)
    }

    fn sample_bin_with_random_number(&self, random: f64) -> (f64, usize) {
        self.inner().sample_bin_with_random_number(random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reaches_the_wrapped_type() {
        let point = AnyTabular::from(Delta::new(2.0, 1.0).unwrap());
        assert!(!point.is_continuous());
        assert_eq!(point.sample_with_random_number(0.7), 2.0);

        let flat = AnyTabular::from(Uniform::new(0.0, 4.0, 1.0).unwrap());
        assert_eq!(flat.sample_with_random_number(0.5), 2.0);
    }

    #[test]
    fn serde_tags_the_variant() {
        let any = AnyTabular::from(Uniform::new(0.0, 1.0, 1.0).unwrap());
        let json = serde_json::to_string(&any).unwrap();
        assert!(json.contains("Uniform"));

        let back: AnyTabular = serde_json::from_str(&json).unwrap();
        assert_eq!(back, any);
    }
}

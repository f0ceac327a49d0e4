//! Capability traits shared by the distribution types

// mcdist modules
use mcdist_rng::RandomSource;

/// Common behaviour of every one-dimensional distribution
///
/// All independent and dependent quantities are plain `f64` values in the
/// conventional transport units: energies in MeV, angles as directional
/// cosines. Queries outside the support are well defined rather than
/// errors, returning the `0.0` sentinel (`1.0` for a cumulative query
/// above the support).
///
/// ```rust
/// # use mcdist_univariate::{Uniform, Univariate};
/// let flat = Uniform::new(2.0, 4.0, 0.5).unwrap();
///
/// assert_eq!(flat.pdf(3.0), 0.5);
/// assert_eq!(flat.pdf(5.0), 0.0);
/// assert_eq!(flat.cdf(5.0), 1.0);
/// ```
pub trait Univariate {
    /// Unnormalised dependent value at `x`, `0.0` outside the support
    fn evaluate(&self, x: f64) -> f64;

    /// Normalised probability density at `x`, `0.0` outside the support
    fn pdf(&self, x: f64) -> f64;

    /// Cumulative probability at `x`
    ///
    /// `0.0` below the support and `1.0` above it.
    fn cdf(&self, x: f64) -> f64;

    /// Draw a sample, consuming variates from `source`
    fn sample(&self, source: &mut dyn RandomSource) -> f64;

    /// Draw a sample and count the attempt
    ///
    /// The counter increments exactly once per call, so acceptance
    /// efficiencies can be tracked across mixed sampling schemes.
    fn sample_and_record_trials(&self, source: &mut dyn RandomSource, trials: &mut u64) -> f64 {
        *trials += 1;
        self.sample(source)
    }

    /// Smallest independent value with nonzero probability
    fn lower_bound(&self) -> f64;

    /// Largest independent value with nonzero probability
    fn upper_bound(&self) -> f64;

    /// Whether the distribution is defined on a tabulated grid
    fn is_tabular(&self) -> bool;

    /// Whether the distribution is continuous over its support
    fn is_continuous(&self) -> bool;
}

/// Deterministic operations on distributions with an invertible cumulative
///
/// Implementors guarantee that [`sample_with_random_number`] is the exact
/// inverse of [`cdf`](Univariate::cdf): `0.0` maps to the lower support
/// bound exactly and `1.0` to the upper bound within floating round-off.
/// Variates passed in are expected to lie in `[0, 1]` and are
/// `debug_assert!`ed, not range-checked, in release builds.
///
/// [`sample_with_random_number`]: TabularUnivariate::sample_with_random_number
pub trait TabularUnivariate: Univariate {
    /// Invert the cumulative at a caller-supplied variate
    fn sample_with_random_number(&self, random: f64) -> f64;

    /// Invert the cumulative and report the grid segment sampled from
    fn sample_bin_with_random_number(&self, random: f64) -> (f64, usize);

    /// Draw a sample restricted to values at or below `max_value`
    fn sample_in_subrange(&self, source: &mut dyn RandomSource, max_value: f64) -> f64 {
        self.sample_with_random_number_in_subrange(source.next(), max_value)
    }

    /// Deterministic restricted-range sample
    ///
    /// Scales `random` by the cumulative probability at `max_value`
    /// before inverting, so the full variate range maps onto
    /// `[lower_bound, max_value]`. Limits above the natural upper bound
    /// clamp to it, making the unrestricted and clamped calls identical.
    fn sample_with_random_number_in_subrange(&self, random: f64, max_value: f64) -> f64 {
        let limit = max_value.min(self.upper_bound());
        self.sample_with_random_number(random * self.cdf(limit))
    }
}

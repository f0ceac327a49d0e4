//! Correlated policy: match both edges at one cumulative probability
//!
//! Sampling inverts both edge cumulatives at the same variate and blends
//! the two secondary values. Evaluation has no closed form, so the
//! cumulative probability whose blended sample lands on the queried
//! secondary value is found by bisection.

// external crates
use log::warn;
use mcdist_rng::RandomSource;
use mcdist_univariate::TabularUnivariate;

// internal modules
use super::{EdgePair, PolicySample};
use crate::config::Tolerances;
use crate::error::{Error, Result};

/// Find the cumulative probability whose image is `target`
///
/// `position` must be nondecreasing over `[0, 1]`. Targets at or beyond
/// the images of the endpoints return the endpoint itself, so support
/// boundaries stay exact.
pub(crate) fn bisect<F>(tolerances: &Tolerances, target: f64, position: F) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    if target <= position(0.0) {
        return Ok(0.0);
    }
    if target >= position(1.0) {
        return Ok(1.0);
    }

    let threshold = tolerances
        .error()
        .max(tolerances.relative_error() * target.abs());
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut residual = f64::INFINITY;
    for _ in 0..tolerances.max_iterations() {
        let mid = 0.5 * (lo + hi);
        residual = position(mid) - target;
        if residual.abs() <= threshold {
            return Ok(mid);
        }
        if residual < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    warn!(
        "bisection stalled at residual {residual:e} after {} iterations",
        tolerances.max_iterations()
    );
    Err(Error::NotConverged {
        iterations: tolerances.max_iterations(),
        residual,
    })
}

/// Density blend along the line of constant cumulative probability
///
/// Linear interpolation of the reciprocals. Zero on either edge means
/// the blended density is pinned to zero rather than fed a division.
pub(crate) fn harmonic(fraction: f64, z0: f64, z1: f64) -> f64 {
    if z0 == 0.0 || z1 == 0.0 {
        return 0.0;
    }
    z0 * z1 / ((1.0 - fraction) * z1 + fraction * z0)
}

/// Evaluate by matching the queried secondary to a cumulative probability
pub(crate) fn evaluate<D, F>(pair: &EdgePair<'_, D>, secondary: f64, eval: F) -> Result<f64>
where
    D: TabularUnivariate,
    F: Fn(&D, f64) -> f64,
{
    let position = |u: f64| {
        pair.interp.interpolate_secondary(
            pair.fraction,
            pair.lower.sample_with_random_number(u),
            pair.upper.sample_with_random_number(u),
        )
    };
    if !(secondary >= position(0.0) && secondary <= position(1.0)) {
        return Ok(0.0);
    }

    let matched = bisect(&pair.tolerances, secondary, position)?;
    let z0 = eval(pair.lower, pair.lower.sample_with_random_number(matched));
    let z1 = eval(pair.upper, pair.upper.sample_with_random_number(matched));
    Ok(harmonic(pair.fraction, z0, z1))
}

/// Cumulative probability, which is the matched variate itself
pub(crate) fn evaluate_cdf<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    secondary: f64,
) -> Result<f64> {
    let position = |u: f64| {
        pair.interp.interpolate_secondary(
            pair.fraction,
            pair.lower.sample_with_random_number(u),
            pair.upper.sample_with_random_number(u),
        )
    };
    if !(secondary >= position(0.0)) {
        return Ok(0.0);
    }
    if secondary > position(1.0) {
        return Ok(1.0);
    }
    bisect(&pair.tolerances, secondary, position)
}

/// Invert both edges at one variate and blend the secondary values
pub(crate) fn sample_with_random_number<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    random: f64,
) -> PolicySample {
    let (y0, secondary_bin) = pair.lower.sample_bin_with_random_number(random);
    let y1 = pair.upper.sample_with_random_number(random);
    let value = pair.interp.interpolate_secondary(pair.fraction, y0, y1);
    PolicySample {
        value,
        raw: value,
        upper_edge: false,
        secondary_bin,
    }
}

/// Stochastic form of [`sample_with_random_number`], one draw
pub(crate) fn sample<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    source: &mut dyn RandomSource,
) -> PolicySample {
    sample_with_random_number(pair, source.next())
}

/// Sample below `limit`, inverting each edge within its clamped subrange
pub(crate) fn sample_with_random_number_in_subrange<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    random: f64,
    limit: f64,
) -> f64 {
    let (_, hi) = pair.intermediate_support();
    if limit >= hi {
        return sample_with_random_number(pair, random).value;
    }
    let y0 = pair.lower.sample_with_random_number_in_subrange(random, limit);
    let y1 = pair.upper.sample_with_random_number_in_subrange(random, limit);
    pair.interp.interpolate_secondary(pair.fraction, y0, y1)
}

/// Stochastic form of [`sample_with_random_number_in_subrange`]
pub(crate) fn sample_in_subrange<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    source: &mut dyn RandomSource,
    limit: f64,
) -> f64 {
    sample_with_random_number_in_subrange(pair, source.next(), limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mcdist_interp::Interp2D;
    use mcdist_univariate::{Uniform, Univariate};

    #[test]
    fn bisection_inverts_a_linear_position() {
        let tolerances = Tolerances::default();
        let matched = bisect(&tolerances, 0.9, |u| 3.0 * u).unwrap();
        assert_relative_eq!(matched, 0.3, max_relative = 1e-6);

        // endpoint targets shortcut without iterating
        assert_eq!(bisect(&tolerances, -1.0, |u| 3.0 * u).unwrap(), 0.0);
        assert_eq!(bisect(&tolerances, 3.0, |u| 3.0 * u).unwrap(), 1.0);
    }

    #[test]
    fn matched_evaluation_blends_reciprocal_densities() {
        let lower = Uniform::new(0.0, 2.0, 1.0).unwrap();
        let upper = Uniform::new(0.0, 4.0, 1.0).unwrap();
        let pair = EdgePair {
            interp: Interp2D::LIN_LIN_LIN,
            tolerances: Tolerances::default(),
            fraction: 0.5,
            lower: &lower,
            upper: &upper,
        };

        // flat edges make the harmonic blend exact regardless of the
        // matched variate
        assert_eq!(evaluate(&pair, 1.5, |d, y| d.pdf(y)).unwrap(), 1.0 / 3.0);
        assert_eq!(evaluate(&pair, 3.5, |d, y| d.pdf(y)).unwrap(), 0.0);
        assert_relative_eq!(
            evaluate_cdf(&pair, 1.5).unwrap(),
            0.5,
            max_relative = 1e-6
        );

        let sample = sample_with_random_number(&pair, 0.25);
        assert_eq!(sample.value, 0.75);
        assert!(!sample.upper_edge);
    }
}

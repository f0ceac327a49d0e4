//! Unit-base correlated policy: correlate in unit-base coordinates
//!
//! Both edges are inverted at one shared variate, as in the plain
//! correlated policy, but the matching happens on the `[0, 1]` unit-base
//! coordinate of each support. Densities carry the same length scaling
//! as the unit-base policy.

// external crates
use mcdist_rng::RandomSource;
use mcdist_univariate::TabularUnivariate;

// internal modules
use super::correlated::{bisect, harmonic};
use super::{EdgePair, PolicySample};
use crate::error::Result;

/// Unit-base coordinate of one edge inverted at `u`
fn edge_fraction<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    edge: &D,
    min: f64,
    length: f64,
    u: f64,
) -> f64 {
    let y = edge.sample_with_random_number(u);
    pair.interp
        .unit_base_fraction(y, min, length, pair.tolerances.fuzzy_boundary())
}

/// Evaluate by matching the queried unit-base coordinate
pub(crate) fn evaluate<D, F>(pair: &EdgePair<'_, D>, secondary: f64, eval: F) -> Result<f64>
where
    D: TabularUnivariate,
    F: Fn(&D, f64) -> f64,
{
    let (lo, hi) = pair.intermediate_support();
    if !(lo..=hi).contains(&secondary) {
        return Ok(0.0);
    }

    let (s0, s1) = pair.supports();
    let (len0, len1, len) = pair.grid_lengths();
    let target = pair
        .interp
        .unit_base_fraction(secondary, lo, len, pair.tolerances.fuzzy_boundary());
    let position = |u: f64| {
        (1.0 - pair.fraction) * edge_fraction(pair, pair.lower, s0.0, len0, u)
            + pair.fraction * edge_fraction(pair, pair.upper, s1.0, len1, u)
    };

    let matched = bisect(&pair.tolerances, target, position)?;
    let w0 = eval(pair.lower, pair.lower.sample_with_random_number(matched)) * len0.abs();
    let w1 = eval(pair.upper, pair.upper.sample_with_random_number(matched)) * len1.abs();
    Ok(harmonic(pair.fraction, w0, w1) / len.abs())
}

/// Cumulative probability, which is the matched variate itself
pub(crate) fn evaluate_cdf<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    secondary: f64,
) -> Result<f64> {
    let (lo, hi) = pair.intermediate_support();
    if !(secondary >= lo) {
        return Ok(0.0);
    }
    if secondary > hi {
        return Ok(1.0);
    }

    let (s0, s1) = pair.supports();
    let (len0, len1, len) = pair.grid_lengths();
    let target = pair
        .interp
        .unit_base_fraction(secondary, lo, len, pair.tolerances.fuzzy_boundary());
    let position = |u: f64| {
        (1.0 - pair.fraction) * edge_fraction(pair, pair.lower, s0.0, len0, u)
            + pair.fraction * edge_fraction(pair, pair.upper, s1.0, len1, u)
    };
    bisect(&pair.tolerances, target, position)
}

/// Invert both edges at one variate and blend the unit-base coordinates
pub(crate) fn sample_with_random_number<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    random: f64,
) -> PolicySample {
    let (s0, s1) = pair.supports();
    let (len0, len1, len) = pair.grid_lengths();
    let fuzzy = pair.tolerances.fuzzy_boundary();

    let (y0, secondary_bin) = pair.lower.sample_bin_with_random_number(random);
    let eta0 = pair.interp.unit_base_fraction(y0, s0.0, len0, fuzzy);
    let y1 = pair.upper.sample_with_random_number(random);
    let eta1 = pair.interp.unit_base_fraction(y1, s1.0, len1, fuzzy);

    let eta = (1.0 - pair.fraction) * eta0 + pair.fraction * eta1;
    let lo = pair.interp.interpolate_secondary(pair.fraction, s0.0, s1.0);
    PolicySample {
        value: pair.interp.secondary_from_fraction(eta, lo, len),
        raw: y0,
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

/// Sample below `limit` on the intermediate grid
pub(crate) fn sample_with_random_number_in_subrange<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    random: f64,
    limit: f64,
) -> f64 {
    let (lo, hi) = pair.intermediate_support();
    if limit >= hi {
        return sample_with_random_number(pair, random).value;
    }

    let (s0, s1) = pair.supports();
    let (len0, len1, len) = pair.grid_lengths();
    let fuzzy = pair.tolerances.fuzzy_boundary();
    let eta_limit = pair.interp.unit_base_fraction(limit, lo, len, fuzzy);

    let limit0 = pair.interp.secondary_from_fraction(eta_limit, s0.0, len0);
    let y0 = pair.lower.sample_with_random_number_in_subrange(random, limit0);
    let eta0 = pair.interp.unit_base_fraction(y0, s0.0, len0, fuzzy);

    let limit1 = pair.interp.secondary_from_fraction(eta_limit, s1.0, len1);
    let y1 = pair.upper.sample_with_random_number_in_subrange(random, limit1);
    let eta1 = pair.interp.unit_base_fraction(y1, s1.0, len1, fuzzy);

    let eta = (1.0 - pair.fraction) * eta0 + pair.fraction * eta1;
    pair.interp.secondary_from_fraction(eta, lo, len)
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
    use crate::config::Tolerances;
    use mcdist_interp::Interp2D;
    use mcdist_univariate::{Uniform, Univariate};

    #[test]
    fn matching_happens_on_the_unit_base_coordinate() {
        let lower = Uniform::new(0.0, 2.0, 1.0).unwrap();
        let upper = Uniform::new(0.0, 4.0, 1.0).unwrap();
        let pair = EdgePair {
            interp: Interp2D::LIN_LIN_LIN,
            tolerances: Tolerances::default(),
            fraction: 0.5,
            lower: &lower,
            upper: &upper,
        };

        let sample = sample_with_random_number(&pair, 0.25);
        assert_eq!(sample.value, 0.75);
        assert_eq!(sample.raw, 0.5);

        assert_eq!(evaluate(&pair, 1.5, |d, y| d.pdf(y)).unwrap(), 1.0 / 3.0);
        assert_eq!(evaluate_cdf(&pair, 1.5).unwrap(), 0.5);
        assert_eq!(evaluate(&pair, 3.5, |d, y| d.pdf(y)).unwrap(), 0.0);
    }
}

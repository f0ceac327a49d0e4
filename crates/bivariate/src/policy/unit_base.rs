//! Unit-base policy: map both edges onto a shared `[0, 1]` coordinate
//!
//! Each edge support is normalised to unit length in processed secondary
//! space, so bracketing conditionals with different supports line up.
//! Densities pick up the edge-to-intermediate length ratio, keeping the
//! blended conditional normalised over the intermediate support.

// external crates
use mcdist_rng::RandomSource;
use mcdist_univariate::TabularUnivariate;

// internal modules
use super::{stratify, EdgePair, PolicySample};

/// Blend edge evaluations through the unit-base transform
///
/// Zero outside the intermediate support, including on either side of a
/// secondary value of NaN.
pub(crate) fn evaluate<D, F>(pair: &EdgePair<'_, D>, secondary: f64, eval: F) -> f64
where
    D: TabularUnivariate,
    F: Fn(&D, f64) -> f64,
{
    let (lo, hi) = pair.intermediate_support();
    if !(lo..=hi).contains(&secondary) {
        return 0.0;
    }
    let (s0, s1) = pair.supports();
    pair.interp.interpolate_unit_base_processed(
        pair.fraction,
        secondary,
        s0,
        s1,
        |y| eval(pair.lower, y),
        |y| eval(pair.upper, y),
        pair.tolerances.fuzzy_boundary(),
    )
}

/// Cumulative probability at the matched unit-base coordinate
pub(crate) fn evaluate_cdf<D: TabularUnivariate>(pair: &EdgePair<'_, D>, secondary: f64) -> f64 {
    let (lo, hi) = pair.intermediate_support();
    if !(secondary >= lo) {
        return 0.0;
    }
    if secondary > hi {
        return 1.0;
    }
    let (s0, s1) = pair.supports();
    let (len0, len1, len) = pair.grid_lengths();
    let eta = pair
        .interp
        .unit_base_fraction(secondary, lo, len, pair.tolerances.fuzzy_boundary());
    let y0 = pair.interp.secondary_from_fraction(eta, s0.0, len0);
    let y1 = pair.interp.secondary_from_fraction(eta, s1.0, len1);
    (1.0 - pair.fraction) * pair.lower.cdf(y0) + pair.fraction * pair.upper.cdf(y1)
}

/// Sample one boundary conditional and rescale onto the intermediate grid
pub(crate) fn sample<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    source: &mut dyn RandomSource,
) -> PolicySample {
    let variate = source.next();
    let upper_edge = source.next() < pair.fraction;
    from_edge_variate(pair, variate, upper_edge)
}

/// Deterministic form of [`sample`] driven by one stratified variate
pub(crate) fn sample_with_random_number<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    random: f64,
) -> PolicySample {
    let (upper_edge, stratum) = stratify(pair.fraction, random);
    from_edge_variate(pair, stratum, upper_edge)
}

/// Sample below `limit` on the intermediate grid
///
/// A limit at or above the intermediate maximum skips the subrange
/// machinery entirely, reproducing the unrestricted sample bit for bit.
pub(crate) fn sample_in_subrange<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    source: &mut dyn RandomSource,
    limit: f64,
) -> f64 {
    let variate = source.next();
    let upper_edge = source.next() < pair.fraction;
    constrained(pair, variate, upper_edge, limit)
}

/// Deterministic form of [`sample_in_subrange`]
pub(crate) fn sample_with_random_number_in_subrange<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    random: f64,
    limit: f64,
) -> f64 {
    let (upper_edge, stratum) = stratify(pair.fraction, random);
    constrained(pair, stratum, upper_edge, limit)
}

fn from_edge_variate<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    variate: f64,
    upper_edge: bool,
) -> PolicySample {
    let (raw, secondary_bin) = pair.edge(upper_edge).sample_bin_with_random_number(variate);
    PolicySample {
        value: rescale(pair, raw, upper_edge),
        raw,
        upper_edge,
        secondary_bin,
    }
}

fn constrained<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    variate: f64,
    upper_edge: bool,
    limit: f64,
) -> f64 {
    let (lo, hi) = pair.intermediate_support();
    if limit >= hi {
        return from_edge_variate(pair, variate, upper_edge).value;
    }

    let (s0, s1) = pair.supports();
    let (len0, len1, len) = pair.grid_lengths();
    let eta_limit = pair
        .interp
        .unit_base_fraction(limit, lo, len, pair.tolerances.fuzzy_boundary());
    let (edge_min, edge_len) = if upper_edge { (s1.0, len1) } else { (s0.0, len0) };
    let edge_limit = pair
        .interp
        .secondary_from_fraction(eta_limit, edge_min, edge_len);

    let raw = pair
        .edge(upper_edge)
        .sample_with_random_number_in_subrange(variate, edge_limit);
    rescale(pair, raw, upper_edge)
}

/// Map a value sampled on one edge onto the intermediate support
fn rescale<D: TabularUnivariate>(pair: &EdgePair<'_, D>, raw: f64, upper_edge: bool) -> f64 {
    let (s0, s1) = pair.supports();
    let (len0, len1, len) = pair.grid_lengths();
    let (edge_min, edge_len) = if upper_edge { (s1.0, len1) } else { (s0.0, len0) };
    let eta = pair
        .interp
        .unit_base_fraction(raw, edge_min, edge_len, pair.tolerances.fuzzy_boundary());
    let lo = pair.interp.interpolate_secondary(pair.fraction, s0.0, s1.0);
    pair.interp.secondary_from_fraction(eta, lo, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tolerances;
    use mcdist_interp::Interp2D;
    use mcdist_rng::SequenceSource;
    use mcdist_univariate::{Uniform, Univariate};

    fn uniform_edges() -> (Uniform, Uniform) {
        (
            Uniform::new(0.0, 2.0, 1.0).unwrap(),
            Uniform::new(0.0, 4.0, 1.0).unwrap(),
        )
    }

    #[test]
    fn blended_density_stays_normalised_over_the_intermediate_support() {
        let (lower, upper) = uniform_edges();
        let pair = EdgePair {
            interp: Interp2D::LIN_LIN_LIN,
            tolerances: Tolerances::default(),
            fraction: 0.5,
            lower: &lower,
            upper: &upper,
        };

        // intermediate support [0, 3], flat at 1/3
        assert_eq!(evaluate(&pair, 1.5, |d, y| d.pdf(y)), 1.0 / 3.0);
        assert_eq!(evaluate_cdf(&pair, 1.5), 0.5);
        assert_eq!(evaluate(&pair, 3.5, |d, y| d.pdf(y)), 0.0);
        assert_eq!(evaluate_cdf(&pair, 3.5), 1.0);
        assert_eq!(evaluate(&pair, f64::NAN, |d, y| d.pdf(y)), 0.0);
    }

    #[test]
    fn samples_rescale_onto_the_intermediate_support() {
        let (lower, upper) = uniform_edges();
        let pair = EdgePair {
            interp: Interp2D::LIN_LIN_LIN,
            tolerances: Tolerances::default(),
            fraction: 0.5,
            lower: &lower,
            upper: &upper,
        };

        let mut source = SequenceSource::new(vec![0.25, 0.9]);
        let sample = sample(&pair, &mut source);
        assert!(!sample.upper_edge);
        assert_eq!(sample.raw, 0.5);
        assert_eq!(sample.value, 0.75);

        // a limit at the intermediate maximum changes nothing
        let mut source = SequenceSource::new(vec![0.25, 0.9]);
        assert_eq!(sample_in_subrange(&pair, &mut source, 3.0), 0.75);

        // halved limit maps to half of each edge support
        let mut source = SequenceSource::new(vec![1.0, 0.9]);
        assert_eq!(sample_in_subrange(&pair, &mut source, 1.5), 1.5);
    }
}

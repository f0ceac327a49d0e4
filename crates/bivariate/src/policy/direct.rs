//! Direct policy: operate at the literal secondary coordinates
//!
//! No transform is applied to the secondary axis. Values outside an
//! edge support contribute zero to the blend, which makes evaluation
//! discontinuous at the primary grid points whenever the bracketing
//! supports differ.

// external crates
use mcdist_rng::RandomSource;
use mcdist_univariate::TabularUnivariate;

// internal modules
use super::{stratify, EdgePair, PolicySample};

/// Blend edge evaluations at the literal secondary coordinate
pub(crate) fn evaluate<D, F>(pair: &EdgePair<'_, D>, secondary: f64, eval: F) -> f64
where
    D: TabularUnivariate,
    F: Fn(&D, f64) -> f64,
{
    let z0 = eval(pair.lower, secondary);
    let z1 = eval(pair.upper, secondary);
    pair.interp.blend_dependent(pair.fraction, z0, z1)
}

/// Cumulative probability as the linear mix of the edge cumulatives
pub(crate) fn evaluate_cdf<D: TabularUnivariate>(pair: &EdgePair<'_, D>, secondary: f64) -> f64 {
    let u0 = pair.lower.cdf(secondary);
    let u1 = pair.upper.cdf(secondary);
    (1.0 - pair.fraction) * u0 + pair.fraction * u1
}

/// Sample one boundary conditional, chosen by a second variate
pub(crate) fn sample<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    source: &mut dyn RandomSource,
) -> PolicySample {
    let variate = source.next();
    let upper_edge = source.next() < pair.fraction;
    let (value, secondary_bin) = pair.edge(upper_edge).sample_bin_with_random_number(variate);
    PolicySample {
        value,
        raw: value,
        upper_edge,
        secondary_bin,
    }
}

/// Deterministic form of [`sample`] driven by one stratified variate
pub(crate) fn sample_with_random_number<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    random: f64,
) -> PolicySample {
    let (upper_edge, stratum) = stratify(pair.fraction, random);
    let (value, secondary_bin) = pair.edge(upper_edge).sample_bin_with_random_number(stratum);
    PolicySample {
        value,
        raw: value,
        upper_edge,
        secondary_bin,
    }
}

/// Sample below `limit`, clamped per edge to its own support
pub(crate) fn sample_in_subrange<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    source: &mut dyn RandomSource,
    limit: f64,
) -> f64 {
    let variate = source.next();
    let upper_edge = source.next() < pair.fraction;
    pair.edge(upper_edge)
        .sample_with_random_number_in_subrange(variate, limit)
}

/// Deterministic form of [`sample_in_subrange`]
pub(crate) fn sample_with_random_number_in_subrange<D: TabularUnivariate>(
    pair: &EdgePair<'_, D>,
    random: f64,
    limit: f64,
) -> f64 {
    let (upper_edge, stratum) = stratify(pair.fraction, random);
    pair.edge(upper_edge)
        .sample_with_random_number_in_subrange(stratum, limit)
}

//! Per-mode combination of the two conditionals bracketing a primary value
//!
//! Each submodule implements one sampling policy over a resolved
//! [`EdgePair`]. The engine owns bin lookup, boundary shortcuts, and
//! out-of-range handling; policies only ever see an interior primary
//! fraction strictly between zero and one.

pub(crate) mod correlated;
pub(crate) mod direct;
pub(crate) mod unit_base;
pub(crate) mod unit_base_correlated;

// external crates
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_interp::Interp2D;
use mcdist_univariate::TabularUnivariate;

// internal modules
use crate::config::Tolerances;

/// How the engine combines the two conditionals bracketing a primary value
///
/// `UnitBase` and `Direct` sample by stochastically selecting one of the
/// bracketing grid boundaries, consuming an edge-sample draw followed by
/// a boundary-selection draw. The correlated modes invert both edge
/// cumulatives at one shared variate and blend, consuming a single draw.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleMode {
    /// Map secondary values through the unit-base transform, scaling
    /// densities by the processed support lengths
    #[default]
    UnitBase,
    /// Evaluate and sample at the literal secondary coordinates
    Direct,
    /// Match both edges at a common cumulative probability
    Correlated,
    /// Match both edges at a common cumulative probability in unit-base
    /// coordinates
    UnitBaseCorrelated,
}

impl std::fmt::Display for SampleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The two conditionals bracketing an interior primary value
///
/// `fraction` is the primary interpolation fraction, strictly inside
/// `(0, 1)` by the time a policy sees it.
pub(crate) struct EdgePair<'a, D> {
    pub(crate) interp: Interp2D,
    pub(crate) tolerances: Tolerances,
    pub(crate) fraction: f64,
    pub(crate) lower: &'a D,
    pub(crate) upper: &'a D,
}

/// One stochastic sample with its bookkeeping
pub(crate) struct PolicySample {
    /// Secondary value on the intermediate grid
    pub(crate) value: f64,
    /// Secondary value as drawn from the chosen edge, before any rescale
    pub(crate) raw: f64,
    /// Whether the upper bracketing boundary produced the sample
    pub(crate) upper_edge: bool,
    /// Segment index within the sampled conditional
    pub(crate) secondary_bin: usize,
}

impl<'a, D: TabularUnivariate> EdgePair<'a, D> {
    /// Secondary supports of the lower and upper conditionals
    pub(crate) fn supports(&self) -> ((f64, f64), (f64, f64)) {
        (
            (self.lower.lower_bound(), self.lower.upper_bound()),
            (self.upper.lower_bound(), self.upper.upper_bound()),
        )
    }

    /// Secondary support of the intermediate grid at this fraction
    pub(crate) fn intermediate_support(&self) -> (f64, f64) {
        let (s0, s1) = self.supports();
        (
            self.interp.interpolate_secondary(self.fraction, s0.0, s1.0),
            self.interp.interpolate_secondary(self.fraction, s0.1, s1.1),
        )
    }

    /// Processed support lengths (lower edge, upper edge, intermediate)
    pub(crate) fn grid_lengths(&self) -> (f64, f64, f64) {
        let (s0, s1) = self.supports();
        let len0 = self.interp.grid_length(s0);
        let len1 = self.interp.grid_length(s1);
        let len = self
            .interp
            .intermediate_grid_length_processed(self.fraction, len0, len1);
        (len0, len1, len)
    }

    /// The conditional at one bracketing boundary
    pub(crate) fn edge(&self, upper_edge: bool) -> &'a D {
        if upper_edge {
            self.upper
        } else {
            self.lower
        }
    }
}

/// Split one variate into a boundary choice and a rescaled stratum variate
///
/// Exact single-draw realization of the two-draw mixture: the variate
/// falls below `fraction` with probability `fraction`, selecting the
/// upper boundary, and the leftover part of the variate is rescaled to
/// cover `[0, 1]` again.
pub(crate) fn stratify(fraction: f64, random: f64) -> (bool, f64) {
    if fraction == 0.0 {
        return (false, random);
    }
    if fraction == 1.0 {
        return (true, random);
    }
    if random < fraction {
        (true, random / fraction)
    } else {
        (false, (random - fraction) / (1.0 - fraction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stratification_covers_both_boundaries() {
        let (upper, stratum) = stratify(0.25, 0.1);
        assert!(upper);
        assert_eq!(stratum, 0.4);

        let (upper, stratum) = stratify(0.25, 0.25);
        assert!(!upper);
        assert_eq!(stratum, 0.0);

        let (upper, stratum) = stratify(0.25, 1.0);
        assert!(!upper);
        assert_eq!(stratum, 1.0);
    }

    #[test]
    fn degenerate_fractions_pass_the_variate_through() {
        assert_eq!(stratify(0.0, 0.7), (false, 0.7));
        assert_eq!(stratify(1.0, 0.7), (true, 0.7));
    }
}

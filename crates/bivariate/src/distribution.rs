//! The tabulated bivariate engine
//!
//! A [`BivariateDistribution`] couples a strictly increasing primary grid
//! with one continuous tabular conditional per grid point. Queries at a
//! grid point pass straight through to the stored conditional; queries
//! between grid points combine the two bracketing conditionals according
//! to the configured [`SampleMode`].

// standard library
use std::sync::Arc;

// external crates
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_interp::Interp2D;
use mcdist_rng::RandomSource;
use mcdist_univariate::{AnyTabular, TabularUnivariate};

// internal modules
use crate::config::Tolerances;
use crate::error::{Error, Result};
use crate::policy::{
    correlated, direct, unit_base, unit_base_correlated, EdgePair, SampleMode,
};

/// One stochastic sample with the indices that produced it
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BinSample {
    /// Sampled secondary value on the intermediate grid
    pub value: f64,
    /// Secondary value drawn from the chosen conditional before any
    /// unit-base rescaling; equal to `value` at grid points and under
    /// the direct and correlated modes
    pub raw: f64,
    /// Index of the primary grid boundary that produced the sample
    pub primary_bin: usize,
    /// Segment index within that conditional
    pub secondary_bin: usize,
}

/// One primary grid point and the conditional tabulated there
///
/// Conditionals are reference counted so repeated grid points can share
/// one distribution without copying the tables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinBoundary<D> {
    primary: f64,
    conditional: Arc<D>,
}

impl<D> BinBoundary<D> {
    /// A boundary owning its conditional
    pub fn new(primary: f64, conditional: D) -> Self {
        Self {
            primary,
            conditional: Arc::new(conditional),
        }
    }

    /// A boundary sharing an already reference-counted conditional
    pub fn shared(primary: f64, conditional: Arc<D>) -> Self {
        Self {
            primary,
            conditional,
        }
    }

    /// Primary grid value of this boundary
    pub fn primary(&self) -> f64 {
        self.primary
    }

    /// The conditional distribution tabulated at this boundary
    pub fn conditional(&self) -> &D {
        self.conditional.as_ref()
    }
}

/// A tabulated conditional distribution over two variables
///
/// The workhorse behind secondary-energy and angular distributions in
/// continuous-energy transport data: `f(primary, secondary)` known only
/// on a primary grid, with a full tabular distribution in the secondary
/// variable at each grid point.
///
/// ```rust
/// # use mcdist_bivariate::{BivariateDistribution, SampleMode};
/// # use mcdist_interp::Interp2D;
/// # use mcdist_univariate::{AnyTabular, Uniform};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let conditionals = vec![
///     AnyTabular::from(Uniform::new(0.0, 2.0, 1.0)?),
///     AnyTabular::from(Uniform::new(0.0, 4.0, 1.0)?),
/// ];
/// let engine = BivariateDistribution::new(
///     [1.0, 2.0],
///     conditionals,
///     Interp2D::LIN_LIN_LIN,
///     SampleMode::UnitBase,
/// )?;
///
/// // halfway up the primary grid the support blends to [0, 3]
/// assert_eq!(engine.conditional_upper_bound(1.5), 3.0);
/// assert_eq!(engine.conditional_pdf(1.5, 1.5)?, 1.0 / 3.0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BivariateDistribution<D = AnyTabular> {
    boundaries: Vec<BinBoundary<D>>,
    interp: Interp2D,
    mode: SampleMode,
    tolerances: Tolerances,
    extend_primary: bool,
}

impl<D> BivariateDistribution<D> {
    /// Interpolation scheme applied across the primary grid
    pub fn interp(&self) -> Interp2D {
        self.interp
    }

    /// How interior primaries combine the bracketing conditionals
    pub fn mode(&self) -> SampleMode {
        self.mode
    }

    /// Numerical tolerances for fuzzy clamping and correlated evaluation
    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// The primary grid values in order
    pub fn primary_grid(&self) -> Vec<f64> {
        self.boundaries.iter().map(|b| b.primary).collect()
    }

    /// The grid boundaries with their conditionals
    pub fn bin_boundaries(&self) -> &[BinBoundary<D>] {
        &self.boundaries
    }

    /// Smallest primary value on the grid
    pub fn lower_primary_bound(&self) -> f64 {
        self.boundaries[0].primary
    }

    /// Largest primary value on the grid
    pub fn upper_primary_bound(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1].primary
    }

    /// Let out-of-range primaries use the nearest edge conditional
    pub fn extend_beyond_primary_limits(&mut self) {
        self.extend_primary = true;
    }

    /// Restore strict primary limits
    ///
    /// Toggling extension off recovers the strict behavior exactly; no
    /// state is retained from the extended phase.
    pub fn limit_to_primary_limits(&mut self) {
        self.extend_primary = false;
    }

    /// Whether out-of-range primaries delegate to the edge conditionals
    pub fn extends_beyond_primary_limits(&self) -> bool {
        self.extend_primary
    }

    /// Whether the primary dimension is defined on a tabulated grid
    ///
    /// Always true; the engine only ever resolves the primary variable
    /// against the stored grid.
    pub fn is_primary_tabular(&self) -> bool {
        true
    }

    /// Whether the primary dimension is continuous between grid points
    ///
    /// Always true; interior primaries interpolate the bracketing
    /// conditionals rather than snapping to one of them.
    pub fn is_primary_continuous(&self) -> bool {
        true
    }

    /// Whether both engines span exactly the same primary range
    ///
    /// Bounds are compared for bitwise equality, not to a tolerance.
    pub fn has_same_primary_bounds(&self, other: &Self) -> bool {
        self.lower_primary_bound() == other.lower_primary_bound()
            && self.upper_primary_bound() == other.upper_primary_bound()
    }

    /// Classify a primary value against the grid
    fn lookup(&self, primary: f64) -> Lookup {
        if !(primary >= self.lower_primary_bound()) {
            return Lookup::Below;
        }
        if primary > self.upper_primary_bound() {
            return Lookup::Above;
        }
        let above = self.boundaries.partition_point(|b| b.primary < primary);
        let bin = above.saturating_sub(1);
        let x = (self.boundaries[bin].primary, self.boundaries[bin + 1].primary);
        Lookup::Inside {
            bin,
            fraction: self.interp.primary_fraction(x, primary),
        }
    }

    /// Resolve a primary value to a conditional or a bracketing pair
    ///
    /// Fractions of exactly 0.0 and 1.0 collapse to the grid-point
    /// conditional so boundary queries never take a blending path.
    fn resolve(&self, primary: f64) -> Resolved<'_, D> {
        match self.lookup(primary) {
            Lookup::Below if self.extend_primary => self.exact(0),
            Lookup::Above if self.extend_primary => self.exact(self.boundaries.len() - 1),
            Lookup::Below | Lookup::Above => Resolved::Outside,
            Lookup::Inside { bin, fraction } => {
                if fraction == 0.0 {
                    self.exact(bin)
                } else if fraction == 1.0 {
                    self.exact(bin + 1)
                } else {
                    Resolved::Pair { bin, fraction }
                }
            }
        }
    }

    fn exact(&self, index: usize) -> Resolved<'_, D> {
        Resolved::Exact {
            index,
            conditional: self.boundaries[index].conditional.as_ref(),
        }
    }

    fn edge_pair(&self, bin: usize, fraction: f64) -> EdgePair<'_, D> {
        EdgePair {
            interp: self.interp,
            tolerances: self.tolerances,
            fraction,
            lower: self.boundaries[bin].conditional.as_ref(),
            upper: self.boundaries[bin + 1].conditional.as_ref(),
        }
    }

    fn out_of_range(&self, primary: f64) -> Error {
        Error::PrimaryOutOfRange {
            value: primary,
            lower: self.lower_primary_bound(),
            upper: self.upper_primary_bound(),
        }
    }
}

impl<D: TabularUnivariate> BivariateDistribution<D> {
    /// An engine from parallel primary and conditional arrays
    ///
    /// The grid must be strictly increasing and finite, with one
    /// continuous tabular conditional per grid point and at least two
    /// grid points.
    pub fn new(
        primary_grid: impl Into<Vec<f64>>,
        conditionals: Vec<D>,
        interp: Interp2D,
        mode: SampleMode,
    ) -> Result<Self> {
        let primary_grid = primary_grid.into();
        if primary_grid.len() != conditionals.len() {
            return Err(Error::LengthMismatch {
                grid: primary_grid.len(),
                conditionals: conditionals.len(),
            });
        }
        let boundaries = primary_grid
            .into_iter()
            .zip(conditionals)
            .map(|(primary, conditional)| BinBoundary::new(primary, conditional))
            .collect();
        Self::from_bin_boundaries(boundaries, interp, mode)
    }

    /// An engine from pre-built boundaries, sharing their conditionals
    pub fn from_bin_boundaries(
        boundaries: Vec<BinBoundary<D>>,
        interp: Interp2D,
        mode: SampleMode,
    ) -> Result<Self> {
        if boundaries.len() < 2 {
            return Err(Error::InsufficientBoundaries {
                found: boundaries.len(),
            });
        }
        for (index, boundary) in boundaries.iter().enumerate() {
            if !boundary.primary.is_finite() {
                return Err(Error::UndefinedPrimary { index });
            }
            if !boundary.conditional.is_continuous() {
                return Err(Error::DiscontinuousConditional { index });
            }
        }
        if let Some((index, _)) = boundaries
            .iter()
            .tuple_windows()
            .find_position(|(a, b)| a.primary >= b.primary)
        {
            return Err(Error::GridNotIncreasing { index: index + 1 });
        }

        Ok(Self {
            boundaries,
            interp,
            mode,
            tolerances: Tolerances::default(),
            extend_primary: false,
        })
    }

    /// Replace the evaluation tolerances
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Check every conditional support against the secondary scale
    ///
    /// Not run at construction; callers working with log or log-cosine
    /// schemes opt in once the tables are assembled.
    pub fn check_scale_compatibility(&self) -> Result<()> {
        for (index, boundary) in self.boundaries.iter().enumerate() {
            let conditional = boundary.conditional.as_ref();
            let compatible = self.interp.primary.accepts(boundary.primary)
                && self.interp.secondary.accepts(conditional.lower_bound())
                && self.interp.secondary.accepts(conditional.upper_bound());
            if !compatible {
                return Err(Error::IncompatibleScale { index });
            }
        }
        Ok(())
    }

    /// Unnormalized distribution value at `(primary, secondary)`
    ///
    /// 0.0 for any primary outside the grid (without extension) and any
    /// secondary outside the applicable support.
    pub fn evaluate(&self, primary: f64, secondary: f64) -> Result<f64> {
        self.evaluate_with(primary, secondary, |d: &D, y| d.evaluate(y))
    }

    /// Conditional probability density at `(primary, secondary)`
    pub fn conditional_pdf(&self, primary: f64, secondary: f64) -> Result<f64> {
        self.evaluate_with(primary, secondary, |d: &D, y| d.pdf(y))
    }

    fn evaluate_with<F>(&self, primary: f64, secondary: f64, eval: F) -> Result<f64>
    where
        F: Fn(&D, f64) -> f64 + Copy,
    {
        match self.resolve(primary) {
            Resolved::Outside => Ok(0.0),
            Resolved::Exact { conditional, .. } => Ok(eval(conditional, secondary)),
            Resolved::Pair { bin, fraction } => {
                let pair = self.edge_pair(bin, fraction);
                match self.mode {
                    SampleMode::Direct => Ok(direct::evaluate(&pair, secondary, eval)),
                    SampleMode::UnitBase => Ok(unit_base::evaluate(&pair, secondary, eval)),
                    SampleMode::Correlated => correlated::evaluate(&pair, secondary, eval),
                    SampleMode::UnitBaseCorrelated => {
                        unit_base_correlated::evaluate(&pair, secondary, eval)
                    }
                }
            }
        }
    }

    /// Conditional cumulative probability at `(primary, secondary)`
    ///
    /// 0.0 below the applicable support and 1.0 above it. Under the
    /// correlated modes this is the matched cumulative variate itself.
    pub fn conditional_cdf(&self, primary: f64, secondary: f64) -> Result<f64> {
        match self.resolve(primary) {
            Resolved::Outside => Ok(0.0),
            Resolved::Exact { conditional, .. } => Ok(conditional.cdf(secondary)),
            Resolved::Pair { bin, fraction } => {
                let pair = self.edge_pair(bin, fraction);
                match self.mode {
                    SampleMode::Direct => Ok(direct::evaluate_cdf(&pair, secondary)),
                    SampleMode::UnitBase => Ok(unit_base::evaluate_cdf(&pair, secondary)),
                    SampleMode::Correlated => correlated::evaluate_cdf(&pair, secondary),
                    SampleMode::UnitBaseCorrelated => {
                        unit_base_correlated::evaluate_cdf(&pair, secondary)
                    }
                }
            }
        }
    }

    /// Sample the conditional distribution at `primary`
    pub fn sample(&self, primary: f64, source: &mut dyn RandomSource) -> Result<f64> {
        Ok(self.sample_and_record_bins(primary, source)?.value)
    }

    /// [`sample`](Self::sample), counting the attempt
    ///
    /// The counter advances on every call, the out-of-range error path
    /// included.
    pub fn sample_and_record_trials(
        &self,
        primary: f64,
        source: &mut dyn RandomSource,
        trials: &mut u64,
    ) -> Result<f64> {
        *trials += 1;
        self.sample(primary, source)
    }

    /// [`sample`](Self::sample), reporting the indices that produced it
    pub fn sample_and_record_bins(
        &self,
        primary: f64,
        source: &mut dyn RandomSource,
    ) -> Result<BinSample> {
        match self.resolve(primary) {
            Resolved::Outside => Err(self.out_of_range(primary)),
            Resolved::Exact { index, conditional } => {
                let (value, secondary_bin) =
                    conditional.sample_bin_with_random_number(source.next());
                Ok(BinSample {
                    value,
                    raw: value,
                    primary_bin: index,
                    secondary_bin,
                })
            }
            Resolved::Pair { bin, fraction } => {
                let pair = self.edge_pair(bin, fraction);
                let sample = match self.mode {
                    SampleMode::Direct => direct::sample(&pair, source),
                    SampleMode::UnitBase => unit_base::sample(&pair, source),
                    SampleMode::Correlated => correlated::sample(&pair, source),
                    SampleMode::UnitBaseCorrelated => unit_base_correlated::sample(&pair, source),
                };
                Ok(BinSample {
                    value: sample.value,
                    raw: sample.raw,
                    primary_bin: bin + sample.upper_edge as usize,
                    secondary_bin: sample.secondary_bin,
                })
            }
        }
    }

    /// Deterministic sample from one cumulative variate
    pub fn sample_with_random_number(&self, primary: f64, random: f64) -> Result<f64> {
        debug_assert!(
            (0.0..=1.0).contains(&random),
            "random number {random} outside the unit interval"
        );
        match self.resolve(primary) {
            Resolved::Outside => Err(self.out_of_range(primary)),
            Resolved::Exact { conditional, .. } => Ok(conditional.sample_with_random_number(random)),
            Resolved::Pair { bin, fraction } => {
                let pair = self.edge_pair(bin, fraction);
                let sample = match self.mode {
                    SampleMode::Direct => direct::sample_with_random_number(&pair, random),
                    SampleMode::UnitBase => unit_base::sample_with_random_number(&pair, random),
                    SampleMode::Correlated => correlated::sample_with_random_number(&pair, random),
                    SampleMode::UnitBaseCorrelated => {
                        unit_base_correlated::sample_with_random_number(&pair, random)
                    }
                };
                Ok(sample.value)
            }
        }
    }

    /// Sample the conditional at `primary` restricted to `[lo, max_secondary]`
    ///
    /// A limit at or above the natural upper bound consumes the same
    /// draws and returns the same sample as the unrestricted call; a
    /// limit below the applicable lower bound is an error.
    pub fn sample_in_subrange(
        &self,
        primary: f64,
        source: &mut dyn RandomSource,
        max_secondary: f64,
    ) -> Result<f64> {
        match self.resolve(primary) {
            Resolved::Outside => Err(self.out_of_range(primary)),
            Resolved::Exact { conditional, .. } => {
                self.check_subrange(max_secondary, conditional.lower_bound())?;
                Ok(conditional.sample_in_subrange(source, max_secondary))
            }
            Resolved::Pair { bin, fraction } => {
                let pair = self.edge_pair(bin, fraction);
                self.check_subrange(max_secondary, self.pair_lower_bound(&pair))?;
                let value = match self.mode {
                    SampleMode::Direct => direct::sample_in_subrange(&pair, source, max_secondary),
                    SampleMode::UnitBase => {
                        unit_base::sample_in_subrange(&pair, source, max_secondary)
                    }
                    SampleMode::Correlated => {
                        correlated::sample_in_subrange(&pair, source, max_secondary)
                    }
                    SampleMode::UnitBaseCorrelated => {
                        unit_base_correlated::sample_in_subrange(&pair, source, max_secondary)
                    }
                };
                Ok(value)
            }
        }
    }

    /// Deterministic form of [`sample_in_subrange`](Self::sample_in_subrange)
    pub fn sample_with_random_number_in_subrange(
        &self,
        primary: f64,
        random: f64,
        max_secondary: f64,
    ) -> Result<f64> {
        debug_assert!(
            (0.0..=1.0).contains(&random),
            "random number {random} outside the unit interval"
        );
        match self.resolve(primary) {
            Resolved::Outside => Err(self.out_of_range(primary)),
            Resolved::Exact { conditional, .. } => {
                self.check_subrange(max_secondary, conditional.lower_bound())?;
                Ok(conditional.sample_with_random_number_in_subrange(random, max_secondary))
            }
            Resolved::Pair { bin, fraction } => {
                let pair = self.edge_pair(bin, fraction);
                self.check_subrange(max_secondary, self.pair_lower_bound(&pair))?;
                let value = match self.mode {
                    SampleMode::Direct => {
                        direct::sample_with_random_number_in_subrange(&pair, random, max_secondary)
                    }
                    SampleMode::UnitBase => unit_base::sample_with_random_number_in_subrange(
                        &pair,
                        random,
                        max_secondary,
                    ),
                    SampleMode::Correlated => correlated::sample_with_random_number_in_subrange(
                        &pair,
                        random,
                        max_secondary,
                    ),
                    SampleMode::UnitBaseCorrelated => {
                        unit_base_correlated::sample_with_random_number_in_subrange(
                            &pair,
                            random,
                            max_secondary,
                        )
                    }
                };
                Ok(value)
            }
        }
    }

    /// Lower secondary support bound at `primary`
    ///
    /// 0.0 outside the grid without extension. Interior primaries report
    /// the intermediate support, except under Direct, which spans the
    /// union of the edge supports.
    pub fn conditional_lower_bound(&self, primary: f64) -> f64 {
        match self.resolve(primary) {
            Resolved::Outside => 0.0,
            Resolved::Exact { conditional, .. } => conditional.lower_bound(),
            Resolved::Pair { bin, fraction } => {
                let pair = self.edge_pair(bin, fraction);
                match self.mode {
                    SampleMode::Direct => {
                        let (s0, s1) = pair.supports();
                        s0.0.min(s1.0)
                    }
                    _ => pair.intermediate_support().0,
                }
            }
        }
    }

    /// Upper secondary support bound at `primary`
    pub fn conditional_upper_bound(&self, primary: f64) -> f64 {
        match self.resolve(primary) {
            Resolved::Outside => 0.0,
            Resolved::Exact { conditional, .. } => conditional.upper_bound(),
            Resolved::Pair { bin, fraction } => {
                let pair = self.edge_pair(bin, fraction);
                match self.mode {
                    SampleMode::Direct => {
                        let (s0, s1) = pair.supports();
                        s0.1.max(s1.1)
                    }
                    _ => pair.intermediate_support().1,
                }
            }
        }
    }

    fn pair_lower_bound(&self, pair: &EdgePair<'_, D>) -> f64 {
        match self.mode {
            SampleMode::Direct => {
                let (s0, s1) = pair.supports();
                s0.0.min(s1.0)
            }
            _ => pair.intermediate_support().0,
        }
    }

    fn check_subrange(&self, requested: f64, lower: f64) -> Result<()> {
        if !(requested >= lower) {
            return Err(Error::SubrangeBelowSupport { requested, lower });
        }
        Ok(())
    }
}

impl<D: Serialize> BivariateDistribution<D> {
    /// Serialize the full engine state to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<D: DeserializeOwned> BivariateDistribution<D> {
    /// Rebuild an engine from its [`to_json`](Self::to_json) form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Where a primary value falls on the grid
enum Lookup {
    Below,
    Above,
    Inside { bin: usize, fraction: f64 },
}

/// A primary value resolved against the extension toggle
enum Resolved<'a, D> {
    Outside,
    Exact { index: usize, conditional: &'a D },
    Pair { bin: usize, fraction: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcdist_univariate::{Delta, Uniform};

    fn uniforms() -> Vec<AnyTabular> {
        vec![
            Uniform::new(0.0, 2.0, 1.0).unwrap().into(),
            Uniform::new(0.0, 4.0, 1.0).unwrap().into(),
        ]
    }

    #[test]
    fn construction_rejects_malformed_grids() {
        let err = BivariateDistribution::new(
            vec![1.0],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { grid: 1, conditionals: 2 }));

        let err = BivariateDistribution::new(
            vec![2.0, 1.0],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap_err();
        assert!(matches!(err, Error::GridNotIncreasing { index: 1 }));

        let err = BivariateDistribution::new(
            vec![1.0, f64::NAN],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UndefinedPrimary { index: 1 }));
    }

    #[test]
    fn point_mass_conditionals_are_rejected() {
        let conditionals: Vec<AnyTabular> = vec![
            Uniform::new(0.0, 2.0, 1.0).unwrap().into(),
            Delta::new(1.0, 1.0).unwrap().into(),
        ];
        let err = BivariateDistribution::new(
            vec![1.0, 2.0],
            conditionals,
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DiscontinuousConditional { index: 1 }));
    }

    #[test]
    fn grid_point_queries_collapse_to_the_stored_conditional() {
        let engine = BivariateDistribution::new(
            vec![1.0, 2.0],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap();

        assert_eq!(engine.conditional_pdf(1.0, 1.0).unwrap(), 0.5);
        assert_eq!(engine.conditional_pdf(2.0, 1.0).unwrap(), 0.25);
        assert_eq!(engine.conditional_upper_bound(2.0), 4.0);
    }

    #[test]
    fn extension_toggle_round_trips() {
        let mut engine = BivariateDistribution::new(
            vec![1.0, 2.0],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap();

        assert_eq!(engine.evaluate(0.5, 1.0).unwrap(), 0.0);
        engine.extend_beyond_primary_limits();
        assert_eq!(engine.evaluate(0.5, 1.0).unwrap(), 1.0);
        engine.limit_to_primary_limits();
        assert_eq!(engine.evaluate(0.5, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn scale_compatibility_is_an_explicit_check() {
        let engine = BivariateDistribution::new(
            vec![1.0, 2.0],
            uniforms(),
            Interp2D::LOG_LOG_LOG,
            SampleMode::UnitBase,
        )
        .unwrap();

        // lower support bound of 0.0 is outside the log domain
        let err = engine.check_scale_compatibility().unwrap_err();
        assert!(matches!(err, Error::IncompatibleScale { index: 0 }));
    }

    #[test]
    fn primary_bounds_compare_exactly() {
        let reference = BivariateDistribution::new(
            vec![1.0, 2.0],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap();
        let twin = BivariateDistribution::new(
            vec![1.0, 2.0],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap();
        assert!(reference.has_same_primary_bounds(&twin));

        // not a tolerant comparison; any offset separates the engines
        let nudged = BivariateDistribution::new(
            vec![1.0, 2.0 + 1e-11],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap();
        assert!(!reference.has_same_primary_bounds(&nudged));
    }

    #[test]
    fn primary_dimension_is_tabular_and_continuous() {
        let engine = BivariateDistribution::new(
            vec![1.0, 2.0],
            uniforms(),
            Interp2D::LIN_LIN_LIN,
            SampleMode::UnitBase,
        )
        .unwrap();
        assert!(engine.is_primary_tabular());
        assert!(engine.is_primary_continuous());
    }
}

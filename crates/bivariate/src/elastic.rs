//! Bivariate coupled elastic scattering distribution
//!
//! A thin wrapper fixing the conditional type to
//! [`CoupledElastic`], the energy-dependent angular distribution used
//! for elastic scattering: a tabulated cosine table below the cutoff
//! cosine coupled to a screened-Rutherford tail above it.

// standard library
use std::ops::{Deref, DerefMut};

// external crates
use serde::{Deserialize, Serialize};

// mcdist modules
use mcdist_interp::Interp2D;
use mcdist_univariate::CoupledElastic;

// internal modules
use crate::config::Tolerances;
use crate::distribution::BivariateDistribution;
use crate::error::{Error, Result};
use crate::policy::SampleMode;

/// An energy grid of coupled elastic angular distributions
///
/// Dereferences to the underlying [`BivariateDistribution`], so every
/// engine operation is available directly. The primary variable is the
/// incident energy and the secondary variable the scattering cosine.
///
/// ```rust
/// # use mcdist_bivariate::{ElasticBivariate, SampleMode};
/// # use mcdist_interp::{Interp2D, CUTOFF_COSINE};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let elastic = ElasticBivariate::from_grids(
///     vec![1.0, 10.0],
///     vec![
///         vec![-1.0, 0.0, CUTOFF_COSINE],
///         vec![-1.0, 0.0, CUTOFF_COSINE],
///     ],
///     vec![vec![0.5, 0.5, 0.5], vec![0.1, 0.3, 0.9]],
///     1e-6,
///     0.9,
///     Interp2D::LIN_NUDGED_LOGCOS_LIN,
///     SampleMode::UnitBase,
/// )?;
///
/// assert_eq!(elastic.cutoff_cosine(), 0.999999);
/// assert_eq!(elastic.conditional_upper_bound(1.0), 1.0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElasticBivariate(BivariateDistribution<CoupledElastic>);

impl ElasticBivariate {
    /// A distribution from pre-built elastic conditionals
    pub fn new(
        primary_grid: impl Into<Vec<f64>>,
        conditionals: Vec<CoupledElastic>,
        interp: Interp2D,
        mode: SampleMode,
    ) -> Result<Self> {
        Ok(Self(BivariateDistribution::new(
            primary_grid,
            conditionals,
            interp,
            mode,
        )?))
    }

    /// [`new`](Self::new) with the fuzzy-boundary and relative-error
    /// tolerances overridden
    pub fn with_tolerances(
        primary_grid: impl Into<Vec<f64>>,
        conditionals: Vec<CoupledElastic>,
        interp: Interp2D,
        mode: SampleMode,
        fuzzy_boundary: f64,
        relative_error: f64,
    ) -> Result<Self> {
        let tolerances = Tolerances::default()
            .with_fuzzy_boundary(fuzzy_boundary)?
            .with_relative_error(relative_error)?;
        let distribution = BivariateDistribution::new(primary_grid, conditionals, interp, mode)?
            .with_tolerances(tolerances);
        Ok(Self(distribution))
    }

    /// Build one elastic conditional per primary grid point
    ///
    /// Every cosine grid must end exactly at the cutoff cosine; the
    /// screening parameter and cutoff ratio are shared across the grid.
    pub fn from_grids(
        primary_grid: impl Into<Vec<f64>>,
        cosine_grids: Vec<Vec<f64>>,
        value_grids: Vec<Vec<f64>>,
        eta: f64,
        cutoff_ratio: f64,
        interp: Interp2D,
        mode: SampleMode,
    ) -> Result<Self> {
        if cosine_grids.len() != value_grids.len() {
            return Err(Error::LengthMismatch {
                grid: cosine_grids.len(),
                conditionals: value_grids.len(),
            });
        }
        let conditionals = cosine_grids
            .into_iter()
            .zip(value_grids)
            .map(|(cosines, values)| CoupledElastic::new(cosines, values, eta, cutoff_ratio))
            .collect::<mcdist_univariate::Result<Vec<_>>>()?;
        Self::new(primary_grid, conditionals, interp, mode)
    }

    /// The cosine separating the tabulated part from the analytic tail
    pub fn cutoff_cosine(&self) -> f64 {
        self.0.bin_boundaries()[0].conditional().cutoff_cosine()
    }
}

impl Deref for ElasticBivariate {
    type Target = BivariateDistribution<CoupledElastic>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ElasticBivariate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

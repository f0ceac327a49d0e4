// external crates
use serde::{Deserialize, Serialize};

// internal modules
use crate::error::{Error, Result};

/// Numerical tolerances of the bivariate engine
///
/// The fuzzy boundary absorbs floating-point spill when a secondary value
/// sits on the edge of a unit-base mapped support. The error pair bounds
/// the residual of correlated common-variate lookups, which bisect until
/// the match is within `error` absolutely or `relative_error` of the
/// target, giving up after `max_iterations`.
///
/// ```rust
/// # use mcdist_bivariate::Tolerances;
/// let tolerances = Tolerances::default();
/// assert_eq!(tolerances.fuzzy_boundary(), 1e-3);
/// assert_eq!(tolerances.max_iterations(), 500);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    fuzzy_boundary: f64,
    relative_error: f64,
    error: f64,
    max_iterations: u32,
}

impl Tolerances {
    /// Fully specified tolerances, each fraction range-checked into `[0, 1)`
    pub fn new(
        fuzzy_boundary: f64,
        relative_error: f64,
        error: f64,
        max_iterations: u32,
    ) -> Result<Self> {
        Self::check("fuzzy_boundary", fuzzy_boundary)?;
        Self::check("relative_error", relative_error)?;
        Self::check("error", error)?;
        if max_iterations == 0 {
            return Err(Error::InvalidTolerance {
                name: "max_iterations".to_string(),
                value: 0.0,
            });
        }
        Ok(Self {
            fuzzy_boundary,
            relative_error,
            error,
            max_iterations,
        })
    }

    /// Replace the fuzzy boundary tolerance
    pub fn with_fuzzy_boundary(mut self, value: f64) -> Result<Self> {
        Self::check("fuzzy_boundary", value)?;
        self.fuzzy_boundary = value;
        Ok(self)
    }

    /// Replace the relative error bound on correlated lookups
    pub fn with_relative_error(mut self, value: f64) -> Result<Self> {
        Self::check("relative_error", value)?;
        self.relative_error = value;
        Ok(self)
    }

    /// Tolerance on secondary values spilling just outside a support
    pub fn fuzzy_boundary(&self) -> f64 {
        self.fuzzy_boundary
    }

    /// Relative convergence bound on correlated lookups
    pub fn relative_error(&self) -> f64 {
        self.relative_error
    }

    /// Absolute convergence bound on correlated lookups
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Iteration cap before a correlated lookup refuses to converge
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn check(name: &str, value: f64) -> Result<()> {
        if !(0.0..1.0).contains(&value) {
            return Err(Error::InvalidTolerance {
                name: name.to_string(),
                value,
            });
        }
        Ok(())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            fuzzy_boundary: 1e-3,
            relative_error: 1e-7,
            error: 1e-16,
            max_iterations: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let tolerances = Tolerances::default();
        assert_eq!(tolerances.relative_error(), 1e-7);
        assert_eq!(tolerances.error(), 1e-16);
    }

    #[test]
    fn rejects_fractions_outside_the_unit_interval() {
        assert!(matches!(
            Tolerances::new(1.0, 1e-7, 1e-16, 500),
            Err(Error::InvalidTolerance { .. })
        ));
        assert!(matches!(
            Tolerances::default().with_relative_error(-0.1),
            Err(Error::InvalidTolerance { .. })
        ));
        assert!(matches!(
            Tolerances::new(1e-3, 1e-7, 1e-16, 0),
            Err(Error::InvalidTolerance { .. })
        ));
    }
}

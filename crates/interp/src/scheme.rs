// external crates
use log::warn;
use serde::{Deserialize, Serialize};

// internal modules
use crate::scale::Scale;

/// An interpolation scheme for a tabulated bivariate grid
///
/// Bundles one [`Scale`] per grid direction. The conventional name reads
/// dependent-secondary-primary, so `LOG_LOGCOS_LOG` processes the dependent
/// value logarithmically, the secondary variable (an angle cosine) with the
/// log-cosine transform, and the primary variable (an energy)
/// logarithmically.
///
/// Everything here works on plain `f64` values; the caller owns the grid
/// storage and passes closures where edge distributions need evaluating.
///
/// ```rust
/// # use mcdist_interp::Interp2D;
/// let scheme = Interp2D::LIN_LIN_LIN;
///
/// // halfway between the primary grid points, blending two flat grids
/// let result = scheme.interpolate((1.0, 2.0), 1.5, 0.3, |_| 4.0, |_| 8.0);
/// assert_eq!(result, 6.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interp2D {
    /// Scale of the dependent (tabulated) value
    pub dependent: Scale,
    /// Scale of the secondary independent variable
    pub secondary: Scale,
    /// Scale of the primary independent variable
    pub primary: Scale,
}

impl Interp2D {
    /// Linear on every axis
    pub const LIN_LIN_LIN: Self = Self::new(Scale::Lin, Scale::Lin, Scale::Lin);
    /// Linear dependent and secondary, log primary
    pub const LIN_LIN_LOG: Self = Self::new(Scale::Lin, Scale::Lin, Scale::Log);
    /// Linear dependent, log secondary, linear primary
    pub const LIN_LOG_LIN: Self = Self::new(Scale::Lin, Scale::Log, Scale::Lin);
    /// Linear dependent, log secondary and primary
    pub const LIN_LOG_LOG: Self = Self::new(Scale::Lin, Scale::Log, Scale::Log);
    /// Log dependent, linear secondary and primary
    pub const LOG_LIN_LIN: Self = Self::new(Scale::Log, Scale::Lin, Scale::Lin);
    /// Log dependent, linear secondary, log primary
    pub const LOG_LIN_LOG: Self = Self::new(Scale::Log, Scale::Lin, Scale::Log);
    /// Log dependent and secondary, linear primary
    pub const LOG_LOG_LIN: Self = Self::new(Scale::Log, Scale::Log, Scale::Lin);
    /// Log on every axis
    pub const LOG_LOG_LOG: Self = Self::new(Scale::Log, Scale::Log, Scale::Log);
    /// Linear dependent, log-cosine secondary, linear primary
    pub const LIN_LOGCOS_LIN: Self = Self::new(Scale::Lin, Scale::LogCos, Scale::Lin);
    /// Log dependent, log-cosine secondary, log primary
    pub const LOG_LOGCOS_LOG: Self = Self::new(Scale::Log, Scale::LogCos, Scale::Log);
    /// Linear dependent, nudged log-cosine secondary, linear primary
    pub const LIN_NUDGED_LOGCOS_LIN: Self = Self::new(Scale::Lin, Scale::NudgedLogCos, Scale::Lin);
    /// Log dependent, nudged log-cosine secondary, log primary
    pub const LOG_NUDGED_LOGCOS_LOG: Self = Self::new(Scale::Log, Scale::NudgedLogCos, Scale::Log);

    /// A scheme from its three axis scales, named dependent-secondary-primary
    pub const fn new(dependent: Scale, secondary: Scale, primary: Scale) -> Self {
        Self {
            dependent,
            secondary,
            primary,
        }
    }

    /// Process a primary grid value
    pub fn process_primary(&self, x: f64) -> f64 {
        self.primary.process(x)
    }

    /// Process a secondary grid value
    pub fn process_secondary(&self, y: f64) -> f64 {
        self.secondary.process(y)
    }

    /// Recover a secondary grid value from processed space
    pub fn recover_secondary(&self, processed: f64) -> f64 {
        self.secondary.recover(processed)
    }

    /// Process a dependent value
    pub fn process_dependent(&self, z: f64) -> f64 {
        self.dependent.process(z)
    }

    /// Recover a dependent value from processed space
    pub fn recover_dependent(&self, processed: f64) -> f64 {
        self.dependent.recover(processed)
    }

    /// Interpolation fraction of `at` between the primary values `x`
    ///
    /// Computed in processed primary space. Exactly `0.0` when `at` is the
    /// lower value and exactly `1.0` when it is the upper, so grid-boundary
    /// queries never blend.
    pub fn primary_fraction(&self, x: (f64, f64), at: f64) -> f64 {
        self.fraction_processed(
            self.primary.process(x.0),
            self.primary.process(x.1),
            self.primary.process(at),
        )
    }

    /// Interpolation fraction from already-processed primary values
    pub fn fraction_processed(&self, px0: f64, px1: f64, px: f64) -> f64 {
        debug_assert!(px1 > px0, "processed primary grid values must increase");
        (px - px0) / (px1 - px0)
    }

    /// Interpolate two dependent values in processed dependent space
    ///
    /// Tabulated densities legitimately reach zero, where a log transform is
    /// undefined, so a nonpositive value on a log dependent axis falls back
    /// to linear blending.
    pub fn blend_dependent(&self, fraction: f64, z0: f64, z1: f64) -> f64 {
        if fraction == 0.0 {
            return z0;
        }
        if fraction == 1.0 {
            return z1;
        }
        if self.dependent != Scale::Lin && (z0 <= 0.0 || z1 <= 0.0) {
            return z0 + fraction * (z1 - z0);
        }
        let p0 = self.dependent.process(z0);
        let p1 = self.dependent.process(z1);
        self.dependent.recover(p0 + fraction * (p1 - p0))
    }

    /// Interpolate two secondary coordinates in processed secondary space
    ///
    /// This is the blend used on sampled secondary values and on support
    /// limits. The same nonpositive-value fallback as
    /// [`blend_dependent`](Self::blend_dependent) applies to log secondary
    /// axes.
    pub fn interpolate_secondary(&self, fraction: f64, y0: f64, y1: f64) -> f64 {
        if fraction == 0.0 {
            return y0;
        }
        if fraction == 1.0 {
            return y1;
        }
        if self.secondary == Scale::Log && (y0 <= 0.0 || y1 <= 0.0) {
            return y0 + fraction * (y1 - y0);
        }
        let p0 = self.secondary.process(y0);
        let p1 = self.secondary.process(y1);
        self.secondary.recover(p0 + fraction * (p1 - p0))
    }

    /// Evaluate both edge grids at the same secondary value and blend
    pub fn interpolate<F0, F1>(&self, x: (f64, f64), at: f64, y: f64, eval0: F0, eval1: F1) -> f64
    where
        F0: FnOnce(f64) -> f64,
        F1: FnOnce(f64) -> f64,
    {
        let fraction = self.primary_fraction(x, at);
        self.blend_dependent(fraction, eval0(y), eval1(y))
    }

    /// [`interpolate`](Self::interpolate) from already-processed primary values
    pub fn interpolate_processed<F0, F1>(
        &self,
        px: (f64, f64),
        pat: f64,
        y: f64,
        eval0: F0,
        eval1: F1,
    ) -> f64
    where
        F0: FnOnce(f64) -> f64,
        F1: FnOnce(f64) -> f64,
    {
        let fraction = self.fraction_processed(px.0, px.1, pat);
        self.blend_dependent(fraction, eval0(y), eval1(y))
    }

    /// Signed processed length of a secondary support
    ///
    /// Negative under the cosine transforms, which decrease with the raw
    /// value. All unit-base arithmetic carries the sign through
    /// consistently.
    pub fn grid_length(&self, support: (f64, f64)) -> f64 {
        self.secondary.process(support.1) - self.secondary.process(support.0)
    }

    /// Processed length of the intermediate grid at `at`
    pub fn intermediate_grid_length(&self, x: (f64, f64), at: f64, len0: f64, len1: f64) -> f64 {
        self.intermediate_grid_length_processed(self.primary_fraction(x, at), len0, len1)
    }

    /// [`intermediate_grid_length`](Self::intermediate_grid_length) from a
    /// precomputed fraction
    pub fn intermediate_grid_length_processed(&self, fraction: f64, len0: f64, len1: f64) -> f64 {
        len0 + fraction * (len1 - len0)
    }

    /// Secondary support of the intermediate grid at `at`
    ///
    /// Limits are blended in processed secondary space. On a primary grid
    /// boundary the edge support is returned untouched.
    pub fn intermediate_grid_limits(
        &self,
        x: (f64, f64),
        at: f64,
        support0: (f64, f64),
        support1: (f64, f64),
    ) -> (f64, f64) {
        let fraction = self.primary_fraction(x, at);
        if fraction == 0.0 {
            return support0;
        }
        if fraction == 1.0 {
            return support1;
        }
        (
            self.interpolate_secondary(fraction, support0.0, support1.0),
            self.interpolate_secondary(fraction, support0.1, support1.1),
        )
    }

    /// Unit-base coordinate of `y` on a support of processed `length`
    ///
    /// `eta = (process(y) - process(min)) / length`, which lands in `[0, 1]`
    /// for any `y` inside the support. Floating-point spill just past either
    /// end is clamped when within `fuzzy_tol`; anything further out is still
    /// clamped, but loudly, since it means the caller's support bookkeeping
    /// disagrees with the query.
    pub fn unit_base_fraction(&self, y: f64, min: f64, length: f64, fuzzy_tol: f64) -> f64 {
        debug_assert!(length != 0.0, "secondary support has zero processed length");
        let eta = (self.secondary.process(y) - self.secondary.process(min)) / length;
        if (0.0..=1.0).contains(&eta) {
            return eta;
        }
        if eta < 0.0 && eta >= -fuzzy_tol {
            return 0.0;
        }
        if eta > 1.0 && eta <= 1.0 + fuzzy_tol {
            return 1.0;
        }
        warn!("unit base fraction {eta:e} clamped from beyond the fuzzy tolerance {fuzzy_tol:e}");
        eta.clamp(0.0, 1.0)
    }

    /// Secondary value at unit-base coordinate `eta` on a support
    ///
    /// Inverse of [`unit_base_fraction`](Self::unit_base_fraction); `eta` of
    /// exactly `0.0` returns the support minimum untouched.
    pub fn secondary_from_fraction(&self, eta: f64, min: f64, length: f64) -> f64 {
        if eta == 0.0 {
            return min;
        }
        self.secondary
            .recover(self.secondary.process(min) + eta * length)
    }

    /// Full unit-base evaluation between two edge grids
    ///
    /// Maps `y` onto the intermediate support, evaluates each edge at its
    /// own mapped coordinate, scales each density by its processed grid
    /// length, blends, and normalises by the intermediate length. On a
    /// primary grid boundary the matching edge is evaluated directly.
    pub fn interpolate_unit_base<F0, F1>(
        &self,
        x: (f64, f64),
        at: f64,
        y: f64,
        support0: (f64, f64),
        support1: (f64, f64),
        eval0: F0,
        eval1: F1,
        fuzzy_tol: f64,
    ) -> f64
    where
        F0: FnOnce(f64) -> f64,
        F1: FnOnce(f64) -> f64,
    {
        let fraction = self.primary_fraction(x, at);
        self.interpolate_unit_base_processed(
            fraction, y, support0, support1, eval0, eval1, fuzzy_tol,
        )
    }

    /// [`interpolate_unit_base`](Self::interpolate_unit_base) from a
    /// precomputed fraction
    pub fn interpolate_unit_base_processed<F0, F1>(
        &self,
        fraction: f64,
        y: f64,
        support0: (f64, f64),
        support1: (f64, f64),
        eval0: F0,
        eval1: F1,
        fuzzy_tol: f64,
    ) -> f64
    where
        F0: FnOnce(f64) -> f64,
        F1: FnOnce(f64) -> f64,
    {
        if fraction == 0.0 {
            return eval0(y);
        }
        if fraction == 1.0 {
            return eval1(y);
        }

        let len0 = self.grid_length(support0);
        let len1 = self.grid_length(support1);
        let len = self.intermediate_grid_length_processed(fraction, len0, len1);
        let lower = self.interpolate_secondary(fraction, support0.0, support1.0);

        let eta = self.unit_base_fraction(y, lower, len, fuzzy_tol);
        let y0 = self.secondary_from_fraction(eta, support0.0, len0);
        let y1 = self.secondary_from_fraction(eta, support1.0, len1);

        // densities transform with the absolute processed lengths
        let z0 = eval0(y0) * len0.abs();
        let z1 = eval1(y1) * len1.abs();
        self.blend_dependent(fraction, z0, z1) / len.abs()
    }
}

impl std::fmt::Display for Interp2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.dependent, self.secondary, self.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fractions_are_exact_on_the_edges() {
        let scheme = Interp2D::LOG_LOG_LOG;
        assert_eq!(scheme.primary_fraction((1.0, 10.0), 1.0), 0.0);
        assert_eq!(scheme.primary_fraction((1.0, 10.0), 10.0), 1.0);

        let lin = Interp2D::LIN_LIN_LIN;
        assert_eq!(lin.primary_fraction((1.0, 2.0), 1.5), 0.5);
    }

    #[test]
    fn log_blending_is_geometric() {
        let scheme = Interp2D::LOG_LIN_LIN;
        assert_relative_eq!(
            scheme.blend_dependent(0.5, 1.0, 100.0),
            10.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn zero_densities_fall_back_to_linear() {
        let scheme = Interp2D::LOG_LOG_LOG;
        assert_eq!(scheme.blend_dependent(0.5, 0.0, 100.0), 50.0);
        assert_eq!(scheme.blend_dependent(0.25, 0.0, 0.0), 0.0);
    }

    #[test]
    fn scheme_names_read_dependent_secondary_primary() {
        assert_eq!(Interp2D::LOG_LOGCOS_LOG.to_string(), "LogLogCosLog");
        assert_eq!(
            Interp2D::LOG_NUDGED_LOGCOS_LOG.to_string(),
            "LogNudgedLogCosLog"
        );
        assert_eq!(Interp2D::LIN_LIN_LIN.to_string(), "LinLinLin");
    }

    #[test]
    fn cosine_supports_have_negative_length() {
        let scheme = Interp2D::LOG_NUDGED_LOGCOS_LOG;
        assert!(scheme.grid_length((-1.0, 1.0)) < 0.0);

        // the unit base coordinate still runs 0 -> 1 with the cosine
        let length = scheme.grid_length((-1.0, 1.0));
        let eta = scheme.unit_base_fraction(0.0, -1.0, length, 1e-3);
        assert!((0.0..=1.0).contains(&eta));
        assert_relative_eq!(
            scheme.secondary_from_fraction(eta, -1.0, length),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn unit_base_fraction_round_trips() {
        let scheme = Interp2D::LIN_LIN_LIN;
        let length = scheme.grid_length((2.0, 10.0));
        for y in [2.0, 3.7, 8.2, 10.0] {
            let eta = scheme.unit_base_fraction(y, 2.0, length, 1e-3);
            assert_relative_eq!(
                scheme.secondary_from_fraction(eta, 2.0, length),
                y,
                max_relative = 1e-14
            );
        }
    }

    #[test]
    fn fuzzy_tolerance_clamps_spill() {
        let scheme = Interp2D::LIN_LIN_LIN;
        let length = scheme.grid_length((0.0, 1.0));
        assert_eq!(scheme.unit_base_fraction(1.0005, 0.0, length, 1e-3), 1.0);
        assert_eq!(scheme.unit_base_fraction(-0.0005, 0.0, length, 1e-3), 0.0);
        // far outside still clamps, just not silently
        assert_eq!(scheme.unit_base_fraction(1.5, 0.0, length, 1e-3), 1.0);
    }

    #[test]
    fn matching_supports_reduce_unit_base_to_direct() {
        let scheme = Interp2D::LIN_LIN_LIN;
        let support = (-1.0, 1.0);
        let result = scheme.interpolate_unit_base(
            (1.0, 2.0),
            1.5,
            0.25,
            support,
            support,
            |_| 3.0,
            |_| 5.0,
            1e-3,
        );
        assert_relative_eq!(result, 4.0, max_relative = 1e-14);
    }

    #[test]
    fn boundary_queries_evaluate_one_edge_only() {
        let scheme = Interp2D::LIN_LIN_LIN;
        let result = scheme.interpolate_unit_base(
            (1.0, 2.0),
            1.0,
            0.25,
            (-1.0, 1.0),
            (0.0, 1.0),
            |y| y + 10.0,
            |_| unreachable!("upper edge must not be touched"),
            1e-3,
        );
        assert_eq!(result, 10.25);
    }

    #[test]
    fn intermediate_limits_blend_and_pin() {
        let scheme = Interp2D::LIN_LIN_LIN;
        let limits = scheme.intermediate_grid_limits((1.0, 2.0), 1.5, (-1.0, 0.5), (-0.5, 1.0));
        assert_relative_eq!(limits.0, -0.75, max_relative = 1e-14);
        assert_relative_eq!(limits.1, 0.75, max_relative = 1e-14);

        // exact pin on the boundary
        let pinned = scheme.intermediate_grid_limits((1.0, 2.0), 2.0, (-1.0, 0.5), (-0.5, 1.0));
        assert_eq!(pinned, (-0.5, 1.0));
    }
}

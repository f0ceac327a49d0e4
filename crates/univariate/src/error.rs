//! Result and Error types for mcdist-univariate

/// Type alias for Result<T, univariate::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `mcdist-univariate` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("lower bound {lower} is not below upper bound {upper}")]
    InvertedBounds { lower: f64, upper: f64 },

    #[error("parameter arrays differ in length ({expected} grid points, {found} values)")]
    LengthMismatch { expected: usize, found: usize },

    #[error("{length} grid points given where at least {minimum} are needed")]
    LengthBelowMinimum { length: usize, minimum: usize },

    #[error("grid is not strictly increasing at index {0}")]
    GridNotIncreasing(usize),

    #[error("invalid distribution parameter {0}")]
    NegativeValue(f64),

    #[error("undefined value at index {0}")]
    UndefinedValue(usize),

    #[error("tabulated values are all zero")]
    AllValuesZero,

    #[error("screening parameter {0} is not positive and finite")]
    InvalidScreening(f64),

    #[error("cutoff ratio {0} is outside (0, 1]")]
    InvalidCutoffRatio(f64),

    #[error("cosine grid ends at {found} instead of the cutoff {expected}")]
    GridEndsOffCutoff { found: f64, expected: f64 },
}

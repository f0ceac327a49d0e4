//! Result and Error types for mcdist-bivariate

/// Type alias for Result<T, bivariate::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `mcdist-bivariate` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("primary value {value} is outside the grid [{lower}, {upper}]")]
    PrimaryOutOfRange { value: f64, lower: f64, upper: f64 },

    #[error("{found} bin boundaries given where at least 2 are needed")]
    InsufficientBoundaries { found: usize },

    #[error("{grid} primary grid points given for {conditionals} conditionals")]
    LengthMismatch { grid: usize, conditionals: usize },

    #[error("primary grid is not strictly increasing at index {index}")]
    GridNotIncreasing { index: usize },

    #[error("primary grid value at index {index} is not finite")]
    UndefinedPrimary { index: usize },

    #[error("conditional at index {index} is not continuous")]
    DiscontinuousConditional { index: usize },

    #[error("tolerance {name} has invalid value {value}")]
    InvalidTolerance { name: String, value: f64 },

    #[error(
        "correlated lookup failed to converge after {iterations} iterations (residual {residual:e})"
    )]
    NotConverged { iterations: u32, residual: f64 },

    #[error("subrange limit {requested} is below the support minimum {lower}")]
    SubrangeBelowSupport { requested: f64, lower: f64 },

    #[error("conditional at index {index} does not fit the configured scales")]
    IncompatibleScale { index: usize },

    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),

    #[error("invalid conditional distribution")]
    Univariate(#[from] mcdist_univariate::Error),
}

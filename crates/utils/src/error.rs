//! Result and Error types for the utils module

/// Type alias for `Result<T, utils::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, PartialEq)]
/// The error type for `mcdist_utils`
pub enum Error {
    /// An empty slice of floats for SliceExt
    EmptySlice,

    /// The slice of float values contains things like NAN or INFINITY
    UndefinedValues,

    /// Value that is searched for outside of the min/max of the array
    OutsideOfBounds {
        /// The requested value
        value: f64,
        /// Lowest value in the array
        lower_bound: f64,
        /// Highest value in the array
        upper_bound: f64,
    },

    /// For when a slice has fewer than the minimum required values
    LengthBelowMinimum {
        /// Number of values found
        length: usize,
        /// Minimum number of values needed
        minimum: usize,
    },
}

// error boilerplate
impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// implement standard error trait to use with ? operator
impl std::error::Error for Error {}

//! One-dimensional distributions for Monte Carlo sampling
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, anything important is re-exported
mod any;
mod delta;
mod distribution;
mod elastic;
mod error;
mod exponential;
mod tabulated;
mod uniform;

#[doc(inline)]
pub use any::AnyTabular;

#[doc(inline)]
pub use distribution::{TabularUnivariate, Univariate};

#[doc(inline)]
pub use delta::Delta;

#[doc(inline)]
pub use elastic::CoupledElastic;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use exponential::Exponential;

#[doc(inline)]
pub use tabulated::Tabulated;

#[doc(inline)]
pub use uniform::Uniform;

//! Tabulated bivariate distributions for Monte Carlo sampling
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, anything important is re-exported
mod config;
mod distribution;
mod elastic;
mod error;
mod policy;

#[doc(inline)]
pub use config::Tolerances;

#[doc(inline)]
pub use distribution::{BinBoundary, BinSample, BivariateDistribution};

#[doc(inline)]
pub use elastic::ElasticBivariate;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use policy::SampleMode;

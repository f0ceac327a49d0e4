//! `mcdist` is a modular toolkit of tabulated probability distributions
//! for Monte Carlo particle transport
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use mcdist_utils as utils;

#[cfg(feature = "bivariate")]
#[cfg_attr(docsrs, doc(cfg(feature = "bivariate")))]
#[doc(inline)]
pub use mcdist_bivariate as bivariate;

#[cfg(feature = "interp")]
#[cfg_attr(docsrs, doc(cfg(feature = "interp")))]
#[doc(inline)]
pub use mcdist_interp as interp;

#[cfg(feature = "rng")]
#[cfg_attr(docsrs, doc(cfg(feature = "rng")))]
#[doc(inline)]
pub use mcdist_rng as rng;

#[cfg(feature = "univariate")]
#[cfg_attr(docsrs, doc(cfg(feature = "univariate")))]
#[doc(inline)]
pub use mcdist_univariate as univariate;

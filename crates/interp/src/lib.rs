//! Axis scales and interpolation schemes for tabulated distribution grids
//!
#![doc = include_str!("../readme.md")]

// Modules
mod scale;
mod scheme;

// Flatten
pub use scale::{Scale, COSINE_NUDGE, CUTOFF_COSINE};
pub use scheme::Interp2D;

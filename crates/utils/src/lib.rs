//! Common utility for extended `std` types
//!
#![doc = include_str!("../readme.md")]

// Modules
mod error;
mod slice_ext;

// Flatten
pub use error::{Error, Result};
pub use slice_ext::SliceExt;

//! Injectable uniform random number sources
//!
#![doc = include_str!("../readme.md")]

// Modules
mod sequence;
mod source;

// Flatten
pub use sequence::SequenceSource;
pub use source::{derive_stream_seed, RandomSource, StdSource};

//! hyperbin - multi-dimensional binning for histogramming
//!
//! Partitions N-dimensional coordinate space into non-overlapping half-open
//! bins and maps coordinate vectors to bin indices, with uniform, logarithmic,
//! contiguous, arbitrary-extent and product binnings.

pub mod binning;

pub use binning::{
    BinExtents, BinIndex, Binning, BinningConfig, BinningError, BinningFactory, BinningPtr, Extent,
};

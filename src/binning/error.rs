use thiserror::Error;

/// Errors raised while building a [`Binning`](super::Binning) or looking up a bin.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BinningError {
    #[error("Bin range is not increasing: start={start} >= stop={stop}")]
    BinningNotIncreasing { start: f64, stop: f64 },

    #[error("Bin edges are not strictly increasing: edge[{index}] = {high} <= preceding edge {low}")]
    BinningUnsorted { index: usize, low: f64, high: f64 },

    #[error("Too few bin edges: need at least two, found {0}")]
    TooFewBinEdges(usize),

    #[error("Cannot build a binning from zero bins")]
    EmptyBinning,

    #[error("Cannot build a product of zero binnings")]
    EmptyProduct,

    #[error("Bins must be unique: {unique} unique bins out of {total}")]
    BinningNotUnique { unique: usize, total: usize },

    #[error("Bins must not overlap: bin {first} overlaps bin {second}")]
    BinningHasOverlaps { first: String, second: String },

    #[error("Mismatched axis count: expected {expected}, found {found}")]
    MismatchedAxisCount { expected: usize, found: usize },

    #[error("Too few projections for binning: expected {expected}, found {found}")]
    TooFewProjectionsForBinning { expected: usize, found: usize },

    #[error("Unbinnable number {value} on axis {axis}")]
    UnbinnableNumber { value: f64, axis: usize },

    #[error("Axis {axis} requested from bins with only {nax} axes")]
    AxisOverflow { axis: usize, nax: usize },

    #[error("Bins are not contiguous: {low} != {expected}")]
    NonContiguousBinning { low: f64, expected: f64 },

    #[error("Logarithmic binning requires positive edges, found {0}")]
    InvalidLogarithmicEdge(f64),

    #[error("Logarithmic binning requires a base of at least 2, found {0}")]
    InvalidLogarithmicBase(u32),

    #[error("Binning with {0} bins exceeds the addressable bin index range")]
    TooManyBins(usize),
}

/// Result alias used throughout the binning engine.
pub type Result<T> = std::result::Result<T, BinningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_increasing_display() {
        let e = BinningError::BinningNotIncreasing {
            start: 5.0,
            stop: 1.0,
        };
        assert_eq!(
            e.to_string(),
            "Bin range is not increasing: start=5 >= stop=1"
        );
    }

    #[test]
    fn unsorted_display_names_both_edges() {
        let e = BinningError::BinningUnsorted {
            index: 2,
            low: 1.0,
            high: 1.0,
        };
        assert_eq!(
            e.to_string(),
            "Bin edges are not strictly increasing: edge[2] = 1 <= preceding edge 1"
        );
    }

    #[test]
    fn mismatched_axis_count_display() {
        let e = BinningError::MismatchedAxisCount {
            expected: 3,
            found: 2,
        };
        assert!(e.to_string().contains("expected 3, found 2"));
    }

    #[test]
    fn error_equality() {
        assert_eq!(BinningError::EmptyBinning, BinningError::EmptyBinning);
        assert_ne!(BinningError::EmptyBinning, BinningError::EmptyProduct);
    }
}

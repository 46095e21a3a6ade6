//! Lookup strategies.
//!
//! Each construction strategy stores only the data its lookup needs in one
//! variant of [`Strategy`]; [`Strategy::find`] is the single dispatch point.
//! Every variant is immutable after construction, so lookups from many
//! threads need no synchronisation.

use log::{trace, warn};

use super::bin_extents::BinExtents;
use super::columns::ColumnIndex;
use super::config::BinningConfig;
use super::edges::LogBase;
use super::error::{BinningError, Result};
use super::model::{BinIndex, BinningPtr};

/// Public tag naming the strategy a [`Binning`](super::Binning) was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Linear,
    LinearND,
    Logarithmic,
    Contiguous,
    Extents,
    BruteForce,
    Product,
}

/// Equal-width bins on one axis, located by formula and checked against
/// the stored `edges`.
///
/// `start` and `width` live in the space where the bins are equal width
/// (log space for logarithmic binnings). `edges` are the real bin edges,
/// identical to the extents the owning binning reports.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UniformAxis {
    pub start: f64,
    pub width: f64,
    pub edges: Vec<f64>,
}

impl UniformAxis {
    /// `edges` must hold at least two strictly increasing values.
    pub(crate) fn new(start: f64, stop: f64, edges: Vec<f64>) -> Self {
        let nbins = edges.len().saturating_sub(1).max(1);
        Self {
            start,
            width: (stop - start) / nbins as f64,
            edges,
        }
    }

    fn low(&self) -> f64 {
        self.edges.first().copied().unwrap_or(f64::NAN)
    }

    fn high(&self) -> f64 {
        self.edges.last().copied().unwrap_or(f64::NAN)
    }

    fn bin_of(&self, v: f64) -> Option<BinIndex> {
        self.locate(v, v)
    }

    /// Bin whose stored edges contain `v`, or `None` outside them. `u` is `v`
    /// mapped into the equal-width space and only seeds the guess.
    fn locate(&self, u: f64, v: f64) -> Option<BinIndex> {
        if !(v >= self.low() && v < self.high()) {
            return None;
        }
        let last_bin = self.edges.len() - 2;
        let guess = ((u - self.start) / self.width).floor();
        let mut k = if guess > 0.0 {
            (guess as usize).min(last_bin)
        } else {
            0
        };
        // the formula can land a bin off next to an edge; edges[0] <= v < edges[n]
        // bounds both walks
        while v < self.edges[k] {
            k -= 1;
        }
        while v >= self.edges[k + 1] {
            k += 1;
        }
        Some(k as BinIndex)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Strategy {
    Linear(UniformAxis),
    LinearND {
        axes: Vec<UniformAxis>,
        strides: Vec<BinIndex>,
    },
    Logarithmic {
        base: LogBase,
        log_axis: UniformAxis,
    },
    Contiguous,
    Extents {
        nax: usize,
        index: ColumnIndex,
    },
    BruteForce {
        nax: usize,
    },
    Product {
        parts: Vec<BinningPtr>,
        axes_per_part: Vec<usize>,
        strides: Vec<BinIndex>,
    },
}

/// Zero is binnable; subnormals, infinities and NaN are not.
fn is_binnable(v: f64) -> bool {
    v == 0.0 || v.is_normal()
}

/// Applies the malformed-input policy: an error in strict mode, a logged
/// sentinel otherwise.
fn reject(config: &BinningConfig, err: BinningError) -> Result<Option<BinIndex>> {
    if config.is_strict() {
        return Err(err);
    }
    warn!("{err}. Returning no bin, use a strict binning config to make this an error");
    Ok(None)
}

fn require_axes(x: &[f64], nax: usize) -> Result<()> {
    if x.len() < nax {
        return Err(BinningError::MismatchedAxisCount {
            expected: nax,
            found: x.len(),
        });
    }
    Ok(())
}

impl Strategy {
    pub(crate) fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Linear(_) => StrategyKind::Linear,
            Strategy::LinearND { .. } => StrategyKind::LinearND,
            Strategy::Logarithmic { .. } => StrategyKind::Logarithmic,
            Strategy::Contiguous => StrategyKind::Contiguous,
            Strategy::Extents { .. } => StrategyKind::Extents,
            Strategy::BruteForce { .. } => StrategyKind::BruteForce,
            Strategy::Product { .. } => StrategyKind::Product,
        }
    }

    /// Finds the bin containing `x`. `bins` is the owning binning's bin list.
    pub(crate) fn find(
        &self,
        bins: &[BinExtents],
        config: &BinningConfig,
        x: &[f64],
    ) -> Result<Option<BinIndex>> {
        match self {
            Strategy::Linear(axis) => {
                let Some(&v) = x.first() else {
                    return reject(config, too_few(1, 0));
                };
                if !is_binnable(v) {
                    return reject(config, BinningError::UnbinnableNumber { value: v, axis: 0 });
                }
                let bin = axis.bin_of(v);
                if bin.is_none() {
                    trace!("{v} outside [{}, {}), returning no bin", axis.low(), axis.high());
                }
                Ok(bin)
            }
            Strategy::LinearND { axes, strides } => {
                if x.len() < axes.len() {
                    return reject(config, too_few(axes.len(), x.len()));
                }
                let mut gbin: BinIndex = 0;
                for (ax, ((axis, stride), &v)) in axes.iter().zip(strides).zip(x).enumerate() {
                    if !is_binnable(v) {
                        return reject(config, BinningError::UnbinnableNumber { value: v, axis: ax });
                    }
                    let Some(bin) = axis.bin_of(v) else {
                        trace!("{v} outside [{}, {}) on axis {ax}", axis.low(), axis.high());
                        return Ok(None);
                    };
                    gbin += bin * stride;
                }
                Ok(Some(gbin))
            }
            Strategy::Logarithmic { base, log_axis } => {
                let Some(&v) = x.first() else {
                    return reject(config, too_few(1, 0));
                };
                if !v.is_normal() || v < 0.0 {
                    return reject(config, BinningError::UnbinnableNumber { value: v, axis: 0 });
                }
                let bin = log_axis.locate(base.log(v), v);
                if bin.is_none() {
                    trace!(
                        "{v} outside [{}, {}) of log{base} binning, returning no bin",
                        log_axis.low(),
                        log_axis.high()
                    );
                }
                Ok(bin)
            }
            Strategy::Contiguous => {
                let Some(&v) = x.first() else {
                    return reject(config, too_few(1, 0));
                };
                if !is_binnable(v) {
                    return reject(config, BinningError::UnbinnableNumber { value: v, axis: 0 });
                }
                Ok(binary_search(bins, v))
            }
            Strategy::Extents { nax, index } => {
                require_axes(x, *nax)?;
                Ok(index.find(bins, x))
            }
            Strategy::BruteForce { nax } => {
                require_axes(x, *nax)?;
                Ok(bins
                    .iter()
                    .position(|bin| bin.contains(x))
                    .map(|i| i as BinIndex))
            }
            Strategy::Product {
                parts,
                axes_per_part,
                strides,
            } => {
                let nax = axes_per_part.iter().sum();
                require_axes(x, nax)?;

                let mut gbin: BinIndex = 0;
                let mut consumed = 0;
                for (i, ((part, &n), stride)) in parts.iter().zip(axes_per_part).zip(strides).enumerate() {
                    let Some(bin) = part.find_bin(&x[consumed..consumed + n])? else {
                        trace!("sub-binning[{i}] found no bin, returning no bin");
                        return Ok(None);
                    };
                    gbin += bin * stride;
                    consumed += n;
                }
                Ok(Some(gbin))
            }
        }
    }
}

fn too_few(expected: usize, found: usize) -> BinningError {
    BinningError::TooFewProjectionsForBinning { expected, found }
}

/// Binary search over sorted, abutting single-axis bins.
fn binary_search(bins: &[BinExtents], v: f64) -> Option<BinIndex> {
    let (first, last) = (bins.first()?, bins.last()?);
    if v < first[0].low || v >= last[0].high {
        trace!(
            "{v} outside [{}, {}), returning no bin",
            first[0].low,
            last[0].high
        );
        return None;
    }

    let (mut lo, mut hi) = (0, bins.len());
    while lo < hi {
        let m = (lo + hi) / 2;
        let ext = &bins[m][0];
        if v >= ext.high {
            lo = m + 1;
        } else if v < ext.low {
            hi = m;
        } else {
            return Some(m as BinIndex);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::edges::{edges_to_extents, lin_spaced_edges, log10_spaced_edges};

    fn lin_axis(start: f64, stop: f64, nbins: usize) -> UniformAxis {
        UniformAxis::new(start, stop, lin_spaced_edges(start, stop, nbins).unwrap())
    }

    #[test]
    fn test_uniform_axis_bin_of() {
        let axis = lin_axis(0.0, 5.0, 5);
        assert_eq!(axis.width, 1.0);
        assert_eq!(axis.bin_of(-1.0), None);
        assert_eq!(axis.bin_of(0.0), Some(0));
        assert_eq!(axis.bin_of(4.999), Some(4));
        assert_eq!(axis.bin_of(5.0), None);
    }

    #[test]
    fn test_uniform_axis_clamps_rounding_at_stop() {
        let axis = lin_axis(0.0, 0.3, 3);
        let below_stop = f64::from_bits(0.3f64.to_bits() - 1);
        assert_eq!(axis.bin_of(below_stop), Some(2));
    }

    #[test]
    fn test_uniform_axis_stored_edges_win_over_formula() {
        // 7/9 falls just below the 7th edge when divided back by the width
        let axis = lin_axis(0.0, 1.0, 9);
        for (i, &edge) in axis.edges[..9].iter().enumerate() {
            assert_eq!(axis.bin_of(edge), Some(i as BinIndex), "edge {edge}");
        }
        assert_eq!(axis.bin_of(1.0), None);
    }

    #[test]
    fn test_log_axis_locates_in_linear_space() {
        let edges = log10_spaced_edges(1.0, 1e3, 7).unwrap();
        let axis = UniformAxis::new(0.0, 3.0, edges.clone());
        for (i, &edge) in edges[..7].iter().enumerate() {
            assert_eq!(axis.locate(edge.log10(), edge), Some(i as BinIndex));
        }
        // a seed that is a whole bin off is still corrected
        assert_eq!(axis.locate(0.0, edges[3]), Some(3));
        assert_eq!(axis.locate(2.99, edges[1]), Some(1));
    }

    #[test]
    fn test_is_binnable() {
        assert!(is_binnable(0.0));
        assert!(is_binnable(-2.5));
        assert!(!is_binnable(f64::NAN));
        assert!(!is_binnable(f64::INFINITY));
        assert!(!is_binnable(f64::MIN_POSITIVE / 2.0));
    }

    #[test]
    fn test_binary_search_every_bin() {
        let edges = [0.0, 0.5, 1.0, 3.0, 3.5, 10.0];
        let bins = edges_to_extents(&edges).unwrap();
        for (i, w) in edges.windows(2).enumerate() {
            assert_eq!(binary_search(&bins, w[0]), Some(i as BinIndex));
            assert_eq!(binary_search(&bins, (w[0] + w[1]) / 2.0), Some(i as BinIndex));
        }
        assert_eq!(binary_search(&bins, -0.1), None);
        assert_eq!(binary_search(&bins, 10.0), None);
        assert_eq!(binary_search(&[], 1.0), None);
    }

    #[test]
    fn test_reject_policy() {
        let err = BinningError::UnbinnableNumber {
            value: f64::INFINITY,
            axis: 0,
        };
        assert_eq!(reject(&BinningConfig::permissive(), err.clone()), Ok(None));
        assert_eq!(reject(&BinningConfig::strict(), err.clone()), Err(err));
    }
}

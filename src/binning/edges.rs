//! Generation and validation of monotonic bin-edge sequences.

use log::error;

use super::bin_extents::BinExtents;
use super::error::{BinningError, Result};
use super::extent::Extent;

/// Logarithm base used by the logarithmic strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBase {
    /// Base *e*.
    Natural,
    /// Integer base, e.g. 10.
    Base(u32),
}

impl LogBase {
    pub fn log(&self, v: f64) -> f64 {
        match self {
            LogBase::Natural => v.ln(),
            LogBase::Base(10) => v.log10(),
            LogBase::Base(2) => v.log2(),
            LogBase::Base(b) => v.ln() / f64::from(*b).ln(),
        }
    }

    /// Inverse of [`LogBase::log`].
    pub fn exp(&self, v: f64) -> f64 {
        match self {
            LogBase::Natural => v.exp(),
            LogBase::Base(b) => f64::from(*b).powf(v),
        }
    }
}

impl From<u32> for LogBase {
    /// Base `0` denotes the natural logarithm.
    fn from(base: u32) -> Self {
        match base {
            0 => LogBase::Natural,
            b => LogBase::Base(b),
        }
    }
}

impl std::fmt::Display for LogBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogBase::Natural => write!(f, "e"),
            LogBase::Base(b) => write!(f, "{}", b),
        }
    }
}

/// Returns `nbins + 1` edges `start, start + width, …`.
pub fn uniform_width_edges(start: f64, width: f64, nbins: usize) -> Result<Vec<f64>> {
    if !(width > 0.0) {
        error!(
            "uniform_width_edges({start}, {width}, {nbins}) is invalid as width={width}"
        );
        return Err(BinningError::BinningNotIncreasing {
            start,
            stop: start + width,
        });
    }
    Ok((0..=nbins).map(|i| start + (i as f64) * width).collect())
}

/// Returns `nbins + 1` equally spaced edges spanning `[start, stop]`.
pub fn lin_spaced_edges(start: f64, stop: f64, nbins: usize) -> Result<Vec<f64>> {
    if !(start < stop) {
        error!("lin_spaced_edges({start}, {stop}, {nbins}) is invalid as start >= stop");
        return Err(BinningError::BinningNotIncreasing { start, stop });
    }
    let width = (stop - start) / nbins as f64;
    let mut edges = uniform_width_edges(start, width, nbins)?;
    if let Some(last) = edges.last_mut() {
        *last = stop;
    }
    Ok(edges)
}

/// Returns `nbins + 1` edges spaced uniformly in `log_base` space.
///
/// The first and last edges are exactly `start` and `stop`.
pub fn log_spaced_edges(base: LogBase, start: f64, stop: f64, nbins: usize) -> Result<Vec<f64>> {
    let base = check_log_base(base)?;
    check_log_range(start, stop)?;

    let startl = base.log(start);
    let stopl = base.log(stop);
    let lwidth = (stopl - startl) / nbins as f64;

    let mut edges: Vec<f64> = (0..=nbins)
        .map(|i| base.exp(startl + (i as f64) * lwidth))
        .collect();
    edges[0] = start;
    if nbins > 0 {
        edges[nbins] = stop;
    }
    Ok(edges)
}

pub fn log10_spaced_edges(start: f64, stop: f64, nbins: usize) -> Result<Vec<f64>> {
    log_spaced_edges(LogBase::Base(10), start, stop, nbins)
}

pub fn ln_spaced_edges(start: f64, stop: f64, nbins: usize) -> Result<Vec<f64>> {
    log_spaced_edges(LogBase::Natural, start, stop, nbins)
}

/// Maps `Base(0)` to [`LogBase::Natural`] and rejects base 1, which has no
/// logarithm.
pub(crate) fn check_log_base(base: LogBase) -> Result<LogBase> {
    match base {
        LogBase::Base(0) => Ok(LogBase::Natural),
        LogBase::Base(1) => {
            error!("logarithmic binning cannot use base 1");
            Err(BinningError::InvalidLogarithmicBase(1))
        }
        base => Ok(base),
    }
}

/// Rejects non-positive or non-increasing logarithmic ranges.
pub(crate) fn check_log_range(start: f64, stop: f64) -> Result<()> {
    for edge in [start, stop] {
        if !(edge > 0.0) || !edge.is_finite() {
            error!("logarithmic binning [{start}, {stop}) has unloggable edge {edge}");
            return Err(BinningError::InvalidLogarithmicEdge(edge));
        }
    }
    if !(start < stop) {
        error!("logarithmic binning [{start}, {stop}) is invalid as start >= stop");
        return Err(BinningError::BinningNotIncreasing { start, stop });
    }
    Ok(())
}

/// Concatenates several edge series, dropping repeated edges where one
/// series ends on the edge the next begins with.
///
/// The result must hold at least two strictly increasing edges.
pub fn cat_bin_edges(edge_series: &[Vec<f64>]) -> Result<Vec<f64>> {
    let mut edges: Vec<f64> = edge_series.iter().flatten().copied().collect();
    edges.dedup();

    if edges.len() < 2 {
        error!(
            "cat_bin_edges was passed too few bin edges, need at least two, found {} unique edges",
            edges.len()
        );
        return Err(BinningError::TooFewBinEdges(edges.len()));
    }
    check_strictly_increasing(&edges)?;
    Ok(edges)
}

/// Converts an edge list into contiguous single-axis bins.
pub fn edges_to_extents(edges: &[f64]) -> Result<Vec<BinExtents>> {
    if edges.len() < 2 {
        error!(
            "edges_to_extents was passed too few bin edges, need at least two, found {}",
            edges.len()
        );
        return Err(BinningError::TooFewBinEdges(edges.len()));
    }
    check_strictly_increasing(edges)?;

    Ok(edges
        .windows(2)
        .map(|w| BinExtents::new(vec![Extent::new(w[0], w[1])]))
        .collect())
}

fn check_strictly_increasing(edges: &[f64]) -> Result<()> {
    match edges.windows(2).position(|w| !(w[0] < w[1])) {
        Some(i) => {
            error!(
                "bin edges are not unique and monotonically increasing: edge[{}] = {}, edge[{}] = {}",
                i,
                edges[i],
                i + 1,
                edges[i + 1]
            );
            Err(BinningError::BinningUnsorted {
                index: i + 1,
                low: edges[i],
                high: edges[i + 1],
            })
        }
        None => Ok(()),
    }
}

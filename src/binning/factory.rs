//! Construction entry points, one per lookup strategy.
//!
//! [`BinningFactory`] carries the [`BinningConfig`] that every binning it
//! builds will use. The associated functions on [`Binning`] (`Binning::lin_space`
//! and friends) build with the default, permissive config.

use log::error;

use super::bin_extents::BinExtents;
use super::columns::ColumnIndex;
use super::config::BinningConfig;
use super::edges::{
    check_log_base, check_log_range, edges_to_extents, lin_spaced_edges, log_spaced_edges, LogBase,
};
use super::error::{BinningError, Result};
use super::extent::Extent;
use super::model::{BinIndex, Binning, BinningPtr};
use super::strategy::{Strategy, UniformAxis};
use super::validation::{check_axis_counts, find_overlap, unique};

/// Builds [`Binning`]s bound to one configuration.
///
/// # Example
///
/// ```rust
/// use hyperbin::binning::{BinningConfig, BinningError, BinningFactory};
///
/// let factory = BinningFactory::new(BinningConfig::strict());
/// let b = factory.log10_space(1.0, 1e3, 3, "energy").unwrap();
///
/// assert_eq!(b.find_bin_1d(10.0).unwrap(), Some(1));
/// assert!(matches!(
///     b.find_bin_1d(0.0),
///     Err(BinningError::UnbinnableNumber { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BinningFactory {
    config: BinningConfig,
}

/// Empty label list, for calls where every axis label defaults to `""`.
pub const NO_LABELS: &[&str] = &[];

pub(crate) fn labels_of<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels.iter().map(|s| s.as_ref().to_owned()).collect()
}

/// Converts a caller-supplied bin count into the index type.
fn bin_count(nbins: usize) -> Result<BinIndex> {
    if nbins == 0 {
        error!("cannot build a binning with zero bins");
        return Err(BinningError::TooFewBinEdges(1));
    }
    BinIndex::try_from(nbins)
        .ok()
        .filter(|&n| n < Binning::NPOS)
        .ok_or(BinningError::TooManyBins(nbins))
}

/// Mixed-radix strides: `stride[0] = 1`, `stride[i] = stride[i-1] * counts[i-1]`.
pub(crate) fn mixed_radix_strides(counts: &[usize]) -> Result<(Vec<BinIndex>, usize)> {
    let mut strides = Vec::with_capacity(counts.len());
    let mut total: usize = 1;
    for &n in counts {
        strides.push(BinIndex::try_from(total).map_err(|_| BinningError::TooManyBins(total))?);
        total = total
            .checked_mul(n)
            .filter(|&t| t < Binning::NPOS as usize)
            .ok_or(BinningError::TooManyBins(usize::MAX))?;
    }
    Ok((strides, total))
}

impl BinningFactory {
    pub fn new(config: BinningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BinningConfig {
        &self.config
    }

    /// `nbins` equal-width bins spanning `[start, stop)`, located in O(1).
    pub fn lin_space(&self, start: f64, stop: f64, nbins: usize, label: &str) -> Result<BinningPtr> {
        if !(start < stop) {
            error!("lin_space({start}, {stop}, {nbins}) is invalid as start >= stop");
            return Err(BinningError::BinningNotIncreasing { start, stop });
        }
        bin_count(nbins)?;
        let edges = lin_spaced_edges(start, stop, nbins)?;
        let bins = edges_to_extents(&edges)?;
        Binning::from_parts(
            vec![label.to_owned()],
            bins,
            Strategy::Linear(UniformAxis::new(start, stop, edges)),
            self.config,
        )
    }

    /// Regular N-axis grid from per-axis `(start, stop, nbins)`.
    ///
    /// Bin indices are mixed-radix with axis 0 varying fastest.
    pub fn lin_space_nd<S: AsRef<str>>(
        &self,
        axes: &[(f64, f64, usize)],
        labels: &[S],
    ) -> Result<BinningPtr> {
        if axes.is_empty() {
            error!("lin_space_nd was passed no axes");
            return Err(BinningError::EmptyBinning);
        }

        let mut uniform = Vec::with_capacity(axes.len());
        for (ax, &(start, stop, nbins)) in axes.iter().enumerate() {
            if !(start < stop) {
                error!("lin_space_nd is invalid along axis {ax} as start={start} >= stop={stop}");
                return Err(BinningError::BinningNotIncreasing { start, stop });
            }
            bin_count(nbins)?;
            uniform.push(UniformAxis::new(start, stop, lin_spaced_edges(start, stop, nbins)?));
        }

        let counts: Vec<usize> = axes.iter().map(|a| a.2).collect();
        let (strides, nbins) = mixed_radix_strides(&counts)?;

        let bins = (0..nbins)
            .map(|gbin| {
                uniform
                    .iter()
                    .zip(&counts)
                    .zip(&strides)
                    .map(|((axis, &n), &stride)| {
                        let k = (gbin / stride as usize) % n;
                        Extent::new(axis.edges[k], axis.edges[k + 1])
                    })
                    .collect::<BinExtents>()
            })
            .collect();

        Binning::from_parts(
            labels_of(labels),
            bins,
            Strategy::LinearND {
                axes: uniform,
                strides,
            },
            self.config,
        )
    }

    /// `nbins` bins equally wide in `log_base` space over `[start, stop)`.
    pub fn log_space(
        &self,
        base: impl Into<LogBase>,
        start: f64,
        stop: f64,
        nbins: usize,
        label: &str,
    ) -> Result<BinningPtr> {
        let base = check_log_base(base.into())?;
        check_log_range(start, stop)?;
        bin_count(nbins)?;
        let edges = log_spaced_edges(base, start, stop, nbins)?;
        let bins = edges_to_extents(&edges)?;
        let log_axis = UniformAxis::new(base.log(start), base.log(stop), edges);

        Binning::from_parts(
            vec![label.to_owned()],
            bins,
            Strategy::Logarithmic { base, log_axis },
            self.config,
        )
    }

    pub fn ln_space(&self, start: f64, stop: f64, nbins: usize, label: &str) -> Result<BinningPtr> {
        self.log_space(LogBase::Natural, start, stop, nbins, label)
    }

    pub fn log10_space(&self, start: f64, stop: f64, nbins: usize, label: &str) -> Result<BinningPtr> {
        self.log_space(LogBase::Base(10), start, stop, nbins, label)
    }

    /// Contiguous bins from strictly increasing `edges`, located by binary
    /// search.
    pub fn contiguous(&self, edges: &[f64], label: &str) -> Result<BinningPtr> {
        let bins = edges_to_extents(edges)?;
        Binning::from_parts(vec![label.to_owned()], bins, Strategy::Contiguous, self.config)
    }

    /// Bins with arbitrary extents, in any order, located through a column
    /// index built along the most discriminating axis.
    ///
    /// # Errors
    ///
    /// [`BinningError::EmptyBinning`], [`BinningError::MismatchedAxisCount`],
    /// [`BinningError::BinningNotIncreasing`] for an inverted extent,
    /// [`BinningError::BinningNotUnique`] and [`BinningError::BinningHasOverlaps`].
    pub fn from_extents<S: AsRef<str>>(
        &self,
        bins: Vec<BinExtents>,
        labels: &[S],
    ) -> Result<BinningPtr> {
        let nax = validate_extents(&bins)?;
        let index = ColumnIndex::new(&bins);
        Binning::from_parts(
            labels_of(labels),
            bins,
            Strategy::Extents { nax, index },
            self.config,
        )
    }

    /// Same preconditions as [`from_extents`](Self::from_extents), located by
    /// a linear scan in insertion order.
    pub fn brute_force<S: AsRef<str>>(
        &self,
        bins: Vec<BinExtents>,
        labels: &[S],
    ) -> Result<BinningPtr> {
        let nax = validate_extents(&bins)?;
        Binning::from_parts(
            labels_of(labels),
            bins,
            Strategy::BruteForce { nax },
            self.config,
        )
    }
}

/// Checks caller-supplied bins are usable and returns their axis count.
fn validate_extents(bins: &[BinExtents]) -> Result<usize> {
    let Some(first) = bins.first() else {
        error!("cannot build a binning from an empty list of bins");
        return Err(BinningError::EmptyBinning);
    };
    if first.is_empty() {
        error!("cannot build a binning from bins with no axes");
        return Err(BinningError::EmptyBinning);
    }
    check_axis_counts(bins)?;

    if let Some(ext) = bins.iter().flat_map(|b| b.iter()).find(|e| !(e.low < e.high)) {
        error!("bin extent {ext} is not increasing");
        return Err(BinningError::BinningNotIncreasing {
            start: ext.low,
            stop: ext.high,
        });
    }

    let nunique = unique(bins.to_vec())?.len();
    if nunique != bins.len() {
        error!(
            "the list of unique bins was {} long, while the original list was {}, bins must be unique",
            nunique,
            bins.len()
        );
        return Err(BinningError::BinningNotUnique {
            unique: nunique,
            total: bins.len(),
        });
    }

    if let Some((a, b)) = find_overlap(bins, &[])? {
        error!("bins must be non-overlapping, {a} overlaps {b}");
        return Err(BinningError::BinningHasOverlaps {
            first: a.to_string(),
            second: b.to_string(),
        });
    }
    Ok(first.len())
}

impl Binning {
    pub fn lin_space(start: f64, stop: f64, nbins: usize, label: &str) -> Result<BinningPtr> {
        BinningFactory::default().lin_space(start, stop, nbins, label)
    }

    pub fn lin_space_nd<S: AsRef<str>>(axes: &[(f64, f64, usize)], labels: &[S]) -> Result<BinningPtr> {
        BinningFactory::default().lin_space_nd(axes, labels)
    }

    pub fn log_space(
        base: impl Into<LogBase>,
        start: f64,
        stop: f64,
        nbins: usize,
        label: &str,
    ) -> Result<BinningPtr> {
        BinningFactory::default().log_space(base, start, stop, nbins, label)
    }

    pub fn ln_space(start: f64, stop: f64, nbins: usize, label: &str) -> Result<BinningPtr> {
        BinningFactory::default().ln_space(start, stop, nbins, label)
    }

    pub fn log10_space(start: f64, stop: f64, nbins: usize, label: &str) -> Result<BinningPtr> {
        BinningFactory::default().log10_space(start, stop, nbins, label)
    }

    pub fn contiguous(edges: &[f64], label: &str) -> Result<BinningPtr> {
        BinningFactory::default().contiguous(edges, label)
    }

    pub fn from_extents<S: AsRef<str>>(bins: Vec<BinExtents>, labels: &[S]) -> Result<BinningPtr> {
        BinningFactory::default().from_extents(bins, labels)
    }

    pub fn brute_force<S: AsRef<str>>(bins: Vec<BinExtents>, labels: &[S]) -> Result<BinningPtr> {
        BinningFactory::default().brute_force(bins, labels)
    }

    pub fn product(binnings: &[BinningPtr]) -> Result<BinningPtr> {
        BinningFactory::default().product(binnings)
    }
}

//! The [`Binning`] type: an immutable list of bins plus a lookup strategy.

use std::fmt::Display;
use std::sync::Arc;

use super::bin_extents::BinExtents;
use super::config::BinningConfig;
use super::error::{BinningError, Result};
use super::strategy::{Strategy, StrategyKind};
use super::validation::project_to_unique_bins;

/// Index of a bin within a [`Binning`].
pub type BinIndex = u32;

/// Shared handle to a binning. Histograms and products hold these.
pub type BinningPtr = Arc<Binning>;

/// A partition of coordinate space into non-overlapping bins.
///
/// Bin `i` is `bins()[i]`; this insertion order is the canonical bin index
/// and is not necessarily sorted. A `Binning` is built once by one of the
/// factory functions (see [`BinningFactory`](super::BinningFactory)) and is
/// never mutated afterwards, so it can be shared freely between threads.
///
/// # Example
///
/// ```rust
/// use hyperbin::binning::Binning;
///
/// let b = Binning::lin_space(0.0, 5.0, 5, "x").unwrap();
/// assert_eq!(b.find_bin_1d(0.0).unwrap(), Some(0));
/// assert_eq!(b.find_bin_1d(4.5).unwrap(), Some(4));
/// assert_eq!(b.find_bin_1d(5.0).unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Binning {
    axis_labels: Vec<String>,
    bins: Vec<BinExtents>,
    strategy: Strategy,
    config: BinningConfig,
}

impl Binning {
    /// Raw sentinel meaning "no bin", for consumers storing plain indices.
    pub const NPOS: BinIndex = BinIndex::MAX;

    /// Assembles a binning, padding `axis_labels` with empty strings up to
    /// the axis count.
    pub(crate) fn from_parts(
        mut axis_labels: Vec<String>,
        bins: Vec<BinExtents>,
        strategy: Strategy,
        config: BinningConfig,
    ) -> Result<BinningPtr> {
        if bins.len() >= Self::NPOS as usize {
            return Err(BinningError::TooManyBins(bins.len()));
        }
        let nax = bins.first().map_or(0, |b| b.len());
        if axis_labels.len() < nax {
            axis_labels.resize(nax, String::new());
        }
        Ok(Arc::new(Self {
            axis_labels,
            bins,
            strategy,
            config,
        }))
    }

    /// Finds the bin containing coordinate vector `x`.
    ///
    /// Returns `Ok(None)` when `x` lies outside every bin. Entries of `x`
    /// beyond [`number_of_axes`](Self::number_of_axes) are ignored.
    ///
    /// # Errors
    ///
    /// - [`BinningError::MismatchedAxisCount`] if `x` is shorter than the
    ///   axis count of an extent-based or product binning.
    /// - [`BinningError::TooFewProjectionsForBinning`] and
    ///   [`BinningError::UnbinnableNumber`] for malformed input to the
    ///   formula and edge-based strategies, in strict mode only.
    pub fn find_bin(&self, x: &[f64]) -> Result<Option<BinIndex>> {
        self.strategy.find(&self.bins, &self.config, x)
    }

    /// Single-axis convenience for [`find_bin`](Self::find_bin).
    pub fn find_bin_1d(&self, x: f64) -> Result<Option<BinIndex>> {
        self.find_bin(&[x])
    }

    /// Like [`find_bin`](Self::find_bin) but reports "no bin" as [`Self::NPOS`].
    pub fn find_bin_or_npos(&self, x: &[f64]) -> Result<BinIndex> {
        Ok(self.find_bin(x)?.unwrap_or(Self::NPOS))
    }

    /// Looks up every row of `rows`, stopping at the first error.
    pub fn find_bins<I, R>(&self, rows: I) -> Result<Vec<Option<BinIndex>>>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        rows.into_iter()
            .map(|row| self.find_bin(row.as_ref()))
            .collect()
    }

    pub fn bins(&self) -> &[BinExtents] {
        &self.bins
    }

    pub fn number_of_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn number_of_axes(&self) -> usize {
        self.bins.first().map_or(0, |b| b.len())
    }

    pub fn axis_labels(&self) -> &[String] {
        &self.axis_labels
    }

    pub fn config(&self) -> &BinningConfig {
        &self.config
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Hyper-volume of every bin, the whole list repeated `replicate` times.
    pub fn bin_sizes(&self, replicate: usize) -> Vec<f64> {
        let sizes: Vec<f64> = self.bins.iter().map(BinExtents::size).collect();
        sizes.repeat(replicate)
    }

    /// Unique bins of this binning projected onto `axes` (all axes when empty).
    ///
    /// The order of the result follows the bin ordering, not this binning's
    /// bin indices.
    pub fn project_to_unique_bins(&self, axes: &[usize]) -> Result<Vec<BinExtents>> {
        project_to_unique_bins(&self.bins, axes)
    }

    /// Returns a copy of this binning carrying different axis labels.
    pub fn with_labels<S: AsRef<str>>(&self, labels: &[S]) -> BinningPtr {
        let mut axis_labels: Vec<String> = labels.iter().map(|s| s.as_ref().to_owned()).collect();
        if axis_labels.len() < self.number_of_axes() {
            axis_labels.resize(self.number_of_axes(), String::new());
        }
        Arc::new(Self {
            axis_labels,
            ..self.clone()
        })
    }
}

impl Display for Binning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Axis labels: {:?}", self.axis_labels)?;
        writeln!(f, "Bins: [")?;
        for (i, bin) in self.bins.iter().enumerate() {
            writeln!(f, "  {}: {}", i, bin)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_binning_is_shareable() {
        assert_send_sync::<Binning>();
        assert_send_sync::<BinningPtr>();
    }

    #[test]
    fn test_labels_are_padded() {
        let b = Binning::from_parts(
            vec!["x".into()],
            vec![BinExtents::from([(0.0, 1.0), (0.0, 1.0)])],
            Strategy::BruteForce { nax: 2 },
            BinningConfig::default(),
        )
        .unwrap();
        assert_eq!(b.axis_labels(), &["x".to_string(), String::new()]);
        assert_eq!(b.number_of_axes(), 2);
    }

    #[test]
    fn test_bin_sizes_replicated() {
        let b = Binning::contiguous(&[0.0, 1.0, 3.0], "x").unwrap();
        assert_eq!(b.bin_sizes(1), vec![1.0, 2.0]);
        assert_eq!(b.bin_sizes(2), vec![1.0, 2.0, 1.0, 2.0]);
        assert!(b.bin_sizes(0).is_empty());
    }

    #[test]
    fn test_npos_conversion() {
        let b = Binning::lin_space(0.0, 1.0, 2, "x").unwrap();
        assert_eq!(b.find_bin_or_npos(&[0.75]).unwrap(), 1);
        assert_eq!(b.find_bin_or_npos(&[1.5]).unwrap(), Binning::NPOS);
    }

    #[test]
    fn test_find_bins_batch() {
        let b = Binning::lin_space(0.0, 3.0, 3, "x").unwrap();
        let rows = vec![vec![0.5], vec![2.5], vec![7.0]];
        assert_eq!(b.find_bins(&rows).unwrap(), vec![Some(0), Some(2), None]);
    }

    #[test]
    fn test_with_labels_returns_relabelled_copy() {
        let b = Binning::lin_space(0.0, 3.0, 3, "x").unwrap();
        let relabelled = b.with_labels(&["energy"]);
        assert_eq!(relabelled.axis_labels(), &["energy".to_string()]);
        assert_eq!(b.axis_labels(), &["x".to_string()]);
        assert_eq!(relabelled.find_bin_1d(1.5).unwrap(), Some(1));
    }

    #[test]
    fn test_display() {
        let b = Binning::contiguous(&[0.0, 1.0, 2.0], "x").unwrap();
        let s = b.to_string();
        assert!(s.starts_with("Axis labels: [\"x\"]"));
        assert!(s.contains("  1: [(1.00 - 2.00)]"));
    }
}

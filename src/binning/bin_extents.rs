//! One multi-dimensional bin: an [`Extent`] per axis.
//!
//! [`BinExtents`] wraps a `Vec<Extent>` in axis order. Read access is
//! transparent via `Deref<Target = [Extent]>`, so `.len()`, `.iter()` and
//! indexing work directly.
//!
//! # Ordering
//!
//! Bins are ordered from the **last** axis to the first: axis `nax - 1` is
//! compared first and ties fall through to lower axes. Sorting a regular
//! grid with this ordering therefore makes neighbouring bins neighbours along
//! axis 0. Comparing bins with different axis counts is an error, see
//! [`BinExtents::try_cmp`].

use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::Deref;

use super::error::{BinningError, Result};
use super::extent::Extent;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BinExtents(Vec<Extent>);

impl BinExtents {
    pub fn new(extents: Vec<Extent>) -> Self {
        Self(extents)
    }

    /// Number of axes spanned by this bin.
    pub fn number_of_axes(&self) -> usize {
        self.0.len()
    }

    /// Hyper-volume of the bin: the product of its per-axis widths.
    pub fn size(&self) -> f64 {
        self.0.iter().map(Extent::width).product()
    }

    /// Returns true if every axis of `x` falls inside the matching extent.
    ///
    /// Only the first `self.len()` entries of `x` are read; the caller is
    /// responsible for checking `x` is long enough.
    pub fn contains(&self, x: &[f64]) -> bool {
        self.0.iter().zip(x).all(|(ext, &v)| ext.contains(v))
    }

    /// Compares two bins, last axis first.
    ///
    /// Fails with [`BinningError::MismatchedAxisCount`] when the bins span a
    /// different number of axes.
    pub fn try_cmp(&self, other: &BinExtents) -> Result<Ordering> {
        if self.len() != other.len() {
            return Err(BinningError::MismatchedAxisCount {
                expected: self.len(),
                found: other.len(),
            });
        }
        Ok(self.cmp_same_axes(other))
    }

    /// Last-axis-first comparison for bins already known to share an axis
    /// count. Incomparable (NaN) extents compare equal.
    pub(crate) fn cmp_same_axes(&self, other: &BinExtents) -> Ordering {
        for (a, b) in self.0.iter().zip(&other.0).rev() {
            if a != b {
                return a.partial_cmp(b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }

    /// Builds the bin formed by the extents of the listed axes, in the
    /// order listed.
    pub fn project(&self, axes: &[usize]) -> Result<BinExtents> {
        axes.iter()
            .map(|&axis| {
                self.0.get(axis).copied().ok_or(BinningError::AxisOverflow {
                    axis,
                    nax: self.len(),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(BinExtents)
    }

    /// Returns a new bin with `other`'s extents appended after this bin's.
    pub fn concat(&self, other: &BinExtents) -> BinExtents {
        let mut extents = Vec::with_capacity(self.len() + other.len());
        extents.extend_from_slice(&self.0);
        extents.extend_from_slice(&other.0);
        BinExtents(extents)
    }

    pub fn into_inner(self) -> Vec<Extent> {
        self.0
    }

    pub fn as_slice(&self) -> &[Extent] {
        &self.0
    }
}

impl PartialOrd for BinExtents {
    /// Last-axis-first ordering; `None` when the axis counts differ.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Deref for BinExtents {
    type Target = [Extent];

    fn deref(&self) -> &[Extent] {
        &self.0
    }
}

impl AsRef<[Extent]> for BinExtents {
    fn as_ref(&self) -> &[Extent] {
        &self.0
    }
}

impl From<Vec<Extent>> for BinExtents {
    fn from(extents: Vec<Extent>) -> Self {
        Self(extents)
    }
}

impl From<Vec<(f64, f64)>> for BinExtents {
    fn from(extents: Vec<(f64, f64)>) -> Self {
        Self(extents.into_iter().map(Extent::from).collect())
    }
}

impl<const N: usize> From<[(f64, f64); N]> for BinExtents {
    fn from(extents: [(f64, f64); N]) -> Self {
        Self(extents.into_iter().map(Extent::from).collect())
    }
}

impl FromIterator<Extent> for BinExtents {
    fn from_iter<I: IntoIterator<Item = Extent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for BinExtents {
    type Item = Extent;
    type IntoIter = std::vec::IntoIter<Extent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BinExtents {
    type Item = &'a Extent;
    type IntoIter = std::slice::Iter<'a, Extent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for BinExtents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, ext) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ext)?;
        }
        write!(f, "]")
    }
}

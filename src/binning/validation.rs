//! Uniqueness and overlap checks over lists of bins, plus the geometric
//! helpers built on top of them (edge extraction, centres, grids).

use log::error;

use super::bin_extents::BinExtents;
use super::error::{BinningError, Result};

/// Fails unless every bin spans the same number of axes as the first.
pub(crate) fn check_axis_counts(bins: &[BinExtents]) -> Result<()> {
    let Some(first) = bins.first() else {
        return Ok(());
    };
    match bins.iter().find(|b| b.len() != first.len()) {
        Some(bad) => {
            error!(
                "tried to compare bins of unequal dimensionality: {} != {}",
                first.len(),
                bad.len()
            );
            Err(BinningError::MismatchedAxisCount {
                expected: first.len(),
                found: bad.len(),
            })
        }
        None => Ok(()),
    }
}

/// Stable-sorts `bins` (last axis first) and removes duplicates.
///
/// Comparing the result's length with the input's is how duplicate bins are
/// detected.
pub fn unique(mut bins: Vec<BinExtents>) -> Result<Vec<BinExtents>> {
    check_axis_counts(&bins)?;
    bins.sort_by(|a, b| a.cmp_same_axes(b));
    bins.dedup();
    Ok(bins)
}

/// True iff `a` and `b` overlap on **every** axis.
pub fn bins_overlap(a: &BinExtents, b: &BinExtents) -> Result<bool> {
    if a.len() != b.len() {
        error!(
            "tried to check for bin overlaps with bins of unequal dimensionality: {} != {}",
            a.len(),
            b.len()
        );
        return Err(BinningError::MismatchedAxisCount {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).all(|(x, y)| x.overlaps(y)))
}

/// Projects every bin onto `axes` and returns the unique projected bins.
///
/// An empty `axes` list keeps all axes.
pub fn project_to_unique_bins(bins: &[BinExtents], axes: &[usize]) -> Result<Vec<BinExtents>> {
    if axes.is_empty() {
        return unique(bins.to_vec());
    }
    let projected = bins
        .iter()
        .map(|bin| bin.project(axes))
        .collect::<Result<Vec<_>>>()
        .inspect_err(|e| error!("project_to_unique_bins: {e}"))?;
    unique(projected)
}

/// Returns the first pair of distinct projected bins that overlap on all
/// listed axes, if any.
pub fn find_overlap(
    bins: &[BinExtents],
    axes: &[usize],
) -> Result<Option<(BinExtents, BinExtents)>> {
    let projected = project_to_unique_bins(bins, axes)?;
    for (i, a) in projected.iter().enumerate() {
        for b in &projected[i + 1..] {
            if bins_overlap(a, b)? {
                return Ok(Some((a.clone(), b.clone())));
            }
        }
    }
    Ok(None)
}

/// Pairwise O(n²) check that no two distinct bins, projected onto `axes`,
/// overlap.
pub fn binning_has_overlaps(bins: &[BinExtents], axes: &[usize]) -> Result<bool> {
    Ok(find_overlap(bins, axes)?.is_some())
}

/// Extracts the edge list of `axis` from bins whose unique projections onto
/// that axis abut one another.
pub fn bin_edges_1d(bins: &[BinExtents], axis: usize) -> Result<Vec<f64>> {
    let projected = project_to_unique_bins(bins, &[axis])?;
    let Some(first) = projected.first() else {
        return Err(BinningError::EmptyBinning);
    };

    let mut edges = vec![first[0].low];
    for bin in &projected {
        let ext = bin[0];
        let expected = edges[edges.len() - 1];
        if ext.low != expected {
            error!("bin edges are not contiguous: {} != {}", ext.low, expected);
            return Err(BinningError::NonContiguousBinning {
                low: ext.low,
                expected,
            });
        }
        edges.push(ext.high);
    }
    Ok(edges)
}

/// True when every axis of `bins` projects onto an abutting, gap-free
/// sequence of extents.
pub fn is_contiguous(bins: &[BinExtents]) -> bool {
    let Some(first) = bins.first() else {
        return false;
    };
    (0..first.len()).all(|axis| bin_edges_1d(bins, axis).is_ok())
}

/// Edge lists of axes 0 and 1 for a rectilinear 2-axis binning.
pub fn rectilinear_grid(bins: &[BinExtents]) -> Result<[Vec<f64>; 2]> {
    Ok([bin_edges_1d(bins, 0)?, bin_edges_1d(bins, 1)?])
}

/// Per-axis centre of every bin.
pub fn bin_centers(bins: &[BinExtents]) -> Vec<Vec<f64>> {
    bins.iter()
        .map(|bin| bin.iter().map(|ext| ext.center()).collect())
        .collect()
}

/// Axis-0 centre of every bin.
pub fn bin_centers_1d(bins: &[BinExtents]) -> Vec<f64> {
    bins.iter()
        .filter_map(|bin| bin.first().map(|ext| ext.center()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x2() -> Vec<BinExtents> {
        vec![
            BinExtents::from([(0.0, 1.0), (0.0, 1.0)]),
            BinExtents::from([(1.0, 2.0), (0.0, 1.0)]),
            BinExtents::from([(0.0, 1.0), (1.0, 2.0)]),
            BinExtents::from([(1.0, 2.0), (1.0, 2.0)]),
        ]
    }

    #[test]
    fn test_unique_sorts_and_dedups() {
        let bins = vec![
            BinExtents::from([(1.0, 2.0), (0.0, 1.0)]),
            BinExtents::from([(0.0, 1.0), (1.0, 2.0)]),
            BinExtents::from([(0.0, 1.0), (0.0, 1.0)]),
            BinExtents::from([(1.0, 2.0), (0.0, 1.0)]),
        ];
        let u = unique(bins).unwrap();
        assert_eq!(
            u,
            vec![
                BinExtents::from([(0.0, 1.0), (0.0, 1.0)]),
                BinExtents::from([(1.0, 2.0), (0.0, 1.0)]),
                BinExtents::from([(0.0, 1.0), (1.0, 2.0)]),
            ]
        );
    }

    #[test]
    fn test_unique_rejects_mixed_axis_counts() {
        let bins = vec![
            BinExtents::from([(0.0, 1.0), (0.0, 1.0)]),
            BinExtents::from([(0.0, 1.0)]),
        ];
        assert_eq!(
            unique(bins),
            Err(BinningError::MismatchedAxisCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_bins_overlap_requires_every_axis() {
        let a = BinExtents::from([(0.0, 1.0), (0.0, 1.0)]);
        let b = BinExtents::from([(0.5, 1.5), (0.5, 1.5)]);
        let c = BinExtents::from([(0.5, 1.5), (1.0, 2.0)]);
        assert!(bins_overlap(&a, &b).unwrap());
        assert!(!bins_overlap(&a, &c).unwrap());
        assert!(bins_overlap(&a, &BinExtents::from([(0.0, 1.0)])).is_err());
    }

    #[test]
    fn test_project_to_unique_bins() {
        let projected = project_to_unique_bins(&grid_2x2(), &[1]).unwrap();
        assert_eq!(
            projected,
            vec![BinExtents::from([(0.0, 1.0)]), BinExtents::from([(1.0, 2.0)])]
        );

        assert_eq!(project_to_unique_bins(&grid_2x2(), &[]).unwrap().len(), 4);
        assert_eq!(
            project_to_unique_bins(&grid_2x2(), &[2]),
            Err(BinningError::AxisOverflow { axis: 2, nax: 2 })
        );
    }

    #[test]
    fn test_grid_has_no_overlaps() {
        let bins = grid_2x2();
        assert!(!binning_has_overlaps(&bins, &[]).unwrap());
        // each projection collapses to unique abutting extents
        assert!(!binning_has_overlaps(&bins, &[0]).unwrap());
        assert!(!binning_has_overlaps(&bins, &[1]).unwrap());
    }

    #[test]
    fn test_overlap_detected_under_projection() {
        let bins = vec![
            BinExtents::from([(0.0, 2.0), (0.0, 1.0)]),
            BinExtents::from([(1.0, 3.0), (1.0, 2.0)]),
        ];
        assert!(!binning_has_overlaps(&bins, &[]).unwrap());
        assert!(binning_has_overlaps(&bins, &[0]).unwrap());
        assert!(!binning_has_overlaps(&bins, &[1]).unwrap());

        let (a, b) = find_overlap(&bins, &[0]).unwrap().unwrap();
        assert_eq!(a, BinExtents::from([(0.0, 2.0)]));
        assert_eq!(b, BinExtents::from([(1.0, 3.0)]));
    }

    #[test]
    fn test_bin_edges_1d() {
        assert_eq!(bin_edges_1d(&grid_2x2(), 0).unwrap(), vec![0.0, 1.0, 2.0]);
        assert_eq!(bin_edges_1d(&grid_2x2(), 1).unwrap(), vec![0.0, 1.0, 2.0]);

        let gappy = vec![BinExtents::from([(0.0, 1.0)]), BinExtents::from([(2.0, 3.0)])];
        assert_eq!(
            bin_edges_1d(&gappy, 0),
            Err(BinningError::NonContiguousBinning {
                low: 2.0,
                expected: 1.0
            })
        );
        assert!(!is_contiguous(&gappy));
        assert!(is_contiguous(&grid_2x2()));
        assert!(!is_contiguous(&[]));
    }

    #[test]
    fn test_rectilinear_grid() {
        let [x, y] = rectilinear_grid(&grid_2x2()).unwrap();
        assert_eq!(x, vec![0.0, 1.0, 2.0]);
        assert_eq!(y, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_bin_centers() {
        let centers = bin_centers(&grid_2x2());
        assert_eq!(centers[1], vec![1.5, 0.5]);
        assert_eq!(bin_centers_1d(&grid_2x2()), vec![0.5, 1.5, 0.5, 1.5]);
    }
}

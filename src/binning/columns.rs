//! Column index used by the arbitrary-extent lookup strategy.
//!
//! Bins are grouped into *columns*: sets of bins sharing exactly the same
//! extent on one designated axis. The designated axis is the one producing
//! the most columns. A lookup only scans the bins of columns whose extent
//! contains the query's value on that axis.
//!
//! The axis is not a perfect discriminator for irregular layouts, so a
//! lookup keeps going through every candidate column until some bin matches
//! on all axes.

use std::cmp::Ordering;

use log::debug;

use super::bin_extents::BinExtents;
use super::extent::Extent;
use super::model::BinIndex;

/// For every axis, the bin indices stably sorted by their extent on that axis.
pub fn sorted_bin_map(bins: &[BinExtents]) -> Vec<Vec<BinIndex>> {
    let nax = bins.first().map_or(0, |b| b.len());
    (0..nax)
        .map(|axis| {
            let mut order: Vec<BinIndex> = (0..bins.len() as BinIndex).collect();
            order.sort_by(|&a, &b| {
                bins[a as usize][axis]
                    .partial_cmp(&bins[b as usize][axis])
                    .unwrap_or(Ordering::Equal)
            });
            order
        })
        .collect()
}

/// Bins grouped by identical extent along `axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinColumns {
    pub axis: usize,
    /// Member bin indices of each column, columns ordered by extent.
    pub columns: Vec<Vec<BinIndex>>,
}

/// Groups bins into columns along every axis and keeps the axis yielding
/// the most columns. Ties go to the lowest axis.
pub fn bin_columns(bins: &[BinExtents]) -> BinColumns {
    let mut best = BinColumns {
        axis: 0,
        columns: Vec::new(),
    };

    for (axis, order) in sorted_bin_map(bins).into_iter().enumerate() {
        let mut columns: Vec<Vec<BinIndex>> = Vec::new();
        for bi in order {
            let ext = &bins[bi as usize][axis];
            match columns.last_mut() {
                Some(col) if bins[col[0] as usize][axis] == *ext => col.push(bi),
                _ => columns.push(vec![bi]),
            }
        }
        if columns.len() > best.columns.len() {
            best = BinColumns { axis, columns };
        }
    }
    best
}

#[derive(Debug, Clone)]
struct Column {
    extent: Extent,
    members: Vec<BinIndex>,
}

/// Search structure closed over by the arbitrary-extent strategy.
#[derive(Debug, Clone)]
pub(crate) struct ColumnIndex {
    axis: usize,
    columns: Vec<Column>,
}

impl ColumnIndex {
    pub(crate) fn new(bins: &[BinExtents]) -> Self {
        let BinColumns { axis, columns } = bin_columns(bins);
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|members| Column {
                extent: bins[members[0] as usize][axis],
                members,
            })
            .collect();

        debug!(
            "built column index along axis {} with {} columns over {} bins",
            axis,
            columns.len(),
            bins.len()
        );
        for (i, col) in columns.iter().enumerate() {
            debug!("  column[{}] {} holds {} bins", i, col.extent, col.members.len());
        }

        Self { axis, columns }
    }

    /// Scans every column containing `x[axis]` for a bin containing `x`.
    pub(crate) fn find(&self, bins: &[BinExtents], x: &[f64]) -> Option<BinIndex> {
        let v = x[self.axis];
        for col in &self.columns {
            // columns are sorted by low edge
            if col.extent.low > v {
                break;
            }
            if !col.extent.contains(v) {
                continue;
            }
            if let Some(&bi) = col
                .members
                .iter()
                .find(|&&bi| bins[bi as usize].contains(x))
            {
                return Some(bi);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staircase() -> Vec<BinExtents> {
        vec![
            BinExtents::from([(0.0, 2.0), (0.0, 1.0)]),
            BinExtents::from([(0.0, 1.0), (1.0, 2.0)]),
            BinExtents::from([(1.0, 2.0), (1.0, 2.0)]),
            BinExtents::from([(2.0, 3.0), (0.0, 2.0)]),
        ]
    }

    #[test]
    fn test_sorted_bin_map() {
        let map = sorted_bin_map(&staircase());
        assert_eq!(map.len(), 2);
        assert_eq!(map[0], vec![1, 0, 2, 3]);
        assert_eq!(map[1], vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_bin_columns_picks_most_distinct_axis() {
        let cols = bin_columns(&staircase());
        // axis 0 has extents (0,1) (0,2) (1,2) (2,3); axis 1 only three
        assert_eq!(cols.axis, 0);
        assert_eq!(cols.columns, vec![vec![1], vec![0], vec![2], vec![3]]);
    }

    #[test]
    fn test_column_groups_share_extent() {
        let bins = vec![
            BinExtents::from([(0.0, 1.0), (0.0, 1.0)]),
            BinExtents::from([(0.0, 1.0), (1.0, 2.0)]),
            BinExtents::from([(0.0, 1.0), (2.0, 3.0)]),
            BinExtents::from([(1.0, 2.0), (0.0, 3.0)]),
        ];
        let cols = bin_columns(&bins);
        // axis 0 collapses to two columns, axis 1 keeps four
        assert_eq!(cols.axis, 1);
        assert_eq!(cols.columns, vec![vec![0], vec![3], vec![1], vec![2]]);
    }

    #[test]
    fn test_find_continues_past_unmatched_column() {
        let bins = staircase();
        let index = ColumnIndex::new(&bins);
        // (0,1) and (0,2) columns both contain x=0.5; only the second matches at y=0.5
        assert_eq!(index.find(&bins, &[0.5, 0.5]), Some(0));
        assert_eq!(index.find(&bins, &[0.5, 1.5]), Some(1));
        assert_eq!(index.find(&bins, &[1.5, 1.5]), Some(2));
        assert_eq!(index.find(&bins, &[2.5, 1.9]), Some(3));
        assert_eq!(index.find(&bins, &[2.5, 2.0]), None);
        assert_eq!(index.find(&bins, &[3.0, 0.5]), None);
    }
}

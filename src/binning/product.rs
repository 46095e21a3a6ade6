//! Cartesian product of binnings.
//!
//! The product's bins are every combination of one bin from each input,
//! with the first input varying fastest. Its lookup slices the coordinate
//! vector per input, delegates to each input's own lookup and folds the
//! results with mixed-radix strides, so bin `a + na * b` of `product([A, B])`
//! is the pair (`A` bin `a`, `B` bin `b`).

use log::{debug, error};

use super::bin_extents::BinExtents;
use super::error::{BinningError, Result};
use super::factory::{mixed_radix_strides, BinningFactory};
use super::model::{Binning, BinningPtr};
use super::strategy::Strategy;

/// Expands the bins of `binnings` with the last binning outermost: each of
/// its bins is appended to every combination of the preceding binnings.
fn expand(binnings: &[BinningPtr]) -> Vec<BinExtents> {
    match binnings.split_last() {
        None => Vec::new(),
        Some((outer, [])) => outer.bins().to_vec(),
        Some((outer, inner)) => {
            let lower = expand(inner);
            outer
                .bins()
                .iter()
                .flat_map(|ob| lower.iter().map(move |lb| lb.concat(ob)))
                .collect()
        }
    }
}

impl BinningFactory {
    /// Joint binning over the concatenated axes of `binnings`.
    ///
    /// The inputs are shared, not copied: the product keeps each handle
    /// alive for as long as it lives.
    pub fn product(&self, binnings: &[BinningPtr]) -> Result<BinningPtr> {
        if binnings.is_empty() {
            error!("cannot build a product of zero binnings");
            return Err(BinningError::EmptyProduct);
        }
        if let Some(empty) = binnings.iter().position(|b| b.number_of_bins() == 0) {
            error!("product input {empty} has no bins");
            return Err(BinningError::EmptyBinning);
        }

        let axes_per_part: Vec<usize> = binnings.iter().map(|b| b.number_of_axes()).collect();
        let counts: Vec<usize> = binnings.iter().map(|b| b.number_of_bins()).collect();
        let (strides, nbins) = mixed_radix_strides(&counts)?;

        let labels: Vec<String> = binnings
            .iter()
            .flat_map(|b| b.axis_labels().iter().cloned())
            .collect();

        let bins = expand(binnings);
        debug!(
            "built product of {} binnings: {} axes, {} bins",
            binnings.len(),
            axes_per_part.iter().sum::<usize>(),
            nbins
        );

        Binning::from_parts(
            labels,
            bins,
            Strategy::Product {
                parts: binnings.to_vec(),
                axes_per_part,
                strides,
            },
            *self.config(),
        )
    }
}

//! Multi-dimensional binning engine.
//!
//! A [`Binning`] partitions N-dimensional coordinate space into
//! non-overlapping half-open cells and maps a coordinate vector to the index
//! of the cell containing it. Binnings are built by [`BinningFactory`] with
//! one of several lookup strategies:
//!
//! | Constructor       | Lookup                                   |
//! |-------------------|------------------------------------------|
//! | `lin_space`       | closed form, O(1)                        |
//! | `lin_space_nd`    | closed form per axis, mixed-radix fold   |
//! | `log_space`       | closed form in log space, O(1)           |
//! | `contiguous`      | binary search over sorted edges          |
//! | `from_extents`    | column index over arbitrary extents      |
//! | `brute_force`     | linear scan                              |
//! | `product`         | delegates to each input, mixed-radix fold|

mod bin_extents;
mod columns;
mod config;
mod edges;
mod error;
mod extent;
mod factory;
mod model;
mod product;
mod strategy;
mod validation;


pub use bin_extents::BinExtents;
pub use columns::{bin_columns, sorted_bin_map, BinColumns};
pub use config::{BinningConfig, InputValidation};
pub use edges::{
    cat_bin_edges, edges_to_extents, lin_spaced_edges, ln_spaced_edges, log10_spaced_edges,
    log_spaced_edges, uniform_width_edges, LogBase,
};
pub use error::{BinningError, Result};
pub use extent::Extent;
pub use factory::{BinningFactory, NO_LABELS};
pub use model::{BinIndex, Binning, BinningPtr};
pub use strategy::StrategyKind;
pub use validation::{
    bin_centers, bin_centers_1d, bin_edges_1d, binning_has_overlaps, bins_overlap, find_overlap,
    is_contiguous, project_to_unique_bins, rectilinear_grid, unique,
};

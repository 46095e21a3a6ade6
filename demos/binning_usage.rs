//! Demonstrates the binning strategies on a small 2-D problem
//! (energy × angle).
//!
//! A logarithmic energy axis and a hand-digitised angle axis are combined
//! into a product binning, and the same layout is rebuilt from explicit
//! extents to show that both lookups agree.
//!
//! Run with:
//!
//! ```text
//! cargo run --example binning_usage
//! ```

use hyperbin::binning::{
    bin_centers, BinExtents, Binning, BinningConfig, BinningError, BinningFactory, NO_LABELS,
};

fn main() -> Result<(), BinningError> {
    // ── 1-D binnings ──────────────────────────────────────────────────

    let energy = Binning::log10_space(0.1, 100.0, 3, "E [GeV]")?;
    let angle = Binning::contiguous(&[-1.0, -0.5, 0.0, 0.8, 1.0], "cos θ")?;

    println!("{energy}");
    println!("{angle}");

    for e in [0.05, 0.3, 5.0, 50.0, 500.0] {
        match energy.find_bin_1d(e)? {
            Some(i) => println!("E = {e:>6} GeV -> bin {i}"),
            None => println!("E = {e:>6} GeV -> outside"),
        }
    }

    // ── Product: energy varies fastest ────────────────────────────────

    let joint = Binning::product(&[energy.clone(), angle.clone()])?;
    println!(
        "\nproduct has {} bins over axes {:?}",
        joint.number_of_bins(),
        joint.axis_labels()
    );

    let events = [[0.5, 0.9], [20.0, -0.7], [20.0, 1.0], [0.01, 0.0]];
    for (x, bin) in events.iter().zip(joint.find_bins(&events)?) {
        println!("  {:?} -> {:?}", x, bin);
    }

    // ── Same layout from explicit extents ─────────────────────────────

    let extents: Vec<BinExtents> = joint.bins().to_vec();
    let irregular = Binning::from_extents(extents, &["E [GeV]", "cos θ"])?;
    for x in &events {
        assert_eq!(irregular.find_bin(x)?, joint.find_bin(x)?);
    }
    println!("\nfrom_extents agrees with product on all events");

    // ── Bins of unequal size, in no particular order ──────────────────

    let staircase = vec![
        BinExtents::from([(0.0, 2.0), (0.0, 1.0)]),
        BinExtents::from([(2.0, 3.0), (0.0, 2.0)]),
        BinExtents::from([(0.0, 1.0), (1.0, 2.0)]),
        BinExtents::from([(1.0, 2.0), (1.0, 2.0)]),
    ];
    let stairs = Binning::from_extents(staircase, NO_LABELS)?;
    let sizes = stairs.bin_sizes(1);
    for (i, (c, size)) in bin_centers(stairs.bins()).iter().zip(sizes).enumerate() {
        println!("  staircase bin {i} centre {c:?} size {size}");
    }

    // ── Overlapping bins are rejected ─────────────────────────────────

    let overlapping = vec![
        BinExtents::from([(0.0, 2.0), (0.0, 2.0)]),
        BinExtents::from([(1.0, 3.0), (1.0, 3.0)]),
    ];
    if let Err(e) = Binning::from_extents(overlapping, NO_LABELS) {
        println!("\nrejected: {e}");
    }

    // ── Strict validation turns malformed input into errors ──────────

    let strict = BinningFactory::new(BinningConfig::strict());
    let checked = strict.lin_space(0.0, 10.0, 10, "x")?;
    let lenient = Binning::lin_space(0.0, 10.0, 10, "x")?;
    println!("\npermissive NaN -> {:?}", lenient.find_bin_1d(f64::NAN)?);
    println!("strict NaN     -> {:?}", checked.find_bin_1d(f64::NAN));

    Ok(())
}

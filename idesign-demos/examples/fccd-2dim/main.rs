use idesign::{CandidateSet, DesignSize, Grid, MultiStart, Result};
use rand::{SeedableRng, rngs::StdRng};

// f(x, y): 1 + x + y + x * y + x ^ 2 + y ^ 2
fn main() -> Result<()> {
    // print info level events of the search
    tracing_subscriber::fmt::init();

    // 31 levels per factor on [-1, 1]^2
    let candidates: CandidateSet<2> = Grid::cube(31)?.into();

    // 20 restarts of the point exchange from random starting designs
    let search = MultiStart::i_optimal(candidates)?.with_runs(20);
    let mut rng = StdRng::seed_from_u64(12);
    let report = search.search(&DesignSize::Runs(12), &mut rng, |run, best| {
        tracing::info!(run, best, "restart finished");
    })?;

    // display best design of all restarts
    println!("{report}");
    // Output
    // ---------- Design ----------
    // Reps    Point
    // 1       [ -1.0000, -1.0000 ]
    // ...
    // 1       [ +0.0000, +0.0000 ]
    // ...
    // -------- Statistics --------
    // Criterion value: 0.302778
    // No. runs: 12
    // ...

    Ok(())
}

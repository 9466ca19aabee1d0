use idesign::{CandidateSet, DesignSize, ExchangeCriteria, Grid, MultiStart, Replication, Result};
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let candidates: CandidateSet<2> = Grid::cube(31)?.into();

    // 11 unique points, the last one is run twice
    let mut counts = vec![1; 10];
    counts.push(2);
    let replication = Replication::new(counts)?;

    // every restart is limited to 50 sweeps or 10 seconds
    let criteria = ExchangeCriteria {
        max_sweeps: Some(50),
        max_duration: Some(Duration::from_secs(10)),
    };
    let search = MultiStart::i_optimal(candidates)?
        .with_runs(10)
        .with_criteria(criteria);
    let mut rng = StdRng::seed_from_u64(11);
    let report = search.search(&DesignSize::Replicated(replication), &mut rng, |_, _| {})?;
    println!("{report}");

    // physical runs in run order, one per row
    let best = report.best();
    println!("{}", best.outcome.design.to_rows());

    Ok(())
}

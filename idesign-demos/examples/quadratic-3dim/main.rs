use idesign::{
    CandidateSet, ExactDesign, Grid, IOptimality, PointExchange, QuadraticModel, Result,
    StartOptions, random_design,
};
use nalgebra::Vector3;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;

// f(x, y, z): 1 + x + y + z
//             + x * y + x * z + y * z
//             + x ^ 2 + y ^ 2 + z ^ 2
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // 5 levels per factor
    let grid = Grid::new(
        Vector3::new(-1., -1., -1.),
        Vector3::new(1., 1., 1.),
        Vector3::new(5, 5, 5),
    )?;
    let candidates: Arc<CandidateSet<3>> = Arc::new(grid.into());

    // solver pieces are built by hand instead of MultiStart
    let model = Arc::new(QuadraticModel::<3>::new()?);
    let i_opt = Arc::new(IOptimality::new(model.clone())?);
    let pexch = PointExchange::<3>::new(i_opt.clone(), candidates.clone()).with_max_sweeps(100);

    let mut rng = StdRng::seed_from_u64(3);
    let start = random_design(&model, &candidates, 16, &StartOptions::new(), &mut rng)?;
    println!("start: {:.6}", i_opt.evaluate(start.points()));

    let outcome = pexch.optimize(start)?;
    println!("{outcome}");

    // 3^3 factorial for comparison
    let indices = (0..125)
        .filter(|i| [i / 25, (i / 5) % 5, i % 5].iter().all(|l| l % 2 == 0))
        .collect();
    let factorial = ExactDesign::from_indices(&candidates, indices)?;
    println!("3^3 factorial: {:.6}", pexch.score(&factorial));

    Ok(())
}

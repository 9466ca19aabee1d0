use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use idesign::{IOptimality, MatrixDRows, QuadraticModel, Replication, Result};
use std::{hint::black_box, sync::Arc, time::Duration};

// face centred ccd, centre run last
fn fccd(centre_runs: usize) -> MatrixDRows<2> {
    let mut points = vec![
        -1., -1., 1., -1., -1., 1., 1., 1., -1., 0., 1., 0., 0., -1., 0., 1.,
    ];
    points.extend(std::iter::repeat_n(0., 2 * centre_runs));
    MatrixDRows::from_vec(points)
}

fn i_opt_2dim(i_opt: &IOptimality<2>, centre_runs: usize) -> Result<f64> {
    let points = fccd(1);
    let mut counts = vec![1; 8];
    counts.push(centre_runs);
    let replicated = i_opt.evaluate_rep(&points, &Replication::new(counts)?)?;
    let expanded = i_opt.evaluate(&fccd(centre_runs));
    Ok(replicated + expanded)
}

fn benchmark_i_opt_2dim(c: &mut Criterion) {
    let model = Arc::new(QuadraticModel::<2>::new().expect("two factors are supported"));
    let i_opt = IOptimality::new(model).expect("two factors are supported");
    let mut group = c.benchmark_group("I-Optimality Quadratic 2Dim");
    group.sample_size(50).warm_up_time(Duration::from_secs(1));
    for centre_runs in [1, 4, 16, 64] {
        group.bench_with_input(
            BenchmarkId::new("Centre runs", centre_runs),
            &centre_runs,
            |b, &n| {
                b.iter(|| i_opt_2dim(black_box(&i_opt), n));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_i_opt_2dim);
criterion_main!(benches);

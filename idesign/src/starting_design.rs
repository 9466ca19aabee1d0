use crate::{CandidateSet, Error, ExactDesign, QuadraticModel, Replication, Result};
use faer::Mat;
use rand::{Rng, seq::index};

/// Options of the random starting design generation.
#[derive(Debug, Clone, PartialEq)]
pub struct StartOptions {
    /// Maximal number of random draws until a full rank design has to be found.
    pub max_attempts: usize,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self { max_attempts: 1000 }
    }
}

impl StartOptions {
    /// Returns the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the options with the given attempt limit.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Draws `runs` distinct candidates until the design has a full rank information matrix.
///
/// Fails with [Error::TooFewRuns] if `runs` does not exceed the number of model terms, with
/// [Error::TooManyRuns] if `runs` exceeds the number of candidates and with
/// [Error::InfeasibleStart] if no full rank design was drawn within
/// [StartOptions::max_attempts].
pub fn random_design<const D: usize, R: Rng + ?Sized>(
    model: &QuadraticModel<D>,
    candidates: &CandidateSet<D>,
    runs: usize,
    options: &StartOptions,
    rng: &mut R,
) -> Result<ExactDesign<D>> {
    draw_full_rank(model, candidates, runs, None, options, rng)
}

/// Draws as many distinct candidates as `replication` has counts until the replication
/// weighted information matrix has full rank.
///
/// Every attempt keeps the replication structure. Errors as [random_design], checked against
/// the number of unique points M.
pub fn random_replicated_design<const D: usize, R: Rng + ?Sized>(
    model: &QuadraticModel<D>,
    candidates: &CandidateSet<D>,
    replication: &Replication,
    options: &StartOptions,
    rng: &mut R,
) -> Result<ExactDesign<D>> {
    draw_full_rank(
        model,
        candidates,
        replication.unique_points(),
        Some(replication),
        options,
        rng,
    )
}

fn draw_full_rank<const D: usize, R: Rng + ?Sized>(
    model: &QuadraticModel<D>,
    candidates: &CandidateSet<D>,
    runs: usize,
    replication: Option<&Replication>,
    options: &StartOptions,
    rng: &mut R,
) -> Result<ExactDesign<D>> {
    let terms = model.len();
    if runs <= terms {
        return Err(Error::TooFewRuns { runs, terms });
    }
    if runs > candidates.len() {
        return Err(Error::TooManyRuns {
            runs,
            candidates: candidates.len(),
        });
    }
    let weights = match replication {
        Some(r) => r.weights(),
        None => Mat::ones(runs, 1),
    };

    for attempt in 1..=options.max_attempts {
        let indices = index::sample(rng, candidates.len(), runs).into_vec();
        let design = ExactDesign::from_indices(candidates, indices)?;
        if model.is_estimable(design.points(), &weights) {
            return match replication {
                Some(r) => design.with_replication(r.clone()),
                None => Ok(design),
            };
        }
        tracing::debug!(attempt, runs, "starting design is rank deficient, redrawing");
    }
    Err(Error::InfeasibleStart {
        attempts: options.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, MatrixDRows};
    use rand::{SeedableRng, rngs::StdRng};

    fn setup() -> Result<(QuadraticModel<2>, CandidateSet<2>)> {
        Ok((QuadraticModel::new()?, Grid::<2>::cube(3)?.into()))
    }

    #[test]
    fn random_design_is_full_rank() -> Result<()> {
        let (model, candidates) = setup()?;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let design = random_design(&model, &candidates, 7, &StartOptions::new(), &mut rng)?;
            assert_eq!(design.len(), 7);
            assert_eq!(design.distinct_indices(), 7);
            assert!(model.is_estimable(design.points(), &design.weights()));
        }
        Ok(())
    }

    #[test]
    fn random_replicated_design_keeps_structure() -> Result<()> {
        let (model, candidates) = setup()?;
        let replication = Replication::new(vec![1, 1, 1, 1, 1, 1, 2])?;
        let mut rng = StdRng::seed_from_u64(11);
        let design = random_replicated_design(
            &model,
            &candidates,
            &replication,
            &StartOptions::new(),
            &mut rng,
        )?;
        assert_eq!(design.len(), 7);
        assert_eq!(design.runs(), 8);
        assert_eq!(design.distinct_indices(), 7);
        assert_eq!(design.replication(), Some(&replication));
        Ok(())
    }

    #[test]
    fn run_count_bounds() -> Result<()> {
        let (model, candidates) = setup()?;
        let mut rng = StdRng::seed_from_u64(0);
        let options = StartOptions::new();
        assert_eq!(
            random_design(&model, &candidates, 6, &options, &mut rng),
            Err(Error::TooFewRuns { runs: 6, terms: 6 })
        );
        assert_eq!(
            random_design(&model, &candidates, 10, &options, &mut rng),
            Err(Error::TooManyRuns {
                runs: 10,
                candidates: 9
            })
        );
        Ok(())
    }

    #[test]
    fn infeasible_start() -> Result<()> {
        let model = QuadraticModel::<2>::new()?;
        // candidates on a line never estimate the quadratic model
        let candidates = CandidateSet::new(MatrixDRows::<2>::from_fn(10, |r, c| {
            if r == 0 { c as f64 / 9. } else { 0. }
        }));
        let mut rng = StdRng::seed_from_u64(3);
        let options = StartOptions::new().with_max_attempts(5);
        assert_eq!(
            random_design(&model, &candidates, 8, &options, &mut rng),
            Err(Error::InfeasibleStart { attempts: 5 })
        );
        Ok(())
    }
}

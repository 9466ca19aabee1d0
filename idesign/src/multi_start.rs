use crate::{
    CandidateSet, Error, ExchangeCriteria, ExchangeOutcome, IOptimality, PointExchange,
    QuadraticModel, Replication, Result, StartOptions, random_design, random_replicated_design,
};
use rand::Rng;
use std::{fmt::Display, sync::Arc};

/// Requested size of the exact design.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignSize {
    /// N unreplicated runs.
    Runs(usize),
    /// M unique points, each run by its count.
    Replicated(Replication),
}

impl From<usize> for DesignSize {
    fn from(runs: usize) -> Self {
        DesignSize::Runs(runs)
    }
}

impl From<Replication> for DesignSize {
    fn from(replication: Replication) -> Self {
        DesignSize::Replicated(replication)
    }
}

/// Outcome of one successful restart.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord<const D: usize> {
    /// Restart number, starting at 1.
    pub run: usize,
    /// Point exchange outcome of this restart.
    pub outcome: ExchangeOutcome<D>,
}

/// Records of a multi start search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport<const D: usize> {
    runs: Vec<RunRecord<D>>,
    /// Number of restarts skipped for lack of a full rank starting design.
    pub failed: usize,
    best: usize,
}

impl<const D: usize> SearchReport<D> {
    /// Successful restarts in run order, never empty.
    pub fn runs(&self) -> &[RunRecord<D>] {
        &self.runs
    }

    /// Restart with the lowest criterion value, the earliest one on ties.
    pub fn best(&self) -> &RunRecord<D> {
        &self.runs[self.best]
    }

    /// Final criterion value of each successful restart.
    pub fn scores(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.outcome.score).collect()
    }
}

impl<const D: usize> Display for SearchReport<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let best = self.best();
        write!(
            f,
            "{}\nBest run: {} of {} successful, {} failed",
            best.outcome,
            best.run,
            self.runs.len(),
            self.failed
        )
    }
}

/// Repeats the point exchange from independent random starting designs and keeps the best.
///
/// ```
/// use idesign::{CandidateSet, DesignSize, Grid, MultiStart};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let candidates: CandidateSet<2> = Grid::cube(3).unwrap().into();
/// let search = MultiStart::i_optimal(candidates).unwrap().with_runs(5);
/// let mut rng = StdRng::seed_from_u64(42);
/// let report = search
///     .search(&DesignSize::Runs(9), &mut rng, |_, _| {})
///     .unwrap();
/// assert!(report.best().outcome.score.is_finite());
/// ```
pub struct MultiStart<const D: usize> {
    model: Arc<QuadraticModel<D>>,
    exchange: PointExchange<D>,
    start: StartOptions,
    runs: usize,
}

impl<const D: usize> MultiStart<D> {
    /// Returns the multi start search drawing starting designs for `model`.
    pub fn new(model: Arc<QuadraticModel<D>>, exchange: PointExchange<D>) -> Self {
        Self {
            model,
            exchange,
            start: StartOptions::default(),
            runs: 10,
        }
    }

    /// Returns the I-optimal design search over the candidates.
    pub fn i_optimal(candidates: CandidateSet<D>) -> Result<Self> {
        let model = Arc::new(QuadraticModel::new()?);
        let i_opt = IOptimality::new(model.clone())?;
        let exchange = PointExchange::<D>::new(Arc::new(i_opt), Arc::new(candidates));
        Ok(Self::new(model, exchange))
    }

    /// Returns the search with given number of restarts.
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Returns the search with given [StartOptions]
    pub fn with_start_options(mut self, start: StartOptions) -> Self {
        self.start = start;
        self
    }

    /// Returns the search with given [ExchangeCriteria] applied to every restart.
    pub fn with_criteria(mut self, criteria: ExchangeCriteria) -> Self {
        self.exchange = self.exchange.with_criteria(criteria);
        self
    }

    /// Point exchange used by every restart.
    pub fn exchange(&self) -> &PointExchange<D> {
        &self.exchange
    }

    /// Runs all restarts sequentially.
    ///
    /// `on_update` is called after every restart with the restart number and the best criterion
    /// value so far. Restarts without a full rank starting design are skipped, all other errors
    /// abort the search. Fails with [Error::NoSuccessfulRun] if no restart succeeded.
    pub fn search<R, F>(
        &self,
        size: &DesignSize,
        rng: &mut R,
        mut on_update: F,
    ) -> Result<SearchReport<D>>
    where
        R: Rng + ?Sized,
        F: FnMut(usize, f64),
    {
        let model: &QuadraticModel<D> = &self.model;
        let candidates: &CandidateSet<D> = self.exchange.candidates();
        let mut records: Vec<RunRecord<D>> = vec![];
        let mut failed = 0;
        let mut best = 0;
        let mut best_score = f64::INFINITY;

        for run in 1..=self.runs {
            let start = match size {
                DesignSize::Runs(n) => random_design(model, candidates, *n, &self.start, rng),
                DesignSize::Replicated(r) => {
                    random_replicated_design(model, candidates, r, &self.start, rng)
                }
            };
            let design = match start {
                Ok(design) => design,
                Err(err @ Error::InfeasibleStart { .. }) => {
                    tracing::warn!(run, %err, "restart skipped");
                    failed += 1;
                    on_update(run, best_score);
                    continue;
                }
                Err(err) => return Err(err),
            };
            let outcome = self.exchange.optimize(design)?;
            if records.is_empty() || outcome.score < best_score {
                tracing::info!(run, score = outcome.score, "new best design");
                best_score = outcome.score;
                best = records.len();
            }
            records.push(RunRecord { run, outcome });
            on_update(run, best_score);
        }

        if records.is_empty() {
            return Err(Error::NoSuccessfulRun { runs: self.runs });
        }
        Ok(SearchReport {
            runs: records,
            failed,
            best,
        })
    }
}

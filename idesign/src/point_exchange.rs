use crate::{CandidateSet, ExactDesign, Optimality, Result};
use faer::Mat;
use std::{
    fmt::Display,
    sync::Arc,
    time::{Duration, Instant},
};

/// Optional budgets of the point exchange, checked between sweeps only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeCriteria {
    /// Stop after this many sweeps.
    pub max_sweeps: Option<usize>,
    /// Stop when the elapsed time exceeds this duration.
    pub max_duration: Option<Duration>,
}

/// Why the point exchange stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A full sweep found no improving exchange.
    Converged,
    /// [ExchangeCriteria::max_sweeps] was reached.
    SweepLimit,
    /// [ExchangeCriteria::max_duration] was exceeded.
    TimeBudget,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            StopReason::Converged => "converged",
            StopReason::SweepLimit => "sweep limit",
            StopReason::TimeBudget => "time budget",
        };
        write!(f, "{reason}")
    }
}

/// Result of a point exchange run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome<const D: usize> {
    /// Final design.
    pub design: ExactDesign<D>,
    /// Criterion value of the final design.
    pub score: f64,
    /// Number of sweeps performed, including the final non improving one.
    pub sweeps: usize,
    /// Criterion value of the starting design followed by the value after each sweep.
    pub history: Vec<f64>,
    /// Reason to stop.
    pub stop: StopReason,
}

impl<const D: usize> Display for ExchangeOutcome<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = (12 + D * 7 + D.saturating_sub(1) * 2).max(28);
        let meas_title = format!("{:-^1$}", " Statistics ".to_string(), width);
        let footer = format!("{:-^1$}", String::new(), width);
        let score = format!("Criterion value: {:.6}", self.score);
        let runs = format!("No. runs: {}", self.design.runs());
        let sweeps = format!("Sweeps: {}", self.sweeps);
        let stop = format!("Stop: {}", self.stop);
        write!(
            f,
            "{}\n{}\n{}\n{}\n{}\n{}\n{}",
            self.design, meas_title, score, runs, sweeps, stop, footer
        )
    }
}

/// Point exchange (PEXCH) local search over a candidate set.
///
/// Every sweep scores all exchanges of a design row by a candidate and adopts the single best
/// one if it improves the criterion strictly. Ties are resolved by the first exchange found,
/// candidates varying slowest. The search converges when a sweep finds no improvement.
///
/// Replicated designs are exchanged under their replication structure: a candidate already used
/// by the design is not eligible, so the design keeps its number of unique points and each row
/// keeps its count.
pub struct PointExchange<const D: usize> {
    optimality: Arc<dyn Optimality<D> + Send + Sync>,
    candidates: Arc<CandidateSet<D>>,
    criteria: ExchangeCriteria,
}

impl<const D: usize> PointExchange<D> {
    /// Returns the point exchange minimizing `optimality` over `candidates`.
    pub fn new(
        optimality: Arc<dyn Optimality<D> + Send + Sync>,
        candidates: Arc<CandidateSet<D>>,
    ) -> Self {
        Self {
            optimality,
            candidates,
            criteria: ExchangeCriteria::default(),
        }
    }

    /// Returns the point exchange with given [ExchangeCriteria]
    pub fn with_criteria(mut self, criteria: ExchangeCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Returns the point exchange with a sweep limit.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.criteria.max_sweeps = Some(max_sweeps);
        self
    }

    /// Returns the point exchange with a wall clock budget.
    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.criteria.max_duration = Some(max_duration);
        self
    }

    /// Candidate set of the search.
    pub fn candidates(&self) -> &Arc<CandidateSet<D>> {
        &self.candidates
    }

    /// Criterion value of a design.
    pub fn score(&self, design: &ExactDesign<D>) -> f64 {
        self.optimality.measure(&design.weights(), design.points())
    }

    /// Improves the design until no exchange lowers the criterion or a budget is exhausted.
    ///
    /// Fails if the design was not built on the candidate set of the search.
    pub fn optimize(&self, mut design: ExactDesign<D>) -> Result<ExchangeOutcome<D>> {
        design.check_candidates(&self.candidates)?;
        let weights = design.weights();
        let constrained = design.replication().is_some();
        let mut score = self.optimality.measure(&weights, design.points());
        let mut history = vec![score];
        let mut sweeps = 0;
        let start = Instant::now();

        let stop = loop {
            if self.criteria.max_sweeps.is_some_and(|m| sweeps >= m) {
                break StopReason::SweepLimit;
            }
            if self
                .criteria
                .max_duration
                .is_some_and(|d| start.elapsed() >= d)
            {
                break StopReason::TimeBudget;
            }
            sweeps += 1;
            match self.sweep(&design, &weights, score, constrained) {
                Some((row, candidate, best)) => {
                    design.replace(row, candidate, &self.candidates);
                    tracing::debug!(sweep = sweeps, score = best, row, candidate, "exchanged");
                    score = best;
                    history.push(score);
                }
                None => {
                    history.push(score);
                    break StopReason::Converged;
                }
            }
        };
        tracing::info!(score, sweeps, %stop, "point exchange stopped");

        Ok(ExchangeOutcome {
            design,
            score,
            sweeps,
            history,
            stop,
        })
    }

    /// Returns row, candidate and score of the best strictly improving exchange.
    fn sweep(
        &self,
        design: &ExactDesign<D>,
        weights: &Mat<f64>,
        score: f64,
        constrained: bool,
    ) -> Option<(usize, usize, f64)> {
        let mut in_use = vec![false; self.candidates.len()];
        if constrained {
            design.indices().iter().for_each(|&i| in_use[i] = true);
        }
        let mut trial = design.points().clone();
        let mut best = None;
        let mut best_score = score;
        for (c_idx, candidate) in self.candidates.points().column_iter().enumerate() {
            if in_use[c_idx] {
                continue;
            }
            for row in 0..trial.ncols() {
                trial.set_column(row, &candidate);
                let val = self.optimality.measure(weights, &trial);
                if val < best_score {
                    best_score = val;
                    best = Some((row, c_idx));
                }
                trial.set_column(row, &design.points().column(row));
            }
        }
        best.map(|(row, c_idx)| (row, c_idx, best_score))
    }
}

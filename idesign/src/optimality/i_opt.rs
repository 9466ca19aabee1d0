use crate::{
    MatrixDRows, Optimality, QuadraticModel, Replication, Result, numerical_rank, region_moments,
};
use faer::{
    Mat,
    linalg::solvers::{PartialPivLu, Solve},
};
use faer_ext::IntoFaer;
use std::sync::Arc;

#[cfg_attr(doc, katexit::katexit)]
/// I-Optimality is defined as the prediction variance of the quadratic model averaged over the
/// design region $[-1, 1]^k$.
///
/// $$ I_{opt} := \frac{\text{tr}(\mathcal{M}^{-1} W)}{2^k} $$
///
/// with information matrix $\mathcal{M} = F^T R F$, replication matrix $R$ and region moments
/// matrix $W$. Designs with a rank deficient information matrix are measured as
/// [f64::INFINITY].
#[derive(Clone)]
pub struct IOptimality<const D: usize> {
    model: Arc<QuadraticModel<D>>,
    moments: Mat<f64>,
    volume: f64,
}

impl<const D: usize> IOptimality<D> {
    /// Instantizes [IOptimality]
    pub fn new(model: Arc<QuadraticModel<D>>) -> Result<Self> {
        let moments = region_moments(D)?.view_range(.., ..).into_faer().to_owned();
        Ok(Self {
            model,
            moments,
            volume: 2f64.powi(D as i32),
        })
    }

    /// Returns the underlying quadratic model.
    pub fn model(&self) -> &Arc<QuadraticModel<D>> {
        &self.model
    }

    /// Returns the I-optimality of the unreplicated design points.
    pub fn evaluate(&self, points: &MatrixDRows<D>) -> f64 {
        self.measure(&Mat::ones(points.ncols(), 1), points)
    }

    /// Returns the I-optimality of the design points replicated by the given structure.
    pub fn evaluate_rep(&self, points: &MatrixDRows<D>, replication: &Replication) -> Result<f64> {
        replication.check_points(points.ncols())?;
        Ok(self.measure(&replication.weights(), points))
    }

    #[inline(always)]
    fn trace_inv_fim_moments(&self, fim: Mat<f64>) -> f64 {
        let fim_lu: PartialPivLu<f64> = fim.partial_piv_lu();
        let s = fim_lu.solve(&self.moments);
        s.diagonal().column_vector().sum()
    }
}

impl<const D: usize> Optimality<D> for IOptimality<D> {
    fn measure(&self, weights: &Mat<f64>, points: &MatrixDRows<D>) -> f64 {
        let fim = self.model.fim(points, weights);
        if numerical_rank(&fim) < self.model.len() {
            return f64::INFINITY;
        }
        let val = self.trace_inv_fim_moments(fim) / self.volume;
        if val.is_nan() { f64::INFINITY } else { val }
    }
}

mod i_opt;
use crate::MatrixDRows;
use faer::Mat;
pub use i_opt::IOptimality;

/// Defines an optimality criterion of exact designs by its measure function.
///
/// Lower measure values are better. Designs the criterion cannot judge, such as designs with a
/// singular information matrix, are measured as [f64::INFINITY].
pub trait Optimality<const D: usize> {
    /// Returns the criterion value of the column orientated points, where the k-th weight is the
    /// number of replications of the k-th point.
    fn measure(&self, weights: &Mat<f64>, points: &MatrixDRows<D>) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct RunCount {}

    impl Optimality<1> for RunCount {
        fn measure(&self, weights: &Mat<f64>, _points: &MatrixDRows<1>) -> f64 {
            weights.col(0).iter().sum()
        }
    }

    #[test]
    fn custom_optimality_as_trait_object() {
        let opt: Arc<dyn Optimality<1> + Send + Sync> = Arc::new(RunCount {});
        let points = MatrixDRows::<1>::from_vec(vec![0., 1.]);
        let weights = Mat::<f64>::ones(2, 1);
        assert_eq!(opt.measure(&weights, &points), 2.);
    }
}

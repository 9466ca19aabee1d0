use faer::Mat;
use faer_ext::IntoNalgebra;
use nalgebra::{Const, DMatrix, Dyn, Matrix, VecStorage};

/// Matrix with D rows
pub type MatrixDRows<const D: usize> = Matrix<f64, Const<D>, Dyn, VecStorage<f64, Const<D>, Dyn>>;

/// Returns the numerical rank of a square matrix.
///
/// Singular values below `max(sigma) * n * eps` count as zero.
pub fn numerical_rank(mat: &Mat<f64>) -> usize {
    let n = mat.nrows().max(mat.ncols());
    if n == 0 {
        return 0;
    }
    let mat: DMatrix<f64> = mat.as_ref().into_nalgebra().clone_owned();
    let singular_values = mat.singular_values();
    let sigma_max = singular_values.max();
    let tol = sigma_max * n as f64 * f64::EPSILON;
    singular_values.iter().filter(|s| **s > tol).count()
}

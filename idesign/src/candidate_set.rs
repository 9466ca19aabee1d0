use crate::{Error, Grid, MatrixDRows, Result};
use nalgebra::DMatrix;

/// Finite set of admissible design points, one point per column.
///
/// Exact designs refer to candidates by their column index.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet<const D: usize> {
    points: MatrixDRows<D>,
}

impl<const D: usize> CandidateSet<D> {
    /// Creates the candidate set from column orientated points.
    pub fn new(points: MatrixDRows<D>) -> Self {
        Self { points }
    }

    /// Creates the candidate set from a matrix with one point per row.
    pub fn from_rows(rows: &DMatrix<f64>) -> Result<Self> {
        if rows.ncols() != D {
            return Err(Error::ShapeMismatch {
                mat1: "rows",
                mat2: "factors",
                dim1: 1,
                dim2: 0,
                shape1: rows.shape(),
                shape2: (D, 1),
            });
        }
        let points = MatrixDRows::<D>::from_column_slice(rows.transpose().as_slice());
        Ok(Self { points })
    }

    /// Number of candidate points.
    pub fn len(&self) -> usize {
        self.points.ncols()
    }

    /// Returns true if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.points.ncols() == 0
    }

    /// Column orientated candidate points.
    pub fn points(&self) -> &MatrixDRows<D> {
        &self.points
    }

    /// Returns the selected candidates as column orientated points, in index order.
    ///
    /// Indices have to be in range, see [crate::ExactDesign::from_indices] for a checked variant.
    pub fn select(&self, indices: &[usize]) -> MatrixDRows<D> {
        MatrixDRows::<D>::from_fn(indices.len(), |r, c| self.points[(r, indices[c])])
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(Error::CandidateIndex {
                index,
                candidates: self.len(),
            });
        }
        Ok(())
    }
}

impl<const D: usize> From<Grid<D>> for CandidateSet<D> {
    fn from(grid: Grid<D>) -> Self {
        Self::new(grid.points)
    }
}

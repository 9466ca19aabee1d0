use crate::{Error, MatrixDRows, Result};
use nalgebra::SVector;

/// Full factorial grid defined by lower/upper bound and the number of levels q per factor.
#[derive(Debug, PartialEq)]
pub struct Grid<const D: usize> {
    /// Lower bound.
    pub lower: SVector<f64, D>,
    /// Upper bound.
    pub upper: SVector<f64, D>,
    /// Number of levels per factor.
    pub q: SVector<usize, D>,
    /// Set of points in grid, one point per column.
    pub points: MatrixDRows<D>,
}

impl<const D: usize> Grid<D> {
    /// Creates the grid as cartesian product of equally spaced factor levels.
    ///
    /// The first factor varies slowest.
    pub fn new(
        lower: SVector<f64, D>,
        upper: SVector<f64, D>,
        q: SVector<usize, D>,
    ) -> Result<Self> {
        let (q_min_dim, q_min) = q.argmin();
        if q_min < 2 {
            return Err(Error::MinValue {
                vector: "q",
                dim: q_min_dim,
                value: q_min,
                ge_value: 2,
            });
        }
        let (dim, distance) = (upper - lower).argmin();
        if distance <= 0.0 {
            return Err(Error::MinDistanceBetweenVectors {
                vector1: "lower",
                vector2: "upper",
                dim,
                distance,
                gt_distance: 0.0,
            });
        }

        let x = SVector::<f64, D>::zeros();
        let points_vec = Grid::build_grid(&lower, &upper, &q, x, 0);
        let points = MatrixDRows::<D>::from_columns(&points_vec);
        Ok(Self {
            lower,
            upper,
            q,
            points,
        })
    }

    /// Creates the grid on the coded design region `[-1, 1]^D` with q levels per factor.
    pub fn cube(q: usize) -> Result<Self> {
        Self::new(
            SVector::from_element(-1.),
            SVector::from_element(1.),
            SVector::from_element(q),
        )
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.points.ncols()
    }

    /// Returns true if the grid holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.ncols() == 0
    }

    fn build_grid(
        lower: &SVector<f64, D>,
        upper: &SVector<f64, D>,
        q: &SVector<usize, D>,
        mut x: SVector<f64, D>,
        d: usize,
    ) -> Vec<SVector<f64, D>> {
        if d < D {
            let mut vec: Vec<SVector<f64, D>> = vec![];
            let steps = (q[d] - 1) as f64;
            for i in 0..q[d] {
                // level i / (q - 1) keeps the mid level of an odd grid exactly at the centre
                x[d] = lower[d] + (upper[d] - lower[d]) * i as f64 / steps;
                vec.extend(Grid::build_grid(lower, upper, q, x, d + 1));
            }
            vec
        } else {
            vec![x]
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Grid, MatrixDRows, Result};
    use nalgebra::Vector2;

    #[test]
    fn grid() -> Result<()> {
        let lower = Vector2::new(0., 0.);
        let upper = Vector2::new(1., 1.);
        let q = Vector2::new(2, 2);
        let grid = Grid::new(lower, upper, q)?;

        let grid_rslt: MatrixDRows<2> = MatrixDRows::from_vec(vec![0., 0., 0., 1., 1., 0., 1., 1.]);
        assert_eq!(grid.points, grid_rslt);
        Ok(())
    }

    #[test]
    fn grid_cube_levels() -> Result<()> {
        let grid = Grid::<2>::cube(31)?;
        assert_eq!(grid.len(), 961);
        // centre point sits in the middle of the grid and is exact
        assert_eq!(grid.points.column(480).iter().copied().collect::<Vec<_>>(), vec![0., 0.]);
        assert_eq!(grid.points.column(0).iter().copied().collect::<Vec<_>>(), vec![-1., -1.]);
        assert_eq!(grid.points.column(960).iter().copied().collect::<Vec<_>>(), vec![1., 1.]);
        Ok(())
    }

    #[test]
    fn grid_bound() -> Result<()> {
        let lower = Vector2::new(0., 0.);
        let upper = Vector2::new(1., 0.);
        let q = Vector2::new(2, 2);
        let grid = Grid::new(lower, upper, q);

        let grid_err = Err(Error::MinDistanceBetweenVectors {
            vector1: "lower",
            vector2: "upper",
            dim: 1,
            distance: 0.,
            gt_distance: 0.,
        });
        assert_eq!(grid, grid_err);
        Ok(())
    }

    #[test]
    fn grid_sample_size() -> Result<()> {
        let lower = Vector2::new(0., 0.);
        let upper = Vector2::new(1., 1.);
        let q = Vector2::new(2, 1);
        let grid = Grid::new(lower, upper, q);

        let grid_err = Err(Error::MinValue {
            vector: "q",
            dim: 1,
            value: 1,
            ge_value: 2,
        });
        assert_eq!(grid, grid_err);
        Ok(())
    }
}

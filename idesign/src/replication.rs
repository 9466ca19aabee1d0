use crate::{Error, Result};
use faer::Mat;

/// Replication structure of an exact design.
///
/// The i-th count is the required number of runs of the i-th unique design point. The sum of all
/// counts is the number of physical runs N, the number of counts is the number of unique points
/// M.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replication {
    counts: Vec<usize>,
}

impl Replication {
    /// Creates the replication structure, every count has to be positive.
    pub fn new(counts: Vec<usize>) -> Result<Self> {
        if let Some((dim, &value)) = counts.iter().enumerate().find(|(_, c)| **c == 0) {
            return Err(Error::MinValue {
                vector: "replication",
                dim,
                value,
                ge_value: 1,
            });
        }
        Ok(Self { counts })
    }

    /// Replication counts, one per unique point.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of unique points M.
    pub fn unique_points(&self) -> usize {
        self.counts.len()
    }

    /// Number of physical runs N.
    pub fn runs(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Returns the counts as weight column for [crate::Optimality::measure].
    pub fn weights(&self) -> Mat<f64> {
        let mut weights = Mat::<f64>::zeros(self.counts.len(), 1);
        weights
            .col_mut(0)
            .iter_mut()
            .zip(&self.counts)
            .for_each(|(w, c)| *w = *c as f64);
        weights
    }

    /// Fails if the number of counts differs from the number of design points.
    pub fn check_points(&self, points: usize) -> Result<()> {
        if self.counts.len() != points {
            return Err(Error::ShapeMismatch {
                mat1: "replication",
                mat2: "points",
                dim1: 0,
                dim2: 1,
                shape1: (self.counts.len(), 1),
                shape2: (1, points),
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<usize>> for Replication {
    type Error = Error;

    fn try_from(counts: Vec<usize>) -> Result<Self> {
        Self::new(counts)
    }
}

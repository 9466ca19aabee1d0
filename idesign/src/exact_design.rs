use crate::{CandidateSet, Error, MatrixDRows, Replication, Result};
use faer::Mat;
use nalgebra::DMatrix;
use std::fmt::Display;

/// Exact design on a candidate set.
///
/// Each design row (point column) is a copy of the candidate with the same position in
/// `indices`. Without replication every row is one physical run. With replication the i-th row
/// is run `counts[i]` times and all indices are pairwise distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactDesign<const D: usize> {
    points: MatrixDRows<D>,
    indices: Vec<usize>,
    replication: Option<Replication>,
}

impl<const D: usize> Display for ExactDesign<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reps = self.replication.as_ref().map(|r| r.counts());
        let rows: String = self
            .points
            .column_iter()
            .enumerate()
            .map(|(i, p)| {
                let p_values = p
                    .iter()
                    .map(|v| format!("{:>+.4}", v))
                    .collect::<Vec<String>>()
                    .join(", ");
                let count = reps.map_or(1, |r| r[i]);
                format!("{count}\t[ {p_values} ]")
            })
            .collect::<Vec<String>>()
            .join("\n");
        write!(
            f,
            "{:-^1$}\nReps\tPoint\n{rows}",
            " Design ".to_string(),
            (12 + D * 7 + D.saturating_sub(1) * 2).max(28)
        )
    }
}

impl<const D: usize> ExactDesign<D> {
    /// Creates the unreplicated design of the given candidates, fails on out of range indices.
    pub fn from_indices(candidates: &CandidateSet<D>, indices: Vec<usize>) -> Result<Self> {
        for &index in indices.iter() {
            candidates.check_index(index)?;
        }
        Ok(Self {
            points: candidates.select(&indices),
            indices,
            replication: None,
        })
    }

    /// Returns the design replicated by the given structure.
    ///
    /// The number of counts has to match the number of design points and the candidate indices
    /// have to be pairwise distinct.
    pub fn with_replication(mut self, replication: Replication) -> Result<Self> {
        replication.check_points(self.points.ncols())?;
        if let Some(index) = self.first_duplicate() {
            return Err(Error::DuplicateCandidate { index });
        }
        self.replication = Some(replication);
        Ok(self)
    }

    /// Column orientated design points.
    pub fn points(&self) -> &MatrixDRows<D> {
        &self.points
    }

    /// Candidate index of each design point.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Replication structure, if any.
    pub fn replication(&self) -> Option<&Replication> {
        self.replication.as_ref()
    }

    /// Number of design points (rows), M for replicated designs.
    pub fn len(&self) -> usize {
        self.points.ncols()
    }

    /// Returns true for a design without points.
    pub fn is_empty(&self) -> bool {
        self.points.ncols() == 0
    }

    /// Number of physical runs N.
    pub fn runs(&self) -> usize {
        self.replication
            .as_ref()
            .map_or(self.points.ncols(), |r| r.runs())
    }

    /// Number of distinct candidates in use.
    pub fn distinct_indices(&self) -> usize {
        let mut indices = self.indices.clone();
        indices.sort_unstable();
        indices.dedup();
        indices.len()
    }

    fn first_duplicate(&self) -> Option<usize> {
        let mut seen = vec![];
        self.indices.iter().copied().find(|i| {
            let duplicate = seen.contains(i);
            seen.push(*i);
            duplicate
        })
    }

    /// Weight column of the design points for [crate::Optimality::measure].
    pub fn weights(&self) -> Mat<f64> {
        match &self.replication {
            Some(r) => r.weights(),
            None => Mat::ones(self.points.ncols(), 1),
        }
    }

    /// Returns the physical runs as column orientated points, each point repeated by its count.
    pub fn expanded(&self) -> MatrixDRows<D> {
        match &self.replication {
            None => self.points.clone(),
            Some(r) => {
                let columns: Vec<usize> = r
                    .counts()
                    .iter()
                    .enumerate()
                    .flat_map(|(i, &c)| std::iter::repeat_n(i, c))
                    .collect();
                MatrixDRows::<D>::from_fn(columns.len(), |row, col| {
                    self.points[(row, columns[col])]
                })
            }
        }
    }

    /// Returns the physical runs as `N x D` matrix, one run per row.
    pub fn to_rows(&self) -> DMatrix<f64> {
        let expanded = self.expanded();
        DMatrix::from_fn(expanded.ncols(), D, |r, c| expanded[(c, r)])
    }

    /// Fails unless every design point is the candidate its index names.
    pub(crate) fn check_candidates(&self, candidates: &CandidateSet<D>) -> Result<()> {
        for (row, &index) in self.indices.iter().enumerate() {
            candidates.check_index(index)?;
            if self.points.column(row) != candidates.points().column(index) {
                return Err(Error::CandidateMismatch { row, index });
            }
        }
        Ok(())
    }

    /// Overwrites design row `row` by candidate `candidate`.
    pub(crate) fn replace(&mut self, row: usize, candidate: usize, candidates: &CandidateSet<D>) {
        self.points
            .set_column(row, &candidates.points().column(candidate));
        self.indices[row] = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;
    use nalgebra::dmatrix;

    fn candidates() -> Result<CandidateSet<2>> {
        Ok(Grid::<2>::cube(3)?.into())
    }

    #[test]
    fn design_from_indices() -> Result<()> {
        let candidates = candidates()?;
        let design = ExactDesign::from_indices(&candidates, vec![0, 4, 4])?;
        assert_eq!(design.len(), 3);
        assert_eq!(design.runs(), 3);
        assert_eq!(design.distinct_indices(), 2);
        assert_eq!(design.weights(), Mat::<f64>::ones(3, 1));
        assert_eq!(
            ExactDesign::from_indices(&candidates, vec![0, 9]),
            Err(Error::CandidateIndex {
                index: 9,
                candidates: 9
            })
        );
        Ok(())
    }

    #[test]
    fn replicated_design_expansion() -> Result<()> {
        let candidates = candidates()?;
        let design = ExactDesign::from_indices(&candidates, vec![0, 4])?
            .with_replication(Replication::new(vec![1, 3])?)?;
        assert_eq!(design.len(), 2);
        assert_eq!(design.runs(), 4);
        assert_eq!(
            design.to_rows(),
            dmatrix![
                -1., -1.;
                0., 0.;
                0., 0.;
                0., 0.
            ]
        );
        Ok(())
    }

    #[test]
    fn replicated_design_requires_distinct_indices() -> Result<()> {
        let candidates = candidates()?;
        let design = ExactDesign::from_indices(&candidates, vec![4, 4])?;
        assert_eq!(
            design
                .clone()
                .with_replication(Replication::new(vec![1, 2])?),
            Err(Error::DuplicateCandidate { index: 4 })
        );
        assert!(matches!(
            design.with_replication(Replication::new(vec![1])?),
            Err(Error::ShapeMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn design_belongs_to_candidates() -> Result<()> {
        let candidates = candidates()?;
        let design = ExactDesign::from_indices(&candidates, vec![0, 4, 8])?;
        assert!(design.check_candidates(&candidates).is_ok());

        let shifted = CandidateSet::new(candidates.points().add_scalar(0.5));
        assert_eq!(
            design.check_candidates(&shifted),
            Err(Error::CandidateMismatch { row: 0, index: 0 })
        );
        let small: CandidateSet<2> = Grid::<2>::new(
            nalgebra::Vector2::new(-1., -1.),
            nalgebra::Vector2::new(1., 1.),
            nalgebra::Vector2::new(2, 2),
        )?
        .into();
        assert_eq!(
            design.check_candidates(&small),
            Err(Error::CandidateIndex {
                index: 4,
                candidates: 4
            })
        );
        Ok(())
    }

    #[test]
    fn replace_row() -> Result<()> {
        let candidates = candidates()?;
        let mut design = ExactDesign::from_indices(&candidates, vec![0, 1])?;
        design.replace(1, 8, &candidates);
        assert_eq!(design, ExactDesign::from_indices(&candidates, vec![0, 8])?);
        Ok(())
    }

    #[test]
    fn design_display() -> Result<()> {
        let candidates: CandidateSet<1> = Grid::<1>::cube(3)?.into();
        let design = ExactDesign::from_indices(&candidates, vec![0, 1, 2])?
            .with_replication(Replication::new(vec![1, 2, 1])?)?;
        assert_eq!(
            format!("{design}"),
            "---------- Design ----------\n\
            Reps\tPoint\n\
            1\t[ -1.0000 ]\n\
            2\t[ +0.0000 ]\n\
            1\t[ +1.0000 ]"
        );
        Ok(())
    }
}

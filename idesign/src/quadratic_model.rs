use crate::{Error, MatrixDRows, Result, numerical_rank};
use faer::Mat;
use nalgebra::SVector;

/// Returns the number of terms of the full quadratic model in `factors` factors.
pub fn number_of_terms(factors: usize) -> Result<usize> {
    check_factors(factors)?;
    Ok((factors + 1) * (factors + 2) / 2)
}

/// Returns the exponent vectors of the full quadratic model terms in model matrix column order.
///
/// The order is: intercept, linear terms, pairwise interactions in lexicographic pair order,
/// pure quadratic terms.
pub fn quadratic_exponents(factors: usize) -> Result<Vec<Vec<u32>>> {
    check_factors(factors)?;
    Ok(exponents(factors))
}

pub(crate) fn exponents(factors: usize) -> Vec<Vec<u32>> {
    let unit = |i: usize, e: u32| {
        let mut v = vec![0; factors];
        v[i] = e;
        v
    };
    let mut terms = vec![vec![0; factors]];
    terms.extend((0..factors).map(|i| unit(i, 1)));
    for i in 0..factors {
        for j in (i + 1)..factors {
            let mut v = unit(i, 1);
            v[j] = 1;
            terms.push(v);
        }
    }
    terms.extend((0..factors).map(|i| unit(i, 2)));
    terms
}

fn check_factors(factors: usize) -> Result<()> {
    match factors {
        1..=4 => Ok(()),
        _ => Err(Error::UnsupportedFactors { factors }),
    }
}

/// Monomial term $\prod_i x_i^{e_i}$ of the quadratic model.
#[cfg_attr(doc, katexit::katexit)]
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticTerm<const D: usize> {
    /// Exponent per factor.
    pub exponents: SVector<u32, D>,
}

impl<const D: usize> QuadraticTerm<D> {
    /// Value of the term at x.
    #[inline(always)]
    pub fn val(&self, x: &SVector<f64, D>) -> f64 {
        self.exponents
            .iter()
            .zip(x.iter())
            .fold(1., |acc, (e, v)| match e {
                0 => acc,
                1 => acc * v,
                e => acc * v.powi(*e as i32),
            })
    }
}

#[cfg_attr(doc, katexit::katexit)]
/// Full second-order response surface model in D factors.
///
/// The feature map $f:\mathbb R^D \to\mathbb R^p$ consists of the constant, the D linear terms,
/// all pairwise interactions and the D pure quadratic terms, with $p = (D+1)(D+2)/2$. Only
/// $D \in \{1, 2, 3, 4\}$ is supported.
///
/// ```
/// use idesign::QuadraticModel;
///
/// let model = QuadraticModel::<2>::new().unwrap();
/// assert_eq!(model.len(), 6);
/// assert!(QuadraticModel::<5>::new().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticModel<const D: usize> {
    /// Ordered list of terms, one per model matrix column.
    pub terms: Vec<QuadraticTerm<D>>,
}

impl<const D: usize> QuadraticModel<D> {
    /// Creates the quadratic model, fails for unsupported factor numbers.
    pub fn new() -> Result<Self> {
        let terms = quadratic_exponents(D)?
            .into_iter()
            .map(|e| QuadraticTerm {
                exponents: SVector::from_vec(e),
            })
            .collect();
        Ok(Self { terms })
    }

    /// Number of model terms p.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false for a constructed model.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the feature map $f(x)$ as column.
    pub fn feature_vec(&self, x: &SVector<f64, D>) -> Mat<f64> {
        let mut feature_vec = Mat::<f64>::zeros(self.terms.len(), 1);
        feature_vec
            .col_mut(0)
            .iter_mut()
            .enumerate()
            .for_each(|(idx, r)| {
                *r = self.terms[idx].val(x);
            });
        feature_vec
    }

    /// Returns the transposed model matrix $F^T \in \mathbb R^{p \times n}$ of the column
    /// orientated points.
    pub fn design_t(&self, points: &MatrixDRows<D>) -> Mat<f64> {
        let mut design_t = Mat::<f64>::zeros(self.terms.len(), points.ncols());
        design_t
            .col_iter_mut()
            .enumerate()
            .for_each(|(j, mut col)| {
                let x = points.column(j).into();
                for i in 0..col.nrows() {
                    col[i] = self.terms[i].val(&x);
                }
            });
        design_t
    }

    /// Returns the model matrix $F \in \mathbb R^{n \times p}$, one row per point.
    pub fn model_matrix(&self, points: &MatrixDRows<D>) -> Mat<f64> {
        self.design_t(points).transpose().to_owned()
    }

    /// Returns the information matrix $F^T R F = \sum_{k} w_k f(x_k) f(x_k)^T$ of the column
    /// orientated points with weights (replications) $w$.
    pub fn fim(&self, points: &MatrixDRows<D>, weights: &Mat<f64>) -> Mat<f64> {
        let design_t = self.design_t(points);
        self.fim_from_design_t(&design_t, weights)
    }

    /// Returns the information matrix from a precomputed transposed model matrix.
    pub fn fim_from_design_t(&self, design_t: &Mat<f64>, weights: &Mat<f64>) -> Mat<f64> {
        let no_terms = self.terms.len();
        let mut fim = Mat::<f64>::zeros(no_terms, no_terms);
        for (c_idx, w) in weights.col(0).iter().enumerate() {
            fim += *w * design_t.col(c_idx) * design_t.col(c_idx).transpose();
        }
        fim
    }

    /// Returns true if the weighted information matrix has full rank p.
    pub fn is_estimable(&self, points: &MatrixDRows<D>, weights: &Mat<f64>) -> bool {
        numerical_rank(&self.fim(points, weights)) == self.terms.len()
    }
}

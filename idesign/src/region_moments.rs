use crate::{Error, Result, quadratic_model::exponents};
use nalgebra::DMatrix;
use std::sync::LazyLock;

/// Moments matrices for one to four factors, index k - 1.
static REGION_MOMENTS: LazyLock<[DMatrix<f64>; 4]> =
    LazyLock::new(|| [1, 2, 3, 4].map(moments_matrix));

#[cfg_attr(doc, katexit::katexit)]
/// Returns the region moments matrix $W = \int_{[-1,1]^k} f(x) f(x)^T \mathrm{d}x$ of the full
/// quadratic model in `factors` factors.
///
/// The matrices are computed once per process and shared afterwards.
pub fn region_moments(factors: usize) -> Result<&'static DMatrix<f64>> {
    match factors {
        1..=4 => Ok(&REGION_MOMENTS[factors - 1]),
        _ => Err(Error::UnsupportedFactors { factors }),
    }
}

/// Integral of x^n over [-1, 1].
fn monomial_moment(n: u32) -> f64 {
    if n % 2 == 1 {
        0.
    } else {
        2. / (n + 1) as f64
    }
}

fn moments_matrix(factors: usize) -> DMatrix<f64> {
    let terms = exponents(factors);
    let p = terms.len();
    DMatrix::from_fn(p, p, |r, c| {
        terms[r]
            .iter()
            .zip(&terms[c])
            .map(|(a, b)| monomial_moment(a + b))
            .product()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;

    #[test]
    fn one_factor_moments() -> Result<()> {
        let w = region_moments(1)?;
        let expected = dmatrix![
            2., 0., 2. / 3.;
            0., 2. / 3., 0.;
            2. / 3., 0., 2. / 5.
        ];
        assert_eq!(w, &expected);
        Ok(())
    }

    #[test]
    fn two_factor_moments() -> Result<()> {
        let w = region_moments(2)?;
        let t = 4. / 3.;
        let expected = dmatrix![
            4., 0., 0., 0., t, t;
            0., t, 0., 0., 0., 0.;
            0., 0., t, 0., 0., 0.;
            0., 0., 0., 4. / 9., 0., 0.;
            t, 0., 0., 0., 4. / 5., 4. / 9.;
            t, 0., 0., 0., 4. / 9., 4. / 5.
        ];
        assert!(w.relative_eq(&expected, 1e-15, 1e-15));
        Ok(())
    }

    #[test]
    fn moments_are_symmetric_with_region_volume() -> Result<()> {
        for k in 1..=4 {
            let w = region_moments(k)?;
            assert_eq!(w.nrows(), (k + 1) * (k + 2) / 2);
            assert_eq!(w, &w.transpose());
            assert_eq!(w[(0, 0)], 2f64.powi(k as i32));
        }
        Ok(())
    }

    #[test]
    fn unsupported_moments() {
        assert_eq!(region_moments(0), Err(Error::UnsupportedFactors { factors: 0 }));
        assert_eq!(region_moments(5), Err(Error::UnsupportedFactors { factors: 5 }));
    }
}

//! Reduced bases and their generation by Gram-Schmidt orthonormalization.

use crate::core::parameter::Parameter;
use crate::core::traits::{Operator, Reconstructor};
use crate::core::wrappers::axpy;
use crate::error::EstError;
use crate::operator::MatrixOperator;
use faer::Mat;

/// Default absolute drop tolerance of [`gram_schmidt`].
pub const GRAM_SCHMIDT_ATOL: f64 = 1e-13;
/// Default relative drop tolerance of [`gram_schmidt`].
pub const GRAM_SCHMIDT_RTOL: f64 = 1e-13;

/// Basis vectors stored as the columns of a dense matrix `V`.
#[derive(Clone, Debug)]
pub struct ReducedBasis {
    vectors: Mat<f64>,
}

impl ReducedBasis {
    pub fn new(vectors: Vec<Vec<f64>>) -> Result<Self, EstError> {
        let first = vectors.first().ok_or(EstError::EmptyBasis)?;
        let n = first.len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != n) {
            return Err(EstError::DimensionMismatch { expected: n, found: bad.len() });
        }
        let vectors = Mat::from_fn(n, vectors.len(), |i, j| vectors[j][i]);
        Ok(Self { vectors })
    }

    /// Number of basis vectors.
    pub fn len(&self) -> usize {
        self.vectors.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension of the detailed space.
    pub fn dim(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn vector(&self, j: usize) -> Vec<f64> {
        (0..self.dim()).map(|i| self.vectors[(i, j)]).collect()
    }

    /// `V c`
    pub fn reconstruct(&self, coefficients: &[f64]) -> Result<Vec<f64>, EstError> {
        if coefficients.len() != self.len() {
            return Err(EstError::DimensionMismatch { expected: self.len(), found: coefficients.len() });
        }
        let c = Mat::<f64>::from_fn(self.len(), 1, |j, _| coefficients[j]);
        let u = &self.vectors * &c;
        Ok((0..self.dim()).map(|i| u[(i, 0)]).collect())
    }

    /// `Vᵀ v`
    pub fn project_vector(&self, v: &[f64]) -> Result<Vec<f64>, EstError> {
        if v.len() != self.dim() {
            return Err(EstError::DimensionMismatch { expected: self.dim(), found: v.len() });
        }
        let v = Mat::<f64>::from_fn(self.dim(), 1, |i, _| v[i]);
        let projected = &self.vectors.transpose().to_owned() * &v;
        Ok((0..self.len()).map(|j| projected[(j, 0)]).collect())
    }

    /// Galerkin projection `Vᵀ A V`.
    pub fn project_operator(&self, op: &MatrixOperator) -> Result<MatrixOperator, EstError> {
        let n = self.dim();
        if op.nrows() != n || op.ncols() != n {
            return Err(EstError::DimensionMismatch { expected: n, found: op.nrows() });
        }
        let restriction = self.vectors.transpose().to_owned();
        let projected = &restriction * op.matrix() * &self.vectors;
        Ok(MatrixOperator::new(projected))
    }
}

impl Reconstructor for ReducedBasis {
    fn reconstruct(&self, coefficients: &[f64]) -> Result<Vec<f64>, EstError> {
        ReducedBasis::reconstruct(self, coefficients)
    }
}

/// Orthonormalize `vectors` with respect to `product`.
///
/// Every vector is orthogonalized twice against the basis built so far and is
/// dropped when its remaining norm is below `atol` or `rtol` times its initial
/// norm.
///
/// # Arguments
/// * `vectors` - Snapshots in the detailed space
/// * `product` - Inner product to orthonormalize in, evaluated without parameter
/// * `atol` - Absolute drop tolerance
/// * `rtol` - Drop tolerance relative to the initial norm of each vector
///
/// # Returns
/// * The orthonormal basis, or `Err(EstError::EmptyBasis)` if every vector was dropped
pub fn gram_schmidt(
    vectors: &[Vec<f64>],
    product: &dyn Operator,
    atol: f64,
    rtol: f64,
) -> Result<ReducedBasis, EstError> {
    let mu = Parameter::empty();
    let mut basis: Vec<Vec<f64>> = Vec::new();
    for (index, v) in vectors.iter().enumerate() {
        let initial = product.norm(v, &mu)?;
        if initial <= atol {
            log::debug!("gram_schmidt: dropping vector {index} with norm {initial:e}");
            continue;
        }
        let mut w = v.clone();
        for _ in 0..2 {
            for b in &basis {
                let c = product.apply2(b, &w, &mu)?;
                axpy(-c, b, &mut w);
            }
        }
        let norm = product.norm(&w, &mu)?;
        if norm < atol || norm < rtol * initial {
            log::debug!("gram_schmidt: dropping linearly dependent vector {index} ({norm:e})");
            continue;
        }
        w.iter_mut().for_each(|x| *x /= norm);
        basis.push(w);
    }
    ReducedBasis::new(basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn orthonormal_with_respect_to_product() {
        let product = MatrixOperator::from_raw(3, 3, &[2.0, 0.5, 0.0, 0.5, 1.0, 0.0, 0.0, 0.0, 3.0]).unwrap();
        let vectors = vec![vec![1.0, 0.0, 0.0], vec![1.0, 1.0, 0.0], vec![2.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
        let basis = gram_schmidt(&vectors, &product, GRAM_SCHMIDT_ATOL, GRAM_SCHMIDT_RTOL).unwrap();
        // the third vector is a combination of the first two
        assert_eq!(basis.len(), 3);
        let mu = Parameter::empty();
        for i in 0..3 {
            for j in 0..3 {
                let g = product.apply2(&basis.vector(i), &basis.vector(j), &mu).unwrap();
                assert_abs_diff_eq!(g, if i == j { 1.0 } else { 0.0 }, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn projection_of_identity_is_gramian() {
        let basis = ReducedBasis::new(vec![vec![1.0, 0.0, 1.0], vec![0.0, 2.0, 0.0]]).unwrap();
        let g = basis.project_operator(&MatrixOperator::identity(3)).unwrap();
        assert_abs_diff_eq!(g.matrix()[(0, 0)], 2.0);
        assert_abs_diff_eq!(g.matrix()[(1, 1)], 4.0);
        assert_abs_diff_eq!(g.matrix()[(0, 1)], 0.0);
        assert_eq!(basis.reconstruct(&[1.0, 0.5]).unwrap(), vec![1.0, 1.0, 1.0]);
        assert_eq!(basis.project_vector(&[1.0, 1.0, 1.0]).unwrap(), vec![2.0, 2.0]);
    }

    #[test]
    fn all_zero_input_gives_empty_basis_error() {
        let err = gram_schmidt(&[vec![0.0, 0.0]], &MatrixOperator::identity(2), 1e-13, 1e-13).unwrap_err();
        assert!(matches!(err, EstError::EmptyBasis));
    }
}

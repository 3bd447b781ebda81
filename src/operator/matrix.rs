//! Dense matrix operators on top of Faer.
//!
//! `MatrixOperator` wraps a `faer::Mat<f64>` and lazily caches a partial-pivot LU
//! factorization the first time `apply_inverse` is called, so repeated Riesz
//! solves against the same product reuse one factorization.
//!
//! # References
//! - Faer documentation: https://github.com/sarah-ek/faer-rs

use crate::core::parameter::Parameter;
use crate::core::traits::Operator;
use crate::core::wrappers::all_finite;
use crate::error::EstError;
use faer::linalg::solvers::{PartialPivLu, SolveCore};
use faer::{Conj, Mat, MatMut, Scale};
use std::fmt;
use std::sync::OnceLock;

/// Nonparametric dense operator with a cached LU factorization.
pub struct MatrixOperator {
    matrix: Mat<f64>,
    factor: OnceLock<PartialPivLu<f64>>,
}

impl MatrixOperator {
    pub fn new(matrix: Mat<f64>) -> Self {
        Self { matrix, factor: OnceLock::new() }
    }

    /// Construct from raw column-major storage.
    pub fn from_raw(nrows: usize, ncols: usize, data: &[f64]) -> Result<Self, EstError> {
        if data.len() != nrows * ncols {
            return Err(EstError::DimensionMismatch { expected: nrows * ncols, found: data.len() });
        }
        Ok(Self::new(Mat::from_fn(nrows, ncols, |i, j| data[j * nrows + i])))
    }

    pub fn identity(n: usize) -> Self {
        Self::new(Mat::<f64>::identity(n, n))
    }

    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::new(Mat::<f64>::zeros(nrows, ncols))
    }

    pub fn matrix(&self) -> &Mat<f64> {
        &self.matrix
    }

    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Σ cᵢ Aᵢ over operators of equal shape.
    pub fn lincomb(terms: &[(f64, &MatrixOperator)]) -> Result<Self, EstError> {
        let (_, first) = terms.first().ok_or(EstError::InvalidConfig(
            "linear combination of zero operators".into(),
        ))?;
        let (m, n) = (first.nrows(), first.ncols());
        for (_, op) in terms {
            if op.nrows() != m || op.ncols() != n {
                return Err(EstError::DimensionMismatch { expected: m * n, found: op.nrows() * op.ncols() });
            }
        }
        let mut matrix = Mat::<f64>::zeros(m, n);
        for (c, op) in terms {
            matrix = &matrix + &(Scale(*c) * &op.matrix);
        }
        Ok(Self::new(matrix))
    }

    /// Compute y = A x without a parameter.
    pub fn matvec(&self, x: &[f64]) -> Result<Vec<f64>, EstError> {
        if x.len() != self.ncols() {
            return Err(EstError::DimensionMismatch { expected: self.ncols(), found: x.len() });
        }
        let x_mat = Mat::<f64>::from_fn(x.len(), 1, |i, _| x[i]);
        let y_mat = &self.matrix * &x_mat;
        Ok((0..self.nrows()).map(|i| y_mat[(i, 0)]).collect())
    }

    /// Solve A x = b with the cached factorization.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, EstError> {
        let n = self.nrows();
        if n != self.ncols() {
            return Err(EstError::NotSquare(n, self.ncols()));
        }
        if b.len() != n {
            return Err(EstError::DimensionMismatch { expected: n, found: b.len() });
        }
        let factor = self.factor.get_or_init(|| PartialPivLu::new(self.matrix.as_ref()));
        let mut x = b.to_vec();
        let x_mat = MatMut::from_column_major_slice_mut(&mut x, n, 1);
        factor.solve_in_place_with_conj(Conj::No, x_mat);
        if !all_finite(&x) {
            return Err(EstError::SingularOperator(format!(
                "LU solve of {n}x{n} operator produced non-finite values"
            )));
        }
        Ok(x)
    }
}

impl Clone for MatrixOperator {
    fn clone(&self) -> Self {
        Self::new(self.matrix.clone())
    }
}

impl fmt::Debug for MatrixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixOperator")
            .field("nrows", &self.nrows())
            .field("ncols", &self.ncols())
            .field("factorized", &self.factor.get().is_some())
            .finish()
    }
}

impl Operator for MatrixOperator {
    fn source_dim(&self) -> usize {
        self.ncols()
    }

    fn range_dim(&self) -> usize {
        self.nrows()
    }

    fn apply(&self, u: &[f64], _mu: &Parameter) -> Result<Vec<f64>, EstError> {
        self.matvec(u)
    }

    fn apply_inverse(&self, v: &[f64], _mu: &Parameter) -> Result<Vec<f64>, EstError> {
        self.solve(v)
    }
}

//! Affinely decomposed parametric operators `A(μ) = Σ_q θ_q(μ) A_q`.

use crate::core::parameter::{Parameter, ParameterFunctional};
use crate::core::traits::Operator;
use crate::error::EstError;
use crate::operator::matrix::MatrixOperator;

#[derive(Clone, Debug)]
pub struct AffineOperator {
    components: Vec<MatrixOperator>,
    coefficients: Vec<ParameterFunctional>,
}

impl AffineOperator {
    /// Build from matching lists of components and coefficient functionals.
    pub fn new(
        components: Vec<MatrixOperator>,
        coefficients: Vec<ParameterFunctional>,
    ) -> Result<Self, EstError> {
        if components.is_empty() {
            return Err(EstError::InvalidConfig("affine operator without components".into()));
        }
        if components.len() != coefficients.len() {
            return Err(EstError::DimensionMismatch {
                expected: components.len(),
                found: coefficients.len(),
            });
        }
        let (m, n) = (components[0].nrows(), components[0].ncols());
        if let Some(bad) = components.iter().find(|c| c.nrows() != m || c.ncols() != n) {
            return Err(EstError::DimensionMismatch { expected: m * n, found: bad.nrows() * bad.ncols() });
        }
        Ok(Self { components, coefficients })
    }

    /// A single nonparametric component.
    pub fn nonparametric(op: MatrixOperator) -> Self {
        Self { components: vec![op], coefficients: vec![ParameterFunctional::Constant(1.0)] }
    }

    pub fn components(&self) -> &[MatrixOperator] {
        &self.components
    }

    pub fn coefficients(&self) -> &[ParameterFunctional] {
        &self.coefficients
    }

    pub fn is_parametric(&self) -> bool {
        self.coefficients.iter().any(ParameterFunctional::is_parametric)
    }

    /// Evaluate all θ_q(μ).
    pub fn evaluate_coefficients(&self, mu: &Parameter) -> Result<Vec<f64>, EstError> {
        self.coefficients.iter().map(|c| c.evaluate(mu)).collect()
    }

    /// Assemble the matrix of A(μ).
    pub fn assemble(&self, mu: &Parameter) -> Result<MatrixOperator, EstError> {
        let theta = self.evaluate_coefficients(mu)?;
        let terms: Vec<(f64, &MatrixOperator)> = theta.into_iter().zip(&self.components).collect();
        MatrixOperator::lincomb(&terms)
    }

    /// Apply a component-wise map (e.g. a Galerkin projection) to every component.
    pub fn map_components<F>(&self, mut f: F) -> Result<AffineOperator, EstError>
    where
        F: FnMut(&MatrixOperator) -> Result<MatrixOperator, EstError>,
    {
        let components = self.components.iter().map(|c| f(c)).collect::<Result<Vec<_>, _>>()?;
        AffineOperator::new(components, self.coefficients.clone())
    }
}

impl Operator for AffineOperator {
    fn source_dim(&self) -> usize {
        self.components[0].ncols()
    }

    fn range_dim(&self) -> usize {
        self.components[0].nrows()
    }

    fn apply(&self, u: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError> {
        let mut result = vec![0.0; self.range_dim()];
        for (coefficient, component) in self.coefficients.iter().zip(&self.components) {
            let theta = coefficient.evaluate(mu)?;
            if theta == 0.0 {
                continue;
            }
            let y = component.matvec(u)?;
            crate::core::wrappers::axpy(theta, &y, &mut result);
        }
        Ok(result)
    }

    fn apply_inverse(&self, v: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError> {
        self.assemble(mu)?.solve(v)
    }
}

//! Galerkin projection of instationary discretizations onto a reduced basis.

use crate::core::traits::Reconstructor;
use crate::discretization::{Discretization, InstationaryDiscretization};
use crate::error::EstError;
use crate::operator::MatrixOperator;
use crate::reductor::basis::ReducedBasis;

/// Owns the detailed discretization together with the basis it is reduced with.
#[derive(Clone, Debug)]
pub struct Reductor {
    detailed: InstationaryDiscretization,
    basis: ReducedBasis,
    reduced_mass: MatrixOperator,
}

impl Reductor {
    /// Create a reductor and project the mass matrix onto the basis.
    ///
    /// # Arguments
    /// * `detailed` - Detailed discretization to reduce
    /// * `basis` - Reduced basis in the detailed space
    ///
    /// # Returns
    /// * `Err(EstError::DimensionMismatch)` if the basis lives in a space of
    ///   another dimension
    pub fn new(detailed: InstationaryDiscretization, basis: ReducedBasis) -> Result<Self, EstError> {
        if basis.dim() != detailed.dim() {
            return Err(EstError::DimensionMismatch { expected: detailed.dim(), found: basis.dim() });
        }
        let reduced_mass = basis.project_operator(detailed.mass())?;
        Ok(Self { detailed, basis, reduced_mass })
    }

    pub fn detailed(&self) -> &InstationaryDiscretization {
        &self.detailed
    }

    pub fn basis(&self) -> &ReducedBasis {
        &self.basis
    }

    /// Coefficients of the L2-orthogonal projection of `v` onto the basis span.
    pub fn l2_projection_coefficients(&self, v: &[f64]) -> Result<Vec<f64>, EstError> {
        let mv = self.detailed.mass().matvec(v)?;
        self.reduced_mass.solve(&self.basis.project_vector(&mv)?)
    }

    /// L2-orthogonal projection of `v` onto the basis span, as a detailed vector.
    pub fn l2_projection(&self, v: &[f64]) -> Result<Vec<f64>, EstError> {
        let coefficients = self.l2_projection_coefficients(v)?;
        self.basis.reconstruct(&coefficients)
    }

    /// The reduced discretization: `Vᵀ A_q V`, `Vᵀ M V`, `Vᵀ F` and the
    /// L2 projection of the initial data.
    pub fn reduce(&self) -> Result<InstationaryDiscretization, EstError> {
        log::info!("reducing discretization of dim {} to {} basis vectors ...", self.basis.dim(), self.basis.len());
        let operator = self
            .detailed
            .affine_operator()
            .map_components(|component| self.basis.project_operator(component))?;
        let rhs = self.basis.project_vector(self.detailed.load_vector())?;
        let initial_data = self.l2_projection_coefficients(self.detailed.initial_data())?;
        InstationaryDiscretization::new(
            operator,
            self.reduced_mass.clone(),
            rhs,
            initial_data,
            self.detailed.t_end(),
            self.detailed.num_time_steps(),
        )
    }
}

impl Reconstructor for Reductor {
    fn reconstruct(&self, coefficients: &[f64]) -> Result<Vec<f64>, EstError> {
        self.basis.reconstruct(coefficients)
    }
}

//! Error of a detailed trajectory against a reference solution.

use crate::core::parameter::Parameter;
use crate::core::traits::Prolongation;
use crate::core::trajectory::Trajectory;
use crate::discretization::Discretization;
use crate::error::EstError;
use crate::estimator::{BochnerNorm, Estimator};

/// Computes `‖U_ref(μ) - prolong(U)‖` in a Bochner norm on the reference
/// discretization.
pub struct DetailedAgainstReference<R> {
    reference: R,
    prolongation: Box<dyn Prolongation>,
    bochner_norm: BochnerNorm,
}

impl<R: Discretization> DetailedAgainstReference<R> {
    pub fn new(reference: R, prolongation: Box<dyn Prolongation>, bochner_norm: BochnerNorm) -> Self {
        Self { reference, prolongation, bochner_norm }
    }
}

impl<R: Discretization, D: ?Sized> Estimator<D> for DetailedAgainstReference<R> {
    fn estimate(&self, u: &Trajectory, mu: &Parameter, _disc: &D) -> Result<f64, EstError> {
        log::info!("estimating for {} ...", mu);
        let u_reference = self.reference.solve(mu)?;
        let u_prolongated = self.prolongation.prolong_trajectory(u)?;
        if u_reference.len() != u_prolongated.len() {
            return Err(EstError::DimensionMismatch {
                expected: u_reference.len(),
                found: u_prolongated.len(),
            });
        }
        let result = self.bochner_norm.evaluate(&u_reference.sub(&u_prolongated)?, mu)?;
        log::debug!("  => {}", result);
        Ok(result)
    }
}

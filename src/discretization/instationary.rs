//! Implicit Euler discretization of a linear parabolic problem.
//!
//! Given the mass matrix `M`, the affine operator `A(μ)`, the load vector `F`
//! and initial data `p⁰`, `solve` computes
//!
//! ```text
//! (M + dt A(μ)) pⁿ = M pⁿ⁻¹ + dt F,   n = 1, …, N,   dt = T / N.
//! ```
//!
//! The same type serves as the reduced discretization produced by
//! [`crate::reductor::Reductor`].

use crate::core::parameter::Parameter;
use crate::core::traits::Operator;
use crate::core::trajectory::Trajectory;
use crate::core::wrappers::axpy;
use crate::discretization::Discretization;
use crate::error::EstError;
use crate::operator::{AffineOperator, MatrixOperator};

#[derive(Clone, Debug)]
pub struct InstationaryDiscretization {
    operator: AffineOperator,
    mass: MatrixOperator,
    rhs: Vec<f64>,
    initial_data: Vec<f64>,
    t_end: f64,
    num_time_steps: usize,
}

impl InstationaryDiscretization {
    pub fn new(
        operator: AffineOperator,
        mass: MatrixOperator,
        rhs: Vec<f64>,
        initial_data: Vec<f64>,
        t_end: f64,
        num_time_steps: usize,
    ) -> Result<Self, EstError> {
        let n = operator.source_dim();
        if operator.range_dim() != n {
            return Err(EstError::NotSquare(operator.range_dim(), n));
        }
        for found in [mass.nrows(), mass.ncols(), rhs.len(), initial_data.len()] {
            if found != n {
                return Err(EstError::DimensionMismatch { expected: n, found });
            }
        }
        if !(t_end.is_finite() && t_end > 0.0) {
            return Err(EstError::InvalidConfig(format!("t_end must be positive, got {t_end}")));
        }
        if num_time_steps == 0 {
            return Err(EstError::InvalidConfig("num_time_steps must be positive".into()));
        }
        Ok(Self { operator, mass, rhs, initial_data, t_end, num_time_steps })
    }

    pub fn affine_operator(&self) -> &AffineOperator {
        &self.operator
    }

    pub fn mass(&self) -> &MatrixOperator {
        &self.mass
    }

    pub fn load_vector(&self) -> &[f64] {
        &self.rhs
    }

    pub fn initial_data(&self) -> &[f64] {
        &self.initial_data
    }

    pub fn num_time_steps(&self) -> usize {
        self.num_time_steps
    }

    pub fn dim(&self) -> usize {
        self.rhs.len()
    }

    pub fn dt(&self) -> f64 {
        self.t_end / self.num_time_steps as f64
    }
}

impl Discretization for InstationaryDiscretization {
    fn operator(&self) -> &dyn Operator {
        &self.operator
    }

    fn l2_product(&self) -> &dyn Operator {
        &self.mass
    }

    // the load vector is nonparametric
    fn rhs(&self, _mu: &Parameter) -> Result<Vec<f64>, EstError> {
        Ok(self.rhs.clone())
    }

    fn t_end(&self) -> f64 {
        self.t_end
    }

    fn solve(&self, mu: &Parameter) -> Result<Trajectory, EstError> {
        log::info!("solving for {} ({} time steps, dim {}) ...", mu, self.num_time_steps, self.dim());
        let dt = self.dt();
        let a = self.operator.assemble(mu)?;
        let system = MatrixOperator::lincomb(&[(1.0, &self.mass), (dt, &a)])?;
        let mut snapshots = Vec::with_capacity(self.num_time_steps + 1);
        snapshots.push(self.initial_data.clone());
        for _ in 0..self.num_time_steps {
            let previous = &snapshots[snapshots.len() - 1];
            let mut b = self.mass.matvec(previous)?;
            axpy(dt, &self.rhs, &mut b);
            let next = system.solve(&b)?;
            snapshots.push(next);
        }
        Trajectory::new(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parameter::ParameterFunctional;
    use approx::assert_abs_diff_eq;

    #[test]
    fn scalar_decay_matches_implicit_euler() {
        // p' + μ p = 0, p(0) = 1
        let a = AffineOperator::new(
            vec![MatrixOperator::identity(1)],
            vec![ParameterFunctional::Component(0)],
        )
        .unwrap();
        let disc = InstationaryDiscretization::new(
            a,
            MatrixOperator::identity(1),
            vec![0.0],
            vec![1.0],
            1.0,
            4,
        )
        .unwrap();
        let u = disc.solve(&Parameter::from(2.0)).unwrap();
        assert_eq!(u.len(), 5);
        let factor: f64 = 1.0 / (1.0 + 0.25 * 2.0);
        for (n, s) in u.iter().enumerate() {
            assert_abs_diff_eq!(s[0], factor.powi(n as i32), epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_source_reaches_steady_state() {
        // p' + p = 1 with p(0) = 1 stays at 1
        let disc = InstationaryDiscretization::new(
            AffineOperator::nonparametric(MatrixOperator::identity(1)),
            MatrixOperator::identity(1),
            vec![1.0],
            vec![1.0],
            2.0,
            3,
        )
        .unwrap();
        let u = disc.solve(&Parameter::empty()).unwrap();
        assert!(u.iter().all(|s| (s[0] - 1.0).abs() < 1e-12));
    }
}

//! Core traits for parest.

use crate::core::parameter::Parameter;
use crate::core::trajectory::Trajectory;
use crate::core::wrappers::dot;
use crate::error::EstError;

/// A (possibly parametric) linear operator between coefficient spaces.
///
/// Products (L2, energy) are operators as well: `apply2(v, u, mu)` evaluates
/// the bilinear form and `apply_inverse` yields Riesz representatives.
pub trait Operator {
    /// Dimension of the source space.
    fn source_dim(&self) -> usize;
    /// Dimension of the range space.
    fn range_dim(&self) -> usize;
    /// Compute A(μ) u.
    fn apply(&self, u: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError>;
    /// Solve A(μ) x = v.
    fn apply_inverse(&self, v: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError>;
    /// Compute vᵀ A(μ) u.
    fn apply2(&self, v: &[f64], u: &[f64], mu: &Parameter) -> Result<f64, EstError> {
        let au = self.apply(u, mu)?;
        if v.len() != au.len() {
            return Err(EstError::DimensionMismatch { expected: au.len(), found: v.len() });
        }
        Ok(dot(v, &au))
    }
    /// Induced norm (uᵀ A(μ) u)^½ for a product operator.
    fn norm(&self, u: &[f64], mu: &Parameter) -> Result<f64, EstError> {
        Ok(self.apply2(u, u, mu)?.max(0.0).sqrt())
    }
}

impl<T: Operator + ?Sized> Operator for Box<T> {
    fn source_dim(&self) -> usize {
        (**self).source_dim()
    }
    fn range_dim(&self) -> usize {
        (**self).range_dim()
    }
    fn apply(&self, u: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError> {
        (**self).apply(u, mu)
    }
    fn apply_inverse(&self, v: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError> {
        (**self).apply_inverse(v, mu)
    }
    fn apply2(&self, v: &[f64], u: &[f64], mu: &Parameter) -> Result<f64, EstError> {
        (**self).apply2(v, u, mu)
    }
}

impl<T: Operator + ?Sized> Operator for &T {
    fn source_dim(&self) -> usize {
        (**self).source_dim()
    }
    fn range_dim(&self) -> usize {
        (**self).range_dim()
    }
    fn apply(&self, u: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError> {
        (**self).apply(u, mu)
    }
    fn apply_inverse(&self, v: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError> {
        (**self).apply_inverse(v, mu)
    }
    fn apply2(&self, v: &[f64], u: &[f64], mu: &Parameter) -> Result<f64, EstError> {
        (**self).apply2(v, u, mu)
    }
}

/// Transfer of discrete functions from one discretization to another.
pub trait Prolongation {
    /// Prolong a single coefficient vector.
    fn prolong(&self, u: &[f64]) -> Result<Vec<f64>, EstError>;

    /// Prolong every snapshot of a trajectory.
    fn prolong_trajectory(&self, u: &Trajectory) -> Result<Trajectory, EstError> {
        u.try_map(|s| self.prolong(s))
    }
}

/// Lifting of reduced coefficients to detailed coefficient vectors.
pub trait Reconstructor {
    fn reconstruct(&self, coefficients: &[f64]) -> Result<Vec<f64>, EstError>;

    fn reconstruct_trajectory(&self, u: &Trajectory) -> Result<Trajectory, EstError> {
        u.try_map(|s| self.reconstruct(s))
    }
}

/// Problem-specific quantities entering the parabolic error bound.
///
/// Implemented by the elliptic model problem underlying a parabolic
/// discretization.
pub trait EllipticEstimates {
    /// Conforming (Oswald) interpolant of a discrete function.
    fn oswald_interpolate(&self, u: &[f64]) -> Result<Vec<f64>, EstError>;
    /// Smallest eigenvalue of the diffusion over the domain at `mu`.
    fn min_diffusion_ev(&self, mu: &Parameter) -> Result<f64, EstError>;
    /// Largest eigenvalue of the diffusion over the domain at `mu`.
    fn max_diffusion_ev(&self, mu: &Parameter) -> Result<f64, EstError>;
    /// Lower bound of the ratio of the bilinear forms at `mu` and `mu_hat`.
    fn alpha(&self, mu: &Parameter, mu_hat: &Parameter) -> Result<f64, EstError>;
    /// Upper bound of the ratio of the bilinear forms at `mu` and `mu_hat`.
    fn gamma(&self, mu: &Parameter, mu_hat: &Parameter) -> Result<f64, EstError>;
    fn domain_diameter(&self) -> f64;
    /// Error bound for the elliptic reconstruction of `p_h` with respect to the
    /// data `w_h` (Riesz representative of the discrete operator applied to
    /// `p_h`) and the projected force `f_h`.
    fn elliptic_reconstruction_estimate(
        &self,
        p_h: &[f64],
        w_h: &[f64],
        f_h: &[f64],
        mu: &Parameter,
        mu_tilde: &Parameter,
    ) -> Result<f64, EstError>;
}

//! Error estimators for parabolic reduced-basis approximations.
//!
//! Three estimators are provided:
//! - [`DetailedAgainstReference`]: the true error against a reference solution,
//!   measured in a Bochner norm.
//! - [`DetailedAgainstWeak`]: an a posteriori bound on the error of a detailed
//!   trajectory with respect to the weak solution, built from elliptic
//!   reconstruction.
//! - [`ReducedAgainstWeak`]: the same bound for a reduced trajectory, evaluated
//!   after reconstruction in the detailed space.
//!
//! # References
//! - Makridakis, Nochetto (2003). Elliptic reconstruction and a posteriori error
//!   estimates for parabolic problems. SIAM J. Numer. Anal.
//! - Ern, Stephansen, Vohralík (2010). Guaranteed and robust discontinuous
//!   Galerkin a posteriori error estimates for convection-diffusion-reaction
//!   problems. J. Comput. Appl. Math.

use crate::core::parameter::Parameter;
use crate::core::trajectory::Trajectory;
use crate::error::EstError;

pub mod norms;
pub mod reduced;
pub mod reference;
pub mod time_integration;
pub mod weak;

pub use norms::BochnerNorm;
pub use reduced::ReducedAgainstWeak;
pub use reference::DetailedAgainstReference;
pub use time_integration::{
    elliptic_reconstruction_estimate, l2_time_l2_space_partial_t_estimate, time_residual_estimate,
};
pub use weak::DetailedAgainstWeak;

/// Common interface for all estimators.
pub trait Estimator<D: ?Sized> {
    /// Estimate the error of trajectory `u` computed with `disc` for `mu`.
    fn estimate(&self, u: &Trajectory, mu: &Parameter, disc: &D) -> Result<f64, EstError>;
}

/// Constants and indicators entering the elliptic reconstruction bound.
#[derive(Clone, Debug, PartialEq)]
pub struct Indicators {
    /// Smallest diffusion eigenvalue at μ̂
    pub c_eps_mu_hat: f64,
    /// Coercivity ratio α(μ, μ̂)
    pub alpha_mu_mu_hat: f64,
    /// Poincaré-type constant `2 diam(Ω)`
    pub c_p_omega: f64,
    /// Error of the initial data
    pub e_c_0_norm: f64,
    /// `‖∂_t p_d‖_{L²(0,T; L²)}` of the nonconforming part
    pub dt_p_n_d_norm: f64,
    /// Elliptic reconstruction estimate
    pub eps_norm: f64,
    /// `‖p_d‖_{L²(0,T; energy)}` of the nonconforming part
    pub p_n_d_norm: f64,
    /// Residual in time
    pub r_t_norm: f64,
}

impl Indicators {
    /// Combine the indicators into the final bound:
    ///
    /// ```text
    /// 1/√α(μ, μ̄) · ( e_c_0 + 2 C_P c_ε / α̂ · ‖∂_t p_d‖ + (√5 + 1) η_ε + √5 ‖p_d‖ + 2/α̂ R_T )
    /// ```
    pub fn bound(&self, alpha_mu_mu_bar: f64) -> Result<f64, EstError> {
        if !(alpha_mu_mu_bar > 0.0) {
            return Err(EstError::InvalidParameter(format!("alpha(mu, mu_bar) = {alpha_mu_mu_bar} is not positive")));
        }
        if !(self.alpha_mu_mu_hat > 0.0) {
            return Err(EstError::InvalidParameter(format!(
                "alpha(mu, mu_hat) = {} is not positive",
                self.alpha_mu_mu_hat
            )));
        }
        let sqrt5 = 5.0f64.sqrt();
        Ok(1.0 / alpha_mu_mu_bar.sqrt()
            * (self.e_c_0_norm
                + (2.0 * self.c_p_omega * self.c_eps_mu_hat) / self.alpha_mu_mu_hat * self.dt_p_n_d_norm
                + (sqrt5 + 1.0) * self.eps_norm
                + sqrt5 * self.p_n_d_norm
                + 2.0 / self.alpha_mu_mu_hat * self.r_t_norm))
    }

    pub(crate) fn log(&self) {
        log::debug!("  => e_c_0_norm:    {}", self.e_c_0_norm);
        log::debug!("     dt_p_N_d_norm: {}", self.dt_p_n_d_norm);
        log::debug!("     eps_norm:      {}", self.eps_norm);
        log::debug!("     p_N_d_norm:    {}", self.p_n_d_norm);
        log::debug!("     R_T_norm:      {}", self.r_t_norm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bound_combines_terms() {
        let ind = Indicators {
            c_eps_mu_hat: 0.5,
            alpha_mu_mu_hat: 0.25,
            c_p_omega: 2.0,
            e_c_0_norm: 0.0,
            dt_p_n_d_norm: 1.0,
            eps_norm: 1.0,
            p_n_d_norm: 1.0,
            r_t_norm: 1.0,
        };
        let s5 = 5.0f64.sqrt();
        // 1/√0.25 · (8 + (√5 + 1) + √5 + 8)
        let expected = 2.0 * (8.0 + s5 + 1.0 + s5 + 8.0);
        assert_abs_diff_eq!(ind.bound(0.25).unwrap(), expected, epsilon = 1e-12);
        assert!(ind.bound(0.0).is_err());
    }
}

//! A posteriori bound of a detailed trajectory against the weak solution.

use crate::config::EstimatorOptions;
use crate::core::parameter::Parameter;
use crate::core::traits::{EllipticEstimates, Operator};
use crate::core::trajectory::Trajectory;
use crate::discretization::Discretization;
use crate::error::EstError;
use crate::estimator::time_integration::{
    elliptic_reconstruction_estimate, l2_time_l2_space_partial_t_estimate, time_residual_estimate,
};
use crate::estimator::{BochnerNorm, Estimator, Indicators};

/// Elliptic reconstruction bound for detailed (DG) trajectories.
///
/// `elliptic_norm` measures the nonconforming part of the trajectory in
/// `L²(0, T; energy)`, `l2_product` its time derivative in `L²(0, T; L²)`.
pub struct DetailedAgainstWeak<E> {
    example: E,
    elliptic_norm: BochnerNorm,
    l2_product: Box<dyn Operator>,
    options: EstimatorOptions,
}

impl<E: EllipticEstimates> DetailedAgainstWeak<E> {
    /// Create the estimator.
    ///
    /// # Arguments
    /// * `example` - Elliptic model problem providing the spatial estimates
    /// * `elliptic_norm` - Bochner norm of the energy space over `(0, options.t_end)`
    /// * `l2_product` - Spatial L2 product
    /// * `options` - Final time, parameter range and reference parameters
    ///
    /// # Returns
    /// * `Err(EstError::InvalidConfig)` if the options are invalid or the norm
    ///   covers another time interval
    pub fn new(
        example: E,
        elliptic_norm: BochnerNorm,
        l2_product: Box<dyn Operator>,
        options: EstimatorOptions,
    ) -> Result<Self, EstError> {
        options.validate()?;
        if elliptic_norm.t_end() != options.t_end {
            return Err(EstError::InvalidConfig(format!(
                "Bochner norm over (0, {}) does not match t_end = {}",
                elliptic_norm.t_end(),
                options.t_end
            )));
        }
        Ok(Self { example, elliptic_norm, l2_product, options })
    }

    pub fn example(&self) -> &E {
        &self.example
    }

    pub fn options(&self) -> &EstimatorOptions {
        &self.options
    }

    pub(crate) fn check_range(&self, mu: &Parameter) {
        if !self.options.contains(mu) {
            log::warn!(
                "parameter {} outside of [{}, {}], the bound may not hold",
                mu,
                self.options.mu_min,
                self.options.mu_max
            );
        }
    }

    /// Splits `p` into its nonconforming part `p - I_os p`.
    pub(crate) fn nonconforming_part(&self, p: &Trajectory) -> Result<Trajectory, EstError> {
        let conforming = p.try_map(|s| self.example.oswald_interpolate(s))?;
        p.sub(&conforming)
    }

    /// Fills in the constants and the two indicators acting on the
    /// nonconforming part; `eps_norm` and `r_t_norm` are left to the caller.
    pub(crate) fn partial_indicators(&self, p_n: &Trajectory, mu: &Parameter) -> Result<Indicators, EstError> {
        let p_n_d = self.nonconforming_part(p_n)?;
        Ok(Indicators {
            c_eps_mu_hat: self.example.min_diffusion_ev(&self.options.mu_hat)?,
            alpha_mu_mu_hat: self.example.alpha(mu, &self.options.mu_hat)?,
            c_p_omega: 2.0 * self.example.domain_diameter(),
            e_c_0_norm: 0.0,
            dt_p_n_d_norm: l2_time_l2_space_partial_t_estimate(&*self.l2_product, self.options.t_end, &p_n_d)?,
            eps_norm: 0.0,
            p_n_d_norm: self.elliptic_norm.evaluate(&p_n_d, mu)?,
            r_t_norm: 0.0,
        })
    }

    pub fn compute_indicators<D>(&self, u: &Trajectory, mu: &Parameter, disc: &D) -> Result<Indicators, EstError>
    where
        D: Discretization + ?Sized,
    {
        log::info!("estimating for {} ...", mu);
        self.check_range(mu);
        let p_n = u;
        let t_end = self.options.t_end;
        let empty = Parameter::empty();

        // the right-hand side is nonparametric
        let f_h = disc.l2_product().apply_inverse(&disc.rhs(mu)?, &empty)?;

        let riesz_computer = |p_h: &Trajectory, n: usize| -> Result<Vec<f64>, EstError> {
            let functional = disc.operator().apply(p_h.snapshot(n)?, mu)?;
            disc.l2_product().apply_inverse(&functional, &empty)
        };
        let reconstructor = |p_h: &Trajectory, n: usize| -> Result<Vec<f64>, EstError> { Ok(p_h.snapshot(n)?.to_vec()) };

        let mut indicators = self.partial_indicators(p_n, mu)?;
        indicators.eps_norm = elliptic_reconstruction_estimate(
            &self.example,
            riesz_computer,
            reconstructor,
            t_end,
            &f_h,
            p_n,
            mu,
            &self.options.mu_tilde,
        )?;
        indicators.r_t_norm = time_residual_estimate(disc.operator(), disc.l2_product(), t_end, p_n, mu)?;
        indicators.log();
        Ok(indicators)
    }

    pub(crate) fn bound(&self, indicators: &Indicators, mu: &Parameter) -> Result<f64, EstError> {
        let alpha_mu_mu_bar = self.example.alpha(mu, &self.options.mu_bar)?;
        let result = indicators.bound(alpha_mu_mu_bar)?;
        log::debug!("  => {}", result);
        Ok(result)
    }
}

impl<E: EllipticEstimates, D: Discretization + ?Sized> Estimator<D> for DetailedAgainstWeak<E> {
    fn estimate(&self, u: &Trajectory, mu: &Parameter, disc: &D) -> Result<f64, EstError> {
        let indicators = self.compute_indicators(u, mu, disc)?;
        self.bound(&indicators, mu)
    }
}

//! The elliptic reconstruction bound for reduced trajectories.

use crate::config::EstimatorOptions;
use crate::core::parameter::Parameter;
use crate::core::traits::{EllipticEstimates, Operator, Reconstructor};
use crate::core::trajectory::Trajectory;
use crate::discretization::Discretization;
use crate::error::EstError;
use crate::estimator::time_integration::{elliptic_reconstruction_estimate, time_residual_estimate};
use crate::estimator::{BochnerNorm, DetailedAgainstWeak, Estimator, Indicators};
use crate::reductor::Reductor;

/// Like [`DetailedAgainstWeak`], but `u` holds reduced coefficients and `disc`
/// is the reduced discretization.
///
/// Quantities acting on the nonconforming part are computed on the
/// reconstructed trajectory. The elliptic reconstruction uses the reduced
/// Riesz representatives and the projection of the force onto the reduced
/// space. The time residual is evaluated in the reduced space.
pub struct ReducedAgainstWeak<E> {
    weak: DetailedAgainstWeak<E>,
    reductor: Reductor,
}

impl<E: EllipticEstimates> ReducedAgainstWeak<E> {
    /// Create the estimator; `reductor` maps reduced coefficients back to the
    /// detailed space. The remaining arguments are those of
    /// [`DetailedAgainstWeak::new`].
    pub fn new(
        reductor: Reductor,
        example: E,
        elliptic_norm: BochnerNorm,
        l2_product: Box<dyn Operator>,
        options: EstimatorOptions,
    ) -> Result<Self, EstError> {
        Ok(Self { weak: DetailedAgainstWeak::new(example, elliptic_norm, l2_product, options)?, reductor })
    }

    pub fn reductor(&self) -> &Reductor {
        &self.reductor
    }

    pub fn compute_indicators<D>(&self, u: &Trajectory, mu: &Parameter, disc: &D) -> Result<Indicators, EstError>
    where
        D: Discretization + ?Sized,
    {
        log::info!("estimating for {} ...", mu);
        self.weak.check_range(mu);
        let p_red = u;
        let p_n = self.reductor.reconstruct_trajectory(p_red)?;
        let options = self.weak.options();
        let empty = Parameter::empty();

        // the right-hand side is nonparametric
        let detailed = self.reductor.detailed();
        let f_h = detailed.l2_product().apply_inverse(&detailed.rhs(mu)?, &empty)?;
        let f_red_h = self.reductor.l2_projection(&f_h)?;

        let riesz_computer = |p: &Trajectory, n: usize| -> Result<Vec<f64>, EstError> {
            let functional = disc.operator().apply(p.snapshot(n)?, mu)?;
            let riesz = disc.l2_product().apply_inverse(&functional, &empty)?;
            self.reductor.reconstruct(&riesz)
        };
        let reconstructor =
            |p: &Trajectory, n: usize| -> Result<Vec<f64>, EstError> { self.reductor.reconstruct(p.snapshot(n)?) };

        let mut indicators = self.weak.partial_indicators(&p_n, mu)?;
        indicators.eps_norm = elliptic_reconstruction_estimate(
            self.weak.example(),
            riesz_computer,
            reconstructor,
            options.t_end,
            &f_red_h,
            p_red,
            mu,
            &options.mu_tilde,
        )?;
        indicators.r_t_norm = time_residual_estimate(disc.operator(), disc.l2_product(), options.t_end, p_red, mu)?;
        indicators.log();
        Ok(indicators)
    }
}

impl<E: EllipticEstimates, D: Discretization + ?Sized> Estimator<D> for ReducedAgainstWeak<E> {
    fn estimate(&self, u: &Trajectory, mu: &Parameter, disc: &D) -> Result<f64, EstError> {
        let indicators = self.compute_indicators(u, mu, disc)?;
        self.weak.bound(&indicators, mu)
    }
}

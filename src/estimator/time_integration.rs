//! Time integration of spatial norms over a uniform time grid.
//!
//! A trajectory `u⁰, …, u^N` is read as the piecewise-linear interpolant in
//! time on `N` equal intervals of `(0, T)`. Each helper combines one spatial
//! quantity per interval (or per grid point) with a fixed quadrature weight.

use crate::core::parameter::Parameter;
use crate::core::traits::{EllipticEstimates, Operator};
use crate::core::trajectory::Trajectory;
use crate::core::wrappers::sub;
use crate::error::EstError;
use crate::fem::grid::OnedGrid;

/// The time grid `(0, T)` with `len(u) - 1` intervals.
pub fn time_grid(t_end: f64, u: &Trajectory) -> Result<OnedGrid, EstError> {
    if u.len() < 2 {
        return Err(EstError::TooFewSnapshots { required: 2, found: u.len() });
    }
    OnedGrid::new((0.0, t_end), u.len() - 1)
}

/// `‖∂_t u‖_{L²(0,T; L²)}` of the piecewise-linear interpolant:
/// `( Σ_{n=1}^{N} ‖uⁿ - uⁿ⁻¹‖² / dt )^½`.
pub fn l2_time_l2_space_partial_t_estimate(
    l2_product: &dyn Operator,
    t_end: f64,
    u: &Trajectory,
) -> Result<f64, EstError> {
    let grid = time_grid(t_end, u)?;
    let dt = grid.width();
    let empty = Parameter::empty();
    let mut result = 0.0;
    for n in 1..grid.num_vertices() {
        let diff = sub(u.snapshot(n)?, u.snapshot(n - 1)?);
        result += l2_product.apply2(&diff, &diff, &empty)?;
    }
    result /= dt;
    Ok(result.sqrt())
}

/// Residual in time: `( dt/3 Σ_{n=1}^{N} ‖l2⁻¹ A(μ)(uⁿ - uⁿ⁻¹)‖² )^½`.
pub fn time_residual_estimate(
    operator: &dyn Operator,
    l2_product: &dyn Operator,
    t_end: f64,
    u: &Trajectory,
    mu: &Parameter,
) -> Result<f64, EstError> {
    let grid = time_grid(t_end, u)?;
    let dt = grid.width();
    let empty = Parameter::empty();
    let mut result = 0.0;
    for n in 1..grid.num_vertices() {
        let diff = sub(u.snapshot(n)?, u.snapshot(n - 1)?);
        let functional = operator.apply(&diff, mu)?;
        let riesz = l2_product.apply_inverse(&functional, &empty)?;
        result += l2_product.apply2(&riesz, &riesz, &empty)?;
    }
    result *= dt / 3.0;
    Ok(result.sqrt())
}

/// Elliptic reconstruction error: `2 ( dt/3 Σ_{n=0}^{N} η_n² )^½`, where
/// `η_n` is the elliptic estimate for `reconstructor(u, n)` with data
/// `riesz_computer(u, n)` and projected force `f_h`.
#[allow(clippy::too_many_arguments)]
pub fn elliptic_reconstruction_estimate<E, R, P>(
    example: &E,
    riesz_computer: R,
    reconstructor: P,
    t_end: f64,
    f_h: &[f64],
    u: &Trajectory,
    mu: &Parameter,
    mu_tilde: &Parameter,
) -> Result<f64, EstError>
where
    E: EllipticEstimates + ?Sized,
    R: Fn(&Trajectory, usize) -> Result<Vec<f64>, EstError>,
    P: Fn(&Trajectory, usize) -> Result<Vec<f64>, EstError>,
{
    let grid = time_grid(t_end, u)?;
    let dt = grid.width();
    let mut result = 0.0;
    for n in 0..grid.num_vertices() {
        let w_h = riesz_computer(u, n)?;
        let p_h = reconstructor(u, n)?;
        let eta = example.elliptic_reconstruction_estimate(&p_h, &w_h, f_h, mu, mu_tilde)?;
        result += eta * eta;
    }
    result *= dt / 3.0;
    Ok(2.0 * result.sqrt())
}

//! Tests for Galerkin reduction and the reduced-basis estimator.
//!
//! The basis is built from detailed snapshots of two training parameters, so
//! the reduced solution for a training parameter reproduces the detailed one.

use approx::assert_abs_diff_eq;
use parest::config::EstimatorOptions;
use parest::core::traits::Reconstructor;
use parest::core::{Parameter, Trajectory};
use parest::discretization::{Discretization, InstationaryDiscretization};
use parest::estimator::{BochnerNorm, DetailedAgainstWeak, Estimator, ReducedAgainstWeak};
use parest::fem::{Swipdg, ThermalBlockProblem};
use parest::reductor::{GRAM_SCHMIDT_ATOL, GRAM_SCHMIDT_RTOL, Reductor, gram_schmidt};
use rand::Rng;

const T_END: f64 = 0.5;
const STEPS: usize = 6;

fn setup() -> (Swipdg, InstationaryDiscretization, Reductor, Vec<Parameter>) {
    let swipdg = Swipdg::new(ThermalBlockProblem::thermal_block(2, 1.0), 16, 20.0).unwrap();
    let disc = swipdg.instationary(T_END, STEPS, vec![0.0; swipdg.dim()]).unwrap();
    let training = vec![Parameter::new(vec![0.2, 0.9]), Parameter::new(vec![1.0, 0.4])];
    let snapshots: Vec<Vec<f64>> = training
        .iter()
        .flat_map(|mu| disc.solve(mu).unwrap().into_inner())
        .collect();
    let basis = gram_schmidt(&snapshots, swipdg.l2_product(), GRAM_SCHMIDT_ATOL, GRAM_SCHMIDT_RTOL).unwrap();
    let reductor = Reductor::new(disc.clone(), basis).unwrap();
    (swipdg, disc, reductor, training)
}

fn options() -> EstimatorOptions {
    EstimatorOptions::new(T_END, Parameter::new(vec![0.1, 0.1]), Parameter::new(vec![1.0, 1.0]))
}

fn max_difference(a: &Trajectory, b: &Trajectory) -> f64 {
    a.sub(b)
        .unwrap()
        .iter()
        .flat_map(|s| s.iter().map(|v| v.abs()).collect::<Vec<_>>())
        .fold(0.0, f64::max)
}

/// The reduced solution of a training parameter reconstructs the detailed solution.
#[test]
fn reduced_solution_reproduces_training_snapshots() {
    let (_, disc, reductor, training) = setup();
    let reduced = reductor.reduce().unwrap();
    assert_eq!(reduced.dim(), reductor.basis().len());
    for mu in &training {
        let u = disc.solve(mu).unwrap();
        let u_red = reductor.reconstruct_trajectory(&reduced.solve(mu).unwrap()).unwrap();
        assert!(max_difference(&u, &u_red) < 1e-7);
    }
}

/// The L2 projection leaves vectors of the reduced space unchanged.
#[test]
fn l2_projection_is_idempotent() {
    let (swipdg, _, reductor, _) = setup();
    let v = reductor.basis().vector(0);
    let pv = reductor.l2_projection(&v).unwrap();
    for (a, b) in v.iter().zip(&pv) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-10);
    }
    let mut rng = rand::thread_rng();
    let w: Vec<f64> = (0..swipdg.dim()).map(|_| rng.r#gen()).collect();
    let pw = reductor.l2_projection(&w).unwrap();
    let ppw = reductor.l2_projection(&pw).unwrap();
    for (a, b) in pw.iter().zip(&ppw) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
}

/// The reduced estimator sees the same nonconformity as the detailed one and
/// a time residual bounded by the detailed residual.
#[test]
fn reduced_estimate_matches_detailed_nonconformity() {
    let (swipdg, disc, reductor, training) = setup();
    let reduced = reductor.reduce().unwrap();
    let mu = &training[0];

    let detailed_estimator = DetailedAgainstWeak::new(
        swipdg.clone(),
        BochnerNorm::new(Box::new(swipdg.energy_product().clone()), T_END).unwrap(),
        Box::new(swipdg.l2_product().clone()),
        options(),
    )
    .unwrap();
    let reduced_estimator = ReducedAgainstWeak::new(
        reductor.clone(),
        swipdg.clone(),
        BochnerNorm::new(Box::new(swipdg.energy_product().clone()), T_END).unwrap(),
        Box::new(swipdg.l2_product().clone()),
        options(),
    )
    .unwrap();

    let u = disc.solve(mu).unwrap();
    let u_red = reduced.solve(mu).unwrap();
    let detailed = detailed_estimator.compute_indicators(&u, mu, &disc).unwrap();
    let reduced_ind = reduced_estimator.compute_indicators(&u_red, mu, &reduced).unwrap();

    let scale = detailed.p_n_d_norm.max(1e-12);
    assert_abs_diff_eq!(reduced_ind.p_n_d_norm, detailed.p_n_d_norm, epsilon = 1e-6 * scale);
    let scale = detailed.dt_p_n_d_norm.max(1e-12);
    assert_abs_diff_eq!(reduced_ind.dt_p_n_d_norm, detailed.dt_p_n_d_norm, epsilon = 1e-6 * scale);
    assert!(reduced_ind.r_t_norm <= detailed.r_t_norm * (1.0 + 1e-6));
    assert_eq!(reduced_ind.alpha_mu_mu_hat, detailed.alpha_mu_mu_hat);

    let estimate = reduced_estimator.estimate(&u_red, mu, &reduced).unwrap();
    assert!(estimate.is_finite() && estimate > 0.0);
}

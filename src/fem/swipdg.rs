//! Symmetric weighted interior penalty DG discretization of a 1D thermal block.
//!
//! The model problem is `-(κ(x; μ) p')' = f` on `(a, b)` with homogeneous
//! Dirichlet data imposed weakly. The diffusion is piecewise constant on
//! `num_blocks` equal blocks, `κ = θ_b(μ)` on block `b`, so every assembled
//! object is affine in μ:
//!
//! ```text
//! a(u, v) = Σ_e ∫_e κ u'v'
//!         - Σ_F ({κu'}[v] + {κv'}[u])
//!         + Σ_F σ_F / h [u][v],        σ_F = penalty · {κ}
//! ```
//!
//! The estimator side implements [`EllipticEstimates`] with an ESV2007-type
//! bound built from the Oswald interpolant and the equilibrated flux obtained
//! from the SWIPDG numerical flux.

use crate::config::DiscretizationOptions;
use crate::core::parameter::{Parameter, ParameterFunctional};
use crate::core::traits::EllipticEstimates;
use crate::discretization::InstationaryDiscretization;
use crate::error::EstError;
use crate::fem::grid::OnedGrid;
use crate::fem::space::DgSpace;
use crate::operator::{AffineOperator, MatrixOperator};
use faer::Mat;
use std::f64::consts::PI;

/// Thermal block problem data.
#[derive(Clone, Debug)]
pub struct ThermalBlockProblem {
    /// Spatial domain (a, b)
    pub domain: (f64, f64),
    /// Diffusion coefficient θ_b(μ) on each block
    pub diffusion: Vec<ParameterFunctional>,
    /// Constant force f
    pub force: f64,
}

impl ThermalBlockProblem {
    /// Unit interval with `κ = μ_b` on block `b`.
    pub fn thermal_block(num_blocks: usize, force: f64) -> Self {
        Self {
            domain: (0.0, 1.0),
            diffusion: (0..num_blocks).map(ParameterFunctional::Component).collect(),
            force,
        }
    }

    pub fn num_blocks(&self) -> usize {
        self.diffusion.len()
    }

    fn block_of(&self, x: f64) -> usize {
        let (a, b) = self.domain;
        let nb = self.num_blocks();
        (((x - a) / (b - a) * nb as f64).floor() as usize).min(nb - 1)
    }
}

/// One face of the grid as linear functionals on the dofs.
struct Face {
    /// [u] = Σ jump.1 · u[jump.0]
    jump: Vec<(usize, f64)>,
    /// {κ u'} = Σ average.1 · u[average.0]
    average: Vec<(usize, f64)>,
    /// σ_F / h
    penalty: f64,
}

/// Assembled SWIPDG discretization.
#[derive(Clone, Debug)]
pub struct Swipdg {
    problem: ThermalBlockProblem,
    space: DgSpace,
    penalty: f64,
    element_blocks: Vec<usize>,
    operator: AffineOperator,
    energy_product: AffineOperator,
    l2_product: MatrixOperator,
    load: Vec<f64>,
}

impl Swipdg {
    pub fn new(problem: ThermalBlockProblem, num_elements: usize, penalty: f64) -> Result<Self, EstError> {
        if problem.diffusion.is_empty() {
            return Err(EstError::InvalidConfig("thermal block without blocks".into()));
        }
        if !(penalty.is_finite() && penalty > 0.0) {
            return Err(EstError::InvalidConfig(format!("penalty must be positive, got {penalty}")));
        }
        let grid = OnedGrid::new(problem.domain, num_elements)?;
        let element_blocks: Vec<usize> = (0..num_elements).map(|e| problem.block_of(grid.center(e))).collect();
        let space = DgSpace::new(grid);

        let nb = problem.num_blocks();
        let mut stiffness = Vec::with_capacity(nb);
        let mut energy = Vec::with_capacity(nb);
        for b in 0..nb {
            let kappa: Vec<f64> = element_blocks
                .iter()
                .map(|&block| if block == b { 1.0 } else { 0.0 })
                .collect();
            stiffness.push(MatrixOperator::new(assemble_operator(&space, penalty, &kappa)));
            energy.push(MatrixOperator::new(assemble_broken_stiffness(&space, &kappa)));
        }
        let operator = AffineOperator::new(stiffness, problem.diffusion.clone())?;
        let energy_product = AffineOperator::new(energy, problem.diffusion.clone())?;
        let l2_product = MatrixOperator::new(assemble_mass(&space));
        let load = vec![0.5 * space.grid().width() * problem.force; space.dim()];
        log::debug!(
            "assembled SWIPDG thermal block: {} elements, {} blocks, dim {}",
            num_elements,
            nb,
            space.dim()
        );
        Ok(Self { problem, space, penalty, element_blocks, operator, energy_product, l2_product, load })
    }

    pub fn from_options(problem: ThermalBlockProblem, options: &DiscretizationOptions) -> Result<Self, EstError> {
        options.validate()?;
        Self::new(problem, options.num_elements, options.penalty)
    }

    pub fn problem(&self) -> &ThermalBlockProblem {
        &self.problem
    }

    pub fn space(&self) -> &DgSpace {
        &self.space
    }

    pub fn dim(&self) -> usize {
        self.space.dim()
    }

    /// The SWIPDG operator A(μ).
    pub fn operator(&self) -> &AffineOperator {
        &self.operator
    }

    /// Broken energy product Σ_e κ_e(μ) ∫_e u'v'.
    pub fn energy_product(&self) -> &AffineOperator {
        &self.energy_product
    }

    pub fn l2_product(&self) -> &MatrixOperator {
        &self.l2_product
    }

    pub fn load_vector(&self) -> &[f64] {
        &self.load
    }

    /// Diffusion value on every element.
    pub fn diffusion(&self, mu: &Parameter) -> Result<Vec<f64>, EstError> {
        let theta = self
            .problem
            .diffusion
            .iter()
            .map(|f| f.evaluate(mu))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.element_blocks.iter().map(|&b| theta[b]).collect())
    }

    fn positive_diffusion(&self, mu: &Parameter) -> Result<Vec<f64>, EstError> {
        let kappa = self.diffusion(mu)?;
        if let Some((element, &value)) = kappa.iter().enumerate().find(|(_, k)| !(**k > 0.0)) {
            return Err(EstError::NonPositiveDiffusion { element, value });
        }
        Ok(kappa)
    }

    /// Values of the equilibrated flux `t_h ≈ -κ p'` at the grid vertices,
    /// taken from the SWIPDG numerical flux `-{κ p'} + σ_F/h [p]`.
    ///
    /// If `w_h` is the L2 Riesz representative of `A(μ) p`, then
    /// `t_{e+1} - t_e = ∫_e w_h` on every element.
    pub fn equilibrated_flux(&self, p: &[f64], mu: &Parameter) -> Result<Vec<f64>, EstError> {
        if p.len() != self.dim() {
            return Err(EstError::DimensionMismatch { expected: self.dim(), found: p.len() });
        }
        let kappa = self.diffusion(mu)?;
        Ok(faces(&self.space, self.penalty, &kappa)
            .iter()
            .map(|face| {
                let average: f64 = face.average.iter().map(|&(i, c)| c * p[i]).sum();
                let jump: f64 = face.jump.iter().map(|&(i, c)| c * p[i]).sum();
                -average + face.penalty * jump
            })
            .collect())
    }

    /// Like [`Swipdg::instationary`], with the final time and the number of
    /// time steps taken from `options`.
    pub fn instationary_from_options(
        &self,
        options: &DiscretizationOptions,
        initial_data: Vec<f64>,
    ) -> Result<InstationaryDiscretization, EstError> {
        options.validate()?;
        self.instationary(options.t_end, options.num_time_steps, initial_data)
    }

    /// Parabolic discretization with this operator, the L2 product as mass
    /// matrix and the force as load vector.
    pub fn instationary(
        &self,
        t_end: f64,
        num_time_steps: usize,
        initial_data: Vec<f64>,
    ) -> Result<InstationaryDiscretization, EstError> {
        InstationaryDiscretization::new(
            self.operator.clone(),
            self.l2_product.clone(),
            self.load.clone(),
            initial_data,
            t_end,
            num_time_steps,
        )
    }
}

fn assemble_broken_stiffness(space: &DgSpace, kappa: &[f64]) -> Mat<f64> {
    let n = space.dim();
    let h = space.grid().width();
    let mut a = Mat::<f64>::zeros(n, n);
    for (e, &k) in kappa.iter().enumerate() {
        let (l, r) = (2 * e, 2 * e + 1);
        a[(l, l)] += k / h;
        a[(r, r)] += k / h;
        a[(l, r)] -= k / h;
        a[(r, l)] -= k / h;
    }
    a
}

fn assemble_mass(space: &DgSpace) -> Mat<f64> {
    let n = space.dim();
    let h = space.grid().width();
    let mut m = Mat::<f64>::zeros(n, n);
    for e in 0..space.grid().num_intervals() {
        let (l, r) = (2 * e, 2 * e + 1);
        m[(l, l)] = h / 3.0;
        m[(r, r)] = h / 3.0;
        m[(l, r)] = h / 6.0;
        m[(r, l)] = h / 6.0;
    }
    m
}

fn assemble_operator(space: &DgSpace, penalty: f64, kappa: &[f64]) -> Mat<f64> {
    let mut a = assemble_broken_stiffness(space, kappa);
    for face in faces(space, penalty, kappa) {
        for &(i, ji) in &face.jump {
            for &(j, gj) in &face.average {
                a[(i, j)] -= ji * gj;
                a[(j, i)] -= gj * ji;
            }
            for &(j, jj) in &face.jump {
                a[(i, j)] += face.penalty * ji * jj;
            }
        }
    }
    a
}

// weight · p' on element e
fn gradient(h: f64, e: usize, weight: f64) -> [(usize, f64); 2] {
    [(2 * e, -weight / h), (2 * e + 1, weight / h)]
}

fn faces(space: &DgSpace, penalty: f64, kappa: &[f64]) -> Vec<Face> {
    let n = space.grid().num_intervals();
    let h = space.grid().width();
    let mut faces = Vec::with_capacity(n + 1);
    faces.push(Face {
        jump: vec![(0, -1.0)],
        average: gradient(h, 0, kappa[0]).to_vec(),
        penalty: penalty * kappa[0] / h,
    });
    for i in 1..n {
        let (left, right) = (i - 1, i);
        let mut average = gradient(h, left, 0.5 * kappa[left]).to_vec();
        average.extend(gradient(h, right, 0.5 * kappa[right]));
        faces.push(Face {
            jump: vec![(2 * left + 1, 1.0), (2 * right, -1.0)],
            average,
            penalty: penalty * 0.5 * (kappa[left] + kappa[right]) / h,
        });
    }
    faces.push(Face {
        jump: vec![(2 * (n - 1) + 1, 1.0)],
        average: gradient(h, n - 1, kappa[n - 1]).to_vec(),
        penalty: penalty * kappa[n - 1] / h,
    });
    faces
}

// ‖g - Π_0 g‖_T for g linear on T with endpoint values `left`, `right`
fn mean_oscillation(left: f64, right: f64, h: f64) -> f64 {
    (0.5 * (left - right)).abs() * (h / 3.0).sqrt()
}

impl EllipticEstimates for Swipdg {
    fn oswald_interpolate(&self, u: &[f64]) -> Result<Vec<f64>, EstError> {
        self.space.oswald_interpolate(u)
    }

    fn min_diffusion_ev(&self, mu: &Parameter) -> Result<f64, EstError> {
        Ok(self.diffusion(mu)?.into_iter().fold(f64::INFINITY, f64::min))
    }

    fn max_diffusion_ev(&self, mu: &Parameter) -> Result<f64, EstError> {
        Ok(self.diffusion(mu)?.into_iter().fold(f64::NEG_INFINITY, f64::max))
    }

    fn alpha(&self, mu: &Parameter, mu_hat: &Parameter) -> Result<f64, EstError> {
        let kappa = self.diffusion(mu)?;
        let kappa_hat = self.positive_diffusion(mu_hat)?;
        Ok(kappa.iter().zip(&kappa_hat).map(|(k, kh)| k / kh).fold(f64::INFINITY, f64::min))
    }

    fn gamma(&self, mu: &Parameter, mu_hat: &Parameter) -> Result<f64, EstError> {
        let kappa = self.diffusion(mu)?;
        let kappa_hat = self.positive_diffusion(mu_hat)?;
        Ok(kappa.iter().zip(&kappa_hat).map(|(k, kh)| k / kh).fold(f64::NEG_INFINITY, f64::max))
    }

    fn domain_diameter(&self) -> f64 {
        self.space.grid().diameter()
    }

    fn elliptic_reconstruction_estimate(
        &self,
        p_h: &[f64],
        w_h: &[f64],
        f_h: &[f64],
        mu: &Parameter,
        mu_tilde: &Parameter,
    ) -> Result<f64, EstError> {
        for v in [p_h, w_h, f_h] {
            if v.len() != self.dim() {
                return Err(EstError::DimensionMismatch { expected: self.dim(), found: v.len() });
            }
        }
        let kappa = self.positive_diffusion(mu)?;
        let kappa_tilde = self.positive_diffusion(mu_tilde)?;
        let h = self.space.grid().width();
        let conforming = self.space.oswald_interpolate(p_h)?;
        let flux = self.equilibrated_flux(p_h, mu)?;

        let (mut nonconformity, mut residual_flux, mut oscillation) = (0.0, 0.0, 0.0);
        for e in 0..self.space.grid().num_intervals() {
            let (l, r) = (2 * e, 2 * e + 1);
            let k = kappa[e];
            let sqrt_k = k.sqrt();
            let weight = h / PI / kappa_tilde[e].sqrt();

            let q = (p_h[r] - conforming[r]) - (p_h[l] - conforming[l]);
            nonconformity += k * q * q / h;

            let eta_r = weight * mean_oscillation(w_h[l], w_h[r], h);
            let gradient = (p_h[r] - p_h[l]) / h;
            let z_l = sqrt_k * gradient + flux[e] / sqrt_k;
            let z_r = sqrt_k * gradient + flux[e + 1] / sqrt_k;
            let eta_df = (h / 3.0 * (z_l * z_l + z_l * z_r + z_r * z_r)).max(0.0).sqrt();
            residual_flux += (eta_r + eta_df).powi(2);

            oscillation += (weight * mean_oscillation(f_h[l], f_h[r], h)).powi(2);
        }
        log::trace!(
            "elliptic reconstruction: nc = {}, r+df = {}, osc = {}",
            nonconformity.sqrt(),
            residual_flux.sqrt(),
            oscillation.sqrt()
        );
        Ok(nonconformity.sqrt() + residual_flux.sqrt() + oscillation.sqrt())
    }
}

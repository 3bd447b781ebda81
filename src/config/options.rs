//! API options for estimators and discretizations.
//!
//! `EstimatorOptions` holds the final time and the parameters entering the
//! parabolic error bound: the admissible range `[mu_min, mu_max]` and the
//! reference parameters μ̂ (coercivity), μ̄ (norm) and μ̃ (elliptic
//! reconstruction). `DiscretizationOptions` configures the one-dimensional
//! SWIPDG model problem.

use crate::core::parameter::Parameter;
use crate::error::EstError;

/// Default SWIPDG penalty factor.
pub const DEFAULT_PENALTY: f64 = 20.0;

/// Estimator configuration.
#[derive(Clone, Debug)]
pub struct EstimatorOptions {
    /// Final time T
    pub t_end: f64,

    /// Componentwise lower end of the parameter range
    pub mu_min: Parameter,

    /// Componentwise upper end of the parameter range
    pub mu_max: Parameter,

    /// Parameter at which coercivity constants are evaluated
    pub mu_hat: Parameter,

    /// Parameter of the energy norm the bound is measured in
    pub mu_bar: Parameter,

    /// Parameter used for local diffusion bounds in the elliptic reconstruction
    pub mu_tilde: Parameter,
}

impl EstimatorOptions {
    /// Options with μ̂ = μ̄ = μ̃ = `mu_max`.
    pub fn new(t_end: f64, mu_min: Parameter, mu_max: Parameter) -> Self {
        Self {
            t_end,
            mu_hat: mu_max.clone(),
            mu_bar: mu_max.clone(),
            mu_tilde: mu_max.clone(),
            mu_min,
            mu_max,
        }
    }

    pub fn with_mu_hat(mut self, mu_hat: Parameter) -> Self {
        self.mu_hat = mu_hat;
        self
    }

    pub fn with_mu_bar(mut self, mu_bar: Parameter) -> Self {
        self.mu_bar = mu_bar;
        self
    }

    pub fn with_mu_tilde(mut self, mu_tilde: Parameter) -> Self {
        self.mu_tilde = mu_tilde;
        self
    }

    /// Whether `mu` lies in `[mu_min, mu_max]` componentwise.
    pub fn contains(&self, mu: &Parameter) -> bool {
        mu.len() == self.mu_min.len()
            && mu
                .values()
                .iter()
                .zip(self.mu_min.values().iter().zip(self.mu_max.values()))
                .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }

    pub fn validate(&self) -> Result<(), EstError> {
        if !(self.t_end.is_finite() && self.t_end > 0.0) {
            return Err(EstError::InvalidConfig(format!("t_end must be positive, got {}", self.t_end)));
        }
        if self.mu_min.len() != self.mu_max.len() {
            return Err(EstError::DimensionMismatch { expected: self.mu_min.len(), found: self.mu_max.len() });
        }
        if self
            .mu_min
            .values()
            .iter()
            .zip(self.mu_max.values())
            .any(|(lo, hi)| !(lo <= hi))
        {
            return Err(EstError::InvalidConfig(format!(
                "empty parameter range [{}, {}]",
                self.mu_min, self.mu_max
            )));
        }
        for (name, mu) in [("mu_hat", &self.mu_hat), ("mu_bar", &self.mu_bar), ("mu_tilde", &self.mu_tilde)] {
            if !self.contains(mu) {
                return Err(EstError::InvalidParameter(format!(
                    "{name} = {mu} outside of [{}, {}]",
                    self.mu_min, self.mu_max
                )));
            }
        }
        Ok(())
    }
}

/// Configuration of the one-dimensional SWIPDG discretization.
#[derive(Clone, Debug)]
pub struct DiscretizationOptions {
    /// Number of grid elements
    pub num_elements: usize,

    /// Number of implicit Euler steps
    pub num_time_steps: usize,

    /// Final time T
    pub t_end: f64,

    /// Interior penalty factor
    pub penalty: f64,
}

impl Default for DiscretizationOptions {
    fn default() -> Self {
        Self { num_elements: 16, num_time_steps: 10, t_end: 1.0, penalty: DEFAULT_PENALTY }
    }
}

impl DiscretizationOptions {
    pub fn validate(&self) -> Result<(), EstError> {
        if self.num_elements == 0 {
            return Err(EstError::InvalidConfig("num_elements must be positive".into()));
        }
        if self.num_time_steps == 0 {
            return Err(EstError::InvalidConfig("num_time_steps must be positive".into()));
        }
        if !(self.t_end.is_finite() && self.t_end > 0.0) {
            return Err(EstError::InvalidConfig(format!("t_end must be positive, got {}", self.t_end)));
        }
        if !(self.penalty.is_finite() && self.penalty > 0.0) {
            return Err(EstError::InvalidConfig(format!("penalty must be positive, got {}", self.penalty)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reference_parameters_to_mu_max() {
        let opts = EstimatorOptions::new(1.0, Parameter::from(0.1), Parameter::from(1.0));
        assert_eq!(opts.mu_hat, Parameter::from(1.0));
        assert!(opts.validate().is_ok());
        assert!(opts.contains(&Parameter::from(0.5)));
        assert!(!opts.contains(&Parameter::from(1.5)));
        assert!(!opts.contains(&Parameter::new(vec![0.5, 0.5])));
    }

    #[test]
    fn rejects_reference_parameter_outside_range() {
        let opts = EstimatorOptions::new(1.0, Parameter::from(0.1), Parameter::from(1.0))
            .with_mu_bar(Parameter::from(2.0));
        assert!(matches!(opts.validate(), Err(EstError::InvalidParameter(_))));
    }

    #[test]
    fn rejects_non_positive_time() {
        let opts = EstimatorOptions::new(0.0, Parameter::from(0.1), Parameter::from(1.0));
        assert!(matches!(opts.validate(), Err(EstError::InvalidConfig(_))));
        let disc = DiscretizationOptions { num_time_steps: 0, ..Default::default() };
        assert!(disc.validate().is_err());
        assert!(DiscretizationOptions::default().validate().is_ok());
    }
}

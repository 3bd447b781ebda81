//! Bochner norms `L²(0, T; X)` of trajectories.

use crate::core::parameter::Parameter;
use crate::core::traits::Operator;
use crate::core::trajectory::Trajectory;
use crate::error::EstError;
use crate::estimator::time_integration::time_grid;

/// `L²(0, T; X)` norm of the piecewise-linear time interpolant, with the
/// spatial norm of `X` induced by `product`.
///
/// On every interval the integral of `‖u(t)‖²_X` is evaluated exactly:
/// `dt/3 (‖uⁿ⁻¹‖² + (uⁿ⁻¹, uⁿ) + ‖uⁿ‖²)`.
pub struct BochnerNorm {
    product: Box<dyn Operator>,
    t_end: f64,
}

impl BochnerNorm {
    pub fn new(product: Box<dyn Operator>, t_end: f64) -> Result<Self, EstError> {
        if !(t_end.is_finite() && t_end > 0.0) {
            return Err(EstError::InvalidConfig(format!("t_end must be positive, got {t_end}")));
        }
        if product.source_dim() != product.range_dim() {
            return Err(EstError::NotSquare(product.range_dim(), product.source_dim()));
        }
        Ok(Self { product, t_end })
    }

    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// `‖u‖_{L²(0,T; X_μ)}`
    pub fn evaluate(&self, u: &Trajectory, mu: &Parameter) -> Result<f64, EstError> {
        let grid = time_grid(self.t_end, u)?;
        let dt = grid.width();
        let mut previous = self.product.apply2(u.snapshot(0)?, u.snapshot(0)?, mu)?;
        let mut result = 0.0;
        for n in 1..u.len() {
            let (a, b) = (u.snapshot(n - 1)?, u.snapshot(n)?);
            let mixed = self.product.apply2(a, b, mu)?;
            let current = self.product.apply2(b, b, mu)?;
            result += dt / 3.0 * (previous + mixed + current);
            previous = current;
        }
        Ok(result.max(0.0).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::MatrixOperator;
    use approx::assert_abs_diff_eq;

    #[test]
    fn exact_for_linear_in_time() {
        // u(t) = t v on (0, 3): ∫ t² ‖v‖² = 9 ‖v‖²
        let v = [1.0, 2.0];
        let dt = 0.5;
        let u = Trajectory::new((0..=6).map(|k| v.iter().map(|x| k as f64 * dt * x).collect()).collect()).unwrap();
        let norm = BochnerNorm::new(Box::new(MatrixOperator::identity(2)), 3.0).unwrap();
        let r = norm.evaluate(&u, &Parameter::empty()).unwrap();
        assert_abs_diff_eq!(r, (9.0f64 * 5.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn constant_in_time() {
        let u = Trajectory::new(vec![vec![2.0]; 5]).unwrap();
        let norm = BochnerNorm::new(Box::new(MatrixOperator::identity(1)), 4.0).unwrap();
        assert_abs_diff_eq!(norm.evaluate(&u, &Parameter::empty()).unwrap(), 4.0, epsilon = 1e-12);
    }
}

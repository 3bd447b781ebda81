//! Discretizations of linear parabolic problems.

use crate::core::parameter::Parameter;
use crate::core::traits::Operator;
use crate::core::trajectory::Trajectory;
use crate::error::EstError;

pub mod instationary;
pub use instationary::InstationaryDiscretization;

/// Common interface of detailed and reduced discretizations of
/// `∂_t p + A(μ) p = f` on `(0, T)`.
pub trait Discretization {
    /// The (parametric) elliptic operator A(μ).
    fn operator(&self) -> &dyn Operator;
    /// The L2 product (mass matrix).
    fn l2_product(&self) -> &dyn Operator;
    /// The load vector of the right-hand side.
    fn rhs(&self, mu: &Parameter) -> Result<Vec<f64>, EstError>;
    /// Final time T.
    fn t_end(&self) -> f64;
    /// Compute the solution trajectory for `mu`.
    fn solve(&self, mu: &Parameter) -> Result<Trajectory, EstError>;
}

//! One-dimensional discontinuous Galerkin model problem.

pub mod grid;
pub mod space;
pub mod swipdg;

pub use grid::OnedGrid;
pub use space::{DgProlongation, DgSpace};
pub use swipdg::{Swipdg, ThermalBlockProblem};

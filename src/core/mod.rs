//! Core types: parameters, trajectories, and the traits the estimators are written against.

pub mod parameter;
pub mod traits;
pub mod trajectory;
pub mod wrappers;

pub use parameter::{Parameter, ParameterFunctional};
pub use traits::{EllipticEstimates, Operator, Prolongation, Reconstructor};
pub use trajectory::Trajectory;

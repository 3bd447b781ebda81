//! Reduced-basis generation, projection and reconstruction.

pub mod basis;
pub mod galerkin;

pub use basis::{GRAM_SCHMIDT_ATOL, GRAM_SCHMIDT_RTOL, ReducedBasis, gram_schmidt};
pub use galerkin::Reductor;

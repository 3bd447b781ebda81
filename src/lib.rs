//! parest: a posteriori error estimation for parabolic reduced-basis approximations over Faer
//!
//! This crate bounds the error of reduced-basis and discontinuous Galerkin
//! trajectories of linear parabolic problems. It uses elliptic reconstruction,
//! and each bound splits into time-derivative, reconstruction and
//! residual-in-time indicators. It also ships the pieces needed to produce
//! such trajectories: affine operators, an implicit Euler discretization, a
//! one-dimensional SWIPDG thermal block, and Galerkin reduction.

pub mod config;
pub mod core;
pub mod discretization;
pub mod error;
pub mod estimator;
pub mod fem;
pub mod operator;
pub mod reductor;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::core::*;
pub use crate::discretization::*;
pub use crate::error::*;
pub use crate::estimator::*;
pub use crate::fem::*;
pub use crate::operator::*;
pub use crate::reductor::*;

//! Operator module: dense matrix operators and affine parametric operators.

pub mod affine;
pub mod matrix;

pub use affine::AffineOperator;
pub use matrix::MatrixOperator;

use thiserror::Error;

// Unified error type for parest

#[derive(Error, Debug)]
pub enum EstError {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("trajectory needs at least {required} snapshots, found {found}")]
    TooFewSnapshots { required: usize, found: usize },
    #[error("operator is not square ({0}x{1})")]
    NotSquare(usize, usize),
    #[error("singular operator: {0}")]
    SingularOperator(String),
    #[error("parameter component {index} out of range for parameter of length {len}")]
    ParameterComponent { index: usize, len: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("non-positive diffusion {value} on element {element}")]
    NonPositiveDiffusion { element: usize, value: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("reduced basis is empty")]
    EmptyBasis,
}

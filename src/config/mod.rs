pub mod options;

pub use options::{DEFAULT_PENALTY, DiscretizationOptions, EstimatorOptions};

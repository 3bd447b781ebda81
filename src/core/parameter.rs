//! Parameters and parameter functionals.
//!
//! A [`Parameter`] is an ordered list of real components. Nonparametric objects are
//! evaluated with [`Parameter::empty`]. A [`ParameterFunctional`] maps a parameter
//! to the scalar coefficient of one term of an affine decomposition.

use crate::error::EstError;
use std::fmt;

/// Ordered vector of parameter components.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameter {
    values: Vec<f64>,
}

impl Parameter {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The parameter of a nonparametric object.
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Component `index`, or an error if the parameter is too short.
    pub fn component(&self, index: usize) -> Result<f64, EstError> {
        self.values
            .get(index)
            .copied()
            .ok_or(EstError::ParameterComponent { index, len: self.values.len() })
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl From<Vec<f64>> for Parameter {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

/// Scalar coefficient θ(μ) of an affinely decomposed object.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterFunctional {
    /// θ(μ) = c
    Constant(f64),
    /// θ(μ) = μ[i]
    Component(usize),
    /// θ(μ) = shift + scale · μ[component]
    Affine { component: usize, scale: f64, shift: f64 },
}

impl ParameterFunctional {
    pub fn evaluate(&self, mu: &Parameter) -> Result<f64, EstError> {
        match *self {
            ParameterFunctional::Constant(c) => Ok(c),
            ParameterFunctional::Component(i) => mu.component(i),
            ParameterFunctional::Affine { component, scale, shift } => {
                Ok(shift + scale * mu.component(component)?)
            }
        }
    }

    /// Whether θ depends on μ at all.
    pub fn is_parametric(&self) -> bool {
        !matches!(self, ParameterFunctional::Constant(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn functionals_evaluate() {
        let mu = Parameter::new(vec![0.5, 2.0]);
        assert_eq!(ParameterFunctional::Constant(3.0).evaluate(&mu).unwrap(), 3.0);
        assert_eq!(ParameterFunctional::Component(1).evaluate(&mu).unwrap(), 2.0);
        let f = ParameterFunctional::Affine { component: 0, scale: -1.0, shift: 1.0 };
        assert_eq!(f.evaluate(&mu).unwrap(), 0.5);
    }

    #[test]
    fn missing_component_is_an_error() {
        let mu = Parameter::from(0.1);
        let err = ParameterFunctional::Component(3).evaluate(&mu).unwrap_err();
        assert!(matches!(err, EstError::ParameterComponent { index: 3, len: 1 }));
    }

    #[test]
    fn display_lists_components() {
        assert_eq!(Parameter::new(vec![0.1, 1.0]).to_string(), "[0.1, 1]");
        assert_eq!(Parameter::empty().to_string(), "[]");
    }
}

//! Discontinuous piecewise-linear functions on a [`OnedGrid`].
//!
//! Element `e` owns the two degrees of freedom `2e` (value at its left vertex)
//! and `2e + 1` (value at its right vertex).

use crate::core::traits::Prolongation;
use crate::error::EstError;
use crate::fem::grid::OnedGrid;

#[derive(Clone, Debug, PartialEq)]
pub struct DgSpace {
    grid: OnedGrid,
}

impl DgSpace {
    pub fn new(grid: OnedGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &OnedGrid {
        &self.grid
    }

    pub fn dim(&self) -> usize {
        2 * self.grid.num_intervals()
    }

    fn check(&self, u: &[f64]) -> Result<(), EstError> {
        if u.len() != self.dim() {
            return Err(EstError::DimensionMismatch { expected: self.dim(), found: u.len() });
        }
        Ok(())
    }

    /// Nodal interpolant of `f`.
    pub fn interpolate<F: Fn(f64) -> f64>(&self, f: F) -> Vec<f64> {
        (0..self.grid.num_intervals())
            .flat_map(|e| [f(self.grid.vertex(e)), f(self.grid.vertex(e + 1))])
            .collect()
    }

    /// Value of `u` at `x`, taken from inside element `e`.
    pub(crate) fn evaluate_on(&self, u: &[f64], e: usize, x: f64) -> f64 {
        let left = self.grid.vertex(e);
        let s = (x - left) / self.grid.width();
        (1.0 - s) * u[2 * e] + s * u[2 * e + 1]
    }

    pub fn evaluate(&self, u: &[f64], x: f64) -> Result<f64, EstError> {
        self.check(u)?;
        let e = self.grid.element_containing(x)?;
        Ok(self.evaluate_on(u, e, x))
    }

    /// Averages the two traces at every interior vertex; boundary vertices
    /// are set to zero (homogeneous Dirichlet data).
    pub fn oswald_interpolate(&self, u: &[f64]) -> Result<Vec<f64>, EstError> {
        self.check(u)?;
        let n = self.grid.num_intervals();
        let mut result = vec![0.0; self.dim()];
        for i in 1..n {
            let average = 0.5 * (u[2 * (i - 1) + 1] + u[2 * i]);
            result[2 * (i - 1) + 1] = average;
            result[2 * i] = average;
        }
        Ok(result)
    }
}

/// Prolongation from a coarse [`DgSpace`] to a uniformly refined one.
#[derive(Clone, Debug)]
pub struct DgProlongation {
    coarse: DgSpace,
    fine: DgSpace,
}

impl DgProlongation {
    pub fn new(coarse: DgSpace, fine: DgSpace) -> Result<Self, EstError> {
        if coarse.grid().domain() != fine.grid().domain() {
            return Err(EstError::InvalidConfig("prolongation between different domains".into()));
        }
        let (nc, nf) = (coarse.grid().num_intervals(), fine.grid().num_intervals());
        if nf % nc != 0 {
            return Err(EstError::InvalidConfig(format!(
                "grid with {nf} elements is not a refinement of one with {nc}"
            )));
        }
        Ok(Self { coarse, fine })
    }
}

impl Prolongation for DgProlongation {
    fn prolong(&self, u: &[f64]) -> Result<Vec<f64>, EstError> {
        self.coarse.check(u)?;
        let fine = self.fine.grid();
        let mut result = Vec::with_capacity(self.fine.dim());
        for e in 0..fine.num_intervals() {
            let parent = self.coarse.grid().element_containing(fine.center(e))?;
            result.push(self.coarse.evaluate_on(u, parent, fine.vertex(e)));
            result.push(self.coarse.evaluate_on(u, parent, fine.vertex(e + 1)));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn space(n: usize) -> DgSpace {
        DgSpace::new(OnedGrid::new((0.0, 1.0), n).unwrap())
    }

    #[test]
    fn oswald_keeps_continuous_functions() {
        let s = space(8);
        let u = s.interpolate(|x| (PI * x).sin());
        let c = s.oswald_interpolate(&u).unwrap();
        for (a, b) in u.iter().zip(&c) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-14);
        }
    }

    #[test]
    fn oswald_averages_jumps() {
        let s = space(2);
        let c = s.oswald_interpolate(&[1.0, 2.0, 4.0, 5.0]).unwrap();
        assert_eq!(c, vec![0.0, 3.0, 3.0, 0.0]);
    }

    #[test]
    fn prolongation_is_exact_for_linears() {
        let (coarse, fine) = (space(4), space(12));
        let p = DgProlongation::new(coarse.clone(), fine.clone()).unwrap();
        let u = p.prolong(&coarse.interpolate(|x| 2.0 * x + 1.0)).unwrap();
        let expected = fine.interpolate(|x| 2.0 * x + 1.0);
        for (a, b) in u.iter().zip(&expected) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
        assert!(DgProlongation::new(space(4), space(6)).is_err());
    }

    #[test]
    fn evaluate_inside_elements() {
        let s = space(2);
        let u = [0.0, 1.0, 3.0, 5.0];
        assert_abs_diff_eq!(s.evaluate(&u, 0.25).unwrap(), 0.5);
        assert_abs_diff_eq!(s.evaluate(&u, 0.75).unwrap(), 4.0);
    }

    #[test]
    fn short_vectors_are_rejected() {
        let s = space(2);
        let err = s.evaluate(&[0.0, 1.0], 0.75).unwrap_err();
        assert!(matches!(err, EstError::DimensionMismatch { expected: 4, found: 2 }));
        let p = DgProlongation::new(s.clone(), space(4)).unwrap();
        assert!(matches!(p.prolong(&[1.0; 3]), Err(EstError::DimensionMismatch { expected: 4, found: 3 })));
    }
}

//! Uniform interval grids.

use crate::error::EstError;

#[derive(Clone, Debug, PartialEq)]
pub struct OnedGrid {
    domain: (f64, f64),
    num_intervals: usize,
}

impl OnedGrid {
    pub fn new(domain: (f64, f64), num_intervals: usize) -> Result<Self, EstError> {
        let (a, b) = domain;
        if !(a.is_finite() && b.is_finite() && a < b) {
            return Err(EstError::InvalidConfig(format!("invalid domain ({a}, {b})")));
        }
        if num_intervals == 0 {
            return Err(EstError::InvalidConfig("grid needs at least one interval".into()));
        }
        Ok(Self { domain, num_intervals })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn num_intervals(&self) -> usize {
        self.num_intervals
    }

    pub fn num_vertices(&self) -> usize {
        self.num_intervals + 1
    }

    pub fn diameter(&self) -> f64 {
        self.domain.1 - self.domain.0
    }

    /// Width of every element.
    pub fn width(&self) -> f64 {
        self.diameter() / self.num_intervals as f64
    }

    pub fn vertex(&self, i: usize) -> f64 {
        if i == self.num_intervals {
            return self.domain.1;
        }
        self.domain.0 + i as f64 * self.width()
    }

    pub fn center(&self, e: usize) -> f64 {
        self.domain.0 + (e as f64 + 0.5) * self.width()
    }

    /// Index of the element containing `x`; points on a vertex belong to the
    /// element on the right, except the right domain boundary.
    pub fn element_containing(&self, x: f64) -> Result<usize, EstError> {
        let (a, b) = self.domain;
        if !(a <= x && x <= b) {
            return Err(EstError::InvalidConfig(format!("point {x} outside of ({a}, {b})")));
        }
        let e = ((x - a) / self.width()).floor() as usize;
        Ok(e.min(self.num_intervals - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn geometry() {
        let g = OnedGrid::new((0.0, 2.0), 4).unwrap();
        assert_abs_diff_eq!(g.width(), 0.5);
        assert_abs_diff_eq!(g.vertex(3), 1.5);
        assert_eq!(g.vertex(4), 2.0);
        assert_abs_diff_eq!(g.center(0), 0.25);
        assert_eq!(g.element_containing(0.0).unwrap(), 0);
        assert_eq!(g.element_containing(0.75).unwrap(), 1);
        assert_eq!(g.element_containing(2.0).unwrap(), 3);
        assert!(g.element_containing(2.5).is_err());
    }

    #[test]
    fn rejects_degenerate_domain() {
        assert!(OnedGrid::new((1.0, 1.0), 3).is_err());
        assert!(OnedGrid::new((0.0, 1.0), 0).is_err());
    }
}

//! Snapshot sequences over a discrete time grid.

use crate::error::EstError;

/// A non-empty sequence of equally sized snapshots `u^0, …, u^N`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    snapshots: Vec<Vec<f64>>,
}

impl Trajectory {
    /// Build a trajectory, checking that all snapshots share one dimension.
    pub fn new(snapshots: Vec<Vec<f64>>) -> Result<Self, EstError> {
        let first = snapshots
            .first()
            .ok_or(EstError::TooFewSnapshots { required: 1, found: 0 })?;
        let dim = first.len();
        for s in &snapshots {
            if s.len() != dim {
                return Err(EstError::DimensionMismatch { expected: dim, found: s.len() });
            }
        }
        Ok(Self { snapshots })
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Dimension of each snapshot.
    pub fn dim(&self) -> usize {
        self.snapshots[0].len()
    }

    /// Snapshot `n`, or an error if `n` is past the end.
    pub fn snapshot(&self, n: usize) -> Result<&[f64], EstError> {
        self.snapshots
            .get(n)
            .map(Vec::as_slice)
            .ok_or(EstError::TooFewSnapshots { required: n + 1, found: self.len() })
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.snapshots.iter().map(Vec::as_slice)
    }

    /// Snapshot-wise difference `self - other`.
    pub fn sub(&self, other: &Trajectory) -> Result<Trajectory, EstError> {
        if self.len() != other.len() {
            return Err(EstError::DimensionMismatch { expected: self.len(), found: other.len() });
        }
        if self.dim() != other.dim() {
            return Err(EstError::DimensionMismatch { expected: self.dim(), found: other.dim() });
        }
        let snapshots = self
            .snapshots
            .iter()
            .zip(&other.snapshots)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| x - y).collect())
            .collect();
        Ok(Trajectory { snapshots })
    }

    /// Map every snapshot through a fallible function.
    pub fn try_map<F>(&self, mut f: F) -> Result<Trajectory, EstError>
    where
        F: FnMut(&[f64]) -> Result<Vec<f64>, EstError>,
    {
        let snapshots = self
            .snapshots
            .iter()
            .map(|s| f(s))
            .collect::<Result<Vec<_>, _>>()?;
        Trajectory::new(snapshots)
    }

    pub fn into_inner(self) -> Vec<Vec<f64>> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_snapshots() {
        let err = Trajectory::new(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, EstError::DimensionMismatch { expected: 2, found: 1 }));
    }

    #[test]
    fn rejects_empty() {
        assert!(Trajectory::new(Vec::new()).is_err());
    }

    #[test]
    fn difference_is_snapshot_wise() {
        let a = Trajectory::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Trajectory::new(vec![vec![0.5, 0.5], vec![1.0, 1.0]]).unwrap();
        let d = a.sub(&b).unwrap();
        assert_eq!(d.snapshot(0).unwrap(), &[0.5, 1.5]);
        assert_eq!(d.snapshot(1).unwrap(), &[2.0, 3.0]);
        assert!(d.snapshot(2).is_err());
    }
}

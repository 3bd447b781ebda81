//! Vector kernels shared by operators, estimators and basis generation.
//!
//! Dot products use Rayon when the `rayon` feature is enabled, the rest are
//! plain slice loops.

use num_traits::Float;

/// Computes the Euclidean dot product `xᵀ y`.
pub fn dot<T: Float + Send + Sync>(x: &[T], y: &[T]) -> T {
    debug_assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        x.par_iter()
            .zip(y.par_iter())
            .map(|(xi, yi)| *xi * *yi)
            .reduce(|| T::zero(), |acc, v| acc + v)
    }
    #[cfg(not(feature = "rayon"))]
    {
        x.iter()
            .zip(y.iter())
            .map(|(xi, yi)| *xi * *yi)
            .fold(T::zero(), |acc, v| acc + v)
    }
}

/// `y ← y + alpha · x`
pub fn axpy<T: Float>(alpha: T, x: &[T], y: &mut [T]) {
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi = *yi + alpha * *xi;
    }
}

/// Element-wise `x - y`.
pub fn sub<T: Float>(x: &[T], y: &[T]) -> Vec<T> {
    x.iter().zip(y).map(|(a, b)| *a - *b).collect()
}

/// Whether every entry is finite.
pub fn all_finite<T: Float>(x: &[T]) -> bool {
    x.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dot_and_axpy() {
        let x = vec![1.0, 2.0, 3.0];
        let mut y = vec![4.0, -5.0, 6.0];
        assert_abs_diff_eq!(dot(&x, &y), 12.0, epsilon = 1e-14);
        axpy(2.0, &x, &mut y);
        assert_eq!(y, vec![6.0, -1.0, 12.0]);
        assert_eq!(sub(&y, &x), vec![5.0, -3.0, 9.0]);
        assert!(!all_finite(&[1.0, f64::NAN]));
    }
}

//! Gaussian elimination with partial pivoting.
//!
//! The solver knows nothing about polynomials: it takes any `n x (n + 1)` augmented
//! matrix `[A | b]` and returns `x` such that `A·x = b`.
//!
//! # Algorithm
//! 1. Copy the input into an owned working matrix.
//! 2. For each column `i`, pick the row in `i..n` with the largest `|A[k][i]|`
//!    (the lowest index wins ties) and swap it into row `i`.
//! 3. Reject the pivot if it is zero, or too small relative to the scale of `A`.
//! 4. Subtract `A[k][i] / A[i][i]` times row `i` from every row `k > i`,
//!    across columns `i..=n`.
//! 5. Back-substitute from the last row upward.
use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Solves an `n x (n + 1)` augmented system.
///
/// The input is never modified; elimination happens on a private copy.
///
/// # Errors
/// - [`Error::DimensionMismatch`] if `augmented` is not `n x (n + 1)`.
/// - [`Error::SingularSystem`] if some column has no usable pivot.
///
/// # Example
/// ```
/// # use gapfit::solve;
/// # use nalgebra::DMatrix;
/// // 0x + 2y = 4
/// // 3x + 1y = 5
/// let m = DMatrix::from_row_slice(2, 3, &[0.0, 2.0, 4.0, 3.0, 1.0, 5.0]);
/// let x = solve(&m, 2).unwrap();
/// assert_eq!(x, vec![1.0, 2.0]);
/// ```
pub fn solve<T: Value>(augmented: &DMatrix<T>, n: usize) -> Result<Vec<T>> {
    let (rows, cols) = augmented.shape();
    if rows != n || cols != n + 1 {
        return Err(Error::DimensionMismatch { rows, cols, n });
    }

    gaussian_elimination(augmented)
}

/// Elimination on a matrix already known to be `n x (n + 1)`.
pub(crate) fn gaussian_elimination<T: Value>(augmented: &DMatrix<T>) -> Result<Vec<T>> {
    let n = augmented.nrows();
    let tolerance = pivot_tolerance(augmented);
    let mut a = augmented.clone();

    //
    // Forward elimination
    for i in 0..n {
        let mut max_row = i;
        let mut max_val = Value::abs(a[(i, i)]);
        for k in (i + 1)..n {
            let candidate = Value::abs(a[(k, i)]);
            if candidate > max_val {
                max_val = candidate;
                max_row = k;
            }
        }

        if max_row != i {
            log::trace!("pivot column {i}: swapping rows {i} and {max_row}");
            a.swap_rows(i, max_row);
        }

        // NaN pivots fall through so non-finite input propagates into the result
        if max_val <= tolerance {
            log::debug!("no usable pivot in column {i} of a {n}x{n} system (|pivot| = {max_val:e})");
            return Err(Error::SingularSystem { column: i, dim: n });
        }

        let pivot = a[(i, i)];
        for k in (i + 1)..n {
            let factor = a[(k, i)] / pivot;
            for j in i..=n {
                let delta = factor * a[(i, j)];
                a[(k, j)] -= delta;
            }
        }
    }

    //
    // Back substitution
    let mut x = vec![T::zero(); n];
    for i in (0..n).rev() {
        let mut value = a[(i, n)];
        for j in (i + 1)..n {
            value -= a[(i, j)] * x[j];
        }
        x[i] = value / a[(i, i)];
    }

    Ok(x)
}

/// Largest pivot magnitude still treated as zero.
///
/// `ε · n · max|A|`, mirroring the usual rank cutoff for a matrix of that size and scale.
/// If the scale is not finite, only an exact zero is rejected.
fn pivot_tolerance<T: Value>(augmented: &DMatrix<T>) -> T {
    let n = augmented.nrows();
    let mut scale = T::zero();
    for i in 0..n {
        for j in 0..n {
            let v = Value::abs(augmented[(i, j)]);
            if v > scale {
                scale = v;
            }
        }
    }

    if scale == T::infinity() {
        return T::zero();
    }

    T::epsilon() * T::from_positive_int(n) * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close, AugmentedSystem};

    #[test]
    fn test_identity() {
        let m = DMatrix::from_row_slice(3, 4, &[
            1.0, 0.0, 0.0, 7.0, //
            0.0, 1.0, 0.0, -2.0, //
            0.0, 0.0, 1.0, 0.5,
        ]);
        assert_eq!(solve(&m, 3).unwrap(), vec![7.0, -2.0, 0.5]);
    }

    #[test]
    fn test_zero_leading_entry_is_swapped() {
        // Row 0 starts with 0, row 1 does not
        let m = DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 3.0, 2.0, 1.0, 7.0]);
        let x = solve(&m, 2).unwrap();
        assert_all_close!(x, [2.0, 3.0]);
    }

    #[test]
    fn test_three_by_three() {
        //  2x +  y -  z =   8
        // -3x -  y + 2z = -11
        // -2x +  y + 2z =  -3
        let m = DMatrix::from_row_slice(3, 4, &[
            2.0, 1.0, -1.0, 8.0, //
            -3.0, -1.0, 2.0, -11.0, //
            -2.0, 1.0, 2.0, -3.0,
        ]);
        let x = solve(&m, 3).unwrap();
        assert_close!(x[0], 2.0, tol = 1e-12);
        assert_close!(x[1], 3.0, tol = 1e-12);
        assert_close!(x[2], -1.0, tol = 1e-12);
    }

    #[test]
    fn test_single_unknown() {
        let m = DMatrix::from_row_slice(1, 2, &[4.0, 10.0]);
        assert_eq!(solve(&m, 1).unwrap(), vec![2.5]);
    }

    #[test]
    fn test_empty_system() {
        let m = DMatrix::<f64>::zeros(0, 1);
        assert!(solve(&m, 0).unwrap().is_empty());
    }

    #[test]
    fn test_dependent_rows_are_singular() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
        let err = solve(&m, 2).unwrap_err();
        assert!(matches!(err, Error::SingularSystem { column: 1, dim: 2 }));
    }

    #[test]
    fn test_zero_column_is_singular() {
        let m = DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 1.0, 0.0, 2.0, 1.0]);
        let err = solve(&m, 2).unwrap_err();
        assert!(matches!(err, Error::SingularSystem { column: 0, dim: 2 }));
    }

    #[test]
    fn test_near_singular_is_rejected() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 2.0, 1.0, 1.0 + 1e-17, 2.0]);
        assert!(matches!(
            solve(&m, 2),
            Err(Error::SingularSystem { column: 1, .. })
        ));
    }

    #[test]
    fn test_shape_mismatch() {
        let m = DMatrix::<f64>::zeros(2, 2);
        assert!(matches!(
            solve(&m, 2),
            Err(Error::DimensionMismatch {
                rows: 2,
                cols: 2,
                n: 2
            })
        ));

        let m = DMatrix::<f64>::zeros(2, 3);
        assert!(matches!(solve(&m, 3), Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_input_is_not_modified() {
        let m = DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 3.0, 2.0, 1.0, 7.0]);
        let before = m.clone();
        let _ = solve(&m, 2).unwrap();
        assert_eq!(m, before);
    }

    #[test]
    fn test_tie_breaks_to_lowest_row() {
        // |A[0][0]| == |A[2][0]|. Pivoting on row 2 instead rounds x[2] to ...553
        let system = AugmentedSystem::from_rows(3, &[
            1.0, 0.1, 0.7, 1.0, //
            0.5, 3.0, 0.3, 1.0, //
            1.0, 0.3, 0.9, 1.0,
        ])
        .unwrap();

        let bits: Vec<u64> = system.solve().unwrap().iter().map(|v: &f64| v.to_bits()).collect();
        assert_eq!(
            bits,
            vec![0x3ff1_9999_9999_9999, 0x3fc5_5555_5555_5555, 0xbfc5_5555_5555_5552]
        );
    }

    #[test]
    fn test_nan_propagates() {
        let m = DMatrix::from_row_slice(2, 3, &[2.0, 1.0, f64::NAN, 1.0, 3.0, 1.0]);
        let x = solve(&m, 2).unwrap();
        assert!(x.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_f32() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0f32, 1.0, 3.0, 1.0, -1.0, 1.0]);
        assert_eq!(solve(&m, 2).unwrap(), vec![2.0f32, 1.0]);
    }
}

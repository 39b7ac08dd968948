//! The augmented linear system `[A | b]` shared by the builder and the solver.
use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    solver,
    value::Value,
};

/// A square linear system with its right-hand side appended as a final column.
///
/// For `n` unknowns the backing matrix has shape `n x (n + 1)`:
/// ```text
/// | a00 a01 .. a0n-1 | b0 |
/// | a10 a11 .. a1n-1 | b1 |
/// |  :   :       :   |  : |
/// ```
///
/// The system is immutable once built; [`AugmentedSystem::solve`] works on its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedSystem<T: Value = f64> {
    matrix: DMatrix<T>,
}
impl<T: Value> AugmentedSystem<T> {
    /// Wraps an existing augmented matrix.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] unless the matrix has exactly one more column than rows.
    pub fn from_matrix(matrix: DMatrix<T>) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        if cols != rows + 1 {
            return Err(Error::DimensionMismatch { rows, cols, n: rows });
        }

        Ok(Self { matrix })
    }

    /// Builds a system from row-major values, `n * (n + 1)` of them.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if the slice length does not match `n`.
    ///
    /// # Example
    /// ```
    /// # use gapfit::AugmentedSystem;
    /// // x + y = 3, x - y = 1
    /// let system = AugmentedSystem::from_rows(2, &[1.0, 1.0, 3.0, 1.0, -1.0, 1.0]).unwrap();
    /// assert_eq!(system.solve().unwrap(), vec![2.0, 1.0]);
    /// ```
    pub fn from_rows(n: usize, values: &[T]) -> Result<Self> {
        if values.len() != n * (n + 1) {
            return Err(Error::DimensionMismatch {
                rows: n,
                cols: values.len().checked_div(n).unwrap_or(0),
                n,
            });
        }

        Ok(Self {
            matrix: DMatrix::from_row_slice(n, n + 1, values),
        })
    }

    /// Creates an all-zero system with `n` unknowns.
    pub(crate) fn zeros(n: usize) -> Self {
        Self {
            matrix: DMatrix::zeros(n, n + 1),
        }
    }

    /// Number of unknowns
    #[must_use]
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Entry `A[i][j]` of the coefficient block.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    #[must_use]
    pub fn coefficient(&self, i: usize, j: usize) -> T {
        assert!(j < self.dim(), "column {j} is the right-hand side");
        self.matrix[(i, j)]
    }

    /// Entry `b[i]` of the right-hand side.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn rhs(&self, i: usize) -> T {
        self.matrix[(i, self.dim())]
    }

    pub(crate) fn set_coefficient(&mut self, i: usize, j: usize, value: T) {
        self.matrix[(i, j)] = value;
    }

    pub(crate) fn set_rhs(&mut self, i: usize, value: T) {
        let n = self.dim();
        self.matrix[(i, n)] = value;
    }

    /// The full `n x (n + 1)` backing matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<T> {
        &self.matrix
    }

    /// Consumes the system, returning the backing matrix.
    #[must_use]
    pub fn into_matrix(self) -> DMatrix<T> {
        self.matrix
    }

    /// Returns true if the coefficient block is exactly symmetric.
    ///
    /// Normal equations are symmetric by construction; the solver does not depend on it.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_symmetric(&self) -> bool {
        let n = self.dim();
        (0..n).all(|i| (0..i).all(|j| self.matrix[(i, j)] == self.matrix[(j, i)]))
    }

    /// Solves the system with Gaussian elimination and partial pivoting.
    ///
    /// See [`solver::solve`].
    ///
    /// # Errors
    /// Returns [`Error::SingularSystem`] if no usable pivot exists for some column.
    pub fn solve(&self) -> Result<Vec<T>> {
        solver::gaussian_elimination(&self.matrix)
    }
}

//! Normal-equation construction for least-squares polynomial fits.
//!
//! Minimizing `Σ (yₖ - p(xₖ))²` over the coefficients of a degree `d` polynomial
//! leads to the `(d + 1) x (d + 1)` system:
//! ```math
//! A[i][j] = Σ xₖ^(i + j)
//! b[i]    = Σ yₖ · xₖ^i
//! ```
//!
//! Each power is computed directly with [`Value::powi`] and accumulated in sample order.
//! For large `|x|` or high degree the sums lose precision quickly; shifting x toward zero
//! before fitting (for example subtracting a base year) keeps the system well conditioned.
use crate::{
    system::AugmentedSystem,
    value::{exponent, Value},
};

/// Builds the normal equations for fitting a polynomial of `degree` to `samples`.
///
/// The result is the `(degree + 1) x (degree + 2)` augmented system described in the
/// [module documentation](self). It is symmetric by construction.
///
/// The sample count is not checked against the degree: an under-determined set of samples
/// simply produces a singular (or nearly singular) system, which the solver reports.
///
/// # Example
/// ```
/// # use gapfit::normal::normal_equations;
/// let system = normal_equations(&[(1.0, 2.0), (2.0, 3.0)], 1);
/// assert_eq!(system.coefficient(0, 0), 2.0); // n
/// assert_eq!(system.coefficient(0, 1), 3.0); // Σx
/// assert_eq!(system.coefficient(1, 1), 5.0); // Σx²
/// assert_eq!(system.rhs(1), 8.0);            // Σxy
/// ```
#[must_use]
pub fn normal_equations<T: Value>(samples: &[(T, T)], degree: usize) -> AugmentedSystem<T> {
    let terms = degree + 1;
    let mut system = AugmentedSystem::zeros(terms);

    for i in 0..terms {
        for j in 0..terms {
            let power = exponent(i + j);
            let mut sum = T::zero();
            for &(x, _) in samples {
                sum += Value::powi(x, power);
            }
            system.set_coefficient(i, j, sum);
        }

        let power = exponent(i);
        let mut sum = T::zero();
        for &(x, y) in samples {
            sum += y * Value::powi(x, power);
        }
        system.set_rhs(i, sum);
    }

    log::trace!(
        "built {terms}x{} normal equations from {} samples",
        terms + 1,
        samples.len()
    );
    system
}

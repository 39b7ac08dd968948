//! Goodness-of-fit statistics for fitted polynomials.
//!
//! All functions take observed and predicted values as iterators, paired in order.
use crate::value::Value;

/// Computes the arithmetic mean of a sequence of values.
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
///
/// Returns `NaN` if the iterator yields no elements.
///
/// # Example
/// ```
/// # use gapfit::statistics::mean;
/// assert_eq!(mean([1.0, 2.0, 6.0].into_iter()), 3.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}

/// Calculate the R-squared value for a set of data.
///
/// R-squared is a number between 0 and 1 that tells you how well the model explains the data:
/// - `0` means the model explains none of the variation.
/// - `1` means the model explains all the variation.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// R-squared is calculated as:
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// If the observed values are all identical `SS_tot` is zero: the result is `1` when the
/// predictions are exact and `-∞`/`NaN` otherwise.
///
/// # Example
/// ```rust
/// # use gapfit::statistics::r_squared;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let r2 = r_squared(y.into_iter(), y_fit.into_iter());
/// assert!(r2 > 0.98);
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    if ss_residual == T::zero() {
        return T::one();
    }

    T::one() - (ss_residual / ss_total)
}

/// Estimates the variance of the residuals of a model with `k` parameters.
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (N - k)
/// ```
///
/// Returns zero when there are no degrees of freedom left (`N <= k`), as is the case for
/// an interpolating polynomial.
pub fn residual_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: usize,
) -> T {
    let mut ss_residual = T::zero();
    let mut n = 0usize;
    for (y, y_fit) in y.zip(y_fit) {
        ss_residual += Value::powi(y - y_fit, 2);
        n += 1;
    }

    if n <= k {
        return T::zero();
    }
    ss_residual / T::from_positive_int(n - k)
}

/// Computes the root mean squared error between observed and predicted values.
///
/// ```math
/// RMSE = sqrt( Σ (y_i - y_fit_i)² / N )
/// ```
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean(y.zip(y_fit).map(|(y, y_fit)| Value::powi(y - y_fit, 2))).sqrt()
}

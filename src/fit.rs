use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    display::DisplayOptions,
    error::{Error, Result},
    normal::normal_equations,
    statistics,
    value::{CoordExt, Value},
    Polynomial,
};

/// Fits a least-squares polynomial of `degree` to `samples`.
///
/// Builds the normal equations (see [`normal_equations`]) and solves them with Gaussian
/// elimination (see [`crate::solve`]). Returns the coefficients in ascending power order:
/// index `i` is the coefficient of `x^i`.
///
/// # Errors
/// - [`Error::NoData`] if `samples` is empty.
/// - [`Error::DegreeTooHigh`] if there are fewer than `degree + 1` samples.
/// - [`Error::SingularSystem`] if the samples cannot determine a polynomial of this degree,
///   for example because x-values are duplicated.
///
/// # Example
/// ```
/// // y = 1 + 2x, sampled exactly
/// let coefficients: Vec<f64> = gapfit::fit(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)], 1).unwrap();
/// assert!((coefficients[0] - 1.0).abs() < 1e-12);
/// assert!((coefficients[1] - 2.0).abs() < 1e-12);
/// ```
pub fn fit<T: Value>(samples: &[(T, T)], degree: usize) -> Result<Vec<T>> {
    if samples.is_empty() {
        return Err(Error::NoData);
    } else if degree >= samples.len() {
        return Err(Error::DegreeTooHigh {
            degree,
            samples: samples.len(),
        });
    }

    let system = normal_equations(samples, degree);
    let coefficients = system.solve()?;
    log::debug!(
        "fitted degree {degree} polynomial to {} samples",
        samples.len()
    );
    Ok(coefficients)
}

/// Fits several independent series at once.
///
/// Each entry is a set of samples and the degree to fit to it; results are returned in the
/// same order. With the `parallel` feature the fits run on the rayon thread pool.
///
/// # Example
/// ```
/// # use gapfit::fit_all;
/// let population = [(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)];
/// let usage = [(0.0, 0.0), (1.0, 1.0)];
/// let fits = fit_all(&[(&population[..], 2), (&usage[..], 1)]);
/// assert_eq!(fits.len(), 2);
/// assert!(fits.iter().all(Result::is_ok));
/// ```
pub fn fit_all<'data, T: Value>(
    series: &[(&'data [(T, T)], usize)],
) -> Vec<Result<CurveFit<'data, T>>> {
    #[cfg(not(feature = "parallel"))]
    {
        series
            .iter()
            .map(|&(data, degree)| CurveFit::new(data, degree))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        series
            .par_iter()
            .map(|&(data, degree)| CurveFit::new(data, degree))
            .collect()
    }
}

/// A least-squares polynomial fitted to a set of samples.
///
/// `CurveFit` keeps the samples it was built from alongside the fitted [`Polynomial`], so it
/// can report residuals and goodness-of-fit as well as make predictions.
///
/// Predictions are not restricted to the sampled x-range: extrapolating a trend is a
/// legitimate use, though the error grows quickly away from the data.
///
/// # How it works
/// - Builds the `(degree + 1) x (degree + 2)` normal equations from the samples.
/// - Solves them with Gaussian elimination and partial pivoting.
/// - The solution is the vector of polynomial coefficients, lowest power first.
///
/// # Example
/// ```
/// # use gapfit::CurveFit;
/// let data = &[(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
/// let fit = CurveFit::new(&data[..], 2).unwrap();
/// println!("Coefficients: {:?}", fit.coefficients());
/// println!("{fit}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit<'data, T: Value = f64> {
    data: Cow<'data, [(T, T)]>,
    x_range: RangeInclusive<T>,
    function: Polynomial<'static, T>,
}
impl<'data, T: Value> CurveFit<'data, T> {
    /// Creates a new polynomial curve fit for the given data and degree.
    ///
    /// # Parameters
    /// - `data`: Slice of `(x, y)` points to fit.
    /// - `degree`: Desired polynomial degree.
    ///
    /// # Errors
    /// Returns an [`Error`] in the following cases:
    /// - `Error::NoData`: `data` is empty.
    /// - `Error::DegreeTooHigh`: `degree >= data.len()`.
    /// - `Error::SingularSystem`: the normal equations could not be solved.
    pub fn new(data: impl Into<Cow<'data, [(T, T)]>>, degree: usize) -> Result<Self> {
        let data: Cow<_> = data.into();
        let coefficients = fit(&data, degree)?;
        let x_range = data.x_range().ok_or(Error::NoData)?;

        Ok(Self {
            data,
            x_range,
            function: Polynomial::new(coefficients),
        })
    }

    /// Returns an owned version of this curve fit, with a full copy of the data.
    #[must_use]
    pub fn to_owned(&self) -> CurveFit<'static, T> {
        CurveFit {
            data: Cow::Owned(self.data.to_vec()),
            x_range: self.x_range.clone(),
            function: self.function.clone(),
        }
    }

    /// Returns the samples this fit was built from.
    #[must_use]
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// Returns the inclusive range of sampled x-values.
    #[must_use]
    pub fn x_range(&self) -> &RangeInclusive<T> {
        &self.x_range
    }

    /// Returns the fitted coefficients, index `i` being the coefficient of `x^i`.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// Returns the degree of the fitted polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.function.degree()
    }

    /// Returns the fitted polynomial.
    #[must_use]
    pub fn as_polynomial(&self) -> &Polynomial<'static, T> {
        &self.function
    }

    /// Consumes the fit, returning the fitted polynomial.
    #[must_use]
    pub fn into_polynomial(self) -> Polynomial<'static, T> {
        self.function
    }

    /// Evaluates the fitted polynomial at `x`.
    pub fn y(&self, x: T) -> T {
        self.function.y(x)
    }

    /// Evaluates the fitted polynomial at each of the given x-values.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        self.function.solve(x)
    }

    /// Evaluates the fitted polynomial at each sampled x-value.
    #[must_use]
    pub fn solution(&self) -> Vec<(T, T)> {
        self.solve(self.data.x_iter())
    }

    /// Returns `(x, y - ŷ)` for each sample.
    #[must_use]
    pub fn residuals(&self) -> Vec<(T, T)> {
        self.data
            .iter()
            .map(|&(x, y)| (x, y - self.function.y(x)))
            .collect()
    }

    /// Predicts the values missing from a regularly spaced series.
    ///
    /// The gaps are found with [`CoordExt::x_gaps`]; each returned pair is a missing x-value
    /// and its prediction.
    ///
    /// # Example
    /// ```
    /// # use gapfit::CurveFit;
    /// let data = [(2003.0, 5.0), (2004.0, 6.0), (2007.0, 9.0)];
    /// let fit = CurveFit::new(&data[..], 1).unwrap();
    /// let filled = fit.fill_gaps(1.0);
    /// assert_eq!(filled.len(), 2);
    /// assert_eq!(filled[0].0, 2005.0);
    /// ```
    #[must_use]
    pub fn fill_gaps(&self, step: T) -> Vec<(T, T)> {
        self.solve(self.data.x_gaps(step))
    }

    /// R² of the fit against its own samples.
    ///
    /// See [`statistics::r_squared`].
    #[must_use]
    pub fn r_squared(&self) -> T {
        self.function.r_squared(&self.data)
    }

    /// R² of this fit against a known polynomial, sampled at the fit's x-values.
    #[must_use]
    pub fn r_squared_against(&self, function: &Polynomial<'_, T>) -> T {
        let y = self.data.x_iter().map(|x| function.y(x));
        let y_fit = self.data.x_iter().map(|x| self.y(x));
        statistics::r_squared(y, y_fit)
    }

    /// Residual variance, with one degree of freedom used per coefficient.
    ///
    /// See [`statistics::residual_variance`].
    #[must_use]
    pub fn residual_variance(&self) -> T {
        let y_fit = self.data.x_iter().map(|x| self.y(x));
        statistics::residual_variance(self.data.y_iter(), y_fit, self.coefficients().len())
    }

    /// Root mean squared error against the samples.
    #[must_use]
    pub fn rmse(&self) -> T {
        let y_fit = self.data.x_iter().map(|x| self.y(x));
        statistics::root_mean_squared_error(self.data.y_iter(), y_fit)
    }

    /// Collects the diagnostic properties of this fit.
    #[must_use]
    pub fn properties(&self) -> FitProperties<T> {
        FitProperties {
            degree: self.degree(),
            data_points: self.data.len(),
            coefficients: self.coefficients().to_vec(),
            r_squared: self.r_squared(),
            residual_variance: self.residual_variance(),
            rmse: self.rmse(),
        }
    }

    /// Renders the fitted polynomial with custom [`DisplayOptions`].
    #[must_use]
    pub fn equation_with(&self, options: &DisplayOptions<T>) -> String {
        self.function.equation_with(options)
    }

    /// Renders the fitted polynomial as `y(x) = …`.
    #[must_use]
    pub fn equation(&self) -> String {
        self.function.equation()
    }
}

impl<T: Value> std::fmt::Display for CurveFit<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function)
    }
}

impl<T: Value> AsRef<Polynomial<'static, T>> for CurveFit<'_, T> {
    fn as_ref(&self) -> &Polynomial<'static, T> {
        &self.function
    }
}

/// A set of diagnostic properties for a curve fit.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// The degree of the fitted polynomial.
    pub degree: usize,

    /// The number of data points used in the fit.
    pub data_points: usize,

    /// The coefficients of the fitted polynomial, lowest power first.
    pub coefficients: Vec<T>,

    /// R² against the samples.
    pub r_squared: T,

    /// Residual variance.
    pub residual_variance: T,

    /// Root mean squared error.
    pub rmse: T,
}

use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    display::{self, DisplayOptions},
    statistics,
    value::{exponent, CoordExt, SteppedValues, Value},
};

/// Evaluates `Σ cᵢ · xⁱ` by direct power summation.
///
/// `coefficients[i]` is the coefficient of `x^i`. An empty slice evaluates to zero.
///
/// Large `x` overflows to `±∞` rather than failing.
///
/// # Example
/// ```
/// # use gapfit::evaluate;
/// // 2 + 3x
/// assert_eq!(evaluate(&[2.0, 3.0], 0.0), 2.0);
/// assert_eq!(evaluate(&[2.0, 3.0], 1.0), 5.0);
/// assert_eq!(evaluate(&[2.0, 3.0], 2.0), 8.0);
/// ```
pub fn evaluate<T: Value>(coefficients: &[T], x: T) -> T {
    let mut y = T::zero();
    for (i, &coef) in coefficients.iter().enumerate() {
        y += coef * Value::powi(x, exponent(i));
    }
    y
}

/// A polynomial in the monomial basis: `y(x) = c₀ + c₁x + c₂x² + …`
///
/// Unlike [`crate::CurveFit`], this struct is **not tied to any dataset**, making it a canonical
/// function that can be evaluated for any x-value.
///
/// The coefficients may be borrowed or owned.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, T: Value = f64> {
    coefficients: Cow<'a, [T]>,
}
impl<'a, T: Value> Polynomial<'a, T> {
    /// Creates a polynomial from coefficients in ascending power order.
    ///
    /// An empty coefficient list is treated as the zero polynomial.
    pub fn new(coefficients: impl Into<Cow<'a, [T]>>) -> Self {
        let mut coefficients = coefficients.into();
        if coefficients.is_empty() {
            coefficients.to_mut().push(T::zero());
        }
        Self { coefficients }
    }

    /// Creates a polynomial borrowing its coefficients.
    ///
    /// ```
    /// # use gapfit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x²
    /// assert_eq!(poly.y(2.0), 17.0);
    /// ```
    #[must_use]
    pub const fn borrowed(coefficients: &'a [T]) -> Self {
        Self {
            coefficients: Cow::Borrowed(coefficients),
        }
    }

    /// Converts the polynomial into an owned version.
    #[must_use]
    pub fn into_owned(self) -> Polynomial<'static, T> {
        Polynomial {
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Returns the coefficients, index `i` being the coefficient of `x^i`.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Consumes the polynomial, returning its coefficients.
    #[must_use]
    pub fn into_coefficients(self) -> Vec<T> {
        self.coefficients.into_owned()
    }

    /// Returns the degree of the polynomial, `coefficients().len() - 1`.
    ///
    /// Leading zero coefficients still count.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at a given x-value by direct power summation.
    ///
    /// See [`evaluate`].
    pub fn y(&self, x: T) -> T {
        evaluate(&self.coefficients, x)
    }

    /// Evaluates the polynomial using Horner's method.
    ///
    /// Uses one multiply-add per coefficient instead of a power per term.
    /// Agrees with [`Polynomial::y`] to within rounding.
    pub fn y_horner(&self, x: T) -> T {
        let mut y = T::zero();
        for &coef in self.coefficients.iter().rev() {
            y = y * x + coef;
        }
        y
    }

    /// Evaluates the polynomial at multiple x-values.
    ///
    /// # Returns
    /// A `Vec` of `(x, y)` pairs corresponding to each input value.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        x.into_iter().map(|x| (x, self.y(x))).collect()
    }

    /// Evaluates the polynomial over a range of x-values with a fixed step.
    ///
    /// ```
    /// # use gapfit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]);
    /// let points = poly.solve_range(0.0..=2.0, 1.0);
    /// assert_eq!(points, vec![(0.0, 1.0), (1.0, 6.0), (2.0, 17.0)]);
    /// ```
    pub fn solve_range(&self, range: RangeInclusive<T>, step: T) -> Vec<(T, T)> {
        self.solve(SteppedValues::new(range, step))
    }

    /// Calculates the R-squared value of this polynomial against the provided data.
    ///
    /// See [`statistics::r_squared`].
    pub fn r_squared(&self, data: &[(T, T)]) -> T {
        let y_fit = data.x_iter().map(|x| self.y(x));
        statistics::r_squared(data.y_iter(), y_fit)
    }

    /// Renders the polynomial with custom [`DisplayOptions`].
    #[must_use]
    pub fn equation_with(&self, options: &DisplayOptions<T>) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail
        let _ = display::format_polynomial(&mut output, &self.coefficients, options);
        output
    }

    /// Renders the polynomial as `y(x) = …` using the default [`DisplayOptions`].
    ///
    /// ```
    /// # use gapfit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, -3.0, 2.0]);
    /// assert_eq!(poly.equation(), "y(x) = 2.00x² - 3.00x + 1.00");
    /// ```
    #[must_use]
    pub fn equation(&self) -> String {
        self.equation_with(&DisplayOptions::default())
    }
}

impl<T: Value> std::fmt::Display for Polynomial<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::format_polynomial(f, &self.coefficients, &DisplayOptions::default())
    }
}

impl<'a, T: Value> AsRef<Polynomial<'a, T>> for Polynomial<'a, T> {
    fn as_ref(&self) -> &Polynomial<'a, T> {
        self
    }
}

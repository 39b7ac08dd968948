//! Utilities for displaying and formatting polynomials
//!
//! This module turns a coefficient vector into a human-readable equation such as
//! `y(x) = 2.00x² - 3.00x + 1.00`.
//!
//! Presentation concerns live here and nowhere else: the fitting core always returns exact
//! coefficients, and the threshold below which a coefficient is hidden is a display option.
//!
//! # Key Concepts
//! - **[`DisplayOptions`]**: Precision, hiding threshold, exponent style and x-origin.
//! - **[`Term`]**: Represents a single polynomial term with a sign and body.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//!
//! # Helpers
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping zeros.
//! - [`format_variable`]: Renders `x`, `x²` or `x^2`.
use crate::value::Value;

pub mod unicode;

/// Default number of digits after the decimal point
pub const DEFAULT_PRECISION: usize = 2;

/// Default magnitude below which a coefficient is treated as zero for display
pub const DEFAULT_THRESHOLD: f64 = 1e-10;

/// Default range in which scientific notation is not used
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    const RANGE: std::ops::Range<f64> = 1e-3..1e3;
    let s = T::try_cast(RANGE.start).ok()?;
    let e = T::try_cast(RANGE.end).ok()?;
    Some(s..e)
}

/// Controls how an equation is rendered.
///
/// # Example
/// ```
/// # use gapfit::{display::DisplayOptions, Polynomial};
/// let poly = Polynomial::borrowed(&[250.0, 1.5, 0.02]);
/// let options = DisplayOptions {
///     precision: 3,
///     superscript: false,
///     origin: Some(1960.0),
///     ..DisplayOptions::default()
/// };
/// assert_eq!(
///     poly.equation_with(&options),
///     "x = t - 1960, y(x) = 0.020x^2 + 1.500x + 250.000"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions<T: Value = f64> {
    /// Digits after the decimal point
    pub precision: usize,

    /// Coefficients with a magnitude at or below this are skipped
    pub threshold: T,

    /// Use unicode superscripts (`x²`) rather than carets (`x^2`)
    pub superscript: bool,

    /// Name of the variable
    pub variable: String,

    /// Constant subtracted from the original coordinate before fitting.
    ///
    /// When set, the equation is prefixed with the scaling formula `x = t - origin`.
    pub origin: Option<T>,
}
impl<T: Value> Default for DisplayOptions<T> {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            threshold: T::try_cast(DEFAULT_THRESHOLD).unwrap_or(T::epsilon()),
            superscript: true,
            variable: "x".to_string(),
            origin: None,
        }
    }
}

/// Writes the full polynomial expression into the provided buffer.
///
/// # Coefficients
/// - `coefficients[i]` corresponds to the coefficient of `x^i`.
/// - Terms are written from the highest power down.
/// - Coefficients at or below [`DisplayOptions::threshold`] are skipped; if every term is
///   skipped the equation reads `y(x) = 0`.
///
/// # Behavior
/// - The first written term has no leading `+`.
/// - Subsequent terms are prepended with `+` or `-` depending on the sign.
///
/// # Errors
/// Returns an error if writing to `buffer` fails.
pub fn format_polynomial<T: Value, B: std::fmt::Write>(
    buffer: &mut B,
    coefficients: &[T],
    options: &DisplayOptions<T>,
) -> std::fmt::Result {
    let mut terms = Vec::new();
    for (degree, &coef) in coefficients.iter().enumerate().rev() {
        if let Some(term) = format_term(degree, coef, options) {
            terms.push(term);
        }
    }

    if let Some(origin) = options.origin {
        let sign = Sign::from_coef(origin);
        let origin = Value::abs(origin);
        write!(
            buffer,
            "{} = t {} {origin}, ",
            options.variable,
            sign.flip().char()
        )?;
    }

    write!(buffer, "y({}) = ", options.variable)?;
    if terms.is_empty() {
        return write!(buffer, "0");
    }

    // Extract the first term to avoid leading '+'
    let term_n = terms.remove(0);
    if term_n.sign == Sign::Negative {
        write!(buffer, "{}", term_n.sign.char())?;
    }
    write!(buffer, "{}", term_n.body)?;

    for term in terms {
        write!(buffer, " {} {}", term.sign.char(), term.body)?;
    }

    Ok(())
}

/// Formats a single monomial term, or `None` if it should be skipped.
fn format_term<T: Value>(degree: usize, coef: T, options: &DisplayOptions<T>) -> Option<Term> {
    let sign = Sign::from_coef(coef);
    let coef = format_coefficient(coef, degree, options.precision, options.threshold)?;
    let var = format_variable(&options.variable, degree, options.superscript);
    Some(Term::new(sign, format!("{coef}{var}")))
}

/// Represents the sign of a polynomial term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use gapfit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef < T::zero() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }

    /// Returns the opposite sign.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// Represents a single term of a polynomial for display purposes.
///
/// A `Term` combines the **sign** and the **formatted body** of a polynomial
/// component (e.g., `"2x²"`, `"3.14"`, `"x"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term (positive or negative).
    pub sign: Sign,

    /// The body of the term (e.g., `"2x²"`, `"3.14"`, `"x"`), without its sign.
    pub body: String,
}

impl Term {
    /// Creates a new polynomial term with the given sign and body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }
}

/// Formats a numeric coefficient for display in a polynomial term.
///
/// - Returns `None` if the magnitude is at or below `threshold`.
/// - Returns an empty string for a unit coefficient on a non-constant term (`x`, not `1.00x`).
/// - Formats as a decimal if the absolute value is between `1e-3` and `1e3`.
/// - Formats in scientific notation otherwise.
///
/// The sign is never included; see [`Sign::from_coef`].
///
/// # Example
/// ```
/// # use gapfit::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, 2, 1e-10), None);
/// assert_eq!(format_coefficient(-2.5, 1, 2, 1e-10), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1e5, 1, 2, 1e-10), Some("1.00e5".to_string()));
/// assert_eq!(format_coefficient(1.0, 2, 2, 1e-10), Some(String::new()));
/// ```
pub fn format_coefficient<T: Value>(
    coef: T,
    degree: usize,
    precision: usize,
    threshold: T,
) -> Option<String> {
    let abs = Value::abs(coef);

    if abs <= threshold {
        return None;
    }

    if Value::abs_sub(abs, T::one()) <= threshold && degree != 0 {
        return Some(String::new());
    }

    Some(unicode::float(abs, default_fixed_range(), precision))
}

/// Formats the variable part of a monomial term.
///
/// # Behavior
/// - If `exp == 0`, returns an empty string (`""`).
/// - If `exp == 1`, returns the base string unchanged.
/// - Otherwise, appends the exponent as a superscript (`x²`) or caret (`x^2`).
///
/// # Examples
/// ```
/// # use gapfit::display::format_variable;
/// assert_eq!(format_variable("x", 0, true), "");
/// assert_eq!(format_variable("x", 1, true), "x");
/// assert_eq!(format_variable("x", 2, true), "x²");
/// assert_eq!(format_variable("t", 12, false), "t^12");
/// ```
#[must_use]
pub fn format_variable(base: &str, exp: usize, superscript: bool) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ if superscript => format!("{base}{}", unicode::superscript(&exp.to_string())),
        _ => format!("{base}^{exp}"),
    }
}

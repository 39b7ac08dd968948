//! Macros for generating test data and checking fit quality.
//!
//! # Features
//!
//! ## General Purpose Macros
//!
//! ### [`crate::function!`]
//!
//! DSL for generating polynomials. Great for generating synthetic data sets!
//! ```rust
//! gapfit::function!(const f(x) = 5 x^4 - 4 x^3 + 2.5);
//! let data = f.solve_range(0.0..=100.0, 1.0);
//! ```
//!
//! ## Fit quality assertions
//! These are designed to be used in unit tests to validate fit quality.
//!
//! ### [`crate::assert_close`]
//! `assert_eq!` for floats: equal within machine epsilon, or within an explicit `tol = …`.
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`].
//!
//! ### [`crate::assert_y`]
//! Asserts that a polynomial or fit produces an expected 'y' value at a given 'x' input.
//!
//! ### [`crate::assert_fits`]
//! Asserts that a fit matches a known polynomial function, by r² over the sampled x-values.
//! See [`crate::CurveFit::r_squared_against`] for more details.
//!
//! ### [`crate::assert_r_squared`]
//! General case of [`crate::assert_fits`] that does not require a known function.
//! See [`crate::CurveFit::r_squared`] for more details.
//!
//! ### [`crate::assert_interpolates`]
//! Asserts that a fit passes through every one of its samples.


/// Macro to generate a polynomial function.
///
/// This is good for using as a data source for testing
/// - Terms can be listed in any order
/// - Same-power terms are summed
/// - Missing terms are 0
///
/// The only major limitation is that it needs a space between the coefficient and the variable:
/// - `20.0 x^3` is valid, but `20.0x^3` is not.
///
/// Syntax:
/// ```text
/// function!(
///     [const | static]?
///     [<name>(<x>) = ]?
///     [ [+]? <coef> [ x [ ^ <deg> ]? ]? ]+
/// )
/// ```
///
/// # Example
/// ```
/// # use gapfit::function;
/// function!(test(x) = 20.0 x^3 + 3.0 x^2 - 2.0 x + 4.0); // Normal let-binding
/// function!(const test2(x) = 20.0 x^3 + 3.0 x^2 - 2.0 x + 4.0); // const can live outside functions
/// let test3 = function!(20.0 x^3 + 3.0 x^2 - 2.0); // No auto bindings
///
/// assert_eq!(test.y(1.0), 25.0);
/// assert_eq!(test2.coefficients(), &[4.0, -2.0, 3.0, 20.0]);
/// assert_eq!(test3.degree(), 3);
/// ```
#[macro_export]
macro_rules! function {
    ($( $(+)? $c0:literal $(x $( ^ $d0:literal )?)? )+) => { {
        const LEN: usize = {
            let mut degree = 0; $(
                let d2 = 1 $(+ 1 $(* $d0 as usize)?)?;
                if d2 > degree { degree = d2; }
            )+
            degree
        };

        const COEFS: [f64; LEN] = {
            let mut coefs = [0.0; LEN];
            // coef alone is degree 0, 1 if just x, or the power if specified
            $( coefs[ 0 $(+ 1 $(* $d0 as usize)?)? ] += $c0 as f64; )+
            coefs
        };

        $crate::Polynomial::borrowed(&COEFS)
    }};

    ($name:ident (x) = $($rest:tt)+ ) => {
        let $name: $crate::Polynomial = $crate::function!($($rest)+);
    };

    (const $name:ident (x) = $($rest:tt)+ ) => {
        const $name: $crate::Polynomial<'static> = $crate::function!($($rest)+);
    };

    (static $name:ident (x) = $($rest:tt)+ ) => {
        static $name: $crate::Polynomial<'static> = $crate::function!($($rest)+);
    };
}

#[cfg(test)]
mod tests {
    use crate::assert_all_close;

    function!(static CUBIC(x) = 1.0 x^3 - 2.0);

    #[test]
    fn test_function_macro() {
        function!(poly(x) = 3.0 x^2 + 1.0 x + 0.5 + 1.0 x^2);
        assert_all_close!(poly.coefficients(), [0.5, 1.0, 4.0]);
        assert_eq!(CUBIC.coefficients(), &[-2.0, 0.0, 0.0, 1.0]);
        assert_eq!(CUBIC.y(2.0), 6.0);
    }
}

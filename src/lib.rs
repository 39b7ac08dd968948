//! # Gapfit
//! ## Least-squares polynomial trends for gappy series
//!
//! Yearly statistics have holes in them: a census skips a year, a survey starts late, a
//! column goes blank for a decade. This crate fits a polynomial trend to what is there and
//! uses it to fill the holes and to look a little way past the end of the data.
//!
//! The core is small and exact:
//! - [`normal::normal_equations`] turns `(x, y)` samples into the `(d + 1) x (d + 2)`
//!   augmented normal equations for a degree `d` polynomial.
//! - [`solve`] solves any augmented system by Gaussian elimination with partial pivoting,
//!   refusing systems with no usable pivot.
//! - [`evaluate`] computes `Σ cᵢ·xⁱ` for a coefficient vector, lowest power first.
//! - [`fit`] chains the first two.
//!
//! Around it sit the tools for actually using a trend:
//! - [`CurveFit`] keeps the samples with the coefficients, so it can report residuals and R²
//!   and predict the gaps ([`CurveFit::fill_gaps`]).
//! - [`job::FitJob`] describes a whole analysis in JSON: degree, base year, cut-off, points
//!   to predict.
//! - [`series::Table`] reads the comma-separated tables the series usually come in.
//! - [`display`] renders equations like `x = t - 1960, y(x) = 0.02x² + 1.50x + 250.00`.
//!
//! ```rust
//! use gapfit::{fit, evaluate};
//!
//! // Population in millions, years counted from 2000
//! let samples = [(0.0, 205.1), (1.0, 208.0), (2.0, 210.9), (5.0, 219.9), (6.0, 222.8)];
//! let coefficients = fit(&samples, 2).unwrap();
//!
//! // The missing years
//! let y3 = evaluate(&coefficients, 3.0);
//! let y4 = evaluate(&coefficients, 4.0);
//! assert!(y3 > 210.9 && y3 < y4 && y4 < 219.9);
//! ```
//!
//! ## Testing
//! The [`test`] module has macros for writing fit tests: [`function!`] to generate synthetic
//! data from a known polynomial, and [`assert_close!`], [`assert_fits!`] and friends to check
//! the results.
//!
//! ```rust
//! use gapfit::{CurveFit, function, assert_fits};
//!
//! function!(f(x) = 2.0 x^2 + 3.0 x - 5.0);
//! let data = f.solve_range(0.0..=20.0, 1.0);
//! let fit = CurveFit::new(&data, 2).unwrap();
//! assert_fits!(&f, &fit, 0.999);
//! ```
//!
//! ## Features
//! - `parallel`: [`fit_all`] fits independent series on the rayon thread pool.
//!
//! ## Logging
//! The library logs through the [`log`](https://docs.rs/log) facade: fit summaries at
//! `debug`, pivot swaps at `trace`. Install any logger to see them; the `gapfit` binary
//! uses `fern`.
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod test;

pub mod display;
pub mod error;
pub mod job;
pub mod normal;
pub mod series;
pub mod solver;
pub mod statistics;
pub mod value;

mod fit;
mod polynomial;
mod system;

pub use error::{Error, Result};
pub use fit::*;
pub use polynomial::{evaluate, Polynomial};
pub use solver::solve;
pub use system::AugmentedSystem;

pub use nalgebra;

//! Fit jobs: a serializable description of one trend analysis.
//!
//! A job says how to fit a series (degree, x-origin, which samples to use) and what to
//! predict from it (the gaps in the series and any extra x-values). Jobs are usually loaded
//! from JSON:
//!
//! ```json
//! { "degree": 2, "origin": 1960, "min_x": 1994, "gap_step": 1, "predict": [2035] }
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    display::{DisplayOptions, DEFAULT_PRECISION},
    error::Result,
    fit::{CurveFit, FitProperties},
    value::Value,
};

/// Default polynomial degree for a job
pub const DEFAULT_DEGREE: usize = 2;

/// How to fit one series and what to predict from it.
///
/// Every field has a default, so `{}` is a valid job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitJob<T: Value = f64> {
    /// Degree of the fitted polynomial.
    pub degree: usize,

    /// Subtracted from every x before fitting, typically a base year.
    ///
    /// Large x-values make the normal equations badly conditioned, so shifting them towards
    /// zero improves accuracy. Results are still reported in the original x.
    pub origin: Option<T>,

    /// Samples with a smaller x are ignored.
    pub min_x: Option<T>,

    /// Spacing of the sample grid; when set, the missing grid points are predicted.
    pub gap_step: Option<T>,

    /// Additional x-values to predict, typically beyond the sampled range.
    pub predict: Vec<T>,

    /// Digits after the decimal point in the rendered equation.
    pub precision: usize,
}
impl<T: Value> Default for FitJob<T> {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            origin: None,
            min_x: None,
            gap_step: None,
            predict: Vec::new(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl<T: Value> FitJob<T>
where
    T: for<'de> Deserialize<'de>,
{
    /// Parses a job from JSON.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] if the text is not a valid job.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a job from a JSON file.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the file cannot be read, or [`crate::Error::Json`] if
    /// it is not a valid job.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl<T: Value> FitJob<T> {
    /// Runs the job against a series.
    ///
    /// - Drops samples below `min_x`.
    /// - Shifts x by `origin` and fits a polynomial of `degree`.
    /// - Predicts the gaps (if `gap_step` is set) and the `predict` x-values.
    ///
    /// # Errors
    /// Returns an error if the fit fails; see [`CurveFit::new`].
    ///
    /// # Example
    /// ```
    /// # use gapfit::job::FitJob;
    /// let job: FitJob<f64> = FitJob {
    ///     degree: 1,
    ///     origin: Some(2000.0),
    ///     gap_step: Some(1.0),
    ///     predict: vec![2010.0],
    ///     ..FitJob::default()
    /// };
    ///
    /// let report = job.run(&[(2001.0, 2.0), (2002.0, 4.0), (2004.0, 8.0)]).unwrap();
    /// assert_eq!(report.gaps.len(), 1);
    /// assert!((report.gaps[0].1 - 6.0).abs() < 1e-9);
    /// assert!((report.predictions[0].1 - 20.0).abs() < 1e-9);
    /// ```
    pub fn run(&self, samples: &[(T, T)]) -> Result<JobReport<T>> {
        let origin = self.origin.unwrap_or_else(T::zero);
        let shifted: Vec<(T, T)> = samples
            .iter()
            .filter(|(x, _)| self.min_x.map_or(true, |min| *x >= min))
            .map(|&(x, y)| (x - origin, y))
            .collect();
        log::debug!(
            "running degree {} job on {} of {} samples",
            self.degree,
            shifted.len(),
            samples.len()
        );

        let fit = CurveFit::new(shifted, self.degree)?;

        let unshift = |points: Vec<(T, T)>| -> Vec<(T, T)> {
            points.into_iter().map(|(x, y)| (x + origin, y)).collect()
        };

        let gaps = match self.gap_step {
            Some(step) => unshift(fit.fill_gaps(step)),
            None => Vec::new(),
        };
        let predictions = unshift(fit.solve(self.predict.iter().map(|&x| x - origin)));

        let options = DisplayOptions {
            precision: self.precision,
            origin: self.origin,
            ..DisplayOptions::default()
        };

        Ok(JobReport {
            equation: fit.equation_with(&options),
            properties: fit.properties(),
            gaps,
            predictions,
        })
    }
}

/// The outcome of a [`FitJob`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport<T: Value = f64> {
    /// The fitted polynomial, rendered in the shifted variable.
    pub equation: String,

    /// Fit diagnostics. Coefficients are in the shifted variable.
    pub properties: FitProperties<T>,

    /// `(x, ŷ)` for each x missing from the series grid.
    pub gaps: Vec<(T, T)>,

    /// `(x, ŷ)` for each requested x.
    pub predictions: Vec<(T, T)>,
}

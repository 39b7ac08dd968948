//! Numeric types and iteration utilities for sample data.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used for fitting and evaluation, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `RealField` to provide:
//!   - `try_cast` for safe type conversion with error handling.
//!   - `powi` for integer exponentiation.
//! - [`CoordExt`]: Accessors over slices of `(x, y)` samples.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a specified step,
//!   useful for generating evaluation points.
//!
//! # Example
//!
//! ```rust
//! use gapfit::value::{SteppedValues, Value};
//!
//! // Yields 0.0, 0.5, 1.0
//! for x in SteppedValues::new(0.0..=1.0, 0.5) {
//!     println!("{x}");
//! }
//!
//! let squared = Value::powi(3.0_f64, 2);
//! ```
use std::{cmp::Ordering, ops::RangeInclusive};

use num_traits::float::FloatCore;

use crate::error::Error;

/// Numeric type for samples and coefficients
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns the absolute difference between two values.
    #[must_use]
    fn abs_sub(self, other: Self) -> Self {
        nalgebra::ComplexField::abs(self - other)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Converts a power index into the exponent type used by [`Value::powi`].
pub(crate) fn exponent(power: usize) -> i32 {
    i32::try_from(power).unwrap_or(i32::MAX)
}

/// Iterator over a range of floating-point values with a specified step.
///
/// This iterator yields values starting from `start` up to and including `end`,
/// incrementing by `step` on each iteration.
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        Self {
            range,
            step,
            index: T::zero(),
        }
    }

    /// Creates a new iterator over stepped values in a range with a step of 1.0
    pub fn new_unit(range: RangeInclusive<T>) -> Self {
        Self::new(range, T::one())
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        // Non-positive steps would never terminate
        if self.step <= T::zero() {
            return None;
        }

        let value = *self.range.start() + self.index * self.step;
        if value <= *self.range.end() {
            self.index += T::one();
            Some(value)
        } else {
            None
        }
    }
}

/// Extension trait for accessing the `x` and `y` coordinates of a set of samples.
///
/// # Examples
///
/// ```
/// # use gapfit::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the inclusive range of x-coordinates, or `None` if there are none.
    fn x_range(&self) -> Option<RangeInclusive<T>> {
        let bounds = self.x_iter().fold(None, |acc: Option<(T, T)>, x| {
            Some(match acc {
                Some((min, max)) => (
                    nalgebra::RealField::min(min, x),
                    nalgebra::RealField::max(max, x),
                ),
                None => (x, x),
            })
        });
        bounds.map(|(start, end)| start..=end)
    }

    /// Finds the x-values missing from a regularly spaced grid.
    ///
    /// The finite x-coordinates are sorted, then every multiple of `step` strictly between
    /// two consecutive samples is reported. Spacing closer than half a step counts as
    /// contiguous, so small floating point drift does not produce phantom gaps.
    ///
    /// Non-finite x-values have no place on a grid and are skipped. A step too small to
    /// advance past a sample ends the walk for that pair.
    ///
    /// ```
    /// # use gapfit::value::CoordExt;
    /// let years = vec![(2003.0, 1.0), (2004.0, 1.0), (2007.0, 1.0)];
    /// assert_eq!(years.x_gaps(1.0), vec![2005.0, 2006.0]);
    /// ```
    fn x_gaps(&self, step: T) -> Vec<T> {
        let mut gaps = Vec::new();
        if !FloatCore::is_finite(step) || step <= T::zero() {
            return gaps;
        }

        let mut xs: Vec<T> = self.x_iter().filter(|x| FloatCore::is_finite(*x)).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let half = step / (T::one() + T::one());
        for pair in xs.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let mut previous = start;
            let mut i = T::one();
            loop {
                let x = start + step * i;
                if x >= end - half || x <= previous {
                    break;
                }
                gaps.push(x);
                previous = x;
                i += T::one();
            }
        }

        gaps
    }
}
impl<T: Value> CoordExt<T> for Vec<(T, T)> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for &[(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for [(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepped_values() {
        let values: Vec<_> = SteppedValues::new(0.0..=1.0, 0.25).collect();
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let values: Vec<_> = SteppedValues::new_unit(3.0..=5.0).collect();
        assert_eq!(values, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_stepped_values_bad_step() {
        assert_eq!(SteppedValues::new(0.0..=1.0, 0.0).count(), 0);
        assert_eq!(SteppedValues::new(0.0..=1.0, -1.0).count(), 0);
    }

    #[test]
    fn test_x_range() {
        let data = vec![(3.0, 0.0), (-1.0, 0.0), (2.0, 0.0)];
        assert_eq!(data.x_range(), Some(-1.0..=3.0));

        let empty: Vec<(f64, f64)> = vec![];
        assert_eq!(empty.x_range(), None);
    }

    #[test]
    fn test_x_gaps() {
        let data = vec![
            (2004.0, 0.0),
            (2007.0, 0.0),
            (2003.0, 0.0),
            (2014.0, 0.0),
            (2017.0, 0.0),
        ];
        let gaps = data.x_gaps(1.0);
        assert_eq!(
            gaps,
            vec![2005.0, 2006.0, 2008.0, 2009.0, 2010.0, 2011.0, 2012.0, 2013.0, 2015.0, 2016.0]
        );
    }

    #[test]
    fn test_x_gaps_contiguous() {
        let data: Vec<(f64, f64)> = SteppedValues::new(0.0..=1.0, 0.1).map(|x| (x, x)).collect();
        assert!(data.x_gaps(0.1).is_empty());
        assert!(data.x_gaps(0.0).is_empty());
    }

    #[test]
    fn test_x_gaps_skips_non_finite() {
        let data = vec![(0.0, 1.0), (1.0, 2.0), (f64::INFINITY, 3.0), (3.0, 4.0)];
        assert_eq!(data.x_gaps(1.0), vec![2.0]);

        let data = vec![(0.0, 1.0), (f64::NAN, 2.0), (3.0, 3.0), (f64::NEG_INFINITY, 0.0)];
        assert_eq!(data.x_gaps(1.0), vec![1.0, 2.0]);

        let data = vec![(0.0, 1.0), (2.0, 2.0)];
        assert!(data.x_gaps(f64::NAN).is_empty());
        assert!(data.x_gaps(f64::INFINITY).is_empty());
    }

    #[test]
    fn test_x_gaps_step_below_resolution() {
        // 1e17 + 1 rounds back to 1e17, so the walk cannot advance
        let data = vec![(1e17, 0.0), (1e17 + 1e3, 0.0)];
        assert!(data.x_gaps(1.0).is_empty());
    }

    #[test]
    fn test_try_cast() {
        assert_eq!(f64::try_cast(3usize).unwrap(), 3.0);
        assert_eq!(f32::from_positive_int(7), 7.0);
        assert_eq!(exponent(4), 4);
        assert_eq!(exponent(usize::MAX), i32::MAX);
    }
}

//! Descriptive statistics over numeric slices.
//!
//! All aggregate statistics use the population formulation (normalize by N),
//! matching standard SQL aggregate-correlation semantics.

pub mod descriptive;

use crate::error::Result;

/// Compute the arithmetic mean.
///
/// # Example
/// ```rust
/// use covidrs::stats;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(stats::mean(&data).unwrap(), 2.5);
/// ```
pub fn mean<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::mean_impl(data.as_ref())
}

/// Compute the population standard deviation.
pub fn std_dev<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::std_dev_impl(data.as_ref())
}

/// Compute the population covariance of two equally long slices.
pub fn covariance<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<f64> {
    descriptive::covariance_impl(x.as_ref(), y.as_ref())
}

/// Compute the Pearson product-moment correlation coefficient.
///
/// The coefficient lies in [-1, 1]: 1 is a perfect positive linear
/// relationship, -1 a perfect negative one. Fewer than two data points or
/// zero variance in either variable leaves the coefficient undefined and
/// returns `Error::InsufficientData`, which callers can tell apart from a
/// valid coefficient of 0.
///
/// # Example
/// ```rust
/// use covidrs::stats;
///
/// let x = vec![1.0, 2.0, 3.0];
/// let y = vec![2.0, 4.0, 6.0];
/// let r = stats::correlation(&x, &y).unwrap();
/// assert!((r - 1.0).abs() < 1e-9);
/// ```
pub fn correlation<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<f64> {
    descriptive::correlation_impl(x.as_ref(), y.as_ref())
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `part` in `whole`, rounded to two decimals.
///
/// Returns `None` when the denominator is zero, so a division that is
/// undefined propagates as an absent value rather than an error.
pub fn percent_of(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        return None;
    }
    Some(round2(part * 100.0 / whole))
}

// Descriptive statistics implementations

use crate::error::{Error, Result};

/// Arithmetic mean of a slice.
pub(crate) fn mean_impl(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "mean requires at least one data point".to_string(),
        ));
    }

    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population variance (normalized by N).
pub(crate) fn variance_impl(data: &[f64]) -> Result<f64> {
    let mean = mean_impl(data)?;
    let sum_squared_diff = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();
    Ok(sum_squared_diff / data.len() as f64)
}

/// Population standard deviation.
pub(crate) fn std_dev_impl(data: &[f64]) -> Result<f64> {
    Ok(variance_impl(data)?.sqrt())
}

/// Population covariance of two equally long slices.
pub(crate) fn covariance_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch(format!(
            "covariance inputs differ in length: x={}, y={}",
            x.len(),
            y.len()
        )));
    }

    if x.len() < 2 {
        return Err(Error::InsufficientData(
            "covariance requires at least two data points".to_string(),
        ));
    }

    let n = x.len();
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let cov = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>()
        / n as f64;

    Ok(cov)
}

/// Pearson correlation coefficient of two equally long slices.
pub(crate) fn correlation_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch(format!(
            "correlation inputs differ in length: x={}, y={}",
            x.len(),
            y.len()
        )));
    }

    if x.len() < 2 {
        return Err(Error::InsufficientData(
            "correlation requires at least two data points".to_string(),
        ));
    }

    let cov = covariance_impl(x, y)?;
    let var_x = variance_impl(x)?;
    let var_y = variance_impl(y)?;

    // A constant variable has no defined correlation with anything.
    if var_x == 0.0 || var_y == 0.0 {
        return Err(Error::InsufficientData(
            "correlation is undefined when a variable has zero variance".to_string(),
        ));
    }

    Ok(cov / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_error() {
        assert!(matches!(mean_impl(&[]), Err(Error::EmptyData(_))));
    }

    #[test]
    fn test_population_variance() {
        // mean 3, squared diffs 4+1+0+1+4 = 10, / 5 = 2
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((variance_impl(&data).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_covariance_population_normalization() {
        // cov = sum((x-3)(y-6)) / 3 = (2*2 + 0 + 2*2) / 3
        let x = [1.0, 3.0, 5.0];
        let y = [4.0, 6.0, 8.0];
        assert!((covariance_impl(&x, &y).unwrap() - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 20.0, 30.0, 40.0];
        assert!((correlation_impl(&x, &y).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_zero_variance() {
        let x = [1.0, 2.0, 3.0];
        let y = [5.0, 5.0, 5.0];
        assert!(matches!(
            correlation_impl(&x, &y),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_correlation_length_mismatch() {
        let x = [1.0, 2.0];
        let y = [1.0];
        assert!(matches!(
            correlation_impl(&x, &y),
            Err(Error::DimensionMismatch(_))
        ));
    }
}

//! Moment statistics over finite samples.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population standard deviation (N denominator), as used for anomaly baselines.
/// Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    (data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64).sqrt()
}

/// Finite entries of `data`, in order.
pub fn finite(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| x.is_finite()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DATA: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&DATA), 5.0, epsilon = 1e-12);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_sd() {
        assert_relative_eq!(population_sd(&DATA), 2.0, epsilon = 1e-12);
        assert_eq!(population_sd(&[]), 0.0);
    }

    #[test]
    fn test_finite_drops_nan_and_infinity() {
        assert_eq!(finite(&[1.0, f64::NAN, 3.0, f64::INFINITY]), vec![1.0, 3.0]);
    }
}

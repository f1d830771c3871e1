//! Sample reduction and the timing harness
//!
//! [`Stats`] reduces raw per-trial samples to a mean and a 95% confidence
//! half-width. The harness in [`timing`] produces those samples.

pub mod timing;

pub use timing::{measure, Clock, Harness, MonotonicClock};

/// z-score for a two-sided 95% interval under the normal approximation
pub const Z_95: f64 = 1.96;

/// Mean and 95% confidence half-width of a set of timing samples
///
/// Values are in microseconds when produced by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    /// Arithmetic mean of the samples
    pub mean: f64,
    /// Half-width of the 95% confidence interval around `mean`
    pub ci95: f64,
}

impl Stats {
    /// Reduce `samples` to mean and confidence half-width
    ///
    /// The variance is the population variance (divided by `n`), and the
    /// interval uses the normal approximation `1.96 * sqrt(var / n)`. Both
    /// are adequate at the trial counts a run uses (around 100). An empty
    /// sample set reduces to zero.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples
            .iter()
            .map(|&s| {
                let diff = s - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let standard_error = (variance / n).sqrt();

        Self {
            mean,
            ci95: Z_95 * standard_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_empty_samples() {
        assert_eq!(Stats::from_samples(&[]), Stats::default());
    }

    #[test]
    fn test_constant_samples() {
        let stats = Stats::from_samples(&[5.0; 10]);
        assert!(approx_eq(stats.mean, 5.0));
        assert!(approx_eq(stats.ci95, 0.0));
    }

    #[test]
    fn test_population_variance() {
        // mean 2, population variance 1, standard error sqrt(1/4) = 0.5
        let stats = Stats::from_samples(&[1.0, 3.0, 1.0, 3.0]);
        assert!(approx_eq(stats.mean, 2.0));
        assert!(approx_eq(stats.ci95, 1.96 * 0.5));
    }

    #[test]
    fn test_single_sample() {
        let stats = Stats::from_samples(&[7.5]);
        assert!(approx_eq(stats.mean, 7.5));
        assert!(approx_eq(stats.ci95, 0.0));
    }
}

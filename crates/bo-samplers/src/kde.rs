//! One-dimensional Gaussian kernel density estimation for TPE.

use rand::rngs::StdRng;
use rand::Rng;

use crate::normal;

/// Gaussian KDE with Scott's-rule bandwidth.
pub(crate) struct KernelDensityEstimator {
    points: Vec<f64>,
    bandwidth: f64,
}

impl KernelDensityEstimator {
    /// Fit a KDE to `points`. Requires at least one point.
    pub(crate) fn new(points: Vec<f64>) -> Self {
        assert!(!points.is_empty(), "KDE requires at least one point");
        let n = points.len() as f64;
        let mean = points.iter().sum::<f64>() / n;
        let var = points.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
        // Scott's rule, floored so single-point groups keep a usable kernel.
        let bandwidth = (var.sqrt() * n.powf(-0.2)).max(1e-2);
        Self { points, bandwidth }
    }

    /// Mixture density at `x`.
    pub(crate) fn pdf(&self, x: f64) -> f64 {
        let n = self.points.len() as f64;
        self.points
            .iter()
            .map(|&p| normal::pdf((x - p) / self.bandwidth) / self.bandwidth)
            .sum::<f64>()
            / n
    }

    /// Draw one sample: a random kernel center plus Gaussian noise.
    pub(crate) fn sample(&self, rng: &mut StdRng) -> f64 {
        let center = self.points[rng.random_range(0..self.points.len())];
        center + self.bandwidth * normal::draw(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn pdf_is_higher_near_the_data() {
        let kde = KernelDensityEstimator::new(vec![0.0, 0.1, -0.1, 0.05]);
        assert!(kde.pdf(0.0) > kde.pdf(3.0));
    }

    #[test]
    fn samples_cluster_around_the_data() {
        let kde = KernelDensityEstimator::new(vec![5.0, 5.2, 4.8]);
        let mut rng = StdRng::seed_from_u64(1);
        let samples: Vec<f64> = (0..1000).map(|_| kde.sample(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 5.0).abs() < 0.2, "mean {mean}");
    }

    #[test]
    fn single_point_kde_is_usable() {
        let kde = KernelDensityEstimator::new(vec![1.0]);
        assert!(kde.pdf(1.0).is_finite());
        assert!(kde.pdf(1.0) > kde.pdf(2.0));
    }
}

//! Standard-normal helpers shared by the samplers.

use rand::rngs::StdRng;
use rand::Rng;

pub(crate) const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Standard normal PDF.
pub(crate) fn pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal CDF (Hart rational approximation).
pub(crate) fn cdf(x: f64) -> f64 {
    if x < -8.0 {
        return 0.0;
    }
    if x > 8.0 {
        return 1.0;
    }

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * abs_x);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly = 0.319_381_530 * t - 0.356_563_782 * t2 + 1.781_477_937 * t3 - 1.821_255_978 * t4
        + 1.330_274_429 * t5;
    let cdf = 1.0 - pdf(abs_x) * poly;

    if x >= 0.0 {
        cdf
    } else {
        1.0 - cdf
    }
}

/// One standard-normal draw (Box-Muller).
pub(crate) fn draw(rng: &mut StdRng) -> f64 {
    let u1 = rng.random::<f64>().max(1e-12);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    #[test]
    fn cdf_matches_known_points() {
        assert_relative_eq!(cdf(0.0), 0.5, max_relative = 1e-6);
        assert_relative_eq!(cdf(1.96), 0.975, max_relative = 1e-3);
        assert_relative_eq!(cdf(-1.96), 0.025, max_relative = 1e-1);
        assert_eq!(cdf(9.0), 1.0);
        assert_eq!(cdf(-9.0), 0.0);
    }

    #[test]
    fn pdf_peaks_at_zero() {
        assert!(pdf(0.0) > pdf(0.5));
        assert_relative_eq!(pdf(1.0), pdf(-1.0));
    }

    #[test]
    fn draws_have_sane_moments() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples: Vec<f64> = (0..20_000).map(|_| draw(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "var {var}");
    }
}

//! Gaussian-process surrogate and the acquisition strategies built on it.
//!
//! The surrogate is a Matérn 5/2 GP with ARD lengthscales fit by Cholesky
//! decomposition on inputs normalized to [0, 1] and standardized outputs.
//! Strategy variants differ only in how lengthscales are chosen
//! ([`LengthscalePrior`]) and which acquisition criterion ranks the
//! candidate set ([`Acquisition`]).
//!
//! Categorical dimensions participate numerically: candidates draw from
//! the declared choices and the GP sees the normalized choice value, so
//! every proposed value is always an exact member of the choice set.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bo_types::{BoResult, Direction, SamplerError, SearchSpace};

use crate::normal;
use crate::sampler::{CompletedTrial, Sampler};

const SQRT_5: f64 = 2.236_067_977_499_79;

/// Observations required before the surrogate takes over from uniform
/// sampling.
const DEFAULT_N_STARTUP: usize = 10;
/// Random candidate rows scored per suggestion.
const DEFAULT_N_CANDIDATES: usize = 512;
/// Observation noise added to the kernel diagonal.
const DEFAULT_NOISE_VAR: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Kernel
// ---------------------------------------------------------------------------

/// Matérn 5/2 kernel with ARD lengthscales.
///
/// `k(x1, x2) = σ² (1 + √5 r + 5/3 r²) exp(-√5 r)`
/// where `r = sqrt(Σ ((x1_i - x2_i) / l_i)²)`
fn matern52(x1: &[f64], x2: &[f64], lengthscales: &[f64], signal_var: f64) -> f64 {
    let mut r_sq = 0.0;
    for i in 0..x1.len() {
        let diff = (x1[i] - x2[i]) / lengthscales[i];
        r_sq += diff * diff;
    }
    let r = r_sq.sqrt();
    let sqrt5_r = SQRT_5 * r;
    signal_var * (1.0 + sqrt5_r + 5.0 / 3.0 * r_sq) * (-sqrt5_r).exp()
}

/// Build the kernel matrix `K + σ²I`.
fn kernel_matrix(
    x: &[Vec<f64>],
    lengthscales: &[f64],
    signal_var: f64,
    noise_var: f64,
) -> DMatrix<f64> {
    let n = x.len();
    DMatrix::from_fn(n, n, |i, j| {
        let k = matern52(&x[i], &x[j], lengthscales, signal_var);
        if i == j {
            k + noise_var
        } else {
            k
        }
    })
}

/// Compute the kernel vector k(x*, X) for a test point.
fn kernel_vector(
    x_star: &[f64],
    x_train: &[Vec<f64>],
    lengthscales: &[f64],
    signal_var: f64,
) -> DVector<f64> {
    DVector::from_fn(x_train.len(), |i, _| {
        matern52(x_star, &x_train[i], lengthscales, signal_var)
    })
}

// ---------------------------------------------------------------------------
// Lengthscale priors
// ---------------------------------------------------------------------------

/// How ARD lengthscales are chosen when fitting the surrogate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthscalePrior {
    /// Per-dimension input spread floored at the gamma-prior mode.
    Gamma,
    /// Spread scaled by √d, smoothing high-dimensional fits.
    DimScaled,
    /// Sparse axis-adaptive shrinkage: dimensions whose values barely
    /// correlate with the objective get stretched, near-flat lengthscales.
    Saas,
}

/// Mode of the Gamma(3, 6) lengthscale prior.
const GAMMA_PRIOR_MODE: f64 = 1.0 / 3.0;
/// Lengthscale ceiling for dimensions the SAAS prior deems irrelevant.
const SAAS_MAX_LENGTHSCALE: f64 = 20.0;

impl LengthscalePrior {
    fn lengthscales(&self, x_train: &[Vec<f64>], y_train: &[f64]) -> Vec<f64> {
        let n = x_train.len();
        let d = x_train[0].len();

        let spreads: Vec<f64> = (0..d)
            .map(|j| {
                let mean = x_train.iter().map(|x| x[j]).sum::<f64>() / n as f64;
                let var =
                    x_train.iter().map(|x| (x[j] - mean).powi(2)).sum::<f64>() / n as f64;
                var.sqrt().max(0.05)
            })
            .collect();

        match self {
            Self::Gamma => spreads.iter().map(|s| s.max(GAMMA_PRIOR_MODE)).collect(),
            Self::DimScaled => {
                let scale = (d as f64).sqrt();
                spreads
                    .iter()
                    .map(|s| (s * scale).clamp(GAMMA_PRIOR_MODE, scale.max(1.0)))
                    .collect()
            }
            Self::Saas => {
                let y_mean = y_train.iter().sum::<f64>() / n as f64;
                let y_var = y_train.iter().map(|y| (y - y_mean).powi(2)).sum::<f64>() / n as f64;
                (0..d)
                    .map(|j| {
                        let x_mean = x_train.iter().map(|x| x[j]).sum::<f64>() / n as f64;
                        let cov = x_train
                            .iter()
                            .zip(y_train)
                            .map(|(x, y)| (x[j] - x_mean) * (y - y_mean))
                            .sum::<f64>()
                            / n as f64;
                        let x_var =
                            x_train.iter().map(|x| (x[j] - x_mean).powi(2)).sum::<f64>() / n as f64;
                        let denom = (x_var * y_var).sqrt();
                        let relevance = if denom > 1e-12 {
                            (cov / denom).abs().max(0.05)
                        } else {
                            0.05
                        };
                        (spreads[j].max(GAMMA_PRIOR_MODE) / relevance).min(SAAS_MAX_LENGTHSCALE)
                    })
                    .collect()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fitting and prediction
// ---------------------------------------------------------------------------

/// A fitted surrogate ready for predictions.
struct GpModel {
    cholesky: nalgebra::linalg::Cholesky<f64, nalgebra::Dyn>,
    alpha: DVector<f64>,
    x_train: Vec<Vec<f64>>,
    lengthscales: Vec<f64>,
    signal_var: f64,
    /// Best observed standardized objective.
    f_best: f64,
}

/// Fit the surrogate to normalized inputs and raw (minimization-space)
/// outputs.
fn fit_gp(
    x_train: &[Vec<f64>],
    y_train: &[f64],
    noise_var: f64,
    prior: LengthscalePrior,
) -> Result<GpModel, SamplerError> {
    let n = y_train.len();

    // Standardize y
    let y_mean = y_train.iter().sum::<f64>() / n as f64;
    let y_var = if n > 1 {
        y_train.iter().map(|&y| (y - y_mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        1.0
    };
    let y_std = y_var.sqrt().max(1e-10);
    let y_standardized: Vec<f64> = y_train.iter().map(|&y| (y - y_mean) / y_std).collect();

    let f_best = y_standardized.iter().copied().fold(f64::INFINITY, f64::min);

    let lengthscales = prior.lengthscales(x_train, y_train);

    // Signal variance = 1.0 (data is standardized)
    let signal_var = 1.0;

    let k = kernel_matrix(x_train, &lengthscales, signal_var, noise_var);
    let cholesky =
        nalgebra::linalg::Cholesky::new(k).ok_or_else(|| SamplerError::SurrogateFit {
            message: format!("Cholesky decomposition failed for {n} observations"),
        })?;

    let y_vec = DVector::from_column_slice(&y_standardized);
    let alpha = cholesky.solve(&y_vec);

    Ok(GpModel {
        cholesky,
        alpha,
        x_train: x_train.to_vec(),
        lengthscales,
        signal_var,
        f_best,
    })
}

/// Posterior mean and standard deviation at a test point.
fn predict(model: &GpModel, x: &[f64]) -> (f64, f64) {
    let k_star = kernel_vector(x, &model.x_train, &model.lengthscales, model.signal_var);

    let mean = k_star.dot(&model.alpha);

    let v = model.cholesky.solve(&k_star);
    let var = (model.signal_var - k_star.dot(&v)).max(0.0);

    (mean, var.sqrt())
}

// ---------------------------------------------------------------------------
// Acquisition criteria
// ---------------------------------------------------------------------------

/// The rule that ranks candidate points under the fitted surrogate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Acquisition {
    /// Expected improvement over the incumbent.
    Ei,
    /// Log of expected improvement, stable when improvements underflow.
    LogEi,
    /// Lower confidence bound μ − κσ.
    Lcb { kappa: f64 },
    /// One posterior draw per candidate; the best draw wins.
    Thompson,
    /// ε-greedy blend: maximum-variance exploration with probability ε,
    /// expected improvement otherwise.
    Hybrid { epsilon: f64 },
}

/// `EI(x) = (f_best - μ) Φ(z) + σ φ(z)` with `z = (f_best - μ) / σ`.
fn expected_improvement(mean: f64, std: f64, f_best: f64) -> f64 {
    if std < 1e-12 {
        return (f_best - mean).max(0.0);
    }
    let z = (f_best - mean) / std;
    let improvement = (f_best - mean) * normal::cdf(z) + std * normal::pdf(z);
    improvement.max(0.0)
}

/// Log-EI with the asymptotic tail `EI ≈ σ φ(z) / z²` for far-from-best
/// candidates, where plain EI underflows to an uninformative zero.
fn log_expected_improvement(mean: f64, std: f64, f_best: f64) -> f64 {
    if std < 1e-12 {
        return ((f_best - mean).max(0.0) + f64::MIN_POSITIVE).ln();
    }
    let z = (f_best - mean) / std;
    if z > -6.0 {
        (expected_improvement(mean, std, f_best) + f64::MIN_POSITIVE).ln()
    } else {
        std.ln() - 0.5 * z * z - normal::LN_SQRT_2PI - 2.0 * z.abs().ln()
    }
}

/// Acquisition resolved for one suggestion (the hybrid picks its mode per
/// call).
#[derive(Clone, Copy)]
enum ResolvedAcquisition {
    Ei,
    LogEi,
    Lcb(f64),
    Thompson,
    MaxVariance,
}

fn score(
    acquisition: ResolvedAcquisition,
    mean: f64,
    std: f64,
    f_best: f64,
    rng: &mut StdRng,
) -> f64 {
    match acquisition {
        ResolvedAcquisition::Ei => expected_improvement(mean, std, f_best),
        ResolvedAcquisition::LogEi => log_expected_improvement(mean, std, f_best),
        // Internally everything minimizes, so the best LCB is the lowest
        // μ − κσ; negate to keep "higher score wins".
        ResolvedAcquisition::Lcb(kappa) => -(mean - kappa * std),
        ResolvedAcquisition::Thompson => -(mean + std * normal::draw(rng)),
        ResolvedAcquisition::MaxVariance => std,
    }
}

// ---------------------------------------------------------------------------
// The sampler
// ---------------------------------------------------------------------------

/// A Gaussian-process acquisition strategy.
///
/// One type covers the whole GP family; construction picks the
/// lengthscale prior and acquisition criterion.
pub struct GpSampler {
    name: &'static str,
    prior: LengthscalePrior,
    acquisition: Acquisition,
    n_startup_trials: usize,
    n_candidates: usize,
    noise_variance: f64,
    rng: StdRng,
}

impl GpSampler {
    pub fn new(
        name: &'static str,
        prior: LengthscalePrior,
        acquisition: Acquisition,
        seed: u64,
    ) -> Self {
        Self {
            name,
            prior,
            acquisition,
            n_startup_trials: DEFAULT_N_STARTUP,
            n_candidates: DEFAULT_N_CANDIDATES,
            noise_variance: DEFAULT_NOISE_VAR,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_startup_trials(mut self, n: usize) -> Self {
        self.n_startup_trials = n;
        self
    }

    pub fn with_candidates(mut self, n: usize) -> Self {
        self.n_candidates = n;
        self
    }

    pub fn with_noise_variance(mut self, v: f64) -> Self {
        self.noise_variance = v;
        self
    }

    fn resolve(&mut self) -> ResolvedAcquisition {
        match self.acquisition {
            Acquisition::Ei => ResolvedAcquisition::Ei,
            Acquisition::LogEi => ResolvedAcquisition::LogEi,
            Acquisition::Lcb { kappa } => ResolvedAcquisition::Lcb(kappa),
            Acquisition::Thompson => ResolvedAcquisition::Thompson,
            Acquisition::Hybrid { epsilon } => {
                if self.rng.random::<f64>() < epsilon {
                    ResolvedAcquisition::MaxVariance
                } else {
                    ResolvedAcquisition::Ei
                }
            }
        }
    }

    /// Draw one raw candidate row; categoricals pick an exact choice.
    fn candidate_row(&mut self, space: &SearchSpace) -> Vec<f64> {
        space.sample_row(&mut self.rng)
    }
}

/// Normalize one raw value into [0, 1] using the dimension bounds.
fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if (hi - lo).abs() < 1e-15 {
        0.5
    } else {
        (value - lo) / (hi - lo)
    }
}

fn normalized_row(space: &SearchSpace, raw: &[f64]) -> Vec<f64> {
    space
        .parameters
        .iter()
        .zip(raw)
        .map(|(param, &value)| {
            let (lo, hi) = param.kind.bounds();
            normalize(value, lo, hi)
        })
        .collect()
}

impl Sampler for GpSampler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn suggest(
        &mut self,
        space: &SearchSpace,
        direction: Direction,
        history: &[CompletedTrial],
    ) -> BoResult<Vec<f64>> {
        if history.is_empty() {
            return Err(SamplerError::EmptyHistory.into());
        }
        if history.len() < self.n_startup_trials {
            return Ok(space.sample_row(&mut self.rng));
        }

        let mut x_train = Vec::with_capacity(history.len());
        let mut y_train = Vec::with_capacity(history.len());
        for trial in history {
            let raw = trial.positional(space)?;
            x_train.push(normalized_row(space, &raw));
            y_train.push(direction.as_minimization(trial.value));
        }

        let model = fit_gp(&x_train, &y_train, self.noise_variance, self.prior)?;
        let resolved = self.resolve();

        let mut best_row: Option<Vec<f64>> = None;
        let mut best_score = f64::NEG_INFINITY;
        for _ in 0..self.n_candidates {
            let raw = self.candidate_row(space);
            let norm = normalized_row(space, &raw);
            let (mean, std) = predict(&model, &norm);
            let s = score(resolved, mean, std, model.f_best, &mut self.rng);
            if s > best_score || best_row.is_none() {
                best_score = s;
                best_row = Some(raw);
            }
        }

        // n_candidates >= 1, so a row is always present.
        best_row.ok_or_else(|| {
            SamplerError::SurrogateFit {
                message: "no candidate rows were scored".to_string(),
            }
            .into()
        })
    }
}

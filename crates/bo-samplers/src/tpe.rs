//! Tree-Parzen Estimator sampler.
//!
//! TPE splits the observation history into "good" and "bad" groups at the
//! gamma quantile of the objective, fits a kernel density estimator to
//! each group per dimension, and proposes the candidate that maximizes
//! the density ratio l(x)/g(x).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bo_types::{BoResult, Direction, ParamKind, SamplerError, SearchSpace};

use crate::kde::KernelDensityEstimator;
use crate::sampler::{CompletedTrial, Sampler};

/// A Tree-Parzen Estimator sampler.
///
/// During the startup phase (fewer than `n_startup_trials` observations)
/// the sampler falls back to uniform random sampling.
pub struct TpeSampler {
    /// Fraction of the history considered "good".
    gamma: f64,
    /// Observations required before TPE kicks in.
    n_startup_trials: usize,
    /// Candidates drawn from l(x) per dimension.
    n_ei_candidates: usize,
    rng: StdRng,
}

impl TpeSampler {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            gamma: 0.25,
            n_startup_trials: 5,
            n_ei_candidates: 24,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        assert!(
            gamma > 0.0 && gamma < 1.0,
            "gamma must be in (0.0, 1.0), got {gamma}"
        );
        self.gamma = gamma;
        self
    }

    pub fn with_startup_trials(mut self, n: usize) -> Self {
        self.n_startup_trials = n;
        self
    }

    pub fn with_ei_candidates(mut self, n: usize) -> Self {
        self.n_ei_candidates = n;
        self
    }

    /// Split history indices into (good, bad) by the gamma quantile of the
    /// direction-adjusted objective. Both groups are non-empty for any
    /// history of two or more observations.
    fn split(&self, values: &[f64]) -> (Vec<usize>, Vec<usize>) {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let n_good = ((values.len() as f64 * self.gamma).ceil() as usize)
            .max(1)
            .min(values.len() - 1);

        let good = order[..n_good].to_vec();
        let bad = order[n_good..].to_vec();
        (good, bad)
    }

    fn sample_float(
        &mut self,
        low: f64,
        high: f64,
        good_values: Vec<f64>,
        bad_values: Vec<f64>,
    ) -> f64 {
        let l_kde = KernelDensityEstimator::new(good_values);
        let g_kde = KernelDensityEstimator::new(bad_values);

        let mut best_candidate = low;
        let mut best_ratio = f64::NEG_INFINITY;

        for _ in 0..self.n_ei_candidates {
            let candidate = l_kde.sample(&mut self.rng).clamp(low, high);

            let l_density = l_kde.pdf(candidate);
            let g_density = g_kde.pdf(candidate);

            let ratio = if g_density < f64::EPSILON {
                if l_density > f64::EPSILON {
                    f64::INFINITY
                } else {
                    0.0
                }
            } else {
                l_density / g_density
            };

            if ratio > best_ratio {
                best_ratio = ratio;
                best_candidate = candidate;
            }
        }

        best_candidate
    }

    /// Categorical choice by Laplace-smoothed good/bad count ratio.
    fn sample_categorical(&mut self, choices: &[f64], good: &[f64], bad: &[f64]) -> f64 {
        let n_choices = choices.len();
        let mut good_counts = vec![0usize; n_choices];
        let mut bad_counts = vec![0usize; n_choices];

        for value in good {
            if let Some(idx) = choices.iter().position(|c| c == value) {
                good_counts[idx] += 1;
            }
        }
        for value in bad {
            if let Some(idx) = choices.iter().position(|c| c == value) {
                bad_counts[idx] += 1;
            }
        }

        let good_total = good.len() as f64 + n_choices as f64;
        let bad_total = bad.len() as f64 + n_choices as f64;

        let weights: Vec<f64> = (0..n_choices)
            .map(|i| {
                let l_prob = (good_counts[i] as f64 + 1.0) / good_total;
                let g_prob = (bad_counts[i] as f64 + 1.0) / bad_total;
                l_prob / g_prob
            })
            .collect();

        let total_weight: f64 = weights.iter().sum();
        let threshold = self.rng.random::<f64>() * total_weight;

        let mut cumulative = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            cumulative += w;
            if cumulative >= threshold {
                return choices[i];
            }
        }
        choices[n_choices - 1]
    }
}

impl Sampler for TpeSampler {
    fn name(&self) -> &'static str {
        "TPE"
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
        if history.len() < self.n_startup_trials.max(2) {
            return Ok(space.sample_row(&mut self.rng));
        }

        let values: Vec<f64> = history
            .iter()
            .map(|t| direction.as_minimization(t.value))
            .collect();
        let (good, bad) = self.split(&values);

        let mut candidate = Vec::with_capacity(space.dim());
        for param in &space.parameters {
            let extract = |indices: &[usize]| -> Result<Vec<f64>, bo_types::SpaceError> {
                indices
                    .iter()
                    .map(|&i| {
                        history[i].params.get(&param.name).copied().ok_or_else(|| {
                            bo_types::SpaceError::UnknownFeature {
                                name: param.name.clone(),
                            }
                        })
                    })
                    .collect()
            };
            let good_values = extract(&good)?;
            let bad_values = extract(&bad)?;

            let value = match &param.kind {
                ParamKind::Float { low, high } => {
                    self.sample_float(*low, *high, good_values, bad_values)
                }
                ParamKind::Categorical { choices } => {
                    self.sample_categorical(choices, &good_values, &bad_values)
                }
            };
            candidate.push(value);
        }

        Ok(candidate)
    }
}

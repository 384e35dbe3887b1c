//! # bo-samplers
//!
//! Acquisition strategies for the benchmark: a Tree-Parzen Estimator and
//! a family of Gaussian-process strategies (expected-improvement
//! variants, lower confidence bound, Thompson sampling, a sparse
//! axis-adaptive variant, and an experimental hybrid).
//!
//! Every strategy implements the one [`Sampler`] contract: given the
//! accumulated observation history and a search-space description,
//! propose the next input to evaluate.

mod gp;
mod kde;
mod normal;
mod registry;
mod sampler;
mod tpe;

pub use gp::{Acquisition, GpSampler, LengthscalePrior};
pub use registry::StrategyId;
pub use sampler::{CompletedTrial, Sampler};
pub use tpe::TpeSampler;

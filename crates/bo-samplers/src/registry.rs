//! Strategy identifiers and the sampler factory.
//!
//! Adding a strategy means adding one enum variant and one table entry in
//! [`StrategyId::sampler`]; everything else (CSV columns, plots, runner
//! loops) keys off the identifier list.

use std::fmt;

use serde::{Deserialize, Serialize};

use bo_types::{BoResult, SamplerError};

use crate::gp::{Acquisition, GpSampler, LengthscalePrior};
use crate::sampler::Sampler;
use crate::tpe::TpeSampler;

/// The fixed enumeration of acquisition-strategy identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyId {
    Tpe,
    EiGammaPrior,
    EiDimScaledPrior,
    EiSaas,
    LogEiGammaPrior,
    LogEiDimScaledPrior,
    Lcb,
    ThompsonSampling,
    Experimental,
}

impl StrategyId {
    pub const ALL: [Self; 9] = [
        Self::Tpe,
        Self::EiGammaPrior,
        Self::EiDimScaledPrior,
        Self::EiSaas,
        Self::LogEiGammaPrior,
        Self::LogEiDimScaledPrior,
        Self::Lcb,
        Self::ThompsonSampling,
        Self::Experimental,
    ];

    /// The label used for CSV columns and plot legends.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tpe => "TPE",
            Self::EiGammaPrior => "EI GammaPrior",
            Self::EiDimScaledPrior => "EI DimScaledPrior",
            Self::EiSaas => "EI Saas",
            Self::LogEiGammaPrior => "LogEI GammaPrior",
            Self::LogEiDimScaledPrior => "LogEI DimScaledPrior",
            Self::Lcb => "LCB",
            Self::ThompsonSampling => "thompson sampling",
            Self::Experimental => "experimental",
        }
    }

    /// Resolve a label back to its identifier.
    ///
    /// An unrecognized label is a configuration error naming the
    /// identifier, never a silent no-op.
    pub fn from_label(name: &str) -> BoResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.label() == name)
            .ok_or_else(|| {
                SamplerError::UnknownStrategy {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Construct the sampler this identifier names.
    pub fn sampler(&self, seed: u64) -> Box<dyn Sampler> {
        match self {
            Self::Tpe => Box::new(TpeSampler::with_seed(seed)),
            Self::EiGammaPrior => Box::new(GpSampler::new(
                self.label(),
                LengthscalePrior::Gamma,
                Acquisition::Ei,
                seed,
            )),
            Self::EiDimScaledPrior => Box::new(GpSampler::new(
                self.label(),
                LengthscalePrior::DimScaled,
                Acquisition::Ei,
                seed,
            )),
            Self::EiSaas => Box::new(GpSampler::new(
                self.label(),
                LengthscalePrior::Saas,
                Acquisition::Ei,
                seed,
            )),
            Self::LogEiGammaPrior => Box::new(GpSampler::new(
                self.label(),
                LengthscalePrior::Gamma,
                Acquisition::LogEi,
                seed,
            )),
            Self::LogEiDimScaledPrior => Box::new(GpSampler::new(
                self.label(),
                LengthscalePrior::DimScaled,
                Acquisition::LogEi,
                seed,
            )),
            Self::Lcb => Box::new(GpSampler::new(
                self.label(),
                LengthscalePrior::Gamma,
                Acquisition::Lcb { kappa: 2.0 },
                seed,
            )),
            Self::ThompsonSampling => Box::new(GpSampler::new(
                self.label(),
                LengthscalePrior::Gamma,
                Acquisition::Thompson,
                seed,
            )),
            Self::Experimental => Box::new(GpSampler::new(
                self.label(),
                LengthscalePrior::Gamma,
                Acquisition::Hybrid { epsilon: 0.15 },
                seed,
            )),
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

use thiserror::Error;

/// Main error type for the benchmark workspace
#[derive(Error, Debug)]
pub enum BoError {
    #[error("Search space error: {0}")]
    Space(#[from] SpaceError),

    #[error("Sampler error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Search-space errors
#[derive(Error, Debug)]
pub enum SpaceError {
    #[error("Invalid bounds for '{name}': low {low} must be below high {high}")]
    InvalidBounds { name: String, low: f64, high: f64 },

    #[error("Categorical feature '{name}' declares no choices")]
    EmptyChoices { name: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Unknown feature: {name}")]
    UnknownFeature { name: String },
}

/// Sampler and optimizer-session errors
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("Unrecognized strategy identifier: '{name}'")]
    UnknownStrategy { name: String },

    #[error("Non-finite objective value {value} at observation {index}")]
    NonFiniteObservation { index: usize, value: f64 },

    #[error("Candidate value {value} for feature '{feature}' violates its distribution")]
    CandidateOutOfBounds { feature: String, value: f64 },

    #[error("Surrogate fit failed: {message}")]
    SurrogateFit { message: String },

    #[error("Cannot suggest a candidate from an empty observation history")]
    EmptyHistory,
}

/// Result type alias for benchmark operations
pub type BoResult<T> = Result<T, BoError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::BoError::Config(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SamplerError::CandidateOutOfBounds {
            feature: "x0".to_string(),
            value: 7.5,
        };

        assert!(error.to_string().contains("x0"));
        assert!(error.to_string().contains("7.5"));
    }

    #[test]
    fn test_error_conversion() {
        let space_error = SpaceError::DimensionMismatch {
            expected: 6,
            actual: 2,
        };
        let bo_error: BoError = space_error.into();

        match bo_error {
            BoError::Space(_) => (),
            _ => panic!("Expected Space error"),
        }
    }

    #[test]
    fn test_unknown_strategy_names_identifier() {
        let error = SamplerError::UnknownStrategy {
            name: "EI Typo".to_string(),
        };
        assert!(error.to_string().contains("EI Typo"));
    }

    #[test]
    fn test_config_macro() {
        let err = config_error!("missing field: {}", "strategies");
        assert!(err.to_string().contains("strategies"));
    }
}

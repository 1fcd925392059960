//! Typed failure taxonomy for question generation.
//!
//! Every failure is detected where it occurs and propagated immediately;
//! nothing in the core retries or swallows an error. The gateway maps
//! these variants onto HTTP status codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The drawn template's type has no entry in the catalog.
    #[error("unknown template type: {0}")]
    UnknownTemplateType(String),

    /// The external fact source could not be reached or answered with a
    /// non-success status.
    #[error("fact source unavailable: {0}")]
    SourceUnavailable(String),

    /// The stored-question collaborator could not supply a template.
    #[error("template store unavailable: {0}")]
    StoreUnavailable(String),

    /// Every sampled subject was an unresolved entity identifier.
    #[error("no resolvable subject label after {attempts} draws")]
    LabelResolutionFailure { attempts: usize },

    /// The result set does not hold 4 distinct answer values.
    #[error("result set has too few distinct answers ({distinct} found, 4 needed)")]
    InsufficientDistinctAnswers { distinct: usize },
}

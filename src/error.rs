use thiserror::Error;

/// Errors surfaced by construction-time operations.
///
/// Query-time problems (empty results, out-of-range input) never reach this
/// type; they degrade to empty `Vec<Suggestion>` per the lookup contract.
#[derive(Debug, Error)]
pub enum SpellError {
    #[error("unknown distance function: {0} (expected \"dameraulevenshtein\" or \"typo\")")]
    UnknownDistance(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dictionary file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpellError>;

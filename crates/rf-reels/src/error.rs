//! Error types for reel orchestration

use thiserror::Error;

/// Failure reported by a single reel collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReelError {
    #[error("Reel is not spinning")]
    NotSpinning,

    #[error("Reel animation failed: {0}")]
    Animation(String),

    #[error("Symbol query failed: {0}")]
    SymbolQuery(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid timing: {0}")]
    InvalidTiming(String),

    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the reel manager
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Expected {expected} reels, got {actual}")]
    ReelCountMismatch { expected: usize, actual: usize },

    #[error("Reel {reel_index} failed: {source}")]
    Reel {
        reel_index: usize,
        #[source]
        source: ReelError,
    },
}

impl ManagerError {
    /// Index of the failing reel, if this is a collaborator failure
    pub fn reel_index(&self) -> Option<usize> {
        match self {
            Self::Reel { reel_index, .. } => Some(*reel_index),
            _ => None,
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

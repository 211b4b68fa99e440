use std::path::PathBuf;

/// Rejected input for a student field or grade.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("score must be a number between 0 and 100 (got {0})")]
    ScoreOutOfRange(f64),

    #[error("score must be a number between 0 and 100 (got {0:?})")]
    ScoreNotNumeric(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RosterError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Snapshot {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

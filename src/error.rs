use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum MovieError {
    #[error("snapshot {index} not found at {}", path.display())]
    MissingSnapshot { index: usize, path: PathBuf },

    #[error("tail length must be at least 2, got {0}")]
    InvalidTailLength(usize),

    #[error("snapshot {index} has {found} bodies, expected {expected}")]
    BodyCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("malformed snapshot {}: {reason}", path.display())]
    MalformedSnapshot { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("frame rendering failed: {0}")]
    Render(String),

    #[error("video encoder `{program}` could not be started: {source}")]
    EncoderUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("video encoder exited with {status}")]
    EncoderFailed { status: ExitStatus },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type MovieResult<T> = Result<T, MovieError>;

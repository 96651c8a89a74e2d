use thiserror::Error;

/// Unified error type for minver-runner operations
#[derive(Error, Debug)]
pub enum MinVerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("{tool}: Process returned an error (exit code {exit_code}).")]
    ToolFailed { tool: String, exit_code: i32 },

    #[error(
        "{preferred}: Process returned an error (exit code {preferred_exit_code}); \
         fallback {fallback} also failed (exit code {fallback_exit_code})."
    )]
    FallbackExhausted {
        preferred: String,
        preferred_exit_code: i32,
        fallback: String,
        fallback_exit_code: i32,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in minver-runner
pub type Result<T> = std::result::Result<T, MinVerError>;

impl MinVerError {
    /// Create an invalid argument error with context
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        MinVerError::InvalidArgument(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        MinVerError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MinVerError::Config(msg.into())
    }

    /// The exit code reported by the preferred tool, if this error came from a tool run
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            MinVerError::ToolFailed { exit_code, .. } => Some(*exit_code),
            MinVerError::FallbackExhausted {
                preferred_exit_code,
                ..
            } => Some(*preferred_exit_code),
            _ => None,
        }
    }
}

/// Unified error type for the jqlive crate.
///
/// Everything here is fatal to the current session. Per-keystroke engine
/// failures use [`InvocationFailure`] instead and never surface as a `CoreError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The filter engine executable could not be resolved.
    #[error("filter engine not found: {0}")]
    ExecutableNotFound(String),

    /// The content handed to the session is not valid engine input.
    #[error("{0} is not valid input for the filter engine")]
    InvalidDocument(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The shared clipboard store rejected or could not take the result.
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Process exit status for this error. Precondition failures get their own codes.
    pub fn exit_code(&self) -> u8 {
        match self {
            CoreError::ExecutableNotFound(_) | CoreError::InvalidConfig(_) => 2,
            CoreError::InvalidDocument(_) => 3,
            _ => 1,
        }
    }
}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;

/// Why a single engine invocation produced no usable output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationFailure {
    #[error("filter is empty")]
    EmptyFilter,

    #[error("failed to spawn filter engine: {message}")]
    Spawn { message: String, missing: bool },

    #[error("filter engine I/O failed: {0}")]
    Io(String),

    #[error("filter engine exited with status {code:?}")]
    Exit { code: Option<i32>, stderr: String },
}

impl InvocationFailure {
    /// Whether the engine binary itself was missing at spawn time.
    pub fn is_missing_executable(&self) -> bool {
        matches!(self, InvocationFailure::Spawn { missing: true, .. })
    }
}

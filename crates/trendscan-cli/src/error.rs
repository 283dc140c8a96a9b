use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("http client setup failed: {0}")]
    Transport(#[from] trendscan_core::HttpError),

    #[error(transparent)]
    Report(#[from] trendscan_core::CoreError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Transport(_) => 2,
            Self::Report(trendscan_core::CoreError::Io(_)) => 10,
            Self::Report(_) => 4,
        }
    }
}

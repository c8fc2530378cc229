use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GearError {
    #[error("Analysis failure: {0}")]
    AnalysisFailure(String),

    #[error("An upload session is already in progress ({0})")]
    SessionBusy(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for GearError {
    fn from(err: std::io::Error) -> Self {
        GearError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for GearError {
    fn from(err: anyhow::Error) -> Self {
        GearError::Unknown(err.to_string())
    }
}

pub type GearResult<T> = Result<T, GearError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Dataset error: no record carries a parseable date ({0} records loaded)")]
    NoDatedRecords(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::Parse(err.to_string())
    }
}

impl From<config::ConfigError> for DashError {
    fn from(err: config::ConfigError) -> Self {
        DashError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashError>;

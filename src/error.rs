use thiserror::Error;

#[derive(Error, Debug)]
pub enum XrError {
    #[error("Invalid Loopback interface: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid command line: {0:?}")]
    InvalidCommand(String),

    #[error("No pre-change snapshot for {0}; probe it before generating a rollback")]
    MissingSnapshot(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Device command failed: {0}")]
    Executor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User cancelled")]
    UserCancelled,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XrError>;

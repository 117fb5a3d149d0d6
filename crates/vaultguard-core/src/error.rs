use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Credential/PIN validation errors
    #[error("Invalid credential format: {0}")]
    InvalidCredentialFormat(String),

    #[error("Invalid PIN format: {0}")]
    InvalidPinFormat(String),

    // State machine errors
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types shared by every crate in the workspace.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Board format error: {0}")]
    BoardFormat(String),

    #[error("Unknown token: >>{0}<<")]
    UnknownToken(String),

    #[error("Malformed program: {0}")]
    MalformedProgram(String),

    #[error("Empty population: {0}")]
    EmptyPopulation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Worker error: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::UnknownToken("zz".to_string());
        assert_eq!(err.to_string(), "Unknown token: >>zz<<");

        let err = Error::BoardFormat("line 3 has 5 characters, expected 32".to_string());
        assert!(err.to_string().starts_with("Board format error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}

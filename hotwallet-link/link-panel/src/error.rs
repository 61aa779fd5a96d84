use thiserror::Error;

use crate::http::Rejection;

/// Everything that can end up in the panel's warning slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("HTTP error [{status:?}]: {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },
    #[error("{0}")]
    Action(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Transaction failed: {0}")]
    Transaction(#[from] TransactionError),
}

impl Error {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Operator details missing")]
    OperatorDetailsMissing,
    #[error("Private key is required")]
    EmptyPrivateKey,
}

/// Failure reported by the transaction writer, surfaced unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransactionError(pub String);

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Network {
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }
}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        Self::Network {
            status: Some(rejection.status_code),
            message: rejection.backend_error.unwrap_or(rejection.body),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::network(format!("Malformed response: {}", error))
    }
}

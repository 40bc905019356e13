/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description: error kinds shared by the shaping services and the HTTP boundary
**/

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback text when an error carries no message of its own.
pub const GENERIC_FETCH_FAILURE: &str = "Failed to fetch stock data";

#[derive(Error, Debug)]
pub enum StockError {
    #[error("{0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Incomplete data for {symbol}: missing field '{field}'")]
    DataIncomplete { field: String, symbol: String },

    #[error("{0}")]
    ProviderFetch(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl StockError {
    pub fn data_incomplete(field: impl Into<String>, symbol: impl Into<String>) -> Self {
        StockError::DataIncomplete {
            field: field.into(),
            symbol: symbol.into(),
        }
    }

    /// True for errors caused by the caller's request rather than upstream data.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StockError::MissingParameter(_) | StockError::InvalidParameter(_)
        )
    }
}

impl From<config::ConfigError> for StockError {
    fn from(e: config::ConfigError) -> Self {
        StockError::ConfigError(e.to_string())
    }
}

/// `{message}` envelope returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorMessage {
    pub message: String,
}

impl From<&StockError> for ErrorMessage {
    fn from(e: &StockError) -> Self {
        let message = e.to_string();
        ErrorMessage {
            message: if message.trim().is_empty() {
                GENERIC_FETCH_FAILURE.to_string()
            } else {
                message
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_incomplete_message_names_field_and_symbol() {
        let err = StockError::data_incomplete("regularMarketPrice", "AAPL");
        let msg = err.to_string();
        assert!(msg.contains("regularMarketPrice"));
        assert!(msg.contains("AAPL"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_missing_parameter_is_client_error() {
        let err = StockError::MissingParameter("Stock symbol is required".into());
        assert_eq!(err.to_string(), "Stock symbol is required");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_empty_provider_message_gets_generic_text() {
        let body = ErrorMessage::from(&StockError::ProviderFetch(String::new()));
        assert_eq!(body.message, GENERIC_FETCH_FAILURE);
    }
}

//! Error types for neo4j-http-rs.
//!
//! This module defines domain-specific error types organized by functional area.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Top-level error type encompassing all possible errors.
#[derive(Error, Debug)]
pub enum Neo4jError {
    /// Driver construction errors
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Network and HTTP errors
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Malformed response envelopes
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Errors reported by the server inside a well-formed envelope
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Calls made on a finished transaction
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Cell read errors
    #[error(transparent)]
    Cell(#[from] CellError),
}

/// Errors raised while building a driver from a connection string.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// The connection string is not a URL
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// The URL scheme has no protocol binding
    #[error("Unknown connection scheme, {0}")]
    UnsupportedScheme(String),

    /// Invalid connection parameter
    #[error("Invalid connection parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuildFailed(String),
}

/// Errors raised while talking to the server.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent or no response arrived
    #[error("HTTP request to {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    /// The response body could not be read to the end
    #[error("Failed to read response body: {0}")]
    BodyReadFailed(String),

    /// The server sent a `Location` header that is not a usable URL
    #[error("Invalid transaction location '{0}'")]
    InvalidLocation(String),

    /// Request envelope serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Errors raised when a response body is not a well-formed envelope.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The body is not valid JSON or does not match the envelope shape
    #[error("Malformed response body (HTTP {status}): {message}")]
    MalformedBody { status: u16, message: String },

    /// A successful execute response carried no result entry
    #[error("Response contains no statement result")]
    MissingResults,
}

/// A single error object reported by the server.
///
/// Error objects are only checked for presence, so `code` and `message` are
/// filled in when the server supplies them and `raw` always keeps the
/// original object.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerErrorEntry {
    /// Status code, e.g. `Neo.ClientError.Statement.SyntaxError`
    pub code: Option<String>,
    /// Human readable message
    pub message: Option<String>,
    /// The error object as it appeared on the wire
    pub raw: Value,
}

impl ServerErrorEntry {
    /// Build an entry from an arbitrary JSON error object.
    pub fn from_value(raw: Value) -> Self {
        let field = |name: &str| raw.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            code: field("code"),
            message: field("message"),
            raw,
        }
    }
}

impl fmt::Display for ServerErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{}: {}", code, message),
            (Some(code), None) => write!(f, "{}", code),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "{}", self.raw),
        }
    }
}

/// Errors reported by the server in the `errors` list of a response.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Server reported {} error(s): {}", .errors.len(), summarize(.errors))]
pub struct ServerError {
    /// Every error object the server returned, in order
    pub errors: Vec<ServerErrorEntry>,
}

impl ServerError {
    /// Code of the first reported error, if any.
    pub fn code(&self) -> Option<&str> {
        self.errors.first().and_then(|e| e.code.as_deref())
    }
}

fn summarize(errors: &[ServerErrorEntry]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by calls on a transaction that has already finished.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// The transaction was committed or rolled back
    #[error("Transaction is already {state}")]
    Closed { state: &'static str },
}

/// Caller-usage errors raised when reading a cell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    /// No column with this name in the result
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// The cursor is before the first row or past the last one
    #[error("Cursor is not on a row (row count {row_count}); call next() first")]
    CursorInvalid { row_count: usize },

    /// The cell holds a different kind of value
    #[error("Column '{column}' holds {actual}, not {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Coarse error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Driver could not be constructed
    Construction,
    /// Network failure
    Transport,
    /// Protocol incompatibility
    Decode,
    /// Server-side failure
    Server,
    /// Caller misuse
    Usage,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Construction => write!(f, "CONSTRUCTION"),
            ErrorCategory::Transport => write!(f, "TRANSPORT"),
            ErrorCategory::Decode => write!(f, "DECODE"),
            ErrorCategory::Server => write!(f, "SERVER"),
            ErrorCategory::Usage => write!(f, "USAGE"),
        }
    }
}

impl Neo4jError {
    /// Map to an error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Neo4jError::Connection(_) => ErrorCategory::Construction,
            Neo4jError::Transport(e) => e.category(),
            Neo4jError::Decode(_) => ErrorCategory::Decode,
            Neo4jError::Server(_) => ErrorCategory::Server,
            Neo4jError::Transaction(_) | Neo4jError::Cell(_) => ErrorCategory::Usage,
        }
    }
}

impl TransportError {
    /// Map to an error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            // A bad Location header is the server speaking the wrong protocol
            TransportError::InvalidLocation(_) => ErrorCategory::Decode,
            _ => ErrorCategory::Transport,
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::SerializationError(err.to_string())
    }
}

impl From<url::ParseError> for ConnectionError {
    fn from(err: url::ParseError) -> Self {
        ConnectionError::InvalidConnectionString(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unsupported_scheme_display() {
        let err = ConnectionError::UnsupportedScheme("nonsense".to_string());
        assert_eq!(err.to_string(), "Unknown connection scheme, nonsense");
    }

    #[test]
    fn test_server_error_keeps_every_entry() {
        let err = ServerError {
            errors: vec![
                ServerErrorEntry::from_value(json!({
                    "code": "Neo.ClientError.Statement.SyntaxError",
                    "message": "Invalid input"
                })),
                ServerErrorEntry::from_value(json!("plain string error")),
            ],
        };

        assert_eq!(err.code(), Some("Neo.ClientError.Statement.SyntaxError"));
        let display = err.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("Invalid input"));
        assert!(display.contains("plain string error"));
    }

    #[test]
    fn test_server_error_entry_without_fields() {
        let entry = ServerErrorEntry::from_value(json!({"unexpected": true}));
        assert!(entry.code.is_none());
        assert!(entry.message.is_none());
        assert_eq!(entry.raw, json!({"unexpected": true}));
    }

    #[test]
    fn test_cell_error_display() {
        let err = CellError::TypeMismatch {
            column: "age".to_string(),
            expected: "bool",
            actual: "string",
        };
        assert!(err.to_string().contains("'age'"));
        assert!(err.to_string().contains("not bool"));
    }

    #[test]
    fn test_error_category_mapping() {
        let err = Neo4jError::from(ConnectionError::UnsupportedScheme("ftp".to_string()));
        assert_eq!(err.category(), ErrorCategory::Construction);

        let err = Neo4jError::from(TransportError::BodyReadFailed("reset".to_string()));
        assert_eq!(err.category(), ErrorCategory::Transport);

        let err = Neo4jError::from(TransportError::InvalidLocation("::".to_string()));
        assert_eq!(err.category(), ErrorCategory::Decode);

        let err = Neo4jError::from(ServerError { errors: vec![] });
        assert_eq!(err.category(), ErrorCategory::Server);

        let err = Neo4jError::from(CellError::UnknownColumn("x".to_string()));
        assert_eq!(err.category(), ErrorCategory::Usage);
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Transport.to_string(), "TRANSPORT");
        assert_eq!(ErrorCategory::Usage.to_string(), "USAGE");
    }
}

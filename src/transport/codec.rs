//! Envelope encoding and decoding.
//!
//! Turns statements into request bodies and response bodies into either a
//! `ResultSet`, a `ServerError` carrying every reported error, or a
//! `DecodeError` when the body is not a well-formed envelope.

use tracing::warn;
use url::Url;

use crate::error::{DecodeError, Neo4jError, ServerError, ServerErrorEntry, TransportError};
use crate::query::{Parameters, ResultSet};

use super::messages::{StatementsRequest, TransactionResponse};
use super::protocol::HttpResponse;

/// Encode a single-statement execute envelope.
pub fn encode_execute(statement: &str, parameters: &Parameters) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&StatementsRequest::single(
        statement, parameters,
    ))?)
}

/// Encode the empty-statement envelope sent on commit.
pub fn encode_commit() -> Result<String, TransportError> {
    Ok(serde_json::to_string(&StatementsRequest::empty())?)
}

/// Parse a response body into its envelope.
pub fn decode_envelope(response: &HttpResponse) -> Result<TransactionResponse, DecodeError> {
    serde_json::from_str(&response.body).map_err(|e| DecodeError::MalformedBody {
        status: response.status,
        message: e.to_string(),
    })
}

/// Fail with a `ServerError` if the envelope reports any error.
pub fn check_errors(envelope: &TransactionResponse) -> Result<(), ServerError> {
    if envelope.errors.is_empty() {
        return Ok(());
    }

    let error = ServerError {
        errors: envelope
            .errors
            .iter()
            .cloned()
            .map(ServerErrorEntry::from_value)
            .collect(),
    };
    warn!(code = ?error.code(), count = error.errors.len(), "server reported errors");
    Err(error)
}

/// Parse an envelope and fail on reported errors or a non-2xx status.
///
/// A non-2xx response that reports no errors did not come from the
/// transactional endpoint, so it is treated as malformed.
fn decode_checked(response: &HttpResponse) -> Result<TransactionResponse, Neo4jError> {
    let envelope = decode_envelope(response)?;
    check_errors(&envelope)?;

    if !response.is_success() {
        return Err(DecodeError::MalformedBody {
            status: response.status,
            message: "error status without reported errors".to_string(),
        }
        .into());
    }
    Ok(envelope)
}

/// Decode a response to an execute call into a result set.
///
/// Server errors take precedence: when the error list is non-empty the
/// results are not looked at.
pub fn decode_result(response: &HttpResponse) -> Result<ResultSet, Neo4jError> {
    let envelope = decode_checked(response)?;

    let results = envelope
        .statement_results()
        .map_err(|e| DecodeError::MalformedBody {
            status: response.status,
            message: e.to_string(),
        })?;

    let first = results.into_iter().next().ok_or(DecodeError::MissingResults)?;
    let width = first.columns.len();

    let rows = first
        .data
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if entry.row.len() == width {
                Ok(entry.row)
            } else {
                Err(DecodeError::MalformedBody {
                    status: response.status,
                    message: format!(
                        "row {} has {} cells but there are {} columns",
                        index,
                        entry.row.len(),
                        width
                    ),
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultSet::new(first.columns, rows))
}

/// Decode a response that carries no result set (commit, rollback).
pub fn decode_ack(response: &HttpResponse) -> Result<(), Neo4jError> {
    decode_checked(response).map(|_| ())
}

/// Resolve a `Location` header against the URL the request was sent to.
pub fn resolve_location(request_url: &str, location: &str) -> Result<String, TransportError> {
    let invalid = || TransportError::InvalidLocation(location.to_string());
    let base = Url::parse(request_url).map_err(|_| invalid())?;
    let resolved = base.join(location).map_err(|_| invalid())?;
    Ok(resolved.as_str().trim_end_matches('/').to_string())
}

//! Envelope types for the transactional HTTP endpoint.
//!
//! Requests carry a list of statements; responses carry a list of per-statement
//! results and a list of errors. Only the fields this driver reads are
//! modelled; anything else in a response is ignored.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

use crate::query::Parameters;
use crate::types::CellValue;

/// Request body for execute and commit calls.
#[derive(Debug, Clone, Serialize)]
pub struct StatementsRequest<'a> {
    /// Statements to run, in order
    pub statements: Vec<StatementEntry<'a>>,
}

impl<'a> StatementsRequest<'a> {
    /// Envelope running a single statement.
    pub fn single(statement: &'a str, parameters: &'a Parameters) -> Self {
        Self {
            statements: vec![StatementEntry {
                statement,
                parameters,
            }],
        }
    }

    /// Envelope with no statements, used to commit.
    pub fn empty() -> Self {
        Self {
            statements: Vec::new(),
        }
    }
}

/// One statement in a request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct StatementEntry<'a> {
    /// Query text
    pub statement: &'a str,
    /// Named parameters
    pub parameters: &'a Parameters,
}

/// Response body returned by every transactional call.
///
/// `results` is kept as raw JSON so that a response reporting errors is
/// never required to carry well-formed results.
#[derive(Debug, Deserialize)]
pub struct TransactionResponse {
    /// Server-reported errors; only presence is checked
    pub errors: Vec<Value>,
    /// Per-statement results, not yet decoded
    #[serde(default)]
    pub results: Option<Box<RawValue>>,
}

impl TransactionResponse {
    /// Decode the per-statement results.
    pub fn statement_results(&self) -> Result<Vec<StatementResult>, serde_json::Error> {
        match &self.results {
            Some(raw) => serde_json::from_str(raw.get()),
            None => Ok(Vec::new()),
        }
    }
}

/// Result of a single statement.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementResult {
    /// Column names in positional order
    pub columns: Vec<String>,
    /// Rows, each wrapped in a `{"row": [...]}` object
    #[serde(default)]
    pub data: Vec<RowEntry>,
}

/// Envelope around one row of cells.
#[derive(Debug, Clone, Deserialize)]
pub struct RowEntry {
    /// Cell values in column order
    pub row: Vec<CellValue>,
}

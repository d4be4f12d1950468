//! Transaction lifecycle.
//!
//! A transaction starts against the session's collection endpoint. The first
//! response carrying a `Location` header opens it at the URL the server
//! assigned, and every later call (execute, commit, rollback) goes to that
//! URL until the transaction is committed or rolled back.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Neo4jError, TransactionError};
use crate::query::{Parameters, ResultSet};
use crate::transport::codec;
use crate::transport::{HttpRequest, HttpTransport};

/// Where a transaction is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionState {
    /// Nothing sent yet, or no location assigned yet
    Unopened {
        /// Collection endpoint new transactions are opened under
        collection_url: String,
    },
    /// The server assigned a per-transaction URL
    Open {
        /// Server-assigned transaction URL
        location: String,
    },
    /// Committed; no further calls allowed
    Committed,
    /// Rolled back; no further calls allowed
    RolledBack,
}

impl TransactionState {
    /// Short name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionState::Unopened { .. } => "unopened",
            TransactionState::Open { .. } => "open",
            TransactionState::Committed => "committed",
            TransactionState::RolledBack => "rolled back",
        }
    }

    /// URL the next call is sent to, if the transaction is still usable.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            TransactionState::Unopened { collection_url } => Some(collection_url),
            TransactionState::Open { location } => Some(location),
            TransactionState::Committed | TransactionState::RolledBack => None,
        }
    }

    /// Check if the transaction reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.endpoint().is_none()
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A logical transaction on the server.
///
/// Methods take `&mut self`, so a transaction has at most one call in flight.
/// A failed call leaves the state as it was, except that a `Location` header
/// received on an execute is always applied; a failed commit can be retried.
///
/// # Example
///
/// ```no_run
/// use neo4j_http::Driver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let driver = Driver::new("http://localhost:7474")?;
/// let mut tx = driver.new_session().new_transaction();
///
/// let mut result = tx.execute("CREATE (n) RETURN id(n)").await?;
/// while result.next() {
///     println!("created {}", result.get_int("id(n)")?);
/// }
///
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```
pub struct Transaction {
    /// Current lifecycle state
    state: TransactionState,
    /// Transport shared with the driver
    transport: Arc<dyn HttpTransport>,
}

impl Transaction {
    /// Create an unopened transaction under a collection endpoint.
    pub(crate) fn new(collection_url: String, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            state: TransactionState::Unopened { collection_url },
            transport,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    /// Check if the server has assigned this transaction a location.
    pub fn is_open(&self) -> bool {
        matches!(self.state, TransactionState::Open { .. })
    }

    /// Run a statement without parameters.
    pub async fn execute(&mut self, statement: &str) -> Result<ResultSet, Neo4jError> {
        self.execute_with_params(statement, Parameters::new()).await
    }

    /// Run a statement with named parameters.
    ///
    /// # Errors
    ///
    /// - `Transaction` if the transaction is already finished
    /// - `Transport` on network failure or an unusable `Location` header
    /// - `Decode` if the response body is not a well-formed envelope
    /// - `Server` if the server reported errors
    pub async fn execute_with_params(
        &mut self,
        statement: &str,
        params: Parameters,
    ) -> Result<ResultSet, Neo4jError> {
        let endpoint = self.endpoint()?.to_string();
        let body = codec::encode_execute(statement, &params)?;

        let response = self
            .transport
            .send(HttpRequest::post(endpoint.as_str(), body))
            .await?;

        if let Some(location) = &response.location {
            let location = codec::resolve_location(&endpoint, location)?;
            if !self.is_open() {
                debug!(location = %location, "transaction opened");
            }
            self.state = TransactionState::Open { location };
        }

        codec::decode_result(&response)
    }

    /// Commit the transaction.
    ///
    /// Sent from the unopened state too, in which case the server begins and
    /// commits in a single request.
    ///
    /// # Errors
    ///
    /// Same as [`Transaction::execute_with_params`]. The state is unchanged
    /// on failure.
    pub async fn commit(&mut self) -> Result<(), Neo4jError> {
        let url = format!("{}/commit", self.endpoint()?);
        let body = codec::encode_commit()?;

        let response = self.transport.send(HttpRequest::post(url, body)).await?;
        codec::decode_ack(&response)?;

        debug!(from = %self.state, "transaction committed");
        self.state = TransactionState::Committed;
        Ok(())
    }

    /// Roll back the transaction.
    ///
    /// An unopened transaction has nothing on the server to roll back, so no
    /// request is sent.
    ///
    /// # Errors
    ///
    /// - `Transaction` if the transaction is already finished
    /// - `Transport` on network failure
    /// - `Server` if the server reported errors in the response body
    pub async fn rollback(&mut self) -> Result<(), Neo4jError> {
        let location = match &self.state {
            TransactionState::Unopened { .. } => {
                debug!("rollback of unopened transaction, nothing sent");
                self.state = TransactionState::RolledBack;
                return Ok(());
            }
            TransactionState::Open { location } => location.clone(),
            finished => {
                return Err(TransactionError::Closed {
                    state: finished.name(),
                }
                .into())
            }
        };

        let response = self.transport.send(HttpRequest::delete(location)).await?;

        if !response.body.trim().is_empty() {
            match codec::decode_envelope(&response) {
                Ok(envelope) => codec::check_errors(&envelope)?,
                Err(e) => debug!(error = %e, "ignoring unreadable rollback response"),
            }
        }

        debug!("transaction rolled back");
        self.state = TransactionState::RolledBack;
        Ok(())
    }

    fn endpoint(&self) -> Result<&str, TransactionError> {
        self.state.endpoint().ok_or(TransactionError::Closed {
            state: self.state.name(),
        })
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("state", &self.state)
            .field("transport", &"<HttpTransport>")
            .finish()
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if let TransactionState::Open { location } = &self.state {
            warn!(location = %location, "open transaction dropped; it stays open on the server until it expires");
        }
    }
}

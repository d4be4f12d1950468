//! Session implementation.

use std::fmt;
use std::sync::Arc;

use crate::client::Transaction;
use crate::transport::HttpTransport;

/// Path of the transactional collection endpoint under the server root.
pub const TRANSACTION_PATH: &str = "/db/data/transaction";

/// A lightweight factory for transactions.
///
/// Sessions hold no server-side state; any number may be created from one
/// driver.
#[derive(Clone)]
pub struct Session {
    /// Server root copied from the driver
    base_url: String,
    /// Transport shared with the driver
    transport: Arc<dyn HttpTransport>,
}

impl Session {
    pub(crate) fn new(base_url: String, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    /// Collection endpoint new transactions are opened under.
    pub fn transaction_url(&self) -> String {
        format!("{}{}", self.base_url, TRANSACTION_PATH)
    }

    /// Create an unopened transaction.
    ///
    /// Nothing is sent until the first execute or commit.
    pub fn new_transaction(&self) -> Transaction {
        Transaction::new(self.transaction_url(), Arc::clone(&self.transport))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TransactionState;
    use crate::error::TransportError;
    use crate::transport::{HttpRequest, HttpResponse};
    use async_trait::async_trait;

    struct UnusedTransport;

    #[async_trait]
    impl HttpTransport for UnusedTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            panic!("no request expected");
        }
    }

    #[test]
    fn test_new_transaction_is_unopened() {
        let session = Session::new(
            "http://localhost:7474".to_string(),
            Arc::new(UnusedTransport),
        );
        let tx = session.new_transaction();

        assert_eq!(
            tx.state(),
            &TransactionState::Unopened {
                collection_url: "http://localhost:7474/db/data/transaction".to_string()
            }
        );
    }

    #[test]
    fn test_transactions_are_independent() {
        let session = Session::new("http://h".to_string(), Arc::new(UnusedTransport));
        let first = session.new_transaction();
        let second = session.new_transaction();
        assert_eq!(first.state(), second.state());
        assert!(!first.is_open());
    }
}

//! Transport layer for the transactional HTTP endpoint.
//!
//! This module provides the transport abstraction, the HTTP implementation,
//! and the envelope codec shared by every transaction.
//!
//! # Architecture
//!
//! The transport layer is organized into:
//! - `protocol` - Transport trait and plain request/response types
//! - `messages` - Request and response envelope types
//! - `codec` - Envelope encoding, decoding and server error detection
//! - `http` - `reqwest`-based transport implementation
//!
//! # Example
//!
//! ```no_run
//! use neo4j_http::connection::ConnectionParams;
//! use neo4j_http::transport::{codec, HttpRequest, HttpTransport, ReqwestTransport};
//! use neo4j_http::query::Parameters;
//! use std::str::FromStr;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = ConnectionParams::from_str("http://localhost:7474")?;
//! let transport = ReqwestTransport::new(&params)?;
//!
//! let body = codec::encode_execute("RETURN 1 AS one", &Parameters::new())?;
//! let url = format!("{}/db/data/transaction/commit", params.base_url);
//! let response = transport.send(HttpRequest::post(url, body)).await?;
//!
//! let mut result = codec::decode_result(&response)?;
//! assert!(result.next());
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod http;
pub mod messages;
pub mod protocol;

// Re-export commonly used types
pub use http::ReqwestTransport;
pub use protocol::{HttpRequest, HttpResponse, HttpTransport, Method};

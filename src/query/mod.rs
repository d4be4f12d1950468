//! Statement parameters and result handling.
//!
//! The query module is organized into:
//! - `parameters` - Named statement parameters sent in the request envelope
//! - `results` - Materialized result sets with a forward-only cursor
//!
//! # Example
//!
//! ```no_run
//! use neo4j_http::query::Parameters;
//! use neo4j_http::Driver;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = Driver::new("http://localhost:7474")?;
//! let mut tx = driver.new_session().new_transaction();
//!
//! let params = Parameters::new().with("name", "Alice");
//! let mut result = tx
//!     .execute_with_params("MATCH (p:Person {name: $name}) RETURN p.age AS age", params)
//!     .await?;
//!
//! while result.next() {
//!     println!("age: {}", result.get_int("age")?);
//! }
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

pub mod parameters;
pub mod results;

// Re-export commonly used types
pub use parameters::{Parameter, Parameters};
pub use results::ResultSet;

//! Basic usage example for the neo4j-http-rs driver.

use neo4j_http::{Driver, Parameters, Session};
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const URL: &str = "http://localhost:7474";

/// Creates a node, commits, and returns its id.
async fn example_create(session: &Session) -> Result<i64, Box<dyn Error>> {
    let mut tx = session.new_transaction();

    let params = Parameters::new().with("name", "Alice").with("age", 36);
    let mut result = tx
        .execute_with_params(
            "CREATE (p:Person {name: $name, age: $age}) RETURN id(p) AS id",
            params,
        )
        .await?;

    let mut id = -1;
    while result.next() {
        id = result.get_int("id")?;
    }
    result.close();

    tx.commit().await?;
    Ok(id)
}

/// Reads the node back in a new transaction.
async fn example_read(session: &Session, id: i64) -> Result<(), Box<dyn Error>> {
    let mut tx = session.new_transaction();

    let mut result = tx
        .execute_with_params(
            "MATCH (p) WHERE id(p) = $id RETURN p.name AS name, p.age AS age, labels(p) AS labels",
            Parameters::new().with("id", id),
        )
        .await?;

    while result.next() {
        println!(
            "{} is {} years old, labels {:?}",
            result.get_string("name")?,
            result.get_int("age")?,
            result.get_array("labels")?
        );
    }

    tx.commit().await?;
    Ok(())
}

/// Deletes the node, then changes its mind.
async fn example_rollback(session: &Session, id: i64) -> Result<(), Box<dyn Error>> {
    let mut tx = session.new_transaction();
    tx.execute_with_params(
        "MATCH (p) WHERE id(p) = $id DETACH DELETE p",
        Parameters::new().with("id", id),
    )
    .await?;
    tx.rollback().await?;
    Ok(())
}

/// Removes the node for good.
async fn example_cleanup(session: &Session, id: i64) -> Result<(), Box<dyn Error>> {
    let mut tx = session.new_transaction();
    tx.execute_with_params(
        "MATCH (p) WHERE id(p) = $id DETACH DELETE p",
        Parameters::new().with("id", id),
    )
    .await?;
    tx.commit().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neo4j_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let url = std::env::var("NEO4J_URL").unwrap_or_else(|_| URL.to_string());
    let driver = Driver::new(&url)?;
    println!("Using {}", driver);

    let session = driver.new_session();

    let id = example_create(&session).await?;
    println!("Created node {}", id);

    example_read(&session, id).await?;

    example_rollback(&session, id).await?;
    println!("Rolled back delete; node {} still exists", id);
    example_read(&session, id).await?;

    example_cleanup(&session, id).await?;
    println!("Done");

    Ok(())
}

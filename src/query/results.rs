//! Result set handling and iteration.
//!
//! A `ResultSet` is fully materialized from a single response. Rows are read
//! through a forward-only cursor that starts before the first row, and cells
//! are extracted by column name with typed getters.

use std::collections::HashMap;

use tracing::trace;

use crate::error::CellError;
use crate::types::CellValue;

/// Materialized rows of one statement with a forward-only cursor.
///
/// # Example
///
/// ```no_run
/// # use neo4j_http::Driver;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let driver = Driver::new("http://localhost:7474")?;
/// # let mut tx = driver.new_session().new_transaction();
/// let mut result = tx.execute("MATCH (n) RETURN id(n) AS id, n.name AS name").await?;
/// while result.next() {
///     let id = result.get_int("id")?;
///     let name = result.get_string("name")?;
///     println!("{}: {}", id, name);
/// }
/// result.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResultSet {
    /// Column names in positional order
    columns: Vec<String>,
    /// Column name to position
    column_index: HashMap<String, usize>,
    /// Row cells, each row as wide as `columns`
    rows: Vec<Vec<CellValue>>,
    /// `None` before the first `next()`; saturates at `rows.len()`
    cursor: Option<usize>,
}

impl ResultSet {
    /// Create a result set over decoded rows.
    ///
    /// If a column name repeats, lookups by that name resolve to its last
    /// position.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();

        Self {
            columns,
            column_index,
            rows,
            cursor: None,
        }
    }

    /// Advance the cursor to the next row.
    ///
    /// Returns `true` while the cursor is on a row. Must be called once
    /// before the first cell read; keeps returning `false` once the rows are
    /// exhausted.
    pub fn next(&mut self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1).min(self.rows.len());
        self.cursor = Some(next);
        next < self.rows.len()
    }

    /// Release the result set.
    ///
    /// Results are fully buffered, so there is nothing to release yet; this
    /// is safe to call any number of times.
    pub fn close(&mut self) {
        trace!(rows = self.rows.len(), "result set closed");
    }

    /// Column names in positional order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    /// Raw cell value of `column` in the current row.
    pub fn get_value(&self, column: &str) -> Result<&CellValue, CellError> {
        let index = self
            .column_index(column)
            .ok_or_else(|| CellError::UnknownColumn(column.to_string()))?;

        let row = self
            .cursor
            .and_then(|cursor| self.rows.get(cursor))
            .ok_or(CellError::CursorInvalid {
                row_count: self.rows.len(),
            })?;

        // Rows are checked against the column count when decoded
        row.get(index).ok_or(CellError::CursorInvalid {
            row_count: self.rows.len(),
        })
    }

    /// Check whether the cell holds JSON null.
    pub fn is_null(&self, column: &str) -> Result<bool, CellError> {
        Ok(self.get_value(column)?.is_null())
    }

    pub fn get_string(&self, column: &str) -> Result<&str, CellError> {
        self.get_typed(column, "string", CellValue::as_str)
    }

    /// Read a number as an integer, truncating any fractional part.
    pub fn get_int(&self, column: &str) -> Result<i64, CellError> {
        self.get_typed(column, "number", CellValue::as_i64)
    }

    pub fn get_float(&self, column: &str) -> Result<f64, CellError> {
        self.get_typed(column, "number", CellValue::as_f64)
    }

    pub fn get_bool(&self, column: &str) -> Result<bool, CellError> {
        self.get_typed(column, "bool", CellValue::as_bool)
    }

    pub fn get_map(&self, column: &str) -> Result<&HashMap<String, CellValue>, CellError> {
        self.get_typed(column, "map", CellValue::as_map)
    }

    pub fn get_array(&self, column: &str) -> Result<&[CellValue], CellError> {
        self.get_typed(column, "array", CellValue::as_array)
    }

    fn get_typed<'a, T>(
        &'a self,
        column: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a CellValue) -> Option<T>,
    ) -> Result<T, CellError> {
        let value = self.get_value(column)?;
        extract(value).ok_or_else(|| CellError::TypeMismatch {
            column: column.to_string(),
            expected,
            actual: value.kind(),
        })
    }
}

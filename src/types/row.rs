use std::sync::Arc;

use crate::error::{DatabaseError, DialectError, Result};
use crate::traits::Column;
use crate::types::{Field, SqlValue};

/// Raw result of a statement, exactly as the serverless client reports it.
#[derive(Debug, Clone, Default)]
pub struct ExecutedQuery {
    /// Column metadata in order
    pub fields: Vec<Field>,
    pub rows: Vec<Row>,
    /// `None` when the statement does not report an affected-row count
    pub rows_affected: Option<u64>,
    /// Decimal string as sent by the server; `"0"` when no id was generated
    pub insert_id: Option<String>,
    /// Server-side execution time in milliseconds
    pub time: f64,
    /// Set by clients that report failures inside an otherwise successful result
    pub error: Option<DatabaseError>,
}

impl ExecutedQuery {
    pub fn new(columns: &[&str], rows: Vec<Vec<SqlValue>>) -> Self {
        let columns: Arc<[String]> = columns.iter().map(|c| c.to_string()).collect();
        Self {
            fields: columns.iter().map(|name| Field::new(name.clone(), "")).collect(),
            rows: rows
                .into_iter()
                .map(|values| Row::new(Arc::clone(&columns), values))
                .collect(),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// A single row result from a query.
/// Values are accessed by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl Row {
    /// Creates a new Row from column names and values in the same order.
    pub fn new(columns: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    /// Gets a value by column.
    pub fn get<T: Column + ?Sized>(&self, column: &T) -> Result<&SqlValue> {
        self.get_by_name(column.column_name())
            .ok_or_else(|| DialectError::ColumnNotFound(column.qualified_name()))
    }

    /// Gets a value by column name.
    pub fn get_by_name(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|i| self.values.get(i))
    }

    /// Returns all column names in this row, in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Normalized result of a query execution.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Auto-increment id generated by an insert, absent when none was generated
    pub insert_id: Option<u64>,
    /// Rows changed by an insert, update or delete
    pub num_affected_rows: Option<u64>,
    rows: Vec<Row>,
}

impl QueryResult {
    pub fn new(rows: Vec<Row>, insert_id: Option<u64>, num_affected_rows: Option<u64>) -> Self {
        Self {
            insert_id,
            num_affected_rows,
            rows,
        }
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        let actual = self.rows.len();
        let mut rows = self.rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row),
            _ => Err(DialectError::UnexpectedRowCount {
                expected: 1,
                actual,
            }),
        }
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns a reference to the rows without consuming the result.
    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IdColumn;
    struct MissingColumn;

    impl Column for IdColumn {
        fn column_name(&self) -> &'static str {
            "id"
        }
        fn table_name(&self) -> &'static str {
            "test"
        }
    }

    impl Column for MissingColumn {
        fn column_name(&self) -> &'static str {
            "missing"
        }
        fn table_name(&self) -> &'static str {
            "test"
        }
    }

    #[test]
    fn test_row_get() {
        let raw = ExecutedQuery::new(
            &["id", "name"],
            vec![vec![SqlValue::Int(1), SqlValue::from("John")]],
        );
        let row = &raw.rows[0];

        assert_eq!(row.get(&IdColumn).unwrap(), &SqlValue::Int(1));
        assert_eq!(row.get_by_name("name"), Some(&SqlValue::from("John")));
        match row.get(&MissingColumn).unwrap_err() {
            DialectError::ColumnNotFound(name) => assert_eq!(name, "test.missing"),
            other => panic!("Expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_query_result_single_row() {
        let raw = ExecutedQuery::new(&["id"], vec![vec![SqlValue::Int(1)]]);
        let result = QueryResult::new(raw.rows, None, None);
        let row = result.single_row().unwrap();
        assert_eq!(row.get(&IdColumn).unwrap(), &SqlValue::Int(1));
    }

    #[test]
    fn test_query_result_single_row_error_on_multiple() {
        let raw = ExecutedQuery::new(
            &["id"],
            vec![vec![SqlValue::Int(1)], vec![SqlValue::Int(2)]],
        );
        let err = QueryResult::new(raw.rows, None, None)
            .single_row()
            .unwrap_err();
        match err {
            DialectError::UnexpectedRowCount { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            _ => panic!("Expected UnexpectedRowCount error"),
        }
    }

    #[test]
    fn test_query_result_single_row_error_on_empty() {
        let err = QueryResult::default().single_row().unwrap_err();
        assert!(matches!(
            err,
            DialectError::UnexpectedRowCount {
                expected: 1,
                actual: 0
            }
        ));
    }
}

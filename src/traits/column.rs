/// Trait representing a database column.
/// Implementations are typically generated from schema definitions.
pub trait Column {
    /// Returns the column name as it appears in the database.
    fn column_name(&self) -> &'static str;

    /// Returns the table name this column belongs to.
    fn table_name(&self) -> &'static str;

    /// Returns the qualified column name (table.column), unquoted.
    fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name(), self.column_name())
    }
}

/// A reference to a column, used internally by query builders.
/// The compiler decides how the parts are quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
        }
    }

    /// A column referenced by name alone.
    pub fn bare(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    pub fn from_column<C: Column + ?Sized>(col: &C) -> Self {
        Self::new(col.table_name(), col.column_name())
    }
}

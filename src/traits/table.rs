/// Trait representing a database table.
/// Implementations are typically generated from schema definitions.
pub trait Table {
    /// The type containing all column accessors for this table.
    type Columns;

    /// Returns the table name as it appears in the database.
    fn table_name() -> &'static str;

    /// Returns the database (MySQL schema) name, if the table lives outside
    /// the connection's default database.
    fn schema() -> Option<&'static str> {
        None
    }

    /// Returns an instance of the columns accessor for this table.
    fn columns() -> Self::Columns;
}

/// A reference to a table, used internally by query builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn of<T: Table>() -> Self {
        Self {
            schema: T::schema().map(str::to_string),
            name: T::table_name().to_string(),
        }
    }
}

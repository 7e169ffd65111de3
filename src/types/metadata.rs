/// Schema information returned by a `DatabaseIntrospector`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    pub name: String,
    pub schema: Option<String>,
    pub is_view: bool,
    pub columns: Vec<ColumnMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub is_auto_incrementing: bool,
    pub has_default_value: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseMetadata {
    pub tables: Vec<TableMetadata>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntrospectorOptions {
    /// Include the migration bookkeeping tables in the output.
    pub with_migration_tables: bool,
}

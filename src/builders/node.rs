use crate::clauses::WhereClause;
use crate::traits::{ColumnRef, TableRef};
use crate::types::SqlValue;

/// A query in builder form, before it is compiled for a specific dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    Select(SelectNode),
    /// Hand-written SQL, passed through the compiler unchanged.
    Raw {
        sql: String,
        parameters: Vec<SqlValue>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectNode {
    pub columns: Vec<ColumnRef>,
    pub table: TableRef,
    pub where_clause: Option<WhereClause>,
    pub limit: Option<u64>,
}

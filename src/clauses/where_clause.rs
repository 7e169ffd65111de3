use crate::traits::{Column, ColumnRef};
use crate::types::SqlValue;

/// Represents a WHERE clause condition.
/// Supports basic comparison operations and logical combinations.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    /// column = value
    Eq(ColumnRef, SqlValue),
    /// column IS NULL
    IsNull(ColumnRef),
    /// clause AND clause
    And(Box<WhereClause>, Box<WhereClause>),
    /// clause OR clause
    Or(Box<WhereClause>, Box<WhereClause>),
}

impl WhereClause {
    /// Creates an equality condition: column = value
    pub fn eq<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        WhereClause::Eq(ColumnRef::from_column(column), value.into())
    }

    /// Creates a null check: column IS NULL
    pub fn is_null<C: Column>(column: &C) -> Self {
        WhereClause::IsNull(ColumnRef::from_column(column))
    }

    /// Combines this clause with another using AND
    pub fn and(self, other: WhereClause) -> Self {
        WhereClause::And(Box::new(self), Box::new(other))
    }

    /// Combines this clause with another using OR
    pub fn or(self, other: WhereClause) -> Self {
        WhereClause::Or(Box::new(self), Box::new(other))
    }
}

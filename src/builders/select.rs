use crate::builders::{QueryNode, SelectNode};
use crate::clauses::WhereClause;
use crate::error::Result;
use crate::querier::Querier;
use crate::traits::{Column, ColumnRef, Driver, Table, TableRef};
use crate::types::{CompiledQuery, QueryResult};

/// Entry point for building a SELECT query.
/// Must call `.columns()` to proceed.
pub struct Select<D: Driver> {
    querier: Querier<D>,
}

impl<D: Driver> Select<D> {
    pub(crate) fn new(querier: Querier<D>) -> Self {
        Self { querier }
    }

    /// Specify the columns to select.
    /// Accepts a slice of column references.
    pub fn columns(self, cols: &[&dyn Column]) -> SelectWithColumns<D> {
        let columns = cols.iter().map(|c| ColumnRef::from_column(*c)).collect();
        SelectWithColumns {
            querier: self.querier,
            columns,
        }
    }
}

/// SELECT builder after columns have been specified.
/// Must call `.from()` to proceed.
pub struct SelectWithColumns<D: Driver> {
    querier: Querier<D>,
    columns: Vec<ColumnRef>,
}

impl<D: Driver> SelectWithColumns<D> {
    /// Specify the table to select from.
    pub fn from<T: Table>(self, _table: T) -> SelectWithTable<D> {
        SelectWithTable {
            querier: self.querier,
            node: SelectNode {
                columns: self.columns,
                table: TableRef::of::<T>(),
                where_clause: None,
                limit: None,
            },
        }
    }
}

/// SELECT builder after table has been specified.
/// Can optionally add WHERE clause, LIMIT, or execute directly.
pub struct SelectWithTable<D: Driver> {
    querier: Querier<D>,
    node: SelectNode,
}

impl<D: Driver> SelectWithTable<D> {
    /// Add a WHERE clause to the query.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.node.where_clause = Some(clause);
        self
    }

    /// Add a LIMIT to the query.
    pub fn limit(mut self, n: u64) -> Self {
        self.node.limit = Some(n);
        self
    }

    /// Compile the query with the dialect's compiler without running it,
    /// e.g. to execute it inside a `Transaction`.
    pub fn compile(&self) -> CompiledQuery {
        self.querier
            .compiler()
            .compile(&QueryNode::Select(self.node.clone()))
    }

    /// Execute the query on a fresh connection and return the result.
    pub async fn execute(self) -> Result<QueryResult> {
        let compiled = self.compile();
        self.querier.execute(&compiled).await
    }
}

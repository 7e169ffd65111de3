use crate::builders::{QueryNode, SelectNode};
use crate::clauses::WhereClause;
use crate::traits::{ColumnRef, QueryCompiler, TableRef};
use crate::types::{CompiledQuery, SqlValue};

/// Compiles query nodes to MySQL: backtick-quoted identifiers and `?` placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlQueryCompiler;

impl MysqlQueryCompiler {
    pub fn new() -> Self {
        Self
    }

    fn compile_select(&self, node: &SelectNode) -> CompiledQuery {
        let mut sql = String::with_capacity(256);
        let mut params = Vec::new();

        sql.push_str("SELECT ");
        for (i, col) in node.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            push_column(&mut sql, col);
        }

        sql.push_str(" FROM ");
        push_table(&mut sql, &node.table);

        if let Some(ref where_clause) = node.where_clause {
            sql.push_str(" WHERE ");
            push_where(&mut sql, where_clause, &mut params);
        }

        if let Some(limit) = node.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        CompiledQuery::new(sql, params)
    }
}

impl QueryCompiler for MysqlQueryCompiler {
    fn compile(&self, node: &QueryNode) -> CompiledQuery {
        match node {
            QueryNode::Select(select) => self.compile_select(select),
            QueryNode::Raw { sql, parameters } => CompiledQuery::new(sql.clone(), parameters.clone()),
        }
    }
}

fn push_identifier(sql: &mut String, identifier: &str) {
    sql.push('`');
    sql.push_str(&identifier.replace('`', "``"));
    sql.push('`');
}

fn push_table(sql: &mut String, table: &TableRef) {
    if let Some(ref schema) = table.schema {
        push_identifier(sql, schema);
        sql.push('.');
    }
    push_identifier(sql, &table.name);
}

fn push_column(sql: &mut String, column: &ColumnRef) {
    if let Some(ref table) = column.table {
        push_identifier(sql, table);
        sql.push('.');
    }
    push_identifier(sql, &column.column);
}

fn push_where(sql: &mut String, clause: &WhereClause, params: &mut Vec<SqlValue>) {
    match clause {
        WhereClause::Eq(col, value) => {
            push_column(sql, col);
            sql.push_str(" = ?");
            params.push(value.clone());
        }
        WhereClause::IsNull(col) => {
            push_column(sql, col);
            sql.push_str(" IS NULL");
        }
        WhereClause::And(left, right) => push_binary(sql, "AND", left, right, params),
        WhereClause::Or(left, right) => push_binary(sql, "OR", left, right, params),
    }
}

fn push_binary(
    sql: &mut String,
    op: &str,
    left: &WhereClause,
    right: &WhereClause,
    params: &mut Vec<SqlValue>,
) {
    sql.push('(');
    push_where(sql, left, params);
    sql.push_str(") ");
    sql.push_str(op);
    sql.push_str(" (");
    push_where(sql, right, params);
    sql.push(')');
}

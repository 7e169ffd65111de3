use async_trait::async_trait;

use crate::error::Result;
use crate::mysql::{MIGRATION_LOCK_TABLE, MIGRATION_TABLE};
use crate::querier::Querier;
use crate::traits::{DatabaseIntrospector, Driver};
use crate::types::{
    ColumnMetadata, IntrospectorOptions, Row, SchemaMetadata, SqlValue, TableMetadata,
};

const SCHEMAS_SQL: &str = "select SCHEMA_NAME from information_schema.SCHEMATA";

const TABLES_SQL: &str = "select columns.COLUMN_NAME, columns.COLUMN_DEFAULT, columns.TABLE_NAME, \
columns.TABLE_SCHEMA, tables.TABLE_TYPE, columns.IS_NULLABLE, columns.DATA_TYPE, columns.EXTRA, \
columns.COLUMN_COMMENT \
from information_schema.COLUMNS as columns \
inner join information_schema.TABLES as tables \
on columns.TABLE_NAME = tables.TABLE_NAME and columns.TABLE_SCHEMA = tables.TABLE_SCHEMA \
where columns.TABLE_SCHEMA = database()";

const TABLES_ORDER_SQL: &str = " order by columns.TABLE_NAME, columns.ORDINAL_POSITION";

/// Reads schema metadata from MySQL's `information_schema`.
pub struct MysqlIntrospector<D: Driver> {
    db: Querier<D>,
}

impl<D: Driver> MysqlIntrospector<D> {
    pub fn new(db: Querier<D>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<D: Driver> DatabaseIntrospector for MysqlIntrospector<D> {
    async fn get_schemas(&self) -> Result<Vec<SchemaMetadata>> {
        let result = self.db.raw(SCHEMAS_SQL, Vec::new()).await?;
        Ok(result
            .rows()
            .iter()
            .filter_map(|row| text(row, "SCHEMA_NAME"))
            .map(|name| SchemaMetadata { name })
            .collect())
    }

    async fn get_tables(&self, options: &IntrospectorOptions) -> Result<Vec<TableMetadata>> {
        let mut sql = TABLES_SQL.to_string();
        let mut parameters = Vec::new();
        if !options.with_migration_tables {
            sql.push_str(" and columns.TABLE_NAME not in (?, ?)");
            parameters.push(SqlValue::from(MIGRATION_TABLE));
            parameters.push(SqlValue::from(MIGRATION_LOCK_TABLE));
        }
        sql.push_str(TABLES_ORDER_SQL);

        let result = self.db.raw(&sql, parameters).await?;
        Ok(parse_table_metadata(&result.rows()))
    }
}

fn text(row: &Row, column: &str) -> Option<String> {
    match row.get_by_name(column)? {
        SqlValue::Null => None,
        SqlValue::Text(s) => Some(s.clone()),
        SqlValue::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
        SqlValue::Int(i) => Some(i.to_string()),
        SqlValue::UInt(u) => Some(u.to_string()),
        other => Some(format!("{other:?}")),
    }
}

/// Groups column rows (ordered by table) into one entry per table.
fn parse_table_metadata(rows: &[Row]) -> Vec<TableMetadata> {
    let mut tables: Vec<TableMetadata> = Vec::new();

    for row in rows {
        let Some(table_name) = text(row, "TABLE_NAME") else {
            continue;
        };
        let schema = text(row, "TABLE_SCHEMA");

        let column = ColumnMetadata {
            name: text(row, "COLUMN_NAME").unwrap_or_default(),
            data_type: text(row, "DATA_TYPE").unwrap_or_default(),
            is_nullable: text(row, "IS_NULLABLE").as_deref() == Some("YES"),
            is_auto_incrementing: text(row, "EXTRA")
                .is_some_and(|extra| extra.to_lowercase().contains("auto_increment")),
            has_default_value: text(row, "COLUMN_DEFAULT").is_some(),
            comment: text(row, "COLUMN_COMMENT").filter(|c| !c.is_empty()),
        };

        match tables.last_mut() {
            Some(table) if table.name == table_name && table.schema == schema => {
                table.columns.push(column);
            }
            _ => tables.push(TableMetadata {
                name: table_name,
                schema,
                is_view: text(row, "TABLE_TYPE").as_deref() == Some("VIEW"),
                columns: vec![column],
            }),
        }
    }

    tables
}

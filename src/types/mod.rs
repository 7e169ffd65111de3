mod compiled_query;
mod field;
mod metadata;
mod row;
mod sql_value;

pub use compiled_query::{CompiledQuery, IsolationLevel, TransactionSettings};
pub use field::Field;
pub use metadata::{ColumnMetadata, DatabaseMetadata, IntrospectorOptions, SchemaMetadata, TableMetadata};
pub use row::{ExecutedQuery, QueryResult, Row};
pub use sql_value::SqlValue;

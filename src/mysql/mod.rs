//! Stock MySQL implementations shared by every MySQL-compatible dialect.

mod adapter;
mod compiler;
mod introspector;

pub use adapter::{MysqlAdapter, MIGRATION_LOCK_ID};
pub use compiler::MysqlQueryCompiler;
pub use introspector::MysqlIntrospector;

/// Table recording applied migrations.
pub const MIGRATION_TABLE: &str = "schema_migration";

/// Table backing the migration lock on databases without user locks.
pub const MIGRATION_LOCK_TABLE: &str = "schema_migration_lock";

use async_trait::async_trait;
use tracing::debug;

use crate::error::{DatabaseError, Result};
use crate::traits::{DatabaseConnection, DialectAdapter};
use crate::types::{CompiledQuery, SqlValue};

/// Name of the MySQL user lock guarding migrations.
pub const MIGRATION_LOCK_ID: &str = "schema_migration_lock";

/// Seconds `get_lock` waits before giving up.
const LOCK_TIMEOUT_SECONDS: i64 = 60 * 60;

/// Capabilities shared by every MySQL-compatible database.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlAdapter;

impl MysqlAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DialectAdapter for MysqlAdapter {
    fn supports_transactional_ddl(&self) -> bool {
        false
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn supports_create_if_not_exists(&self) -> bool {
        true
    }

    async fn acquire_migration_lock(&self, connection: &dyn DatabaseConnection) -> Result<()> {
        // MySQL user locks are held per session, so the same connection must release it.
        let query = CompiledQuery::new(
            "select get_lock(?, ?) as acquired",
            vec![SqlValue::from(MIGRATION_LOCK_ID), SqlValue::Int(LOCK_TIMEOUT_SECONDS)],
        );
        let result = connection.execute_query(&query).await?;
        let acquired = result
            .rows_ref()
            .first()
            .and_then(|row| row.get_by_name("acquired"))
            .and_then(SqlValue::as_i64);
        if acquired == Some(0) {
            return Err(DatabaseError::new("timed out waiting for the migration lock", "").into());
        }
        debug!(lock = MIGRATION_LOCK_ID, "migration lock acquired");
        Ok(())
    }

    async fn release_migration_lock(&self, connection: &dyn DatabaseConnection) -> Result<()> {
        let query = CompiledQuery::new("select release_lock(?)", vec![SqlValue::from(MIGRATION_LOCK_ID)]);
        connection.execute_query(&query).await?;
        debug!(lock = MIGRATION_LOCK_ID, "migration lock released");
        Ok(())
    }
}

use async_trait::async_trait;

use crate::builders::QueryNode;
use crate::error::Result;
use crate::querier::Querier;
use crate::traits::{DatabaseConnection, Driver};
use crate::types::{
    CompiledQuery, DatabaseMetadata, IntrospectorOptions, SchemaMetadata, TableMetadata,
};

/// Everything the query builder needs to talk to one database family.
pub trait Dialect: Send + Sync {
    type Adapter: DialectAdapter + 'static;
    type Driver: Driver;
    type Compiler: QueryCompiler + 'static;
    type Introspector: DatabaseIntrospector;

    fn create_adapter(&self) -> Self::Adapter;

    fn create_driver(&self) -> Self::Driver;

    fn create_query_compiler(&self) -> Self::Compiler;

    fn create_introspector(&self, db: Querier<Self::Driver>) -> Self::Introspector;
}

/// Capabilities of a database family that are not expressed in SQL text.
#[async_trait]
pub trait DialectAdapter: Send + Sync {
    fn supports_transactional_ddl(&self) -> bool;

    fn supports_returning(&self) -> bool;

    fn supports_create_if_not_exists(&self) -> bool;

    /// Blocks until the migration lock is held by `connection`.
    async fn acquire_migration_lock(&self, connection: &dyn DatabaseConnection) -> Result<()>;

    async fn release_migration_lock(&self, connection: &dyn DatabaseConnection) -> Result<()>;
}

/// Turns query nodes into SQL text for one database family.
pub trait QueryCompiler: Send + Sync {
    fn compile(&self, node: &QueryNode) -> CompiledQuery;
}

#[async_trait]
pub trait DatabaseIntrospector: Send + Sync {
    async fn get_schemas(&self) -> Result<Vec<SchemaMetadata>>;

    async fn get_tables(&self, options: &IntrospectorOptions) -> Result<Vec<TableMetadata>>;

    async fn get_metadata(&self, options: &IntrospectorOptions) -> Result<DatabaseMetadata> {
        Ok(DatabaseMetadata {
            tables: self.get_tables(options).await?,
        })
    }
}

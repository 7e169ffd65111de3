use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::Result;
use crate::types::{CompiledQuery, QueryResult, TransactionSettings};

/// Connection lifecycle owned by a dialect.
/// Drivers are responsible for:
/// - Handing out connections for a unit of work
/// - Starting, committing and rolling back transactions on a connection
/// - Releasing whatever a connection holds once the work is done
#[async_trait]
pub trait Driver: Send + Sync + 'static {
    type Connection: DatabaseConnection;

    /// Called once before the first connection is acquired.
    async fn init(&self) -> Result<()>;

    async fn acquire_connection(&self) -> Result<Self::Connection>;

    async fn begin_transaction(
        &self,
        connection: &mut Self::Connection,
        settings: &TransactionSettings,
    ) -> Result<()>;

    async fn commit_transaction(&self, connection: &mut Self::Connection) -> Result<()>;

    async fn rollback_transaction(&self, connection: &mut Self::Connection) -> Result<()>;

    async fn release_connection(&self, connection: Self::Connection) -> Result<()>;

    /// Called once when the owning `Database` is torn down.
    async fn destroy(&self) -> Result<()>;
}

/// A single logical connection handed out by a `Driver`.
#[async_trait]
pub trait DatabaseConnection: Send + Sync {
    /// Execute a compiled query.
    /// Parameters use MySQL-style positional placeholders (`?`).
    async fn execute_query(&self, query: &CompiledQuery) -> Result<QueryResult>;

    /// Execute a query and yield its results in chunks of at most `chunk_size` rows.
    fn stream_query<'a>(
        &'a self,
        query: &'a CompiledQuery,
        chunk_size: usize,
    ) -> BoxStream<'a, Result<QueryResult>>;
}

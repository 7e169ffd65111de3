use std::sync::Arc;

use tracing::{debug, warn};

use crate::builders::{QueryNode, Select};
use crate::error::Result;
use crate::traits::{DatabaseConnection, Driver, QueryCompiler};
use crate::types::{CompiledQuery, QueryResult, SqlValue, TransactionSettings};

/// Query builder factory.
/// Created from a `Database` and used to build and execute queries.
pub struct Querier<D: Driver> {
    driver: Arc<D>,
    compiler: Arc<dyn QueryCompiler>,
}

impl<D: Driver> Clone for Querier<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            compiler: Arc::clone(&self.compiler),
        }
    }
}

impl<D: Driver> Querier<D> {
    pub(crate) fn new(driver: Arc<D>, compiler: Arc<dyn QueryCompiler>) -> Self {
        Self { driver, compiler }
    }

    /// Start building a SELECT query.
    pub fn select(&self) -> Select<D> {
        Select::new(self.clone())
    }

    pub fn compiler(&self) -> &dyn QueryCompiler {
        self.compiler.as_ref()
    }

    /// Run hand-written SQL with positional (`?`) parameters.
    pub async fn raw(&self, sql: &str, parameters: Vec<SqlValue>) -> Result<QueryResult> {
        let compiled = self.compiler.compile(&QueryNode::Raw {
            sql: sql.to_string(),
            parameters,
        });
        self.execute(&compiled).await
    }

    /// Execute a compiled query on a connection acquired for this call only.
    pub async fn execute(&self, query: &CompiledQuery) -> Result<QueryResult> {
        let connection = self.driver.acquire_connection().await?;
        let result = connection.execute_query(query).await;
        self.driver.release_connection(connection).await?;
        result
    }

    /// Open a transaction on a dedicated connection.
    /// The returned handle must be finished with `commit` or `rollback`.
    pub async fn begin_transaction(&self, settings: TransactionSettings) -> Result<Transaction<D>> {
        let mut connection = self.driver.acquire_connection().await?;
        if let Err(err) = self.driver.begin_transaction(&mut connection, &settings).await {
            if let Err(release_err) = self.driver.release_connection(connection).await {
                warn!(error = %release_err, "failed to release connection after BEGIN failed");
            }
            return Err(err);
        }
        debug!(?settings, "transaction started");
        Ok(Transaction {
            driver: Arc::clone(&self.driver),
            connection,
        })
    }
}

/// An open transaction holding its connection until commit or rollback.
pub struct Transaction<D: Driver> {
    driver: Arc<D>,
    connection: D::Connection,
}

impl<D: Driver> Transaction<D> {
    /// Execute a compiled query inside the transaction.
    pub async fn execute(&self, query: &CompiledQuery) -> Result<QueryResult> {
        self.connection.execute_query(query).await
    }

    pub async fn commit(mut self) -> Result<()> {
        let result = self.driver.commit_transaction(&mut self.connection).await;
        let released = self.driver.release_connection(self.connection).await;
        result?;
        released
    }

    pub async fn rollback(mut self) -> Result<()> {
        let result = self.driver.rollback_transaction(&mut self.connection).await;
        let released = self.driver.release_connection(self.connection).await;
        result?;
        released
    }
}

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tracing::{debug, trace};

use crate::error::{DialectError, Result};
use crate::planetscale::{format_date, shared, PlanetScaleDialectConfig};
use crate::traits::{DatabaseConnection, Execute, ServerlessClient};
use crate::types::{CompiledQuery, ExecutedQuery, QueryResult, SqlValue, TransactionSettings};

/// A logical connection on top of the serverless client.
///
/// Outside a transaction each query runs on the shared connection (when
/// enabled) or on a private connection the client creates per call. Between
/// `begin_transaction` and `commit_transaction`/`rollback_transaction`, every
/// query runs on one dedicated connection so they share the server session.
pub struct PlanetScaleConnection {
    client: Arc<dyn ServerlessClient>,
    /// Set when non-transaction queries go through the shared connection.
    shared_key: Option<Arc<PlanetScaleDialectConfig>>,
    transaction_conn: Option<Arc<dyn Execute>>,
}

impl PlanetScaleConnection {
    pub fn new(client: Arc<dyn ServerlessClient>, config: &Arc<PlanetScaleDialectConfig>) -> Self {
        let shared_key = if config.use_shared_connection {
            shared::get_or_insert_with(config, || client.connection());
            Some(Arc::clone(config))
        } else {
            None
        };

        Self {
            client,
            shared_key,
            transaction_conn: None,
        }
    }

    /// Whether a transaction is currently open on this connection.
    pub fn in_transaction(&self) -> bool {
        self.transaction_conn.is_some()
    }

    pub async fn begin_transaction(&mut self, settings: &TransactionSettings) -> Result<()> {
        let client = &self.client;
        let conn = Arc::clone(
            self.transaction_conn
                .get_or_insert_with(|| client.connection()),
        );

        if let Some(level) = settings.isolation_level {
            run_statement(conn.as_ref(), &format!("SET TRANSACTION ISOLATION LEVEL {level}"))
                .await?;
        }
        run_statement(conn.as_ref(), "BEGIN").await
    }

    pub async fn commit_transaction(&mut self) -> Result<()> {
        // Taken before any I/O so the reference is gone however COMMIT ends.
        let conn = self
            .transaction_conn
            .take()
            .ok_or(DialectError::NoActiveTransaction { action: "commit" })?;
        run_statement(conn.as_ref(), "COMMIT").await
    }

    pub async fn rollback_transaction(&mut self) -> Result<()> {
        let conn = self
            .transaction_conn
            .take()
            .ok_or(DialectError::NoActiveTransaction { action: "rollback" })?;
        run_statement(conn.as_ref(), "ROLLBACK").await
    }

    async fn execute_on<E: Execute + ?Sized>(&self, query: &CompiledQuery, conn: &E) -> Result<QueryResult> {
        // Without a custom formatter, dates are sent as MySQL date strings.
        let parameters: Cow<'_, [SqlValue]> = if self.client.config().format.is_some() {
            Cow::Borrowed(&query.parameters)
        } else {
            Cow::Owned(
                query
                    .parameters
                    .iter()
                    .map(|param| match param {
                        SqlValue::DateTime(date) => SqlValue::Text(format_date(date)),
                        other => other.clone(),
                    })
                    .collect(),
            )
        };

        trace!(sql = %query.sql, "executing query");
        let raw = conn.execute(&query.sql, &parameters).await?;
        normalize(raw)
    }
}

#[async_trait]
impl DatabaseConnection for PlanetScaleConnection {
    async fn execute_query(&self, query: &CompiledQuery) -> Result<QueryResult> {
        if let Some(ref conn) = self.transaction_conn {
            return self.execute_on(query, conn.as_ref()).await;
        }

        if let Some(shared) = self.shared_key.as_ref().and_then(shared::get) {
            return self.execute_on(query, shared.as_ref()).await;
        }
        self.execute_on(query, self.client.as_ref()).await
    }

    fn stream_query<'a>(
        &'a self,
        _query: &'a CompiledQuery,
        _chunk_size: usize,
    ) -> BoxStream<'a, Result<QueryResult>> {
        stream::once(async { Err(DialectError::StreamingUnsupported) }).boxed()
    }
}

/// Runs a transaction control statement, surfacing errors reported in the result.
async fn run_statement(conn: &dyn Execute, sql: &str) -> Result<()> {
    debug!(statement = sql, "transaction control");
    normalize(conn.execute(sql, &[]).await?).map(drop)
}

/// Converts a raw client result into the query builder's shape.
fn normalize(raw: ExecutedQuery) -> Result<QueryResult> {
    // Some client versions report failures inside the result instead of returning them.
    if let Some(error) = raw.error {
        return Err(error.into());
    }

    // An insert id of zero means no id was generated.
    let insert_id = match raw.insert_id.as_deref() {
        None | Some("0") => None,
        Some(id) => Some(
            id.parse::<u64>()
                .map_err(|_| DialectError::Decode(format!("invalid insert id: {id}")))?,
        ),
    };

    Ok(QueryResult::new(raw.rows, insert_id, raw.rows_affected))
}

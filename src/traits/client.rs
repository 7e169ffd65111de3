use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::ClientConfig;
use crate::error::Result;
use crate::types::{ExecutedQuery, SqlValue};

/// Anything that can run a single statement against the database:
/// a serverless client or one of its connections.
#[async_trait]
pub trait Execute: Send + Sync {
    /// Execute a SQL statement with positional (`?`) arguments.
    async fn execute(&self, query: &str, args: &[SqlValue]) -> Result<ExecutedQuery>;
}

/// The serverless database client wrapped by the PlanetScale dialect.
///
/// `execute` on the client itself runs on a private connection created for that
/// call. `connection` hands out a connection whose session survives across
/// statements, which is what transactions need.
pub trait ServerlessClient: Execute {
    fn config(&self) -> &ClientConfig;

    fn connection(&self) -> Arc<dyn Execute>;
}

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::planetscale::{PlanetScaleConnection, PlanetScaleDialectConfig};
use crate::traits::{Driver, ServerlessClient};
use crate::types::TransactionSettings;

/// Driver over the PlanetScale serverless client.
///
/// The client holds no persistent socket, so there is nothing to set up,
/// release or tear down: `init`, `release_connection` and `destroy` do nothing.
pub struct PlanetScaleDriver {
    config: Arc<PlanetScaleDialectConfig>,
    client: Arc<dyn ServerlessClient>,
}

impl PlanetScaleDriver {
    pub fn new(config: Arc<PlanetScaleDialectConfig>, client: Arc<dyn ServerlessClient>) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl Driver for PlanetScaleDriver {
    type Connection = PlanetScaleConnection;

    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn acquire_connection(&self) -> Result<PlanetScaleConnection> {
        Ok(PlanetScaleConnection::new(
            Arc::clone(&self.client),
            &self.config,
        ))
    }

    async fn begin_transaction(
        &self,
        connection: &mut PlanetScaleConnection,
        settings: &TransactionSettings,
    ) -> Result<()> {
        debug!(isolation_level = ?settings.isolation_level, "begin transaction");
        connection.begin_transaction(settings).await
    }

    async fn commit_transaction(&self, connection: &mut PlanetScaleConnection) -> Result<()> {
        debug!("commit transaction");
        connection.commit_transaction().await
    }

    async fn rollback_transaction(&self, connection: &mut PlanetScaleConnection) -> Result<()> {
        debug!("rollback transaction");
        connection.rollback_transaction().await
    }

    async fn release_connection(&self, _connection: PlanetScaleConnection) -> Result<()> {
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        Ok(())
    }
}

use std::sync::Arc;

use crate::clients::HttpClient;
use crate::mysql::{MysqlAdapter, MysqlIntrospector, MysqlQueryCompiler};
use crate::planetscale::{inflate_dates, PlanetScaleDialectConfig, PlanetScaleDriver};
use crate::querier::Querier;
use crate::traits::{Dialect, ServerlessClient};

/// Dialect for PlanetScale's serverless HTTP API.
///
/// Only the driver is specific to PlanetScale; the adapter, query compiler and
/// introspector are the stock MySQL ones.
///
/// # Example
/// ```ignore
/// let dialect = PlanetScaleDialect::new(ClientConfig::new("<host>", "<username>", "<password>"));
///
/// // or with a connection URL
/// let dialect = PlanetScaleDialect::new(ClientConfig::from_url(
///     "mysql://<username>:<password>@<host>/<database>",
/// ));
///
/// let db = Database::new(dialect).await?;
/// ```
pub struct PlanetScaleDialect {
    config: Arc<PlanetScaleDialectConfig>,
    client: Option<Arc<dyn ServerlessClient>>,
}

impl PlanetScaleDialect {
    pub fn new(config: impl Into<PlanetScaleDialectConfig>) -> Self {
        Self::from_shared_config(Arc::new(config.into()))
    }

    /// Build a dialect from a configuration shared with other dialects.
    /// With `use_shared_connection`, all of them use the same shared connection.
    pub fn from_shared_config(config: Arc<PlanetScaleDialectConfig>) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Use `client` instead of creating an `HttpClient` for each driver.
    /// Useful for testing or for alternative transports.
    pub fn with_client(mut self, client: Arc<dyn ServerlessClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn config(&self) -> &PlanetScaleDialectConfig {
        &self.config
    }
}

impl Dialect for PlanetScaleDialect {
    type Adapter = MysqlAdapter;
    type Driver = PlanetScaleDriver;
    type Compiler = MysqlQueryCompiler;
    type Introspector = MysqlIntrospector<PlanetScaleDriver>;

    fn create_adapter(&self) -> MysqlAdapter {
        MysqlAdapter::new()
    }

    fn create_driver(&self) -> PlanetScaleDriver {
        let client = match self.client {
            Some(ref client) => Arc::clone(client),
            None => {
                let mut client_config = self.config.client.clone();
                if client_config.cast.is_none() {
                    client_config.cast = Some(Arc::new(inflate_dates));
                }
                Arc::new(HttpClient::new(client_config))
            }
        };
        PlanetScaleDriver::new(Arc::clone(&self.config), client)
    }

    fn create_query_compiler(&self) -> MysqlQueryCompiler {
        MysqlQueryCompiler::new()
    }

    fn create_introspector(&self, db: Querier<PlanetScaleDriver>) -> MysqlIntrospector<PlanetScaleDriver> {
        MysqlIntrospector::new(db)
    }
}

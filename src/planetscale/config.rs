use crate::clients::ClientConfig;
use crate::error::Result;

/// Configuration of the PlanetScale dialect: everything the serverless client
/// accepts, plus whether non-transaction queries share one connection.
#[derive(Debug, Clone, Default)]
pub struct PlanetScaleDialectConfig {
    pub client: ClientConfig,
    /// Use a single client connection for all non-transaction queries.
    /// Defaults to `false`.
    pub use_shared_connection: bool,
}

impl PlanetScaleDialectConfig {
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client,
            use_shared_connection: false,
        }
    }

    /// Reads the connection URL from `DATABASE_URL`.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env().map(Self::new)
    }

    pub fn with_shared_connection(mut self, use_shared_connection: bool) -> Self {
        self.use_shared_connection = use_shared_connection;
        self
    }
}

impl From<ClientConfig> for PlanetScaleDialectConfig {
    fn from(client: ClientConfig) -> Self {
        Self::new(client)
    }
}

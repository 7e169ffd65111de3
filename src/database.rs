use std::sync::Arc;

use crate::error::Result;
use crate::querier::Querier;
use crate::traits::{Dialect, DialectAdapter, Driver, QueryCompiler};

/// Main entry point of the query builder.
/// Holds the objects a dialect produces and hands out queriers.
pub struct Database<D: Dialect> {
    dialect: D,
    adapter: Arc<dyn DialectAdapter>,
    driver: Arc<D::Driver>,
    querier: Querier<D::Driver>,
}

impl<D: Dialect> Database<D> {
    /// Build a database from a dialect and initialize its driver.
    ///
    /// # Example
    /// ```ignore
    /// let db = Database::new(PlanetScaleDialect::new(config)).await?;
    /// ```
    pub async fn new(dialect: D) -> Result<Self> {
        let adapter: Arc<dyn DialectAdapter> = Arc::new(dialect.create_adapter());
        let driver = Arc::new(dialect.create_driver());
        let compiler: Arc<dyn QueryCompiler> = Arc::new(dialect.create_query_compiler());
        driver.init().await?;

        let querier = Querier::new(Arc::clone(&driver), compiler);
        Ok(Self {
            dialect,
            adapter,
            driver,
            querier,
        })
    }

    /// Create a Querier for building and executing queries.
    pub fn querier(&self) -> Querier<D::Driver> {
        self.querier.clone()
    }

    pub fn adapter(&self) -> &dyn DialectAdapter {
        self.adapter.as_ref()
    }

    /// Schema introspection bound to this database.
    pub fn introspection(&self) -> D::Introspector {
        self.dialect.create_introspector(self.querier())
    }

    /// Tear down the driver. Queriers cloned from this database must not be used afterwards.
    pub async fn destroy(self) -> Result<()> {
        self.driver.destroy().await
    }
}

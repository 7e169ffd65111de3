//! planetscale-dialect - A PlanetScale serverless dialect for a driver-agnostic MySQL query builder
//!
//! # Example
//! ```ignore
//! use planetscale_dialect::{
//!     ClientConfig, CompiledQuery, Database, PlanetScaleDialect, TransactionSettings, WhereClause,
//! };
//!
//! // Connect through PlanetScale's HTTP API
//! let dialect = PlanetScaleDialect::new(ClientConfig::from_url(std::env::var("DATABASE_URL")?));
//! let db = Database::new(dialect).await?;
//! let querier = db.querier();
//!
//! // Execute a SELECT query
//! let row = querier
//!     .select()
//!     .columns(&[&Users::columns().id, &Users::columns().name])
//!     .from(Users)
//!     .where_(WhereClause::eq(&Users::columns().name, "John"))
//!     .execute()
//!     .await?
//!     .single_row()?;
//!
//! // Run statements in a transaction
//! let tx = querier.begin_transaction(TransactionSettings::default()).await?;
//! tx.execute(&CompiledQuery::new("update users set name = ? where id = ?", vec!["Jane".into(), 1.into()])).await?;
//! tx.commit().await?;
//! ```

pub mod builders;
pub mod clauses;
pub mod clients;
pub mod error;
pub mod mysql;
pub mod planetscale;
pub mod querier;
pub mod traits;
pub mod types;

mod database;

// Re-export main types for convenient access
pub use clauses::WhereClause;
pub use clients::{ClientConfig, HttpClient};
pub use database::Database;
pub use error::{DatabaseError, DialectError, Result};
pub use planetscale::{
    inflate_dates, PlanetScaleConnection, PlanetScaleDialect, PlanetScaleDialectConfig,
    PlanetScaleDriver,
};
pub use querier::{Querier, Transaction};
pub use traits::{
    Column, DatabaseConnection, DatabaseIntrospector, Dialect, DialectAdapter, Driver, Execute,
    QueryCompiler, ServerlessClient, Table,
};
pub use types::{
    CompiledQuery, ExecutedQuery, IsolationLevel, QueryResult, Row, SqlValue, TransactionSettings,
};

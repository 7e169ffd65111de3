//! The PlanetScale dialect: a driver and connection adapter over the
//! serverless client, paired with the stock MySQL adapter, compiler and
//! introspector.

mod config;
mod connection;
mod dates;
mod dialect;
mod driver;
mod shared;

pub use self::config::PlanetScaleDialectConfig;
pub use self::connection::PlanetScaleConnection;
pub use self::dates::{format_date, inflate_dates};
pub use self::dialect::PlanetScaleDialect;
pub use self::driver::PlanetScaleDriver;

//! Implementations of the serverless client the PlanetScale dialect wraps.

mod cast;
mod config;
mod format;
mod http;

pub use self::cast::cast;
pub use self::config::{Cast, ClientConfig, Format, DATABASE_URL_ENV};
pub use self::format::{format, sanitize};
pub use self::http::{HttpClient, HttpConnection};
pub use self::in_memory_test::{
    Handle, InMemoryTestClient, InMemoryTestConnection, InMemoryTestResponseBuilder, RecordedQuery,
};

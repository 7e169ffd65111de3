mod client;
mod column;
mod dialect;
mod driver;
mod table;

pub use client::{Execute, ServerlessClient};
pub use column::{Column, ColumnRef};
pub use dialect::{DatabaseIntrospector, Dialect, DialectAdapter, QueryCompiler};
pub use driver::{DatabaseConnection, Driver};
pub use table::{Table, TableRef};

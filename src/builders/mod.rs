mod node;
mod select;

pub use node::{QueryNode, SelectNode};
pub use select::{Select, SelectWithColumns, SelectWithTable};

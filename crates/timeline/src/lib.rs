pub mod date_index;
pub mod navigation;
pub mod query;

pub use date_index::*;
pub use navigation::*;
pub use query::*;

//! Selection state and intent handling for one explorer session.

pub mod config;
pub mod intent;
pub mod journal;
pub mod script;
pub mod selection;
pub mod session;

pub use config::*;
pub use intent::*;
pub use journal::*;
pub use script::*;
pub use selection::*;
pub use session::*;

// dbkit Core - Domain Types, Error Taxonomy & Ports
// NO infrastructure dependencies

pub mod domain;
pub mod error;
pub mod port;

pub use error::{DaoError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod db;
pub mod memory;
pub mod models;
pub mod properties;
pub mod schema;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

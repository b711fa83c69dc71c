pub mod value;
pub mod model;
pub mod builder;
pub mod config;
pub mod hash;
pub mod insert;
pub mod filter;
pub mod mapper;
pub mod database;
pub mod error;

pub use builder::Diagnostic;
pub use config::SeedConfig;
pub use database::Database;
pub use error::{Result, SeedError};
pub use filter::{filter, Filter};
pub use mapper::RecordSchema;
pub use model::{Row, Table};
pub use value::{Field, Value};

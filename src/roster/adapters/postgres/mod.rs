//! `PostgreSQL` adapters for the roster.

mod directory;
mod models;
mod schema;

pub use directory::PostgresDirectory;

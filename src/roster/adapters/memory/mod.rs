//! In-memory roster adapters.

mod directory;

pub use directory::InMemoryDirectory;

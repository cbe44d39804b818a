//! `PostgreSQL` adapters for pull requests.

mod models;
mod repository;
mod schema;

pub use repository::PostgresPullRequestRepository;

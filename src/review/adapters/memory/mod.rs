//! In-memory review adapters.

mod repository;

pub use repository::InMemoryPullRequestRepository;

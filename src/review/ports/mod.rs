//! Port contracts for the review workflow.

pub mod repository;

pub use repository::{
    PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult,
};

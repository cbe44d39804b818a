//! Domain model for pull requests and reviewer assignment.
//!
//! Holds the pull request aggregate with its lifecycle rules and the pure
//! reviewer selection policy. Nothing here performs I/O.

mod assignment;
mod error;
mod ids;
mod pull_request;
mod stats;

pub use assignment::{OrderedReviewerSelector, RandomReviewerSelector, ReviewerSelector};
pub use error::{ParsePullRequestStatusError, ReviewDomainError};
pub use ids::PullRequestId;
pub use pull_request::{
    MAX_REVIEWERS, PersistedPullRequestData, PullRequest, PullRequestStatus, PullRequestSummary,
};
pub use stats::{PullRequestReviewerCount, ReviewerAssignmentCount};

//! Error types for pull request validation and lifecycle rules.

use super::PullRequestId;
use crate::roster::domain::{RosterDomainError, UserId};
use thiserror::Error;

/// Errors returned while constructing or mutating pull requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDomainError {
    /// The pull request identifier is blank.
    #[error("pull request id must not be empty")]
    EmptyPullRequestId,

    /// The pull request name is empty after trimming.
    #[error("pull request name must not be empty")]
    EmptyPullRequestName,

    /// A referenced user identifier is invalid.
    #[error(transparent)]
    Roster(#[from] RosterDomainError),

    /// More reviewers than allowed were supplied.
    #[error("pull request {pull_request_id} cannot have {count} reviewers")]
    TooManyReviewers {
        /// Pull request being built.
        pull_request_id: PullRequestId,
        /// Number of reviewers supplied.
        count: usize,
    },

    /// The same reviewer appears twice.
    #[error("reviewer {reviewer_id} is already assigned to pull request {pull_request_id}")]
    DuplicateReviewer {
        /// Pull request being modified.
        pull_request_id: PullRequestId,
        /// Repeated reviewer.
        reviewer_id: UserId,
    },

    /// The author was offered as a reviewer of their own pull request.
    #[error("author {author_id} cannot review pull request {pull_request_id}")]
    AuthorAsReviewer {
        /// Pull request being modified.
        pull_request_id: PullRequestId,
        /// Author of the pull request.
        author_id: UserId,
    },

    /// Reviewers of a merged pull request are frozen.
    #[error("pull request {0} is merged")]
    AlreadyMerged(PullRequestId),

    /// The reviewer to replace is not on the pull request.
    #[error("reviewer {reviewer_id} is not assigned to pull request {pull_request_id}")]
    ReviewerNotAssigned {
        /// Pull request being modified.
        pull_request_id: PullRequestId,
        /// Reviewer that was expected.
        reviewer_id: UserId,
    },
}

/// Error returned while parsing pull request statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pull request status: {0}")]
pub struct ParsePullRequestStatusError(pub String);

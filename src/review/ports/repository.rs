//! Repository port for pull requests and their reviewer links.

use crate::review::domain::{
    PullRequest, PullRequestId, PullRequestReviewerCount, PullRequestSummary,
    ReviewerAssignmentCount,
};
use crate::roster::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for pull request repository operations.
pub type PullRequestRepositoryResult<T> = Result<T, PullRequestRepositoryError>;

/// Pull request persistence contract.
///
/// Implementations enforce atomicity themselves; the workflow never
/// pre-checks before writing.
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Stores a new pull request together with its reviewer links, all or
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestRepositoryError::DuplicatePullRequest`] when the
    /// identifier already exists.
    async fn create(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()>;

    /// Finds a pull request with its reviewers.
    ///
    /// Returns `None` when the pull request does not exist.
    async fn find_by_id(&self, id: &PullRequestId)
    -> PullRequestRepositoryResult<Option<PullRequest>>;

    /// Marks a pull request merged at `merged_at` unless it already is.
    ///
    /// Returns the persisted merge timestamp, which is the earlier one when
    /// the pull request had already been merged.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestRepositoryError::NotFound`] when the pull request
    /// does not exist.
    async fn merge(
        &self,
        id: &PullRequestId,
        merged_at: DateTime<Utc>,
    ) -> PullRequestRepositoryResult<DateTime<Utc>>;

    /// Rewrites the single `(id, old_reviewer)` link to point at
    /// `new_reviewer`.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestRepositoryError::ReviewerLinkNotFound`] when no
    /// such link exists at write time.
    async fn change_reviewer(
        &self,
        id: &PullRequestId,
        old_reviewer: &UserId,
        new_reviewer: &UserId,
    ) -> PullRequestRepositoryResult<()>;

    /// Returns every pull request on which `reviewer` is assigned.
    async fn find_by_reviewer(
        &self,
        reviewer: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequestSummary>>;

    /// Returns the number of reviewer links held by each reviewer.
    async fn reviewer_assignment_counts(
        &self,
    ) -> PullRequestRepositoryResult<Vec<ReviewerAssignmentCount>>;

    /// Returns every pull request with its current reviewer count.
    async fn reviewer_counts_by_pull_request(
        &self,
    ) -> PullRequestRepositoryResult<Vec<PullRequestReviewerCount>>;
}

/// Errors returned by pull request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PullRequestRepositoryError {
    /// A pull request with the same identifier already exists.
    #[error("duplicate pull request identifier: {0}")]
    DuplicatePullRequest(PullRequestId),

    /// The pull request was not found.
    #[error("pull request not found: {0}")]
    NotFound(PullRequestId),

    /// No reviewer link matched the pull request and reviewer.
    #[error("reviewer {reviewer_id} is not linked to pull request {pull_request_id}")]
    ReviewerLinkNotFound {
        /// Pull request that was updated.
        pull_request_id: PullRequestId,
        /// Reviewer whose link was expected.
        reviewer_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PullRequestRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

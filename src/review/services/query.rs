//! Read-only review listings and statistics.

use crate::error::{Resource, ServiceError};
use crate::review::{
    domain::{PullRequestReviewerCount, PullRequestSummary, ReviewerAssignmentCount},
    ports::PullRequestRepository,
};
use crate::roster::{domain::UserId, ports::UserDirectory};
use std::cmp::Reverse;
use std::sync::Arc;

/// Review listing and statistics service.
#[derive(Clone)]
pub struct ReviewQueryService<R, U>
where
    R: PullRequestRepository,
    U: UserDirectory,
{
    pull_requests: Arc<R>,
    users: Arc<U>,
}

impl<R, U> ReviewQueryService<R, U>
where
    R: PullRequestRepository,
    U: UserDirectory,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(pull_requests: Arc<R>, users: Arc<U>) -> Self {
        Self {
            pull_requests,
            users,
        }
    }

    /// Lists the pull requests on which `user_id` is a reviewer.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the user does not exist.
    pub async fn reviews_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<PullRequestSummary>, ServiceError> {
        let id = UserId::new(user_id)?;
        if self
            .users
            .find_user_by_id(&id)
            .await
            .map_err(|err| ServiceError::fault("failed to load user", err))?
            .is_none()
        {
            tracing::warn!(user_id = %id, "user not found");
            return Err(ServiceError::not_found(Resource::User, &id));
        }

        self.pull_requests
            .find_by_reviewer(&id)
            .await
            .map_err(|err| ServiceError::fault("failed to list reviews", err))
    }

    /// Returns per-reviewer assignment counts, busiest reviewer first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Fault`] when the store fails.
    pub async fn reviewer_assignment_stats(
        &self,
    ) -> Result<Vec<ReviewerAssignmentCount>, ServiceError> {
        let mut counts = self
            .pull_requests
            .reviewer_assignment_counts()
            .await
            .map_err(|err| ServiceError::fault("failed to count reviewer assignments", err))?;
        counts.sort_by(|left, right| {
            Reverse(left.assigned_count)
                .cmp(&Reverse(right.assigned_count))
                .then_with(|| left.reviewer_id.cmp(&right.reviewer_id))
        });
        Ok(counts)
    }

    /// Returns every pull request with its reviewer count, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Fault`] when the store fails.
    pub async fn pull_request_stats(
        &self,
    ) -> Result<Vec<PullRequestReviewerCount>, ServiceError> {
        let mut counts = self
            .pull_requests
            .reviewer_counts_by_pull_request()
            .await
            .map_err(|err| ServiceError::fault("failed to count pull request reviewers", err))?;
        counts.sort_by(|left, right| left.pull_request.id.cmp(&right.pull_request.id));
        Ok(counts)
    }
}

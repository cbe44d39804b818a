//! Pull request creation, merge, and reviewer reassignment.

use crate::error::{Resource, ServiceError};
use crate::review::{
    domain::{
        MAX_REVIEWERS, PullRequest, PullRequestId, RandomReviewerSelector, ReviewDomainError,
        ReviewerSelector,
    },
    ports::{PullRequestRepository, PullRequestRepositoryError},
};
use crate::roster::{
    domain::UserId,
    ports::{TeamDirectory, UserDirectory},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;

/// Request payload for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequestRequest {
    pull_request_id: String,
    name: String,
    author_id: String,
}

impl CreatePullRequestRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        pull_request_id: impl Into<String>,
        name: impl Into<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            pull_request_id: pull_request_id.into(),
            name: name.into(),
            author_id: author_id.into(),
        }
    }
}

/// Request payload for merging a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePullRequestRequest {
    pull_request_id: String,
}

impl MergePullRequestRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(pull_request_id: impl Into<String>) -> Self {
        Self {
            pull_request_id: pull_request_id.into(),
        }
    }
}

/// Request payload for replacing one reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignReviewerRequest {
    pull_request_id: String,
    old_reviewer_id: String,
}

impl ReassignReviewerRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(pull_request_id: impl Into<String>, old_reviewer_id: impl Into<String>) -> Self {
        Self {
            pull_request_id: pull_request_id.into(),
            old_reviewer_id: old_reviewer_id.into(),
        }
    }
}

/// Result of a successful reviewer reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassignmentOutcome {
    /// The pull request after the swap.
    #[serde(rename = "pr")]
    pub pull_request: PullRequest,
    /// The reviewer that took the outgoing reviewer's place.
    pub replaced_by: UserId,
}

/// Orchestrates the pull request lifecycle and reviewer assignment.
pub struct PullRequestWorkflowService<R, T, U, C>
where
    R: PullRequestRepository,
    T: TeamDirectory,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    pull_requests: Arc<R>,
    teams: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
    selector: Arc<dyn ReviewerSelector>,
}

impl<R, T, U, C> Clone for PullRequestWorkflowService<R, T, U, C>
where
    R: PullRequestRepository,
    T: TeamDirectory,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            pull_requests: Arc::clone(&self.pull_requests),
            teams: Arc::clone(&self.teams),
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
            selector: Arc::clone(&self.selector),
        }
    }
}

impl<R, T, U, C> PullRequestWorkflowService<R, T, U, C>
where
    R: PullRequestRepository,
    T: TeamDirectory,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a workflow service with random reviewer selection.
    #[must_use]
    pub fn new(pull_requests: Arc<R>, teams: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            pull_requests,
            teams,
            users,
            clock,
            selector: Arc::new(RandomReviewerSelector),
        }
    }

    /// Replaces the reviewer selection policy.
    #[must_use]
    pub fn with_selector(mut self, selector: Arc<dyn ReviewerSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Opens a pull request and assigns up to two reviewers from the
    /// author's team.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::BadRequest`] for blank fields,
    /// [`ServiceError::NotFound`] when the author or their team is unknown,
    /// and [`ServiceError::PullRequestExists`] when the id is taken.
    pub async fn create(
        &self,
        request: CreatePullRequestRequest,
    ) -> Result<PullRequest, ServiceError> {
        let (id, name, author_id) = parse_create(request).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected pull request creation");
        })?;

        let author = self
            .users
            .find_user_by_id(&author_id)
            .await
            .map_err(|err| ServiceError::fault("failed to load author", err))?
            .ok_or_else(|| {
                tracing::warn!(pull_request_id = %id, author_id = %author_id, "author not found");
                ServiceError::not_found(Resource::User, &author_id)
            })?;
        let team = self
            .teams
            .find_team_by_name(author.team_name())
            .await
            .map_err(|err| ServiceError::fault("failed to load author team", err))?
            .ok_or_else(|| {
                tracing::warn!(team_name = %author.team_name(), "author team not found");
                ServiceError::not_found(Resource::Team, author.team_name())
            })?;

        let mut candidates = team.active_member_ids();
        candidates.remove(&author_id);
        let reviewers = self.selector.pick_reviewers(&candidates, MAX_REVIEWERS);
        tracing::debug!(
            pull_request_id = %id,
            candidates = candidates.len(),
            assigned = reviewers.len(),
            "selected reviewers"
        );

        let pull_request = PullRequest::open(id, name, author_id, reviewers, &*self.clock)?;
        match self.pull_requests.create(&pull_request).await {
            Ok(()) => {
                tracing::info!(
                    pull_request_id = %pull_request.id(),
                    author_id = %pull_request.author_id(),
                    reviewers = pull_request.assigned_reviewers().len(),
                    "pull request created"
                );
                Ok(pull_request)
            }
            Err(PullRequestRepositoryError::DuplicatePullRequest(existing)) => {
                tracing::warn!(pull_request_id = %existing, "pull request already exists");
                Err(ServiceError::PullRequestExists(existing))
            }
            Err(err) => Err(ServiceError::fault("failed to create pull request", err)),
        }
    }

    /// Marks a pull request merged.
    ///
    /// Merging an already merged pull request changes nothing and returns it
    /// as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the pull request does not
    /// exist.
    pub async fn merge(
        &self,
        request: MergePullRequestRequest,
    ) -> Result<PullRequest, ServiceError> {
        let id = PullRequestId::new(request.pull_request_id)?;
        let mut pull_request = self.load(&id).await?;
        if pull_request.is_merged() {
            tracing::warn!(pull_request_id = %id, "pull request already merged");
            return Ok(pull_request);
        }

        let merged_at = self
            .pull_requests
            .merge(&id, self.clock.utc())
            .await
            .map_err(|err| match err {
                PullRequestRepositoryError::NotFound(missing) => {
                    tracing::warn!(
                        pull_request_id = %missing,
                        "pull request vanished before merge"
                    );
                    ServiceError::not_found(Resource::PullRequest, missing)
                }
                other => ServiceError::fault("failed to merge pull request", other),
            })?;
        pull_request.record_merge(merged_at);
        tracing::info!(pull_request_id = %id, merged_at = %merged_at, "pull request merged");
        Ok(pull_request)
    }

    /// Replaces one reviewer with an active member of that reviewer's team.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the pull request, the
    /// reviewer's team, or the reviewer link is missing,
    /// [`ServiceError::PullRequestMerged`] for merged pull requests,
    /// [`ServiceError::ReviewerNotAssigned`] when the reviewer is not on the
    /// pull request, and [`ServiceError::NoCandidate`] when nobody can take
    /// over.
    pub async fn reassign(
        &self,
        request: ReassignReviewerRequest,
    ) -> Result<ReassignmentOutcome, ServiceError> {
        let ReassignReviewerRequest {
            pull_request_id,
            old_reviewer_id,
        } = request;
        let id = PullRequestId::new(pull_request_id)?;
        let old_reviewer = UserId::new(old_reviewer_id)?;

        let mut pull_request = self.load(&id).await?;
        pull_request
            .ensure_replaceable(&old_reviewer)
            .inspect_err(|err| {
                tracing::warn!(error = %err, "rejected reviewer reassignment");
            })?;

        let team = self
            .teams
            .find_team_by_member(&old_reviewer)
            .await
            .map_err(|err| ServiceError::fault("failed to load reviewer team", err))?
            .ok_or_else(|| {
                tracing::warn!(reviewer_id = %old_reviewer, "reviewer team not found");
                ServiceError::not_found(Resource::Team, &old_reviewer)
            })?;

        let mut candidates = team.active_member_ids();
        candidates.remove(pull_request.author_id());
        for reviewer in pull_request.assigned_reviewers() {
            candidates.remove(reviewer);
        }
        tracing::debug!(
            pull_request_id = %id,
            team_name = %team.name(),
            candidates = candidates.len(),
            "replacement candidates"
        );
        let replacement = self
            .selector
            .pick_replacement(&candidates)
            .ok_or_else(|| {
                tracing::warn!(
                    pull_request_id = %id,
                    reviewer_id = %old_reviewer,
                    "no replacement candidate"
                );
                ServiceError::NoCandidate {
                    pull_request_id: id.clone(),
                    reviewer_id: old_reviewer.clone(),
                }
            })?;

        match self
            .pull_requests
            .change_reviewer(&id, &old_reviewer, &replacement)
            .await
        {
            Ok(()) => {}
            Err(PullRequestRepositoryError::ReviewerLinkNotFound { .. }) => {
                tracing::warn!(
                    pull_request_id = %id,
                    reviewer_id = %old_reviewer,
                    "reviewer link vanished before swap"
                );
                return Err(ServiceError::not_found(
                    Resource::ReviewerLink,
                    format!("{id}/{old_reviewer}"),
                ));
            }
            Err(err) => return Err(ServiceError::fault("failed to reassign reviewer", err)),
        }

        pull_request.replace_reviewer(&old_reviewer, replacement.clone())?;
        tracing::info!(
            pull_request_id = %id,
            old_reviewer_id = %old_reviewer,
            new_reviewer_id = %replacement,
            "reviewer reassigned"
        );
        Ok(ReassignmentOutcome {
            pull_request,
            replaced_by: replacement,
        })
    }

    async fn load(&self, id: &PullRequestId) -> Result<PullRequest, ServiceError> {
        self.pull_requests
            .find_by_id(id)
            .await
            .map_err(|err| ServiceError::fault("failed to load pull request", err))?
            .ok_or_else(|| {
                tracing::warn!(pull_request_id = %id, "pull request not found");
                ServiceError::not_found(Resource::PullRequest, id)
            })
    }
}

fn parse_create(
    request: CreatePullRequestRequest,
) -> Result<(PullRequestId, String, UserId), ServiceError> {
    let CreatePullRequestRequest {
        pull_request_id,
        name,
        author_id,
    } = request;
    let id = PullRequestId::new(pull_request_id)?;
    if name.trim().is_empty() {
        return Err(ReviewDomainError::EmptyPullRequestName.into());
    }
    let author = UserId::new(author_id)?;
    Ok((id, name, author))
}

//! In-memory pull request repository for tests and single-process use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::review::{
    domain::{
        PullRequest, PullRequestId, PullRequestReviewerCount, PullRequestSummary,
        ReviewDomainError, ReviewerAssignmentCount,
    },
    ports::{PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult},
};
use crate::roster::domain::UserId;

/// Thread-safe in-memory pull request repository.
///
/// Every mutation runs under a single write lock, which gives the same
/// all-or-nothing behaviour as the transactional adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPullRequestRepository {
    state: Arc<RwLock<HashMap<PullRequestId, PullRequest>>>,
}

impl InMemoryPullRequestRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> PullRequestRepositoryResult<RwLockReadGuard<'_, HashMap<PullRequestId, PullRequest>>> {
        self.state.read().map_err(|err| {
            PullRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> PullRequestRepositoryResult<RwLockWriteGuard<'_, HashMap<PullRequestId, PullRequest>>> {
        self.state.write().map_err(|err| {
            PullRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryPullRequestRepository {
    async fn create(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let mut state = self.write()?;
        if state.contains_key(pull_request.id()) {
            return Err(PullRequestRepositoryError::DuplicatePullRequest(
                pull_request.id().clone(),
            ));
        }
        state.insert(pull_request.id().clone(), pull_request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> PullRequestRepositoryResult<Option<PullRequest>> {
        let state = self.read()?;
        Ok(state.get(id).cloned())
    }

    async fn merge(
        &self,
        id: &PullRequestId,
        merged_at: DateTime<Utc>,
    ) -> PullRequestRepositoryResult<DateTime<Utc>> {
        let mut state = self.write()?;
        let pull_request = state
            .get_mut(id)
            .ok_or_else(|| PullRequestRepositoryError::NotFound(id.clone()))?;
        pull_request.record_merge(merged_at);
        Ok(pull_request.merged_at().unwrap_or(merged_at))
    }

    async fn change_reviewer(
        &self,
        id: &PullRequestId,
        old_reviewer: &UserId,
        new_reviewer: &UserId,
    ) -> PullRequestRepositoryResult<()> {
        let link_missing = || PullRequestRepositoryError::ReviewerLinkNotFound {
            pull_request_id: id.clone(),
            reviewer_id: old_reviewer.clone(),
        };
        let mut state = self.write()?;
        let pull_request = state.get_mut(id).ok_or_else(link_missing)?;
        // Only links of open pull requests are rewritable.
        pull_request
            .replace_reviewer(old_reviewer, new_reviewer.clone())
            .map_err(|err| match err {
                ReviewDomainError::ReviewerNotAssigned { .. }
                | ReviewDomainError::AlreadyMerged(_) => link_missing(),
                other => PullRequestRepositoryError::persistence(other),
            })
    }

    async fn find_by_reviewer(
        &self,
        reviewer: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequestSummary>> {
        let state = self.read()?;
        let mut summaries: Vec<PullRequestSummary> = state
            .values()
            .filter(|pull_request| pull_request.has_reviewer(reviewer))
            .map(PullRequest::summary)
            .collect();
        summaries.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(summaries)
    }

    async fn reviewer_assignment_counts(
        &self,
    ) -> PullRequestRepositoryResult<Vec<ReviewerAssignmentCount>> {
        let state = self.read()?;
        let mut counts: BTreeMap<UserId, u64> = BTreeMap::new();
        for reviewer in state
            .values()
            .flat_map(|pull_request| pull_request.assigned_reviewers())
        {
            *counts.entry(reviewer.clone()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(reviewer_id, assigned_count)| ReviewerAssignmentCount {
                reviewer_id,
                assigned_count,
            })
            .collect())
    }

    async fn reviewer_counts_by_pull_request(
        &self,
    ) -> PullRequestRepositoryResult<Vec<PullRequestReviewerCount>> {
        let state = self.read()?;
        Ok(state
            .values()
            .map(|pull_request| PullRequestReviewerCount {
                pull_request: pull_request.summary(),
                reviewer_count: pull_request.assigned_reviewers().len() as u64,
            })
            .collect())
    }
}

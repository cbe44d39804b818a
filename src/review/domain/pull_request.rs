//! Pull request aggregate root and lifecycle rules.

use super::{ParsePullRequestStatusError, PullRequestId, ReviewDomainError};
use crate::roster::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of reviewers assigned to a single pull request.
pub const MAX_REVIEWERS: usize = 2;

/// Pull request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    /// Under review; reviewers may still be swapped.
    Open,
    /// Merged; terminal.
    Merged,
}

impl PullRequestStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl TryFrom<&str> for PullRequestStatus {
    type Error = ParsePullRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            _ => Err(ParsePullRequestStatusError(value.to_owned())),
        }
    }
}

/// Pull request with its assigned reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(rename = "pull_request_id")]
    id: PullRequestId,
    #[serde(rename = "pull_request_name")]
    name: String,
    author_id: UserId,
    status: PullRequestStatus,
    assigned_reviewers: Vec<UserId>,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none")]
    merged_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPullRequestData {
    /// Persisted identifier.
    pub id: PullRequestId,
    /// Persisted name.
    pub name: String,
    /// Persisted author.
    pub author_id: UserId,
    /// Persisted lifecycle status.
    pub status: PullRequestStatus,
    /// Persisted reviewers in assignment order.
    pub assigned_reviewers: Vec<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted merge timestamp, if merged.
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Opens a new pull request with the given reviewers.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError`] when the name is blank, more than
    /// [`MAX_REVIEWERS`] reviewers are given, a reviewer repeats, or the
    /// author is among the reviewers.
    pub fn open(
        id: PullRequestId,
        name: impl Into<String>,
        author_id: UserId,
        reviewers: Vec<UserId>,
        clock: &impl Clock,
    ) -> Result<Self, ReviewDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(ReviewDomainError::EmptyPullRequestName);
        }
        if reviewers.len() > MAX_REVIEWERS {
            return Err(ReviewDomainError::TooManyReviewers {
                pull_request_id: id,
                count: reviewers.len(),
            });
        }

        let mut seen = HashSet::with_capacity(reviewers.len());
        for reviewer in &reviewers {
            if *reviewer == author_id {
                return Err(ReviewDomainError::AuthorAsReviewer {
                    pull_request_id: id,
                    author_id,
                });
            }
            if !seen.insert(reviewer) {
                return Err(ReviewDomainError::DuplicateReviewer {
                    pull_request_id: id,
                    reviewer_id: reviewer.clone(),
                });
            }
        }

        Ok(Self {
            id,
            name: trimmed.to_owned(),
            author_id,
            status: PullRequestStatus::Open,
            assigned_reviewers: reviewers,
            created_at: clock.utc(),
            merged_at: None,
        })
    }

    /// Reconstructs a pull request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPullRequestData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            author_id: data.author_id,
            status: data.status,
            assigned_reviewers: data.assigned_reviewers,
            created_at: data.created_at,
            merged_at: data.merged_at,
        }
    }

    /// Returns the pull request identifier.
    #[must_use]
    pub const fn id(&self) -> &PullRequestId {
        &self.id
    }

    /// Returns the pull request name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> PullRequestStatus {
        self.status
    }

    /// Returns whether the pull request has been merged.
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self.status, PullRequestStatus::Merged)
    }

    /// Returns the assigned reviewers in assignment order.
    #[must_use]
    pub fn assigned_reviewers(&self) -> &[UserId] {
        &self.assigned_reviewers
    }

    /// Returns whether `user_id` is currently a reviewer.
    #[must_use]
    pub fn has_reviewer(&self, user_id: &UserId) -> bool {
        self.assigned_reviewers.contains(user_id)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the merge timestamp, if merged.
    #[must_use]
    pub const fn merged_at(&self) -> Option<DateTime<Utc>> {
        self.merged_at
    }

    /// Returns the short form used in listings.
    #[must_use]
    pub fn summary(&self) -> PullRequestSummary {
        PullRequestSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }

    /// Records the merge at `merged_at`.
    ///
    /// Returns `false` and leaves the pull request untouched when it was
    /// already merged, so the first merge timestamp always wins.
    pub fn record_merge(&mut self, merged_at: DateTime<Utc>) -> bool {
        if self.is_merged() {
            return false;
        }
        self.status = PullRequestStatus::Merged;
        self.merged_at = Some(merged_at);
        true
    }

    /// Checks that `reviewer_id` may be replaced on this pull request.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::AlreadyMerged`] for merged pull requests
    /// and [`ReviewDomainError::ReviewerNotAssigned`] when the reviewer is not
    /// on it.
    pub fn ensure_replaceable(&self, reviewer_id: &UserId) -> Result<(), ReviewDomainError> {
        if self.is_merged() {
            return Err(ReviewDomainError::AlreadyMerged(self.id.clone()));
        }
        if !self.has_reviewer(reviewer_id) {
            return Err(ReviewDomainError::ReviewerNotAssigned {
                pull_request_id: self.id.clone(),
                reviewer_id: reviewer_id.clone(),
            });
        }
        Ok(())
    }

    /// Swaps `old_reviewer` for `new_reviewer` in place.
    ///
    /// The new reviewer takes the old reviewer's position, so the reviewer
    /// count never changes.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::ensure_replaceable`], plus
    /// [`ReviewDomainError::AuthorAsReviewer`] or
    /// [`ReviewDomainError::DuplicateReviewer`] when the replacement is not
    /// eligible.
    pub fn replace_reviewer(
        &mut self,
        old_reviewer: &UserId,
        new_reviewer: UserId,
    ) -> Result<(), ReviewDomainError> {
        self.ensure_replaceable(old_reviewer)?;
        if new_reviewer == self.author_id {
            return Err(ReviewDomainError::AuthorAsReviewer {
                pull_request_id: self.id.clone(),
                author_id: new_reviewer,
            });
        }
        if self.has_reviewer(&new_reviewer) {
            return Err(ReviewDomainError::DuplicateReviewer {
                pull_request_id: self.id.clone(),
                reviewer_id: new_reviewer,
            });
        }

        if let Some(slot) = self
            .assigned_reviewers
            .iter_mut()
            .find(|reviewer| **reviewer == *old_reviewer)
        {
            *slot = new_reviewer;
        }
        Ok(())
    }
}

/// Short form of a pull request used by listings and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// Pull request identifier.
    #[serde(rename = "pull_request_id")]
    pub id: PullRequestId,
    /// Pull request name.
    #[serde(rename = "pull_request_name")]
    pub name: String,
    /// Author of the pull request.
    pub author_id: UserId,
    /// Lifecycle status.
    pub status: PullRequestStatus,
}

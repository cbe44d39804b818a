//! Caller-facing error taxonomy shared by every service.
//!
//! Domain-classified failures keep their code and message all the way to the
//! caller. Anything unclassified becomes [`ServiceError::Fault`], which is
//! logged in full where it is raised and rendered to callers as an opaque
//! internal error.

use crate::review::domain::{PullRequestId, ReviewDomainError};
use crate::roster::domain::{RosterDomainError, TeamName, UserId};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "internal server error";

/// Machine-readable error codes exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A referenced user, team, or pull request does not exist.
    NotFound,
    /// The team name is already registered.
    TeamExists,
    /// The pull request id is already taken.
    #[serde(rename = "PR_EXISTS")]
    PullRequestExists,
    /// The pull request is merged and can no longer change.
    #[serde(rename = "PR_MERGED")]
    PullRequestMerged,
    /// The reviewer to replace is not assigned to the pull request.
    NotAssigned,
    /// No eligible replacement reviewer exists.
    NoCandidate,
    /// The request is structurally invalid.
    BadRequest,
    /// An unclassified infrastructure failure.
    InternalError,
}

impl ErrorCode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::TeamExists => "TEAM_EXISTS",
            Self::PullRequestExists => "PR_EXISTS",
            Self::PullRequestMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
            Self::BadRequest => "BAD_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Returns whether the code denotes a state conflict.
    #[must_use]
    pub const fn is_conflict(self) -> bool {
        matches!(
            self,
            Self::TeamExists
                | Self::PullRequestExists
                | Self::PullRequestMerged
                | Self::NotAssigned
                | Self::NoCandidate
        )
    }

    /// Returns the HTTP status an HTTP host should answer with.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::InternalError => 500,
            Self::TeamExists
            | Self::PullRequestExists
            | Self::PullRequestMerged
            | Self::NotAssigned
            | Self::NoCandidate => 409,
        }
    }
}

/// Kind of resource a [`ServiceError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A user.
    User,
    /// A team.
    Team,
    /// A pull request.
    PullRequest,
    /// A reviewer link between a pull request and a user.
    ReviewerLink,
}

impl Resource {
    const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Team => "team",
            Self::PullRequest => "pull request",
            Self::ReviewerLink => "reviewer assignment",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors returned by the application services.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// A referenced entity does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of the missing entity.
        resource: Resource,
        /// Identifier that was looked up.
        id: String,
    },

    /// The team name is already registered.
    #[error("team {0} already exists")]
    TeamExists(TeamName),

    /// The pull request id collides with an existing pull request.
    #[error("pull request {0} already exists")]
    PullRequestExists(PullRequestId),

    /// A mutation was attempted on a merged pull request.
    #[error("cannot reassign on merged pull request {0}")]
    PullRequestMerged(PullRequestId),

    /// The reviewer to replace is not assigned to the pull request.
    #[error("reviewer {reviewer_id} is not assigned to pull request {pull_request_id}")]
    ReviewerNotAssigned {
        /// Pull request being modified.
        pull_request_id: PullRequestId,
        /// Reviewer that was expected on it.
        reviewer_id: UserId,
    },

    /// No active replacement candidate exists in the reviewer's team.
    #[error("no active replacement candidate for reviewer {reviewer_id} on pull request {pull_request_id}")]
    NoCandidate {
        /// Pull request being modified.
        pull_request_id: PullRequestId,
        /// Reviewer that could not be replaced.
        reviewer_id: UserId,
    },

    /// The request is structurally invalid.
    #[error("invalid input: {0}")]
    BadRequest(String),

    /// An unclassified infrastructure failure.
    #[error("{context}: {source}")]
    Fault {
        /// Operation that failed.
        context: &'static str,
        /// Underlying failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl ServiceError {
    /// Creates a not-found error for the given resource.
    #[must_use]
    pub fn not_found(resource: Resource, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Wraps an unclassified failure and logs it with full detail.
    #[must_use]
    pub fn fault(
        context: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        tracing::error!(context, error = %err, "unclassified service failure");
        Self::Fault {
            context,
            source: Arc::new(err),
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::TeamExists(_) => ErrorCode::TeamExists,
            Self::PullRequestExists(_) => ErrorCode::PullRequestExists,
            Self::PullRequestMerged(_) => ErrorCode::PullRequestMerged,
            Self::ReviewerNotAssigned { .. } => ErrorCode::NotAssigned,
            Self::NoCandidate { .. } => ErrorCode::NoCandidate,
            Self::BadRequest(_) => ErrorCode::BadRequest,
            Self::Fault { .. } => ErrorCode::InternalError,
        }
    }

    /// Returns the message that is safe to show to callers.
    ///
    /// Faults never leak their underlying detail.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Fault { .. } => INTERNAL_MESSAGE.to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<RosterDomainError> for ServiceError {
    fn from(err: RosterDomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ReviewDomainError> for ServiceError {
    fn from(err: ReviewDomainError) -> Self {
        match err {
            ReviewDomainError::AlreadyMerged(pull_request_id) => {
                Self::PullRequestMerged(pull_request_id)
            }
            ReviewDomainError::ReviewerNotAssigned {
                pull_request_id,
                reviewer_id,
            } => Self::ReviewerNotAssigned {
                pull_request_id,
                reviewer_id,
            },
            other => Self::BadRequest(other.to_string()),
        }
    }
}

/// Serializable `{"error": {"code", "message"}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Error payload.
    pub error: ErrorBody,
}

/// Code and message of an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Caller-safe message.
    pub message: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: ErrorBody {
                code: err.code(),
                message: err.public_message(),
            },
        }
    }
}

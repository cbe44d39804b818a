//! Read models for reviewer assignment statistics.

use super::PullRequestSummary;
use crate::roster::domain::UserId;
use serde::{Deserialize, Serialize};

/// Number of pull requests a user is assigned to review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerAssignmentCount {
    /// Reviewer identifier.
    #[serde(rename = "user_id")]
    pub reviewer_id: UserId,
    /// Number of reviewer links held by the user.
    pub assigned_count: u64,
}

/// Number of reviewers currently assigned to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestReviewerCount {
    /// The pull request.
    #[serde(flatten)]
    pub pull_request: PullRequestSummary,
    /// Number of assigned reviewers.
    pub reviewer_count: u64,
}

//! Diesel row models for pull request persistence.

use super::schema::{pr_reviewers, pull_requests};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert model for pull request records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pull_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PullRequestRow {
    /// External pull request identifier.
    pub pull_request_id: String,
    /// Display name.
    pub pull_request_name: String,
    /// Author user identifier.
    pub author_id: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Merge timestamp.
    pub merged_at: Option<DateTime<Utc>>,
}

/// Insert model for reviewer links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pr_reviewers)]
pub struct ReviewerLinkRow {
    /// Reviewed pull request.
    pub pr_id: String,
    /// Assigned reviewer.
    pub reviewer_id: String,
    /// Assignment position.
    pub slot: i16,
}

//! `PostgreSQL` repository implementation for pull requests.

use super::{
    models::{PullRequestRow, ReviewerLinkRow},
    schema::{pr_reviewers, pull_requests},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::review::{
    domain::{
        PersistedPullRequestData, PullRequest, PullRequestId, PullRequestReviewerCount,
        PullRequestStatus, PullRequestSummary, ReviewerAssignmentCount,
    },
    ports::{PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult},
};
use crate::roster::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed pull request repository.
#[derive(Debug, Clone)]
pub struct PostgresPullRequestRepository {
    pool: PgPool,
}

impl PostgresPullRequestRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PullRequestRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PullRequestRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection =
                    get_conn_with(&pool, PullRequestRepositoryError::persistence)?;
                f(&mut connection)
            },
            PullRequestRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for PullRequestRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl PullRequestRepository for PostgresPullRequestRepository {
    async fn create(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let id = pull_request.id().clone();
        let row = to_row(pull_request);
        let links = to_link_rows(pull_request)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, PullRequestRepositoryError, _>(|tx| {
                diesel::insert_into(pull_requests::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            PullRequestRepositoryError::DuplicatePullRequest(id.clone())
                        }
                        other => PullRequestRepositoryError::persistence(other),
                    })?;

                if !links.is_empty() {
                    diesel::insert_into(pr_reviewers::table)
                        .values(&links)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> PullRequestRepositoryResult<Option<PullRequest>> {
        let lookup = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = pull_requests::table
                .filter(pull_requests::pull_request_id.eq(&lookup))
                .select(PullRequestRow::as_select())
                .first::<PullRequestRow>(connection)
                .optional()?;
            let Some(found) = row else {
                return Ok(None);
            };
            let reviewers = pr_reviewers::table
                .filter(pr_reviewers::pr_id.eq(&lookup))
                .order(pr_reviewers::slot.asc())
                .select(pr_reviewers::reviewer_id)
                .load::<String>(connection)?;
            row_to_pull_request(found, reviewers).map(Some)
        })
        .await
    }

    async fn merge(
        &self,
        id: &PullRequestId,
        merged_at: DateTime<Utc>,
    ) -> PullRequestRepositoryResult<DateTime<Utc>> {
        let target = id.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, PullRequestRepositoryError, _>(|tx| {
                let merged = PullRequestStatus::Merged.as_str();
                diesel::update(
                    pull_requests::table
                        .filter(pull_requests::pull_request_id.eq(target.as_str()))
                        .filter(pull_requests::status.ne(merged)),
                )
                .set((
                    pull_requests::status.eq(merged),
                    pull_requests::merged_at.eq(Some(merged_at)),
                ))
                .execute(tx)?;

                let stored = pull_requests::table
                    .filter(pull_requests::pull_request_id.eq(target.as_str()))
                    .select(pull_requests::merged_at)
                    .first::<Option<DateTime<Utc>>>(tx)
                    .optional()?
                    .ok_or_else(|| PullRequestRepositoryError::NotFound(target.clone()))?;
                Ok(stored.unwrap_or(merged_at))
            })
        })
        .await
    }

    async fn change_reviewer(
        &self,
        id: &PullRequestId,
        old_reviewer: &UserId,
        new_reviewer: &UserId,
    ) -> PullRequestRepositoryResult<()> {
        let target = id.clone();
        let old_id = old_reviewer.clone();
        let new_id = new_reviewer.as_str().to_owned();
        self.run_blocking(move |connection| {
            let link_missing = || PullRequestRepositoryError::ReviewerLinkNotFound {
                pull_request_id: target.clone(),
                reviewer_id: old_id.clone(),
            };
            connection.transaction::<_, PullRequestRepositoryError, _>(|tx| {
                // Row lock serialises the swap against a concurrent merge.
                let status = pull_requests::table
                    .filter(pull_requests::pull_request_id.eq(target.as_str()))
                    .select(pull_requests::status)
                    .for_update()
                    .first::<String>(tx)
                    .optional()?;
                if status.as_deref() != Some(PullRequestStatus::Open.as_str()) {
                    return Err(link_missing());
                }

                let updated = diesel::update(
                    pr_reviewers::table
                        .filter(pr_reviewers::pr_id.eq(target.as_str()))
                        .filter(pr_reviewers::reviewer_id.eq(old_id.as_str())),
                )
                .set(pr_reviewers::reviewer_id.eq(&new_id))
                .execute(tx)?;
                if updated == 0 {
                    return Err(link_missing());
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_reviewer(
        &self,
        reviewer: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequestSummary>> {
        let lookup = reviewer.as_str().to_owned();
        self.run_blocking(move |connection| {
            let pull_request_ids = pr_reviewers::table
                .filter(pr_reviewers::reviewer_id.eq(&lookup))
                .select(pr_reviewers::pr_id)
                .load::<String>(connection)?;
            let rows = pull_requests::table
                .filter(pull_requests::pull_request_id.eq_any(pull_request_ids))
                .order(pull_requests::pull_request_id.asc())
                .select(PullRequestRow::as_select())
                .load::<PullRequestRow>(connection)?;
            rows.into_iter().map(row_to_summary).collect()
        })
        .await
    }

    async fn reviewer_assignment_counts(
        &self,
    ) -> PullRequestRepositoryResult<Vec<ReviewerAssignmentCount>> {
        self.run_blocking(|connection| {
            let rows = pr_reviewers::table
                .group_by(pr_reviewers::reviewer_id)
                .select((pr_reviewers::reviewer_id, count_star()))
                .load::<(String, i64)>(connection)?;
            rows.into_iter()
                .map(|(reviewer_id, count)| {
                    Ok(ReviewerAssignmentCount {
                        reviewer_id: UserId::new(reviewer_id)
                            .map_err(PullRequestRepositoryError::persistence)?,
                        assigned_count: u64::try_from(count)
                            .map_err(PullRequestRepositoryError::persistence)?,
                    })
                })
                .collect()
        })
        .await
    }

    async fn reviewer_counts_by_pull_request(
        &self,
    ) -> PullRequestRepositoryResult<Vec<PullRequestReviewerCount>> {
        self.run_blocking(|connection| {
            let counts: HashMap<String, i64> = pr_reviewers::table
                .group_by(pr_reviewers::pr_id)
                .select((pr_reviewers::pr_id, count_star()))
                .load::<(String, i64)>(connection)?
                .into_iter()
                .collect();
            let rows = pull_requests::table
                .order(pull_requests::pull_request_id.asc())
                .select(PullRequestRow::as_select())
                .load::<PullRequestRow>(connection)?;

            rows.into_iter()
                .map(|row| {
                    let count = counts.get(&row.pull_request_id).copied().unwrap_or_default();
                    Ok(PullRequestReviewerCount {
                        pull_request: row_to_summary(row)?,
                        reviewer_count: u64::try_from(count)
                            .map_err(PullRequestRepositoryError::persistence)?,
                    })
                })
                .collect()
        })
        .await
    }
}

fn to_row(pull_request: &PullRequest) -> PullRequestRow {
    PullRequestRow {
        pull_request_id: pull_request.id().as_str().to_owned(),
        pull_request_name: pull_request.name().to_owned(),
        author_id: pull_request.author_id().as_str().to_owned(),
        status: pull_request.status().as_str().to_owned(),
        created_at: pull_request.created_at(),
        merged_at: pull_request.merged_at(),
    }
}

fn to_link_rows(pull_request: &PullRequest) -> PullRequestRepositoryResult<Vec<ReviewerLinkRow>> {
    pull_request
        .assigned_reviewers()
        .iter()
        .enumerate()
        .map(|(position, reviewer)| {
            Ok(ReviewerLinkRow {
                pr_id: pull_request.id().as_str().to_owned(),
                reviewer_id: reviewer.as_str().to_owned(),
                slot: i16::try_from(position).map_err(PullRequestRepositoryError::persistence)?,
            })
        })
        .collect()
}

fn row_to_pull_request(
    row: PullRequestRow,
    reviewers: Vec<String>,
) -> PullRequestRepositoryResult<PullRequest> {
    let PullRequestRow {
        pull_request_id,
        pull_request_name,
        author_id,
        status: persisted_status,
        created_at,
        merged_at,
    } = row;

    let assigned_reviewers = reviewers
        .into_iter()
        .map(|reviewer| UserId::new(reviewer).map_err(PullRequestRepositoryError::persistence))
        .collect::<PullRequestRepositoryResult<Vec<_>>>()?;
    let data = PersistedPullRequestData {
        id: PullRequestId::new(pull_request_id).map_err(PullRequestRepositoryError::persistence)?,
        name: pull_request_name,
        author_id: UserId::new(author_id).map_err(PullRequestRepositoryError::persistence)?,
        status: PullRequestStatus::try_from(persisted_status.as_str())
            .map_err(PullRequestRepositoryError::persistence)?,
        assigned_reviewers,
        created_at,
        merged_at,
    };
    Ok(PullRequest::from_persisted(data))
}

fn row_to_summary(row: PullRequestRow) -> PullRequestRepositoryResult<PullRequestSummary> {
    Ok(PullRequestSummary {
        id: PullRequestId::new(row.pull_request_id)
            .map_err(PullRequestRepositoryError::persistence)?,
        name: row.pull_request_name,
        author_id: UserId::new(row.author_id).map_err(PullRequestRepositoryError::persistence)?,
        status: PullRequestStatus::try_from(row.status.as_str())
            .map_err(PullRequestRepositoryError::persistence)?,
    })
}

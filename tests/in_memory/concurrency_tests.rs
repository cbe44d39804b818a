//! Concurrent and cancelled workflow calls.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::helpers::{App, app};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use review_assigner::error::ErrorCode;
use review_assigner::review::{
    adapters::memory::InMemoryPullRequestRepository,
    domain::{
        OrderedReviewerSelector, PullRequest, PullRequestId, PullRequestReviewerCount,
        PullRequestSummary, ReviewerAssignmentCount,
    },
    ports::{PullRequestRepository, PullRequestRepositoryResult},
    services::{
        CreatePullRequestRequest, MergePullRequestRequest, PullRequestWorkflowService,
        ReassignReviewerRequest,
    },
};
use review_assigner::roster::{
    adapters::memory::InMemoryDirectory,
    domain::UserId,
    services::{CreateTeamRequest, TeamMemberInput, TeamService},
};
use rstest::rstest;

/// In-memory store whose writes park forever while `stalled` is set.
#[derive(Default)]
struct StallingStore {
    inner: InMemoryPullRequestRepository,
    stalled: AtomicBool,
    parked: AtomicUsize,
}

impl StallingStore {
    async fn park_if_stalled(&self) {
        if self.stalled.load(Ordering::SeqCst) {
            self.parked.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<()>().await;
        }
    }

    async fn stored(&self, id: &str) -> Option<PullRequest> {
        self.inner
            .find_by_id(&PullRequestId::new(id).expect("valid pull request id"))
            .await
            .expect("lookup should succeed")
    }
}

#[async_trait]
impl PullRequestRepository for StallingStore {
    async fn create(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        self.park_if_stalled().await;
        self.inner.create(pull_request).await
    }

    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> PullRequestRepositoryResult<Option<PullRequest>> {
        self.inner.find_by_id(id).await
    }

    async fn merge(
        &self,
        id: &PullRequestId,
        merged_at: DateTime<Utc>,
    ) -> PullRequestRepositoryResult<DateTime<Utc>> {
        self.park_if_stalled().await;
        self.inner.merge(id, merged_at).await
    }

    async fn change_reviewer(
        &self,
        id: &PullRequestId,
        old_reviewer: &UserId,
        new_reviewer: &UserId,
    ) -> PullRequestRepositoryResult<()> {
        self.park_if_stalled().await;
        self.inner
            .change_reviewer(id, old_reviewer, new_reviewer)
            .await
    }

    async fn find_by_reviewer(
        &self,
        reviewer: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequestSummary>> {
        self.inner.find_by_reviewer(reviewer).await
    }

    async fn reviewer_assignment_counts(
        &self,
    ) -> PullRequestRepositoryResult<Vec<ReviewerAssignmentCount>> {
        self.inner.reviewer_assignment_counts().await
    }

    async fn reviewer_counts_by_pull_request(
        &self,
    ) -> PullRequestRepositoryResult<Vec<PullRequestReviewerCount>> {
        self.inner.reviewer_counts_by_pull_request().await
    }
}

type StallingWorkflow =
    PullRequestWorkflowService<StallingStore, InMemoryDirectory, InMemoryDirectory, DefaultClock>;

async fn stalling_workflow(member_ids: &[&str]) -> (StallingWorkflow, Arc<StallingStore>) {
    let directory = Arc::new(InMemoryDirectory::new());
    let members = member_ids
        .iter()
        .map(|id| TeamMemberInput::new(*id, format!("User {id}"), Some(true)));
    TeamService::new(Arc::clone(&directory))
        .create_team(CreateTeamRequest::new("backend", members))
        .await
        .expect("team registration should succeed");
    let store = Arc::new(StallingStore::default());
    let workflow = PullRequestWorkflowService::new(
        Arc::clone(&store),
        Arc::clone(&directory),
        directory,
        Arc::new(DefaultClock),
    )
    .with_selector(Arc::new(OrderedReviewerSelector));
    (workflow, store)
}

/// Polls `operation` once, then drops it.
async fn abandon_after_first_poll<F: Future>(operation: F) {
    tokio::select! {
        biased;
        _ = operation => panic!("operation should still be waiting on the store"),
        () = std::future::ready(()) => {}
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_creates_admit_exactly_one(app: App) {
    app.register_active("backend", &["a", "r1", "r2"]).await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let racer = app.clone();
            tokio::spawn(async move {
                racer
                    .workflow
                    .create(CreatePullRequestRequest::new("pr-1", "x", "a"))
                    .await
            })
        })
        .collect();
    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            Ok(_) => created += 1,
            Err(err) => {
                assert_eq!(err.code(), ErrorCode::PullRequestExists);
                conflicts += 1;
            }
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_merges_agree_on_timestamp(app: App) {
    app.register_active("backend", &["a", "r1"]).await;
    app.workflow
        .create(CreatePullRequestRequest::new("pr-1", "x", "a"))
        .await
        .expect("create should succeed");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let racer = app.clone();
            tokio::spawn(async move {
                racer
                    .workflow
                    .merge(MergePullRequestRequest::new("pr-1"))
                    .await
            })
        })
        .collect();
    let mut timestamps = Vec::new();
    for handle in handles {
        let merged = handle
            .await
            .expect("task should not panic")
            .expect("merge should succeed");
        timestamps.push(merged.merged_at());
    }

    timestamps.dedup();
    assert_eq!(timestamps.len(), 1);
    assert!(timestamps.first().is_some_and(Option::is_some));
}

#[tokio::test(flavor = "multi_thread")]
async fn abandoned_create_writes_nothing() {
    let (workflow, store) = stalling_workflow(&["a", "r1", "r2"]).await;
    store.stalled.store(true, Ordering::SeqCst);

    abandon_after_first_poll(workflow.create(CreatePullRequestRequest::new("pr-1", "x", "a")))
        .await;

    assert_eq!(store.parked.load(Ordering::SeqCst), 1);
    assert!(store.stored("pr-1").await.is_none());

    store.stalled.store(false, Ordering::SeqCst);
    let created = workflow
        .create(CreatePullRequestRequest::new("pr-1", "x", "a"))
        .await
        .expect("retry after abandonment should succeed");
    let stored = store.stored("pr-1").await.expect("pull request exists");
    assert_eq!(stored.assigned_reviewers(), created.assigned_reviewers());
    assert_eq!(stored.assigned_reviewers().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn abandoned_reassign_keeps_original_reviewers() {
    let (workflow, store) = stalling_workflow(&["a", "r1", "r2", "r3"]).await;
    let created = workflow
        .create(CreatePullRequestRequest::new("pr-1", "x", "a"))
        .await
        .expect("create should succeed");
    store.stalled.store(true, Ordering::SeqCst);

    abandon_after_first_poll(workflow.reassign(ReassignReviewerRequest::new("pr-1", "r1")))
        .await;

    assert_eq!(store.parked.load(Ordering::SeqCst), 1);
    let untouched = store.stored("pr-1").await.expect("pull request exists");
    assert_eq!(untouched.assigned_reviewers(), created.assigned_reviewers());

    store.stalled.store(false, Ordering::SeqCst);
    let outcome = workflow
        .reassign(ReassignReviewerRequest::new("pr-1", "r1"))
        .await
        .expect("retry after abandonment should succeed");
    let stored = store.stored("pr-1").await.expect("pull request exists");
    assert_eq!(outcome.replaced_by.as_str(), "r3");
    assert_eq!(stored.assigned_reviewers(), outcome.pull_request.assigned_reviewers());
}

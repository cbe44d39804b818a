//! Shared world state for pull request workflow BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use review_assigner::error::ServiceError;
use review_assigner::review::{
    adapters::memory::InMemoryPullRequestRepository,
    domain::{OrderedReviewerSelector, PullRequest},
    services::{PullRequestWorkflowService, ReassignmentOutcome},
};
use review_assigner::roster::{adapters::memory::InMemoryDirectory, services::TeamService};
use rstest::fixture;

/// Workflow service type used by the BDD world.
pub type TestWorkflow = PullRequestWorkflowService<
    InMemoryPullRequestRepository,
    InMemoryDirectory,
    InMemoryDirectory,
    DefaultClock,
>;

/// Scenario world for pull request workflow behaviour tests.
pub struct ReviewWorld {
    pub teams: TeamService<InMemoryDirectory>,
    pub workflow: TestWorkflow,
    pub last_pull_request: Option<PullRequest>,
    pub last_reassignment: Option<ReassignmentOutcome>,
    pub merges: Vec<PullRequest>,
    pub last_error: Option<ServiceError>,
}

impl ReviewWorld {
    /// Creates a world with deterministic reviewer selection.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let workflow = PullRequestWorkflowService::new(
            Arc::new(InMemoryPullRequestRepository::new()),
            Arc::clone(&directory),
            Arc::clone(&directory),
            Arc::new(DefaultClock),
        )
        .with_selector(Arc::new(OrderedReviewerSelector));
        Self {
            teams: TeamService::new(directory),
            workflow,
            last_pull_request: None,
            last_reassignment: None,
            merges: Vec::new(),
            last_error: None,
        }
    }
}

impl Default for ReviewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReviewWorld {
    ReviewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument into trimmed ids.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

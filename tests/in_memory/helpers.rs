//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use review_assigner::review::{
    adapters::memory::InMemoryPullRequestRepository,
    domain::{OrderedReviewerSelector, ReviewerSelector},
    services::{PullRequestWorkflowService, ReviewQueryService},
};
use review_assigner::roster::{
    adapters::memory::InMemoryDirectory,
    domain::Team,
    services::{CreateTeamRequest, TeamMemberInput, TeamService, UserActivityService},
};
use rstest::fixture;

/// Workflow service over the in-memory adapters.
pub type Workflow = PullRequestWorkflowService<
    InMemoryPullRequestRepository,
    InMemoryDirectory,
    InMemoryDirectory,
    DefaultClock,
>;

/// Every service wired to one shared set of in-memory stores.
#[derive(Clone)]
pub struct App {
    pub teams: TeamService<InMemoryDirectory>,
    pub users: UserActivityService<InMemoryDirectory>,
    pub workflow: Workflow,
    pub queries: ReviewQueryService<InMemoryPullRequestRepository, InMemoryDirectory>,
    pub pull_requests: Arc<InMemoryPullRequestRepository>,
}

impl App {
    /// Builds the services around fresh stores and the given selector.
    #[must_use]
    pub fn with_selector(selector: Arc<dyn ReviewerSelector>) -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let pull_requests = Arc::new(InMemoryPullRequestRepository::new());
        Self {
            teams: TeamService::new(Arc::clone(&directory)),
            users: UserActivityService::new(Arc::clone(&directory)),
            workflow: PullRequestWorkflowService::new(
                Arc::clone(&pull_requests),
                Arc::clone(&directory),
                Arc::clone(&directory),
                Arc::new(DefaultClock),
            )
            .with_selector(selector),
            queries: ReviewQueryService::new(Arc::clone(&pull_requests), directory),
            pull_requests,
        }
    }

    /// Registers an all-active team.
    ///
    /// # Panics
    ///
    /// Panics when registration fails.
    pub async fn register_active(&self, name: &str, member_ids: &[&str]) -> Team {
        let members = member_ids
            .iter()
            .map(|id| TeamMemberInput::new(*id, format!("User {id}"), Some(true)));
        self.teams
            .create_team(CreateTeamRequest::new(name, members))
            .await
            .expect("team registration should succeed")
    }
}

/// Services using the production random selector.
#[fixture]
pub fn app() -> App {
    App::with_selector(Arc::new(review_assigner::review::domain::RandomReviewerSelector))
}

/// Services using deterministic selection.
#[fixture]
pub fn ordered_app() -> App {
    App::with_selector(Arc::new(OrderedReviewerSelector))
}

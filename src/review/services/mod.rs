//! Application services for the review workflow.

mod query;
mod workflow;

pub use query::ReviewQueryService;
pub use workflow::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestWorkflowService,
    ReassignReviewerRequest, ReassignmentOutcome,
};

//! Shared builders for review tests.

use crate::review::domain::{PullRequest, PullRequestId};
use crate::roster::{
    adapters::memory::InMemoryDirectory,
    domain::{Team, TeamMember, TeamName, UserId},
    ports::TeamDirectory,
};
use mockable::DefaultClock;

pub(super) fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

pub(super) fn pr_id(id: &str) -> PullRequestId {
    PullRequestId::new(id).expect("valid pull request id")
}

/// Builds a team from `(user_id, is_active)` pairs.
pub(super) fn team(name: &str, members: &[(&str, bool)]) -> Team {
    let built = members
        .iter()
        .map(|(id, is_active)| TeamMember::new(user(id), *id, *is_active).expect("valid member"))
        .collect();
    Team::new(TeamName::new(name).expect("valid team name"), built).expect("valid team")
}

pub(super) async fn register(directory: &InMemoryDirectory, name: &str, members: &[(&str, bool)]) {
    directory
        .create_team(&team(name, members))
        .await
        .expect("team registration should succeed");
}

pub(super) fn open_pull_request(id: &str, author: &str, reviewers: &[&str]) -> PullRequest {
    PullRequest::open(
        pr_id(id),
        "Add search",
        user(author),
        reviewers.iter().map(|reviewer| user(reviewer)).collect(),
        &DefaultClock,
    )
    .expect("valid pull request")
}

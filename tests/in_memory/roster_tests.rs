//! Team registration scenarios spanning several teams.

use super::helpers::{App, app};
use review_assigner::error::{ErrorCode, ErrorResponse};
use review_assigner::review::services::CreatePullRequestRequest;
use review_assigner::roster::services::{CreateTeamRequest, TeamMemberInput};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moved_member_is_reviewed_by_new_team(app: App) {
    app.register_active("backend", &["a", "b1"]).await;
    app.register_active("payments", &["a", "p1"]).await;

    let created = app
        .workflow
        .create(CreatePullRequestRequest::new("pr-1", "x", "a"))
        .await
        .expect("create should succeed");
    let backend = app
        .teams
        .get_team("backend")
        .await
        .expect("backend should still exist");

    let reviewers: Vec<&str> = created
        .assigned_reviewers()
        .iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(reviewers, vec!["p1"]);
    assert_eq!(backend.members().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_team_envelope_uses_conflict_code(app: App) {
    app.register_active("backend", &["a"]).await;

    let err = app
        .teams
        .create_team(CreateTeamRequest::new(
            "backend",
            vec![TeamMemberInput::new("b", "B", Some(true))],
        ))
        .await
        .expect_err("duplicate team should fail");
    let body = serde_json::to_value(ErrorResponse::from(&err)).expect("envelope serializes");

    assert_eq!(err.code(), ErrorCode::TeamExists);
    assert_eq!(body["error"]["code"], "TEAM_EXISTS");
    assert_eq!(body["error"]["message"], "team backend already exists");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn author_without_team_membership_is_not_found(app: App) {
    let err = app
        .workflow
        .create(CreatePullRequestRequest::new("pr-1", "x", "nobody"))
        .await
        .expect_err("unknown author should fail");
    assert_eq!(err.code().http_status(), 404);
}

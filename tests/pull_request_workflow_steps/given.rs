//! Given steps for pull request workflow BDD scenarios.

use super::world::{ReviewWorld, run_async, split_ids};
use eyre::WrapErr;
use review_assigner::review::services::{CreatePullRequestRequest, MergePullRequestRequest};
use review_assigner::roster::services::{CreateTeamRequest, TeamMemberInput};
use rstest_bdd_macros::given;

#[given(r#"team "{team}" with active members "{members}""#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn team_with_active_members(
    world: &mut ReviewWorld,
    team: String,
    members: String,
) -> Result<(), eyre::Report> {
    let inputs = split_ids(&members)
        .into_iter()
        .map(|id| TeamMemberInput::new(id.clone(), id, Some(true)));
    run_async(world.teams.create_team(CreateTeamRequest::new(team, inputs)))
        .wrap_err("register scenario team")?;
    Ok(())
}

#[given(r#""{author}" has opened pull request "{pull_request_id}" named "{name}""#)]
fn pull_request_already_open(
    world: &mut ReviewWorld,
    author: String,
    pull_request_id: String,
    name: String,
) -> Result<(), eyre::Report> {
    let created = run_async(world.workflow.create(CreatePullRequestRequest::new(
        pull_request_id,
        name,
        author,
    )))
    .wrap_err("open scenario pull request")?;
    world.last_pull_request = Some(created);
    Ok(())
}

#[given(r#"pull request "{pull_request_id}" has been merged"#)]
fn pull_request_already_merged(
    world: &mut ReviewWorld,
    pull_request_id: String,
) -> Result<(), eyre::Report> {
    let merged = run_async(
        world
            .workflow
            .merge(MergePullRequestRequest::new(pull_request_id)),
    )
    .wrap_err("merge scenario pull request")?;
    world.last_pull_request = Some(merged);
    Ok(())
}

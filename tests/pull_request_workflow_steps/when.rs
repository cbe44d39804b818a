//! When steps for pull request workflow BDD scenarios.

use super::world::{ReviewWorld, run_async};
use review_assigner::review::services::{
    CreatePullRequestRequest, MergePullRequestRequest, ReassignReviewerRequest,
};
use rstest_bdd_macros::when;

#[when(r#""{author}" opens pull request "{pull_request_id}" named "{name}""#)]
fn open_pull_request(
    world: &mut ReviewWorld,
    author: String,
    pull_request_id: String,
    name: String,
) {
    match run_async(world.workflow.create(CreatePullRequestRequest::new(
        pull_request_id,
        name,
        author,
    ))) {
        Ok(created) => world.last_pull_request = Some(created),
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#"reviewer "{reviewer}" is reassigned on pull request "{pull_request_id}""#)]
fn reassign_reviewer(world: &mut ReviewWorld, reviewer: String, pull_request_id: String) {
    match run_async(
        world
            .workflow
            .reassign(ReassignReviewerRequest::new(pull_request_id, reviewer)),
    ) {
        Ok(outcome) => world.last_reassignment = Some(outcome),
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#"pull request "{pull_request_id}" is merged twice"#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn merge_twice(world: &mut ReviewWorld, pull_request_id: String) -> Result<(), eyre::Report> {
    for _ in 0..2 {
        let merged = run_async(
            world
                .workflow
                .merge(MergePullRequestRequest::new(pull_request_id.clone())),
        )
        .map_err(|err| eyre::eyre!("merge failed: {err}"))?;
        world.merges.push(merged);
    }
    Ok(())
}

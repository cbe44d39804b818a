//! Then steps for pull request workflow BDD scenarios.

use super::world::{ReviewWorld, split_ids};
use review_assigner::review::domain::PullRequestStatus;
use rstest_bdd_macros::then;

#[then(r#"the pull request is open with {count:usize} reviewers drawn from "{pool}""#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn open_with_reviewers_from(
    world: &ReviewWorld,
    count: usize,
    pool: String,
) -> Result<(), eyre::Report> {
    let pull_request = world
        .last_pull_request
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing pull request in scenario world"))?;
    let allowed = split_ids(&pool);

    if pull_request.status() != PullRequestStatus::Open {
        return Err(eyre::eyre!("expected an open pull request"));
    }
    if pull_request.assigned_reviewers().len() != count {
        return Err(eyre::eyre!(
            "expected {count} reviewers, found {:?}",
            pull_request.assigned_reviewers()
        ));
    }
    if let Some(stray) = pull_request
        .assigned_reviewers()
        .iter()
        .find(|reviewer| !allowed.iter().any(|id| id == reviewer.as_str()))
    {
        return Err(eyre::eyre!("reviewer {stray} is outside {allowed:?}"));
    }
    Ok(())
}

#[then(r#"the replacement is one of "{pool}""#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn replacement_is_one_of(world: &ReviewWorld, pool: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_reassignment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing reassignment outcome, error: {:?}", world.last_error))?;
    let allowed = split_ids(&pool);

    if !allowed.iter().any(|id| id == outcome.replaced_by.as_str()) {
        return Err(eyre::eyre!(
            "replacement {} is outside {allowed:?}",
            outcome.replaced_by
        ));
    }
    Ok(())
}

#[then("the pull request keeps {count:usize} reviewers")]
fn keeps_reviewer_count(world: &ReviewWorld, count: usize) -> Result<(), eyre::Report> {
    let outcome = world
        .last_reassignment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing reassignment outcome in scenario world"))?;
    let found = outcome.pull_request.assigned_reviewers().len();
    if found != count {
        return Err(eyre::eyre!("expected {count} reviewers, found {found}"));
    }
    Ok(())
}

#[then("both merges report the same merge time")]
fn merges_share_timestamp(world: &ReviewWorld) -> Result<(), eyre::Report> {
    let [first, second] = world.merges.as_slice() else {
        return Err(eyre::eyre!("expected two merge results"));
    };
    if first.merged_at().is_none() || first.merged_at() != second.merged_at() {
        return Err(eyre::eyre!(
            "merge timestamps differ: {:?} vs {:?}",
            first.merged_at(),
            second.merged_at()
        ));
    }
    Ok(())
}

#[then(r#"the request fails with code "{code}""#)]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Step placeholders are captured as owned strings"
)]
fn request_fails_with_code(world: &ReviewWorld, code: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))?;
    if err.code().as_str() != code {
        return Err(eyre::eyre!("expected code {code}, got {}", err.code().as_str()));
    }
    Ok(())
}

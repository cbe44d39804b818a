//! Team registration and lookup.

use crate::error::{Resource, ServiceError};
use crate::roster::{
    domain::{RosterDomainError, Team, TeamMember, TeamName, UserId},
    ports::{DirectoryError, TeamDirectory},
};
use std::sync::Arc;

/// One member entry of a team registration request.
///
/// The active flag stays optional here so that a missing value can be told
/// apart from an explicit `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberInput {
    user_id: String,
    username: String,
    is_active: Option<bool>,
}

impl TeamMemberInput {
    /// Creates a member entry.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        is_active: Option<bool>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_active,
        }
    }

    fn into_member(self) -> Result<TeamMember, RosterDomainError> {
        let Self {
            user_id,
            username,
            is_active,
        } = self;
        let active =
            is_active.ok_or_else(|| RosterDomainError::MissingActiveFlag(user_id.clone()))?;
        TeamMember::new(UserId::new(user_id)?, username, active)
    }
}

/// Request payload for registering a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    team_name: String,
    members: Vec<TeamMemberInput>,
}

impl CreateTeamRequest {
    /// Creates a request with the given members.
    #[must_use]
    pub fn new(
        team_name: impl Into<String>,
        members: impl IntoIterator<Item = TeamMemberInput>,
    ) -> Self {
        Self {
            team_name: team_name.into(),
            members: members.into_iter().collect(),
        }
    }
}

/// Team registration and lookup service.
#[derive(Clone)]
pub struct TeamService<T>
where
    T: TeamDirectory,
{
    teams: Arc<T>,
}

impl<T> TeamService<T>
where
    T: TeamDirectory,
{
    /// Creates a new team service.
    #[must_use]
    pub const fn new(teams: Arc<T>) -> Self {
        Self { teams }
    }

    /// Registers a team and upserts its members as users.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::BadRequest`] for blank names, missing active
    /// flags, empty or duplicated member lists, and
    /// [`ServiceError::TeamExists`] when the name is taken.
    pub async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, ServiceError> {
        let team = build_team(request).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected team registration");
        })?;

        match self.teams.create_team(&team).await {
            Ok(()) => {
                tracing::info!(
                    team_name = %team.name(),
                    members = team.members().len(),
                    "team registered"
                );
                Ok(team)
            }
            Err(DirectoryError::DuplicateTeam(name)) => {
                tracing::warn!(team_name = %name, "team already exists");
                Err(ServiceError::TeamExists(name))
            }
            Err(err) => Err(ServiceError::fault("failed to create team", err)),
        }
    }

    /// Returns the team with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the team does not exist.
    pub async fn get_team(&self, team_name: &str) -> Result<Team, ServiceError> {
        let name = TeamName::new(team_name)?;
        self.teams
            .find_team_by_name(&name)
            .await
            .map_err(|err| ServiceError::fault("failed to get team", err))?
            .ok_or_else(|| {
                tracing::warn!(team_name = %name, "team not found");
                ServiceError::not_found(Resource::Team, &name)
            })
    }
}

fn build_team(request: CreateTeamRequest) -> Result<Team, RosterDomainError> {
    let CreateTeamRequest { team_name, members } = request;
    let name = TeamName::new(team_name)?;
    let validated = members
        .into_iter()
        .map(TeamMemberInput::into_member)
        .collect::<Result<Vec<_>, _>>()?;
    Team::new(name, validated)
}

//! In-memory team and user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::roster::{
    domain::{Team, TeamMember, TeamName, User, UserId},
    ports::{DirectoryError, DirectoryResult, TeamDirectory, UserDirectory},
};

/// Thread-safe in-memory directory implementing both roster ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    /// Registration order of member ids per team.
    teams: HashMap<TeamName, Vec<UserId>>,
    users: HashMap<UserId, User>,
}

impl DirectoryState {
    /// Rebuilds a team from the users that still point at it.
    fn assemble_team(&self, name: &TeamName) -> Option<Team> {
        let member_ids = self.teams.get(name)?;
        let members = member_ids
            .iter()
            .filter_map(|id| self.users.get(id))
            .filter(|user| user.team_name() == name)
            .filter_map(|user| {
                TeamMember::new(user.id().clone(), user.name(), user.is_active()).ok()
            })
            .collect();
        Some(Team::from_persisted(name.clone(), members))
    }
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryResult<RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> DirectoryResult<RwLockWriteGuard<'_, DirectoryState>> {
        self.state
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TeamDirectory for InMemoryDirectory {
    async fn create_team(&self, team: &Team) -> DirectoryResult<()> {
        let mut state = self.write()?;
        if state.teams.contains_key(team.name()) {
            return Err(DirectoryError::DuplicateTeam(team.name().clone()));
        }

        let member_ids = team
            .members()
            .iter()
            .map(|member| member.id().clone())
            .collect();
        state.teams.insert(team.name().clone(), member_ids);
        for member in team.members() {
            state
                .users
                .insert(member.id().clone(), User::from_member(member, team.name()));
        }
        Ok(())
    }

    async fn find_team_by_name(&self, name: &TeamName) -> DirectoryResult<Option<Team>> {
        let state = self.read()?;
        Ok(state.assemble_team(name))
    }

    async fn find_team_by_member(&self, user_id: &UserId) -> DirectoryResult<Option<Team>> {
        let state = self.read()?;
        Ok(state
            .users
            .get(user_id)
            .and_then(|user| state.assemble_team(user.team_name())))
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_user_by_id(&self, user_id: &UserId) -> DirectoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(user_id).cloned())
    }

    async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> DirectoryResult<User> {
        let mut state = self.write()?;
        let user = state
            .users
            .remove(user_id)
            .ok_or_else(|| DirectoryError::UserNotFound(user_id.clone()))?
            .with_active(is_active);
        state.users.insert(user_id.clone(), user.clone());
        Ok(user)
    }
}

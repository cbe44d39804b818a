//! Directory ports for team membership and user activity.

use crate::roster::domain::{Team, TeamName, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Team membership contract.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Stores a new team and upserts its members as users.
    ///
    /// A member that already belongs to another team moves to the new one.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateTeam`] when the team name is taken.
    async fn create_team(&self, team: &Team) -> DirectoryResult<()>;

    /// Finds a team by name.
    ///
    /// Returns `None` when the team does not exist.
    async fn find_team_by_name(&self, name: &TeamName) -> DirectoryResult<Option<Team>>;

    /// Finds the team the given user currently belongs to.
    ///
    /// Returns `None` when the user is unknown.
    async fn find_team_by_member(&self, user_id: &UserId) -> DirectoryResult<Option<Team>>;
}

/// User lookup and activity contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_user_by_id(&self, user_id: &UserId) -> DirectoryResult<Option<User>>;

    /// Sets the active flag and returns the updated user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UserNotFound`] when the user does not exist.
    async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> DirectoryResult<User>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// A team with the same name already exists.
    #[error("duplicate team name: {0}")]
    DuplicateTeam(TeamName),

    /// The user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

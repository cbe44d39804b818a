//! Error types for roster validation.

use thiserror::Error;

/// Errors returned while constructing roster domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterDomainError {
    /// The user identifier is blank.
    #[error("user id must not be empty")]
    EmptyUserId,

    /// The team name is blank.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The user display name is empty after trimming.
    #[error("username must not be empty for user {0}")]
    EmptyUsername(String),

    /// The active flag was not provided.
    #[error("is_active must be provided for user {0}")]
    MissingActiveFlag(String),

    /// A team must list at least one member.
    #[error("team {0} must have at least one member")]
    NoMembers(String),

    /// The same user id appears more than once in a team.
    #[error("duplicate user {user_id} in team {team_name}")]
    DuplicateMember {
        /// Team being constructed.
        team_name: String,
        /// Repeated user identifier.
        user_id: String,
    },
}

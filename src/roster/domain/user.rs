//! User records as seen by the review workflow.

use super::{TeamMember, TeamName, UserId};
use serde::{Deserialize, Serialize};

/// A user with its owning team and review eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id")]
    id: UserId,
    #[serde(rename = "username")]
    name: String,
    team_name: TeamName,
    is_active: bool,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, team_name: TeamName, is_active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            team_name,
            is_active,
        }
    }

    /// Builds the user record implied by a team registration.
    #[must_use]
    pub fn from_member(member: &TeamMember, team_name: &TeamName) -> Self {
        Self::new(
            member.id().clone(),
            member.name(),
            team_name.clone(),
            member.is_active(),
        )
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning team.
    #[must_use]
    pub const fn team_name(&self) -> &TeamName {
        &self.team_name
    }

    /// Returns whether the user is eligible for review duty.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns a copy with the active flag replaced.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

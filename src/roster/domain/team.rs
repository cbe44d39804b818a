//! Team aggregate and its members.

use super::{RosterDomainError, TeamName, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A user as listed inside a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(rename = "user_id")]
    id: UserId,
    #[serde(rename = "username")]
    name: String,
    is_active: bool,
}

impl TeamMember {
    /// Creates a team member with an explicit active flag.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyUsername`] when the display name is
    /// blank.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        is_active: bool,
    ) -> Result<Self, RosterDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(RosterDomainError::EmptyUsername(id.to_string()));
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            is_active,
        })
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the member's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the member is currently eligible for review duty.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

/// A named team with an ordered member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "team_name")]
    name: TeamName,
    members: Vec<TeamMember>,
}

impl Team {
    /// Creates a team, rejecting empty or duplicated member lists.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::NoMembers`] when `members` is empty and
    /// [`RosterDomainError::DuplicateMember`] when a user id repeats.
    pub fn new(name: TeamName, members: Vec<TeamMember>) -> Result<Self, RosterDomainError> {
        if members.is_empty() {
            return Err(RosterDomainError::NoMembers(name.to_string()));
        }

        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.id()) {
                return Err(RosterDomainError::DuplicateMember {
                    team_name: name.to_string(),
                    user_id: member.id().to_string(),
                });
            }
        }

        Ok(Self { name, members })
    }

    /// Reconstructs a team from storage without re-validating membership.
    ///
    /// A stored team may legitimately end up empty once all of its members
    /// have moved to other teams.
    #[must_use]
    pub const fn from_persisted(name: TeamName, members: Vec<TeamMember>) -> Self {
        Self { name, members }
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &TeamName {
        &self.name
    }

    /// Returns the members in stored order.
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Returns whether `user_id` belongs to this team.
    #[must_use]
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|member| member.id() == user_id)
    }

    /// Returns the identifiers of all active members.
    #[must_use]
    pub fn active_member_ids(&self) -> BTreeSet<UserId> {
        self.members
            .iter()
            .filter(|member| member.is_active())
            .map(|member| member.id().clone())
            .collect()
    }
}

//! Diesel row models for roster persistence.

use super::schema::{teams, users};
use diesel::prelude::*;

/// Insert model for team records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    /// Unique team name.
    pub team_name: String,
}

/// Query and insert model for user records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// External user identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Owning team.
    pub team_name: String,
    /// Whether the user is eligible for review duty.
    pub is_active: bool,
}

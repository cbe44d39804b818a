//! Application services for team and user management.

mod team;
mod user;

pub use team::{CreateTeamRequest, TeamMemberInput, TeamService};
pub use user::{SetUserActiveRequest, UserActivityService};

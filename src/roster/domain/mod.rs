//! Domain model for teams and users.
//!
//! The roster owns team membership and the per-user active flag that decides
//! who is eligible for review duty.

mod error;
mod ids;
mod team;
mod user;

pub use error::RosterDomainError;
pub use ids::{TeamName, UserId};
pub use team::{Team, TeamMember};
pub use user::User;

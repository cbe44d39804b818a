//! User activity toggling.

use crate::error::{Resource, ServiceError};
use crate::roster::{
    domain::{RosterDomainError, User, UserId},
    ports::{DirectoryError, UserDirectory},
};
use std::sync::Arc;

/// Request payload for changing a user's review eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetUserActiveRequest {
    user_id: String,
    is_active: Option<bool>,
}

impl SetUserActiveRequest {
    /// Creates a request; `None` means the flag was not provided.
    #[must_use]
    pub fn new(user_id: impl Into<String>, is_active: Option<bool>) -> Self {
        Self {
            user_id: user_id.into(),
            is_active,
        }
    }
}

/// Service for toggling user activity.
#[derive(Clone)]
pub struct UserActivityService<U>
where
    U: UserDirectory,
{
    users: Arc<U>,
}

impl<U> UserActivityService<U>
where
    U: UserDirectory,
{
    /// Creates a new user activity service.
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Sets the active flag of a user and returns the updated record.
    ///
    /// Existing reviewer assignments are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::BadRequest`] when the flag is missing and
    /// [`ServiceError::NotFound`] when the user does not exist.
    pub async fn set_is_active(
        &self,
        request: SetUserActiveRequest,
    ) -> Result<User, ServiceError> {
        let SetUserActiveRequest { user_id, is_active } = request;
        let active =
            is_active.ok_or_else(|| RosterDomainError::MissingActiveFlag(user_id.clone()))?;
        let id = UserId::new(user_id)?;

        match self.users.set_user_active(&id, active).await {
            Ok(user) => {
                tracing::info!(user_id = %id, is_active = active, "user activity updated");
                Ok(user)
            }
            Err(DirectoryError::UserNotFound(missing)) => {
                tracing::warn!(user_id = %missing, "user not found");
                Err(ServiceError::not_found(Resource::User, missing))
            }
            Err(err) => Err(ServiceError::fault("failed to update user status", err)),
        }
    }
}

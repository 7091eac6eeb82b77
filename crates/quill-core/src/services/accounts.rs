use std::sync::Arc;

use crate::domain::{Principal, User};
use crate::error::DomainError;
use crate::ports::UserRepository;

/// Keeps the stored user profiles in step with sign-in events.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Record a sign-in: create the profile the first time, refresh it
    /// afterwards. The stored role is overwritten with the live one.
    pub async fn sign_in(&self, principal: &Principal) -> Result<User, DomainError> {
        let user = match self.users.find_by_id(principal.uid.clone()).await? {
            Some(mut existing) => {
                existing.refresh(principal);
                existing
            }
            None => {
                tracing::info!(uid = %principal.uid, "First sign-in, creating user profile");
                User::new(principal)
            }
        };

        Ok(self.users.save(user).await?)
    }
}

use std::sync::RwLock;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::domain::{UserData, UserEmail};
use crate::usecases::{RepositoryError, UserRepository};

/// Keeps users in a vector guarded by a lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<UserData>>,
}

impl InMemoryUserRepository {
    pub fn new(users: Vec<UserData>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Snapshot of every stored user, in insertion order.
    pub fn users(&self) -> Result<Vec<UserData>, RepositoryError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.clone())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unexpected(anyhow!("in-memory user store lock was poisoned"))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[tracing::instrument(name = "Looking up user in memory", skip(self))]
    async fn find_user_by_email(
        &self,
        email: &UserEmail,
    ) -> Result<Option<UserData>, RepositoryError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|user| &user.email == email).cloned())
    }

    #[tracing::instrument(name = "Saving new user in memory", skip(self, user))]
    async fn save(&self, user: UserData) -> Result<UserData, RepositoryError> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        if users.iter().any(|stored| stored.email == user.email) {
            return Err(RepositoryError::DuplicateEmail(user.email));
        }
        users.push(user.clone());
        Ok(user)
    }
}

use async_trait::async_trait;

use crate::domain::{UserData, UserEmail};

/// Storage capability consumed by the registration use case.
///
/// Implementations own the stored records and are responsible for keeping
/// emails unique. When `save` observes that the email is already present it
/// must return [`RepositoryError::DuplicateEmail`] instead of storing a second
/// record.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &UserEmail)
        -> Result<Option<UserData>, RepositoryError>;

    async fn save(&self, user: UserData) -> Result<UserData, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("a user with email {0} is already stored")]
    DuplicateEmail(UserEmail),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

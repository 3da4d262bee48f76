use std::sync::Arc;

use super::ports::{RepositoryError, UserRepository};
use crate::domain::{InvalidEmailError, InvalidNameError, UserData, UserEmail, UserName};
use crate::utils::error_chain_fmt;

/// Raw caller input, before any validation.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserRegistration {
    pub name: String,
    pub email: Option<String>,
}

pub struct RegisterUserOnMailingList {
    repository: Arc<dyn UserRepository>,
}

impl RegisterUserOnMailingList {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Validates the input, rejects emails already on the list and stores the
    /// new user. Nothing is written unless every check passed.
    #[tracing::instrument(
        name = "Registering a new user on the mailing list",
        skip(self, input),
        fields(
            user_name = %input.name,
            user_email = ?input.email
        )
    )]
    pub async fn register_user_on_mailing_list(
        &self,
        input: UserRegistration,
    ) -> Result<UserData, RegisterUserError> {
        let name = UserName::parse(input.name).map_err(DomainError::from)?;
        let email = UserEmail::parse(input.email).map_err(DomainError::from)?;

        let existing = self
            .repository
            .find_user_by_email(&email)
            .await
            .map_err(RegisterUserError::Unexpected)?;
        if existing.is_some() {
            tracing::info!("User is already on the mailing list");
            return Err(DomainError::from(ExistingUserError(email)).into());
        }

        match self.repository.save(UserData::new(name, email)).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::DuplicateEmail(email)) => {
                tracing::info!("User was registered concurrently");
                Err(DomainError::from(ExistingUserError(email)).into())
            }
            Err(err) => Err(RegisterUserError::Unexpected(err)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} is already on the mailing list")]
pub struct ExistingUserError(pub UserEmail);

impl ExistingUserError {
    pub fn email(&self) -> &UserEmail {
        &self.0
    }
}

/// Expected rejections of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),
    #[error(transparent)]
    InvalidEmail(#[from] InvalidEmailError),
    #[error(transparent)]
    ExistingUser(#[from] ExistingUserError),
}

#[derive(thiserror::Error)]
pub enum RegisterUserError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Failed to reach the user repository")]
    Unexpected(#[source] RepositoryError),
}

impl RegisterUserError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            RegisterUserError::Domain(err) => Some(err),
            RegisterUserError::Unexpected(_) => None,
        }
    }
}

impl std::fmt::Debug for RegisterUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

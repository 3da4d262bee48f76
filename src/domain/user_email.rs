#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEmail(String);

impl UserEmail {
    /// An absent email is rejected the same way as a malformed one.
    pub fn parse(email: Option<String>) -> Result<Self, InvalidEmailError> {
        match email {
            Some(email) if validator::validate_email(&email) => Ok(Self(email)),
            email => Err(InvalidEmailError(email)),
        }
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0:?} is not a valid user email")]
pub struct InvalidEmailError(pub Option<String>);

impl InvalidEmailError {
    pub fn email(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

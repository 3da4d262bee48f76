use super::user_email::UserEmail;
use super::user_name::UserName;

/// A mailing-list entrant. Only validated values can be stored in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub name: UserName,
    pub email: UserEmail,
}

impl UserData {
    pub fn new(name: UserName, email: UserEmail) -> Self {
        Self { name, email }
    }
}

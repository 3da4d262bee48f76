mod ports;
mod register_user_on_mailing_list;

pub use ports::{RepositoryError, UserRepository};
pub use register_user_on_mailing_list::{
    DomainError, ExistingUserError, RegisterUserError, RegisterUserOnMailingList, UserRegistration,
};

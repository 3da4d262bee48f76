mod user_data;
mod user_email;
mod user_name;

pub use user_data::UserData;
pub use user_email::{InvalidEmailError, UserEmail};
pub use user_name::{InvalidNameError, UserName};

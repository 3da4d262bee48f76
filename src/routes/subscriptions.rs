use actix_web::{
    http::StatusCode,
    web::{Data, Form},
    HttpResponse, ResponseError,
};

use crate::usecases::{DomainError, RegisterUserError, RegisterUserOnMailingList, UserRegistration};

#[tracing::instrument(
    name = "Adding a new user to the mailing list",
    skip(form, register_user),
    fields(
        user_email = ?form.email,
        user_name = %form.name
    )
)]
pub(crate) async fn subscribe(
    form: Form<UserRegistration>,
    register_user: Data<RegisterUserOnMailingList>,
) -> Result<HttpResponse, SubscribeError> {
    register_user
        .register_user_on_mailing_list(form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().finish())
}

#[derive(thiserror::Error)]
#[error(transparent)]
pub(crate) struct SubscribeError(#[from] RegisterUserError);

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            RegisterUserError::Domain(DomainError::InvalidName(_))
            | RegisterUserError::Domain(DomainError::InvalidEmail(_)) => StatusCode::BAD_REQUEST,
            RegisterUserError::Domain(DomainError::ExistingUser(_)) => StatusCode::CONFLICT,
            RegisterUserError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

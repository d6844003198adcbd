use axum::{extract::FromRequestParts, http::request::Parts};
use kernel::model::{id::UserId, user::User};
use shared::error::AppError;

/// The authenticated caller, placed into request extensions by the gate.
/// Handlers take this as an argument; a protected handler can therefore
/// never run without a verified session behind it.
#[derive(Clone)]
pub struct AuthorizedUser {
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthorizedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthorizedUser>()
            .cloned()
            .ok_or(AppError::UnauthenticatedError)
    }
}

use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::UserId;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Returns the user's id when the email/password pair matches a stored
    /// record. An unknown email and a wrong password are indistinguishable
    /// to the caller.
    async fn verify_credentials(&self, email: &str, password: &str)
        -> AppResult<Option<UserId>>;
}

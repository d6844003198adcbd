use async_trait::async_trait;
use derive_new::new;
use kernel::model::id::UserId;
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserPasswordRow, ConnectionPool};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<Option<UserId>> {
        let row: Option<UserPasswordRow> = sqlx::query_as(
            r#"
                SELECT user_id, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let valid = bcrypt::verify(password, &row.password_hash)?;
        Ok(valid.then_some(row.user_id))
    }
}

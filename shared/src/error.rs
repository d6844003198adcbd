use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("authentication required")]
    UnauthenticatedError,
    #[error("admin access required")]
    ForbiddenOperation,
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    SlotTaken(String),
    #[error("failed to run the transaction")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    ConversionEntityError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotTaken(_) => StatusCode::CONFLICT,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::BcryptError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            // Internal detail stays in the server log.
            return (status_code, Json(json!({ "error": "internal server error" })))
                .into_response();
        }

        let body = match &self {
            AppError::ValidationError(report) => {
                // Every violated field is reported at once.
                let mut fields = serde_json::Map::new();
                for (path, error) in report.iter() {
                    let message = error.to_string();
                    match fields.entry(path.to_string()) {
                        serde_json::map::Entry::Occupied(mut slot) => {
                            if let serde_json::Value::String(existing) = slot.get_mut() {
                                *existing = format!("{existing}; {message}");
                            }
                        }
                        serde_json::map::Entry::Vacant(slot) => {
                            slot.insert(json!(message));
                        }
                    }
                }
                json!({ "error": "validation failed", "fields": fields })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

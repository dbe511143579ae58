use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RosterError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("schema initialization failed: {0}")]
    Schema(String),

    #[error("activity not found: {0}")]
    ActivityNotFound(String),

    #[error("{email} is already signed up for {activity}")]
    AlreadySignedUp { activity: String, email: String },

    #[error("{email} is not signed up for {activity}")]
    NotSignedUp { activity: String, email: String },

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IntoResponse for RosterError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            RosterError::Connection(_)
            | RosterError::Schema(_)
            | RosterError::RactorError(_)
            | RosterError::DatabaseError(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                };
                (status, body)
            }

            RosterError::ActivityNotFound(_) => {
                let status = StatusCode::NOT_FOUND;
                let body = ApiErrorObject {
                    code: "ACTIVITY_NOT_FOUND".to_string(),
                    message: "Activity not found.".to_string(),
                    details: None,
                };
                (status, body)
            }

            RosterError::AlreadySignedUp { .. } => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorObject {
                    code: "ALREADY_SIGNED_UP".to_string(),
                    message: "Student is already signed up.".to_string(),
                    details: None,
                };
                (status, body)
            }

            RosterError::NotSignedUp { .. } => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorObject {
                    code: "NOT_SIGNED_UP".to_string(),
                    message: "Student is not signed up for this activity.".to_string(),
                    details: None,
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

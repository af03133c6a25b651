use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::participation::LeadError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Database(sqlx::Error),
    InvalidLead(LeadError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(e) => write!(f, "Database error: {}", e),
            Self::InvalidLead(e) => write!(f, "Invalid lead: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(e) => Some(e),
            Self::InvalidLead(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl From<LeadError> for Error {
    fn from(err: LeadError) -> Self {
        Self::InvalidLead(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Self::Database(e) => {
                tracing::error!("Lead storage failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error processing request".to_string())
            }
            Self::InvalidLead(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

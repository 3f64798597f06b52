// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-facing Hebrew messages.
///
/// Every variant maps to exactly one status code and one localized message;
/// internal error details are logged, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),
    /// The data layer rejected or failed a delegated mutation.
    Delegate(String),

    // 401 Unauthorized
    MissingCredential,
    InvalidCredential,
    BadLogin,

    // 403 Forbidden
    Forbidden,

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Internal,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Delegate(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential => StatusCode::UNAUTHORIZED,
            ApiError::InvalidCredential => StatusCode::UNAUTHORIZED,
            ApiError::BadLogin => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::Delegate(msg) => msg,
            ApiError::MissingCredential => "אסימון הזדהות חסר",
            ApiError::InvalidCredential => "אסימון הזדהות לא תקין",
            ApiError::BadLogin => "אימייל או סיסמה שגויים",
            ApiError::Forbidden => "אין לך הרשאה לפעולה זו",
            ApiError::NotFound(msg) => msg,
            ApiError::Internal => "שגיאת שרת פנימית",
        }
    }

    /// Convert to the uniform failure envelope
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn delegate(message: impl Into<String>) -> Self {
        ApiError::Delegate(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        // Log the real error but return a generic message
        tracing::error!("Database error: {}", err);
        ApiError::Internal
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::middleware::CurrentUser;
use crate::auth::{issue_token, password, Claims};
use crate::database::{manager, users};
use crate::error::ApiError;
use crate::handlers::require_json;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login - verify credentials and issue a token.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = require_json(payload)?;
    let email = body.email.trim();

    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::validation("יש למלא את כל השדות"));
    }

    let pool = manager::pool().await?;
    let user = match users::find_by_email(pool, email).await? {
        Some(user) if password::verify_password(&body.password, &user.password_hash) => user,
        _ => return Err(ApiError::BadLogin),
    };

    let claims = Claims::new(user.id, user.email, user.full_name, user.role);
    let token = issue_token(&claims).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": {
                "user_id": claims.user_id,
                "email": claims.email,
                "full_name": claims.full_name,
                "role": claims.role,
            },
        },
    })))
}

/// GET /api/auth/me - echo the verified identity for the current request.
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({"success": true, "data": user.0}))
}

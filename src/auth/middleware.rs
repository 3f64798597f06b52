use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_token, Claims};
use crate::error::ApiError;

/// Verified identity for the current request, carried in request extensions.
/// Lives only for the duration of one request; never shared between requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

/// Authentication gate. Requires `Authorization: Bearer <token>`, verifies it
/// and injects [`CurrentUser`] for downstream handlers.
///
/// A missing header and a failed verification reject with distinct messages,
/// but all verification failures (malformed, expired, bad signature) are
/// indistinguishable from each other.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let token = header
        .strip_prefix("Bearer ")
        .filter(|token| !token.trim().is_empty())
        .ok_or(ApiError::MissingCredential)?;

    let claims = verify_token(token).ok_or(ApiError::InvalidCredential)?;

    request.extensions_mut().insert(CurrentUser(claims));
    Ok(next.run(request).await)
}

/// Authorization gate. Must be composed after [`require_auth`]; rejects with
/// 403 unless the verified identity carries exactly the required role.
pub async fn require_role(
    role: &'static str,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match request.extensions().get::<CurrentUser>() {
        Some(user) if user.0.role == role => Ok(next.run(request).await),
        Some(_) => Err(ApiError::Forbidden),
        // Authentication must run earlier in the stack
        None => Err(ApiError::MissingCredential),
    }
}

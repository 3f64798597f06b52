mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use clinic_api::auth::{encode_claims, roles};
use clinic_api::config;

#[tokio::test]
async fn me_without_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "אסימון הזדהות חסר");
    Ok(())
}

#[tokio::test]
async fn me_with_garbage_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .bearer_auth("definitely.not.valid")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "אסימון הזדהות לא תקין");
    Ok(())
}

#[tokio::test]
async fn expired_token_fails_like_any_invalid_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let mut claims = common::test_claims(roles::SECRETARY);
    claims.exp = claims.iat - 7200;
    let token = encode_claims(&claims, &config::config().security.jwt_secret)?;

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    // Indistinguishable from a malformed or tampered token
    assert_eq!(body["error"], "אסימון הזדהות לא תקין");
    Ok(())
}

#[tokio::test]
async fn me_echoes_verified_identity() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let claims = common::test_claims(roles::DOCTOR);
    let token = clinic_api::auth::issue_token(&claims)?;

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user_id"], claims.user_id.to_string());
    assert_eq!(body["data"]["email"], claims.email);
    assert_eq!(body["data"]["full_name"], claims.full_name);
    assert_eq!(body["data"]["role"], roles::DOCTOR);
    Ok(())
}

#[tokio::test]
async fn medical_history_update_is_doctor_only() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let url = format!(
        "{}/api/patients/{}/medical-history",
        server.base_url,
        uuid::Uuid::new_v4()
    );

    let res = client
        .put(&url)
        .bearer_auth(common::bearer_token(roles::SECRETARY)?)
        .json(&serde_json::json!({"notes": "x"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "אין לך הרשאה לפעולה זו");

    // A doctor passes both gates; whatever happens next is the data layer's
    // business, not the middleware's
    let res = client
        .put(&url)
        .bearer_auth(common::bearer_token(roles::DOCTOR)?)
        .json(&serde_json::json!({"notes": "x"}))
        .send()
        .await?;

    assert_ne!(res.status(), StatusCode::UNAUTHORIZED);
    assert_ne!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn listing_routes_require_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in [
        "/api/patients/",
        "/api/appointments/",
        "/api/invoices/",
        "/api/services/",
        "/api/tasks/",
        "/api/dashboard/kpis",
    ] {
        let res = client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "route {path} should be protected"
        );
    }
    Ok(())
}

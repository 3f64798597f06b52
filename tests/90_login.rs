mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn login_rejects_non_json_body() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("definitely not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "יש לשלוח נתונים בפורמט JSON");
    Ok(())
}

#[tokio::test]
async fn login_rejects_missing_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for payload in [
        json!({}),
        json!({"email": "", "password": ""}),
        json!({"email": "   ", "password": "secret"}),
        json!({"email": "dana@clinic.example", "password": ""}),
    ] {
        let res = client
            .post(format!("{}/api/auth/login", server.base_url))
            .json(&payload)
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], "יש למלא את כל השדות");
    }
    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use clinic_api::auth::roles;

async fn post_garbage(path: &str) -> Result<Value> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}{}", server.base_url, path))
        .bearer_auth(common::bearer_token(roles::SECRETARY)?)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"broken\":")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "path {path}");
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn create_appointment_with_bad_body_uses_operation_message() -> Result<()> {
    let body = post_garbage("/api/appointments/").await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "שגיאה ביצירת תור");
    Ok(())
}

#[tokio::test]
async fn create_patient_with_bad_body_uses_operation_message() -> Result<()> {
    let body = post_garbage("/api/patients/").await?;
    assert_eq!(body["error"], "שגיאה ביצירת מטופל");
    Ok(())
}

#[tokio::test]
async fn create_invoice_with_bad_body_uses_operation_message() -> Result<()> {
    let body = post_garbage("/api/invoices/").await?;
    assert_eq!(body["error"], "שגיאה ביצירת חשבונית");
    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    // We consider OK or SERVICE_UNAVAILABLE acceptable as a basic liveness check
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    // Should be valid JSON carrying the uniform envelope
    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("success").is_some());
    Ok(())
}

#[tokio::test]
async fn unknown_route_returns_localized_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/no/such/route", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "לא נמצא");
    Ok(())
}

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use clinic_api::auth::roles;

/// Page parsing happens before any data-layer work, so a bad page number is
/// a deterministic 400 even when the database is unreachable.
#[tokio::test]
async fn non_numeric_page_is_rejected_with_400() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::bearer_token(roles::SECRETARY)?;

    for (path, page) in [
        ("/api/patients/", "abc"),
        ("/api/appointments/", "0"),
        ("/api/invoices/", "-1"),
        ("/api/services/", "1.5"),
    ] {
        let res = client
            .get(format!("{}{}?page={}", server.base_url, path, page))
            .bearer_auth(&token)
            .send()
            .await?;

        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "path {path} page {page:?}"
        );
        let body = res.json::<Value>().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "מספר עמוד לא תקין");
    }
    Ok(())
}

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;
use crate::error::ApiError;

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod invoices;
pub mod patients;
pub mod services;
pub mod tasks;

/// Query parameters shared by every paginated listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
}

impl ListQuery {
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }

    /// 1-indexed page number. Untrusted input is parsed explicitly: anything
    /// non-numeric or below 1 is a controlled 400, never a panic.
    pub fn page(&self) -> Result<i64, ApiError> {
        match self.page.as_deref() {
            None | Some("") => Ok(1),
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(page) if page >= 1 => Ok(page),
                _ => Err(ApiError::validation("מספר עמוד לא תקין")),
            },
        }
    }
}

/// Success envelope for listing endpoints; always echoes the effective
/// `search` (and `status_filter` where the listing has one) so the UI can
/// restore its state.
pub fn list_response(data: Value, search: &str, status_filter: Option<&str>) -> Json<Value> {
    let mut body = json!({
        "success": true,
        "data": data,
        "search": search,
    });
    if let Some(status) = status_filter {
        body["status_filter"] = Value::String(status.to_string());
    }
    Json(body)
}

/// Serialize a response fragment, mapping the (unreachable in practice)
/// serialization failure to a logged 500.
pub fn to_value<T: serde::Serialize>(record: &T) -> Result<Value, ApiError> {
    serde_json::to_value(record).map_err(|e| {
        tracing::error!("Failed to serialize response data: {}", e);
        ApiError::Internal
    })
}

/// Unwrap a JSON body extraction, converting any rejection into the uniform
/// bad-payload response.
pub fn require_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(_) => Err(ApiError::validation("יש לשלוח נתונים בפורמט JSON")),
    }
}

/// Unwrap a mutation body; an unusable payload fails with the operation's
/// own localized message, exactly like a data-layer failure would.
pub fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    error_message: &'static str,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection);
            Err(ApiError::delegate(error_message))
        }
    }
}

/// Uniform handling for delegated mutations: the mutated record on success,
/// the operation's fixed localized message when the data layer returned
/// nothing or failed. Internal details are logged only.
pub fn mutation_response<T: serde::Serialize>(
    result: Result<Option<T>, DatabaseError>,
    error_message: &'static str,
) -> Result<Json<Value>, ApiError> {
    match result {
        Ok(Some(record)) => Ok(Json(json!({"success": true, "data": record}))),
        Ok(None) => Err(ApiError::delegate(error_message)),
        Err(e) => {
            tracing::error!("Mutation failed: {}", e);
            Err(ApiError::delegate(error_message))
        }
    }
}

/// Uniform handling for deletions; a missing row is not an error, a data
/// layer failure maps to the operation's fixed localized message.
pub fn deletion_response(
    result: Result<u64, DatabaseError>,
    error_message: &'static str,
) -> Result<Json<Value>, ApiError> {
    match result {
        Ok(_) => Ok(Json(json!({"success": true}))),
        Err(e) => {
            tracing::error!("Deletion failed: {}", e);
            Err(ApiError::delegate(error_message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> ListQuery {
        ListQuery {
            search: None,
            status: None,
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(query(None).page().unwrap(), 1);
        assert_eq!(query(Some("")).page().unwrap(), 1);
    }

    #[test]
    fn page_parses_numeric_input() {
        assert_eq!(query(Some("3")).page().unwrap(), 3);
        assert_eq!(query(Some(" 12 ")).page().unwrap(), 12);
    }

    #[test]
    fn page_rejects_non_numeric_and_non_positive_input() {
        for raw in ["abc", "1.5", "0", "-1", "2x"] {
            let err = query(Some(raw)).page().unwrap_err();
            assert_eq!(err, ApiError::validation("מספר עמוד לא תקין"), "input {raw:?}");
        }
    }

    #[test]
    fn list_response_echoes_filters_exactly() {
        let Json(body) = list_response(json!({"data": []}), "חיפוש", Some("pending"));
        assert_eq!(body["success"], true);
        assert_eq!(body["search"], "חיפוש");
        assert_eq!(body["status_filter"], "pending");
    }

    #[test]
    fn list_response_omits_absent_status_filter() {
        let Json(body) = list_response(json!({"data": []}), "", None);
        assert_eq!(body["search"], "");
        assert!(body.get("status_filter").is_none());
    }
}

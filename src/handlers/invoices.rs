use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::api::format;
use crate::config;
use crate::database::models::InvoiceInput;
use crate::database::{catalog, invoices, manager, patients};
use crate::error::ApiError;
use crate::handlers::{
    deletion_response, list_response, json_body, mutation_response, to_value, ListQuery,
};

/// GET /api/invoices/ - paginated listing with the patient join flattened,
/// plus the patient picker and service catalog for the billing form.
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    let page = query.page()?;
    let pool = manager::pool().await?;
    let pagination = &config::config().pagination;

    let result = invoices::list(
        pool,
        query.search(),
        query.status(),
        page,
        pagination.page_size,
    )
    .await?;

    let mut data = to_value(&result)?;
    format::map_page_data(&mut data, format::flatten_invoice);

    let patients_list = format::map_records(
        &to_value(&patients::pick_list(pool, pagination.picker_limit).await?)?,
        format::with_full_name,
    );
    let services = to_value(&catalog::all(pool).await?)?;

    if let Some(obj) = data.as_object_mut() {
        obj.insert("patients_list".to_string(), patients_list);
        obj.insert("services".to_string(), services);
    }

    Ok(list_response(data, query.search(), Some(query.status())))
}

/// POST /api/invoices/
pub async fn create(
    payload: Result<Json<InvoiceInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה ביצירת חשבונית")?;
    let pool = manager::pool().await?;

    mutation_response(invoices::create(pool, &input).await, "שגיאה ביצירת חשבונית")
}

/// PUT /api/invoices/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<InvoiceInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה בעדכון חשבונית")?;
    let pool = manager::pool().await?;

    mutation_response(
        invoices::update(pool, id, &input).await,
        "שגיאה בעדכון חשבונית",
    )
}

/// POST /api/invoices/:id/pay
pub async fn mark_paid(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    mutation_response(invoices::mark_paid(pool, id).await, "שגיאה בסימון תשלום")
}

/// DELETE /api/invoices/:id
pub async fn delete(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    deletion_response(invoices::delete(pool, id).await, "שגיאה במחיקת חשבונית")
}

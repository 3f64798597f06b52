use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::api::format;
use crate::config;
use crate::database::models::AppointmentInput;
use crate::database::{appointments, catalog, manager, patients};
use crate::error::ApiError;
use crate::handlers::{
    deletion_response, list_response, json_body, mutation_response, to_value, ListQuery,
};

/// GET /api/appointments/ - paginated listing with flattened joins, plus the
/// service catalog and patient picker needed to render the scheduling form.
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    let page = query.page()?;
    let pool = manager::pool().await?;
    let pagination = &config::config().pagination;

    let result = appointments::list(
        pool,
        query.search(),
        query.status(),
        page,
        pagination.page_size,
    )
    .await?;

    let mut data = to_value(&result)?;
    format::map_page_data(&mut data, format::flatten_appointment);

    let services = to_value(&catalog::all(pool).await?)?;
    let patients_list = format::map_records(
        &to_value(&patients::pick_list(pool, pagination.picker_limit).await?)?,
        format::with_full_name,
    );

    if let Some(obj) = data.as_object_mut() {
        obj.insert("services".to_string(), services);
        obj.insert("patients_list".to_string(), patients_list);
    }

    Ok(list_response(data, query.search(), Some(query.status())))
}

/// POST /api/appointments/
pub async fn create(
    payload: Result<Json<AppointmentInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה ביצירת תור")?;
    let pool = manager::pool().await?;

    mutation_response(appointments::create(pool, &input).await, "שגיאה ביצירת תור")
}

/// PUT /api/appointments/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<AppointmentInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה בעדכון תור")?;
    let pool = manager::pool().await?;

    mutation_response(
        appointments::update(pool, id, &input).await,
        "שגיאה בעדכון תור",
    )
}

/// DELETE /api/appointments/:id
pub async fn delete(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    deletion_response(appointments::delete(pool, id).await, "שגיאה במחיקת תור")
}

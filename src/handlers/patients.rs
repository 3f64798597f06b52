use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::format;
use crate::auth::middleware::CurrentUser;
use crate::auth::roles;
use crate::config;
use crate::database::models::{MedicalHistoryInput, PatientInput};
use crate::database::{appointments, manager, patients};
use crate::error::ApiError;
use crate::handlers::{
    deletion_response, list_response, json_body, mutation_response, to_value, ListQuery,
};

/// GET /api/patients/ - paginated listing with derived full names.
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    let page = query.page()?;
    let pool = manager::pool().await?;

    let result = patients::list(
        pool,
        query.search(),
        page,
        config::config().pagination.page_size,
    )
    .await?;

    let mut data = to_value(&result)?;
    format::map_page_data(&mut data, format::with_full_name);

    Ok(list_response(data, query.search(), None))
}

/// GET /api/patients/:id - patient card: enriched record, appointment and
/// invoice history, and (for doctors only) the medical history.
pub async fn detail(
    Path(id): Path<Uuid>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    let patient = patients::get(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("המטופל לא נמצא"))?;
    let patient = format::with_full_name(&to_value(&patient)?);

    let medical_history = if user.0.role == roles::DOCTOR {
        to_value(&patients::medical_history(pool, id).await?)?
    } else {
        Value::Null
    };

    let appointments = format::map_records(
        &to_value(&appointments::for_patient(pool, id).await?)?,
        format::flatten_appointment,
    );
    let invoices = to_value(&patients::invoices_for(pool, id).await?)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "patient": patient,
            "medical_history": medical_history,
            "appointments": appointments,
            "invoices": invoices,
        },
    })))
}

/// POST /api/patients/
pub async fn create(
    payload: Result<Json<PatientInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה ביצירת מטופל")?;
    let pool = manager::pool().await?;

    mutation_response(patients::create(pool, &input).await, "שגיאה ביצירת מטופל")
}

/// PUT /api/patients/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<PatientInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה בעדכון מטופל")?;
    let pool = manager::pool().await?;

    mutation_response(
        patients::update(pool, id, &input).await,
        "שגיאה בעדכון מטופל",
    )
}

/// DELETE /api/patients/:id
pub async fn delete(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    deletion_response(patients::delete(pool, id).await, "שגיאה במחיקת מטופל")
}

/// PUT /api/patients/:id/medical-history - doctor-only upsert.
pub async fn update_medical_history(
    Path(id): Path<Uuid>,
    payload: Result<Json<MedicalHistoryInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה בעדכון היסטוריה רפואית")?;
    let pool = manager::pool().await?;

    mutation_response(
        patients::upsert_medical_history(pool, id, &input).await,
        "שגיאה בעדכון היסטוריה רפואית",
    )
}

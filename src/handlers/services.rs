use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::config;
use crate::database::models::ServiceInput;
use crate::database::{catalog, manager};
use crate::error::ApiError;
use crate::handlers::{
    deletion_response, list_response, json_body, mutation_response, to_value, ListQuery,
};

/// GET /api/services/ - paginated service catalog listing.
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    let page = query.page()?;
    let pool = manager::pool().await?;

    let result = catalog::list(
        pool,
        query.search(),
        page,
        config::config().pagination.page_size,
    )
    .await?;

    Ok(list_response(to_value(&result)?, query.search(), None))
}

/// POST /api/services/
pub async fn create(
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה ביצירת שירות")?;
    let pool = manager::pool().await?;

    mutation_response(catalog::create(pool, &input).await, "שגיאה ביצירת שירות")
}

/// PUT /api/services/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה בעדכון שירות")?;
    let pool = manager::pool().await?;

    mutation_response(
        catalog::update(pool, id, &input).await,
        "שגיאה בעדכון שירות",
    )
}

/// DELETE /api/services/:id
pub async fn delete(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    deletion_response(catalog::delete(pool, id).await, "שגיאה במחיקת שירות")
}

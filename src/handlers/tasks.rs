use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::Json;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::database::models::{TaskInput, TaskStatusInput};
use crate::database::{manager, tasks, users};
use crate::error::ApiError;
use crate::handlers::{deletion_response, json_body, mutation_response, to_value};

/// Board columns, in display order. Tasks with an unknown status get their
/// own bucket rather than being dropped.
const BOARD_COLUMNS: [&str; 3] = ["todo", "in_progress", "done"];

/// GET /api/tasks/ - the task board grouped by status, plus the staff list
/// for the assignment dropdown.
pub async fn list() -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    let mut grouped = Map::new();
    for column in BOARD_COLUMNS {
        grouped.insert(column.to_string(), Value::Array(Vec::new()));
    }

    for task in tasks::all(pool).await? {
        let bucket = grouped
            .entry(task.status.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Some(items) = bucket.as_array_mut() {
            items.push(to_value(&task)?);
        }
    }

    let users = to_value(&users::pick_list(pool).await?)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "tasks": grouped,
            "users": users,
        },
    })))
}

/// POST /api/tasks/
pub async fn create(
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה ביצירת משימה")?;
    let pool = manager::pool().await?;

    mutation_response(tasks::create(pool, &input).await, "שגיאה ביצירת משימה")
}

/// PUT /api/tasks/:id
pub async fn update(
    Path(id): Path<Uuid>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה בעדכון משימה")?;
    let pool = manager::pool().await?;

    mutation_response(tasks::update(pool, id, &input).await, "שגיאה בעדכון משימה")
}

/// PUT /api/tasks/:id/status - board move.
pub async fn update_status(
    Path(id): Path<Uuid>,
    payload: Result<Json<TaskStatusInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(payload, "שגיאה בעדכון משימה")?;
    let pool = manager::pool().await?;

    mutation_response(
        tasks::update_status(pool, id, &input).await,
        "שגיאה בעדכון משימה",
    )
}

/// DELETE /api/tasks/:id
pub async fn delete(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    deletion_response(tasks::delete(pool, id).await, "שגיאה במחיקת משימה")
}

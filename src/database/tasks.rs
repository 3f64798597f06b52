use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Task, TaskInput, TaskStatusInput};

const TASK_COLUMNS: &str =
    "id, title, description, status, priority, assigned_to, \"position\", created_at";

/// Every task in board order.
pub async fn all(pool: &PgPool) -> Result<Vec<Task>, DatabaseError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         ORDER BY \"position\", created_at",
    ))
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

pub async fn create(pool: &PgPool, input: &TaskInput) -> Result<Option<Task>, DatabaseError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, description, status, priority, assigned_to, \"position\", created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, now())
         RETURNING {TASK_COLUMNS}",
    ))
    .bind(Uuid::new_v4())
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.status)
    .bind(&input.priority)
    .bind(input.assigned_to)
    .bind(input.position)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &TaskInput,
) -> Result<Option<Task>, DatabaseError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET
            title = $2, description = $3, status = $4, priority = $5,
            assigned_to = $6, \"position\" = $7
         WHERE id = $1
         RETURNING {TASK_COLUMNS}",
    ))
    .bind(id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.status)
    .bind(&input.priority)
    .bind(input.assigned_to)
    .bind(input.position)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Board move: change column and position only.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    input: &TaskStatusInput,
) -> Result<Option<Task>, DatabaseError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET status = $2, \"position\" = $3
         WHERE id = $1
         RETURNING {TASK_COLUMNS}",
    ))
    .bind(id)
    .bind(&input.status)
    .bind(input.position)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, DatabaseError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

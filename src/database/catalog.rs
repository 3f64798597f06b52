use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Service, ServiceInput};
use crate::database::{offset, Page};

const SERVICE_COLUMNS: &str = "id, name, description, price, duration_minutes, is_active";

/// Paginated service listing; `search` matches the service name.
pub async fn list(
    pool: &PgPool,
    search: &str,
    page: i64,
    limit: i64,
) -> Result<Page<Service>, DatabaseError> {
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM services
         WHERE ($1 = '' OR name ILIKE '%' || $1 || '%')",
    )
    .bind(search)
    .fetch_one(pool)
    .await?;

    let data = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services
         WHERE ($1 = '' OR name ILIKE '%' || $1 || '%')
         ORDER BY name
         LIMIT $2 OFFSET $3",
    ))
    .bind(search)
    .bind(limit)
    .bind(offset(page, limit))
    .fetch_all(pool)
    .await?;

    Ok(Page { data, total, page, limit })
}

/// Active services, the catalog used to populate scheduling dropdowns.
pub async fn all(pool: &PgPool) -> Result<Vec<Service>, DatabaseError> {
    let services = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services
         WHERE is_active = TRUE
         ORDER BY name",
    ))
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn create(
    pool: &PgPool,
    input: &ServiceInput,
) -> Result<Option<Service>, DatabaseError> {
    let service = sqlx::query_as::<_, Service>(&format!(
        "INSERT INTO services (id, name, description, price, duration_minutes, is_active)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {SERVICE_COLUMNS}",
    ))
    .bind(Uuid::new_v4())
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.duration_minutes)
    .bind(input.is_active)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &ServiceInput,
) -> Result<Option<Service>, DatabaseError> {
    let service = sqlx::query_as::<_, Service>(&format!(
        "UPDATE services SET
            name = $2, description = $3, price = $4, duration_minutes = $5, is_active = $6
         WHERE id = $1
         RETURNING {SERVICE_COLUMNS}",
    ))
    .bind(id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.duration_minutes)
    .bind(input.is_active)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, DatabaseError> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

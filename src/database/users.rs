use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{User, UserRef};

/// Look up a staff account by email (case-insensitive).
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, full_name, role
         FROM users
         WHERE lower(email) = lower($1)",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// All staff members, for assignment dropdowns.
pub async fn pick_list(pool: &PgPool) -> Result<Vec<UserRef>, DatabaseError> {
    let users = sqlx::query_as::<_, UserRef>(
        "SELECT id, full_name FROM users ORDER BY full_name",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

/// One month of settled revenue for the revenue chart.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Decimal,
}

/// Appointment count per status for the distribution chart.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

pub async fn total_patients(pool: &PgPool) -> Result<i64, DatabaseError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM patients")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Appointments falling in the current calendar month.
pub async fn monthly_appointments(pool: &PgPool) -> Result<i64, DatabaseError> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM appointments
         WHERE date_trunc('month', appointment_date) = date_trunc('month', now())",
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Revenue settled during the current calendar month.
pub async fn monthly_revenue(pool: &PgPool) -> Result<Decimal, DatabaseError> {
    let (revenue,): (Decimal,) = sqlx::query_as(
        "SELECT COALESCE(SUM(amount), 0) FROM invoices
         WHERE status = 'paid'
           AND date_trunc('month', paid_date) = date_trunc('month', CURRENT_DATE)",
    )
    .fetch_one(pool)
    .await?;

    Ok(revenue)
}

/// Count and outstanding total of unpaid invoices.
pub async fn pending_payments(pool: &PgPool) -> Result<(i64, Decimal), DatabaseError> {
    let totals: (i64, Decimal) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(amount), 0) FROM invoices
         WHERE status = 'pending'",
    )
    .fetch_one(pool)
    .await?;

    Ok(totals)
}

/// Settled revenue per month over the trailing `months` window.
pub async fn revenue_by_month(
    pool: &PgPool,
    months: i32,
) -> Result<Vec<MonthlyRevenue>, DatabaseError> {
    let rows = sqlx::query_as::<_, MonthlyRevenue>(
        "SELECT to_char(date_trunc('month', paid_date), 'YYYY-MM') AS month,
                COALESCE(SUM(amount), 0) AS revenue
         FROM invoices
         WHERE status = 'paid'
           AND paid_date >= date_trunc('month', CURRENT_DATE) - make_interval(months => $1 - 1)
         GROUP BY 1
         ORDER BY 1",
    )
    .bind(months)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn appointment_status_distribution(
    pool: &PgPool,
) -> Result<Vec<StatusCount>, DatabaseError> {
    let rows = sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM appointments
         GROUP BY status
         ORDER BY status",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::auth::middleware::CurrentUser;
use crate::auth::roles;
use crate::database::{dashboard, manager};
use crate::error::ApiError;
use crate::handlers::to_value;
use crate::services::churn_service;

/// GET /api/dashboard/kpis - headline aggregates; the churn list is a
/// doctor-only extra fed by the external scoring service.
pub async fn kpis(Extension(user): Extension<CurrentUser>) -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;

    let total_patients = dashboard::total_patients(pool).await?;
    let monthly_appointments = dashboard::monthly_appointments(pool).await?;
    let monthly_revenue = dashboard::monthly_revenue(pool).await?;
    let (pending_count, pending_total) = dashboard::pending_payments(pool).await?;

    let churn_patients = if user.0.role == roles::DOCTOR {
        churn_service::top_scores(5).await
    } else {
        Vec::new()
    };

    Ok(Json(json!({
        "success": true,
        "data": {
            "total_patients": total_patients,
            "monthly_appointments": monthly_appointments,
            "monthly_revenue": monthly_revenue,
            "pending_count": pending_count,
            "pending_total": pending_total,
            "churn_patients": churn_patients,
        },
    })))
}

/// GET /api/dashboard/revenue-chart - settled revenue over the last six
/// months.
pub async fn revenue_chart() -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;
    let data = dashboard::revenue_by_month(pool, 6).await?;

    Ok(Json(json!({"success": true, "data": to_value(&data)?})))
}

/// GET /api/dashboard/appointment-chart - appointment count per status.
pub async fn appointment_chart() -> Result<Json<Value>, ApiError> {
    let pool = manager::pool().await?;
    let data = dashboard::appointment_status_distribution(pool).await?;

    Ok(Json(json!({"success": true, "data": to_value(&data)?})))
}

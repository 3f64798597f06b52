use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Appointment, AppointmentInput, AppointmentRecord, PatientBrief, ServiceBrief,
};
use crate::database::{offset, Page};

const APPOINTMENT_COLUMNS: &str = "id, patient_id, service_id, appointment_date, status, notes";

const JOINED_SELECT: &str = "SELECT a.id, a.patient_id, a.service_id, a.appointment_date, a.status, a.notes,
        p.first_name AS patient_first_name, p.last_name AS patient_last_name,
        s.name AS service_name
 FROM appointments a
 LEFT JOIN patients p ON p.id = a.patient_id
 LEFT JOIN services s ON s.id = a.service_id";

/// Flat row shape for the patient/service join; regrouped into nested
/// sub-records before it leaves the data layer.
#[derive(Debug, FromRow)]
struct JoinRow {
    id: Uuid,
    patient_id: Uuid,
    service_id: Uuid,
    appointment_date: DateTime<Utc>,
    status: String,
    notes: Option<String>,
    patient_first_name: Option<String>,
    patient_last_name: Option<String>,
    service_name: Option<String>,
}

impl From<JoinRow> for AppointmentRecord {
    fn from(row: JoinRow) -> Self {
        let patients = (row.patient_first_name.is_some() || row.patient_last_name.is_some())
            .then(|| PatientBrief {
                first_name: row.patient_first_name,
                last_name: row.patient_last_name,
            });
        let services = row.service_name.is_some().then(|| ServiceBrief {
            name: row.service_name,
        });

        AppointmentRecord {
            appointment: Appointment {
                id: row.id,
                patient_id: row.patient_id,
                service_id: row.service_id,
                appointment_date: row.appointment_date,
                status: row.status,
                notes: row.notes,
            },
            patients,
            services,
        }
    }
}

/// Paginated appointment listing with joined patient and service records;
/// `search` matches the patient or service name, `status_filter` is exact.
pub async fn list(
    pool: &PgPool,
    search: &str,
    status_filter: &str,
    page: i64,
    limit: i64,
) -> Result<Page<AppointmentRecord>, DatabaseError> {
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*)
         FROM appointments a
         LEFT JOIN patients p ON p.id = a.patient_id
         LEFT JOIN services s ON s.id = a.service_id
         WHERE ($1 = ''
            OR p.first_name ILIKE '%' || $1 || '%'
            OR p.last_name ILIKE '%' || $1 || '%'
            OR s.name ILIKE '%' || $1 || '%')
           AND ($2 = '' OR a.status = $2)",
    )
    .bind(search)
    .bind(status_filter)
    .fetch_one(pool)
    .await?;

    let rows = sqlx::query_as::<_, JoinRow>(&format!(
        "{JOINED_SELECT}
         WHERE ($1 = ''
            OR p.first_name ILIKE '%' || $1 || '%'
            OR p.last_name ILIKE '%' || $1 || '%'
            OR s.name ILIKE '%' || $1 || '%')
           AND ($2 = '' OR a.status = $2)
         ORDER BY a.appointment_date DESC
         LIMIT $3 OFFSET $4",
    ))
    .bind(search)
    .bind(status_filter)
    .bind(limit)
    .bind(offset(page, limit))
    .fetch_all(pool)
    .await?;

    Ok(Page {
        data: rows.into_iter().map(Into::into).collect(),
        total,
        page,
        limit,
    })
}

/// All appointments of one patient with joined sub-records, newest first.
pub async fn for_patient(
    pool: &PgPool,
    patient_id: Uuid,
) -> Result<Vec<AppointmentRecord>, DatabaseError> {
    let rows = sqlx::query_as::<_, JoinRow>(&format!(
        "{JOINED_SELECT}
         WHERE a.patient_id = $1
         ORDER BY a.appointment_date DESC",
    ))
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn create(
    pool: &PgPool,
    input: &AppointmentInput,
) -> Result<Option<Appointment>, DatabaseError> {
    let appointment = sqlx::query_as::<_, Appointment>(&format!(
        "INSERT INTO appointments (id, patient_id, service_id, appointment_date, status, notes)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {APPOINTMENT_COLUMNS}",
    ))
    .bind(Uuid::new_v4())
    .bind(input.patient_id)
    .bind(input.service_id)
    .bind(input.appointment_date)
    .bind(&input.status)
    .bind(&input.notes)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &AppointmentInput,
) -> Result<Option<Appointment>, DatabaseError> {
    let appointment = sqlx::query_as::<_, Appointment>(&format!(
        "UPDATE appointments SET
            patient_id = $2, service_id = $3, appointment_date = $4, status = $5, notes = $6
         WHERE id = $1
         RETURNING {APPOINTMENT_COLUMNS}",
    ))
    .bind(id)
    .bind(input.patient_id)
    .bind(input.service_id)
    .bind(input.appointment_date)
    .bind(&input.status)
    .bind(&input.notes)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, DatabaseError> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Invoice, MedicalHistory, MedicalHistoryInput, Patient, PatientInput,
};
use crate::database::{offset, Page};

const PATIENT_COLUMNS: &str =
    "id, first_name, last_name, id_number, phone, email, date_of_birth, gender, address, created_at";

/// Paginated patient listing; `search` matches name, phone and national id.
pub async fn list(
    pool: &PgPool,
    search: &str,
    page: i64,
    limit: i64,
) -> Result<Page<Patient>, DatabaseError> {
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM patients
         WHERE ($1 = ''
            OR first_name ILIKE '%' || $1 || '%'
            OR last_name ILIKE '%' || $1 || '%'
            OR phone ILIKE '%' || $1 || '%'
            OR id_number ILIKE '%' || $1 || '%')",
    )
    .bind(search)
    .fetch_one(pool)
    .await?;

    let data = sqlx::query_as::<_, Patient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients
         WHERE ($1 = ''
            OR first_name ILIKE '%' || $1 || '%'
            OR last_name ILIKE '%' || $1 || '%'
            OR phone ILIKE '%' || $1 || '%'
            OR id_number ILIKE '%' || $1 || '%')
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    ))
    .bind(search)
    .bind(limit)
    .bind(offset(page, limit))
    .fetch_all(pool)
    .await?;

    Ok(Page { data, total, page, limit })
}

/// First `limit` patients by name, for picker dropdowns beside other listings.
pub async fn pick_list(pool: &PgPool, limit: i64) -> Result<Vec<Patient>, DatabaseError> {
    let patients = sqlx::query_as::<_, Patient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients
         ORDER BY first_name, last_name
         LIMIT $1",
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(patients)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<Patient>, DatabaseError> {
    let patient = sqlx::query_as::<_, Patient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1",
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

pub async fn create(
    pool: &PgPool,
    input: &PatientInput,
) -> Result<Option<Patient>, DatabaseError> {
    let patient = sqlx::query_as::<_, Patient>(&format!(
        "INSERT INTO patients
            (id, first_name, last_name, id_number, phone, email, date_of_birth, gender, address, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
         RETURNING {PATIENT_COLUMNS}",
    ))
    .bind(Uuid::new_v4())
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.id_number)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(input.date_of_birth)
    .bind(&input.gender)
    .bind(&input.address)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &PatientInput,
) -> Result<Option<Patient>, DatabaseError> {
    let patient = sqlx::query_as::<_, Patient>(&format!(
        "UPDATE patients SET
            first_name = $2, last_name = $3, id_number = $4, phone = $5,
            email = $6, date_of_birth = $7, gender = $8, address = $9
         WHERE id = $1
         RETURNING {PATIENT_COLUMNS}",
    ))
    .bind(id)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.id_number)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(input.date_of_birth)
    .bind(&input.gender)
    .bind(&input.address)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, DatabaseError> {
    let result = sqlx::query("DELETE FROM patients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn medical_history(
    pool: &PgPool,
    patient_id: Uuid,
) -> Result<Option<MedicalHistory>, DatabaseError> {
    let history = sqlx::query_as::<_, MedicalHistory>(
        "SELECT id, patient_id, diagnoses, medications, allergies, notes
         FROM medical_histories
         WHERE patient_id = $1",
    )
    .bind(patient_id)
    .fetch_optional(pool)
    .await?;

    Ok(history)
}

/// Insert-or-update the one medical history row a patient has.
pub async fn upsert_medical_history(
    pool: &PgPool,
    patient_id: Uuid,
    input: &MedicalHistoryInput,
) -> Result<Option<MedicalHistory>, DatabaseError> {
    let history = sqlx::query_as::<_, MedicalHistory>(
        "INSERT INTO medical_histories (id, patient_id, diagnoses, medications, allergies, notes)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (patient_id) DO UPDATE SET
            diagnoses = EXCLUDED.diagnoses,
            medications = EXCLUDED.medications,
            allergies = EXCLUDED.allergies,
            notes = EXCLUDED.notes
         RETURNING id, patient_id, diagnoses, medications, allergies, notes",
    )
    .bind(Uuid::new_v4())
    .bind(patient_id)
    .bind(&input.diagnoses)
    .bind(&input.medications)
    .bind(&input.allergies)
    .bind(&input.notes)
    .fetch_optional(pool)
    .await?;

    Ok(history)
}

/// Invoices belonging to one patient, newest first.
pub async fn invoices_for(pool: &PgPool, patient_id: Uuid) -> Result<Vec<Invoice>, DatabaseError> {
    let invoices = sqlx::query_as::<_, Invoice>(
        "SELECT id, patient_id, service_id, amount, status, issued_date, paid_date
         FROM invoices
         WHERE patient_id = $1
         ORDER BY issued_date DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    Ok(invoices)
}

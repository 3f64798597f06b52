use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Invoice, InvoiceInput, InvoiceRecord, PatientBrief};
use crate::database::{offset, Page};

const INVOICE_COLUMNS: &str = "id, patient_id, service_id, amount, status, issued_date, paid_date";

#[derive(Debug, FromRow)]
struct JoinRow {
    id: Uuid,
    patient_id: Uuid,
    service_id: Uuid,
    amount: Decimal,
    status: String,
    issued_date: NaiveDate,
    paid_date: Option<NaiveDate>,
    patient_first_name: Option<String>,
    patient_last_name: Option<String>,
}

impl From<JoinRow> for InvoiceRecord {
    fn from(row: JoinRow) -> Self {
        let patients = (row.patient_first_name.is_some() || row.patient_last_name.is_some())
            .then(|| PatientBrief {
                first_name: row.patient_first_name,
                last_name: row.patient_last_name,
            });

        InvoiceRecord {
            invoice: Invoice {
                id: row.id,
                patient_id: row.patient_id,
                service_id: row.service_id,
                amount: row.amount,
                status: row.status,
                issued_date: row.issued_date,
                paid_date: row.paid_date,
            },
            patients,
        }
    }
}

/// Paginated invoice listing with the joined patient record; `search`
/// matches the patient name, `status_filter` is exact.
pub async fn list(
    pool: &PgPool,
    search: &str,
    status_filter: &str,
    page: i64,
    limit: i64,
) -> Result<Page<InvoiceRecord>, DatabaseError> {
    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*)
         FROM invoices i
         LEFT JOIN patients p ON p.id = i.patient_id
         WHERE ($1 = ''
            OR p.first_name ILIKE '%' || $1 || '%'
            OR p.last_name ILIKE '%' || $1 || '%')
           AND ($2 = '' OR i.status = $2)",
    )
    .bind(search)
    .bind(status_filter)
    .fetch_one(pool)
    .await?;

    let rows = sqlx::query_as::<_, JoinRow>(
        "SELECT i.id, i.patient_id, i.service_id, i.amount, i.status, i.issued_date, i.paid_date,
                p.first_name AS patient_first_name, p.last_name AS patient_last_name
         FROM invoices i
         LEFT JOIN patients p ON p.id = i.patient_id
         WHERE ($1 = ''
            OR p.first_name ILIKE '%' || $1 || '%'
            OR p.last_name ILIKE '%' || $1 || '%')
           AND ($2 = '' OR i.status = $2)
         ORDER BY i.issued_date DESC
         LIMIT $3 OFFSET $4",
    )
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

pub async fn create(
    pool: &PgPool,
    input: &InvoiceInput,
) -> Result<Option<Invoice>, DatabaseError> {
    let invoice = sqlx::query_as::<_, Invoice>(&format!(
        "INSERT INTO invoices (id, patient_id, service_id, amount, status, issued_date)
         VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE))
         RETURNING {INVOICE_COLUMNS}",
    ))
    .bind(Uuid::new_v4())
    .bind(input.patient_id)
    .bind(input.service_id)
    .bind(input.amount)
    .bind(&input.status)
    .bind(input.issued_date)
    .fetch_optional(pool)
    .await?;

    Ok(invoice)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &InvoiceInput,
) -> Result<Option<Invoice>, DatabaseError> {
    let invoice = sqlx::query_as::<_, Invoice>(&format!(
        "UPDATE invoices SET
            patient_id = $2, service_id = $3, amount = $4, status = $5,
            issued_date = COALESCE($6, issued_date)
         WHERE id = $1
         RETURNING {INVOICE_COLUMNS}",
    ))
    .bind(id)
    .bind(input.patient_id)
    .bind(input.service_id)
    .bind(input.amount)
    .bind(&input.status)
    .bind(input.issued_date)
    .fetch_optional(pool)
    .await?;

    Ok(invoice)
}

/// Settle an invoice: status becomes `paid` and the payment date is stamped.
pub async fn mark_paid(pool: &PgPool, id: Uuid) -> Result<Option<Invoice>, DatabaseError> {
    let invoice = sqlx::query_as::<_, Invoice>(&format!(
        "UPDATE invoices SET status = 'paid', paid_date = CURRENT_DATE
         WHERE id = $1
         RETURNING {INVOICE_COLUMNS}",
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(invoice)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, DatabaseError> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Staff account used for login. `password_hash` stays server-side; the
/// client-facing identity travels inside the token claims instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
}

/// Reduced user reference for assignment pickers.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserRef {
    pub id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientInput {
    pub first_name: String,
    pub last_name: String,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MedicalHistory {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub diagnoses: Vec<String>,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MedicalHistoryInput {
    #[serde(default)]
    pub diagnoses: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_minutes: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub service_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentInput {
    pub patient_id: Uuid,
    pub service_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    #[serde(default = "default_scheduled")]
    pub status: String,
    pub notes: Option<String>,
}

fn default_scheduled() -> String {
    "scheduled".to_string()
}

/// Joined name fields of a related patient, kept nested until response
/// shaping flattens them into `patient_name`.
#[derive(Debug, Clone, Serialize)]
pub struct PatientBrief {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Joined name field of a related service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceBrief {
    pub name: Option<String>,
}

/// Appointment plus its joined patient/service sub-records.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentRecord {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patients: Option<PatientBrief>,
    pub services: Option<ServiceBrief>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub service_id: Uuid,
    pub amount: Decimal,
    pub status: String,
    pub issued_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceInput {
    pub patient_id: Uuid,
    pub service_id: Uuid,
    pub amount: Decimal,
    #[serde(default = "default_pending")]
    pub status: String,
    pub issued_date: Option<NaiveDate>,
}

fn default_pending() -> String {
    "pending".to_string()
}

/// Invoice plus its joined patient sub-record.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRecord {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub patients: Option<PatientBrief>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<Uuid>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_todo")]
    pub status: String,
    #[serde(default = "default_medium")]
    pub priority: String,
    pub assigned_to: Option<Uuid>,
    #[serde(default)]
    pub position: i32,
}

fn default_todo() -> String {
    "todo".to_string()
}

fn default_medium() -> String {
    "medium".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatusInput {
    pub status: String,
    #[serde(default)]
    pub position: i32,
}

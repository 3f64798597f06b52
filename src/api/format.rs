//! Response shaping: derived display fields and join flattening.
//!
//! Every function here is a pure projection from one JSON value to a new
//! one - inputs are never mutated, missing or null fields never panic, and
//! applying a projection twice yields the same value as applying it once.

use serde_json::{Map, Value};

/// Derived display name: `first` and `last` joined by a space, trimmed.
pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Full name of a nested patient object; empty when absent or malformed.
fn nested_patient_name(nested: Option<&Value>) -> String {
    match nested.and_then(Value::as_object) {
        Some(patient) => full_name(
            &str_field(patient, "first_name"),
            &str_field(patient, "last_name"),
        ),
        None => String::new(),
    }
}

/// Name of a nested service object; empty when absent or malformed.
fn nested_service_name(nested: Option<&Value>) -> String {
    nested
        .and_then(Value::as_object)
        .map(|service| str_field(service, "name"))
        .unwrap_or_default()
}

/// Add a computed `full_name` alongside a record's `first_name`/`last_name`.
pub fn with_full_name(record: &Value) -> Value {
    let Some(obj) = record.as_object() else {
        return record.clone();
    };

    let mut out = obj.clone();
    let name = full_name(&str_field(&out, "first_name"), &str_field(&out, "last_name"));
    out.insert("full_name".to_string(), Value::String(name));
    Value::Object(out)
}

/// Flatten an appointment's nested `patients`/`services` joins into
/// `patient_name`/`service_name` sibling fields.
///
/// When a nested join is absent an already-flattened name field is left
/// untouched, so re-applying the projection is a no-op.
pub fn flatten_appointment(record: &Value) -> Value {
    let Some(obj) = record.as_object() else {
        return record.clone();
    };

    let mut out = obj.clone();
    let patient = out.remove("patients");
    let service = out.remove("services");

    if patient.is_some() || !out.contains_key("patient_name") {
        let name = nested_patient_name(patient.as_ref());
        out.insert("patient_name".to_string(), Value::String(name));
    }
    if service.is_some() || !out.contains_key("service_name") {
        let name = nested_service_name(service.as_ref());
        out.insert("service_name".to_string(), Value::String(name));
    }

    Value::Object(out)
}

/// Flatten an invoice's nested `patients` join into a `patient_name` field.
pub fn flatten_invoice(record: &Value) -> Value {
    let Some(obj) = record.as_object() else {
        return record.clone();
    };

    let mut out = obj.clone();
    let patient = out.remove("patients");

    if patient.is_some() || !out.contains_key("patient_name") {
        let name = nested_patient_name(patient.as_ref());
        out.insert("patient_name".to_string(), Value::String(name));
    }

    Value::Object(out)
}

/// Apply a projection to every element of an array value.
pub fn map_records(records: &Value, project: impl Fn(&Value) -> Value) -> Value {
    match records.as_array() {
        Some(items) => Value::Array(items.iter().map(|item| project(item)).collect()),
        None => records.clone(),
    }
}

/// Apply a projection to the `data` array of a page envelope, in place on
/// an owned copy held by the caller.
pub fn map_page_data(page: &mut Value, project: impl Fn(&Value) -> Value) {
    if let Some(data) = page.get_mut("data") {
        *data = map_records(data, project);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_name_trims_missing_parts() {
        assert_eq!(full_name("יעל", "מזרחי"), "יעל מזרחי");
        assert_eq!(full_name("יעל", ""), "יעל");
        assert_eq!(full_name("", "מזרחי"), "מזרחי");
        assert_eq!(full_name("", ""), "");
    }

    #[test]
    fn with_full_name_derives_and_tolerates_missing_fields() {
        let patient = json!({"first_name": "יעל", "last_name": "מזרחי"});
        assert_eq!(with_full_name(&patient)["full_name"], "יעל מזרחי");

        let empty = json!({});
        assert_eq!(with_full_name(&empty)["full_name"], "");

        let nulls = json!({"first_name": null, "last_name": null});
        assert_eq!(with_full_name(&nulls)["full_name"], "");
    }

    #[test]
    fn with_full_name_is_idempotent_and_does_not_mutate() {
        let patient = json!({"first_name": "יעל", "last_name": "מזרחי"});
        let snapshot = patient.clone();

        let once = with_full_name(&patient);
        let twice = with_full_name(&once);

        assert_eq!(once, twice);
        assert_eq!(patient, snapshot);
    }

    #[test]
    fn flatten_appointment_replaces_joins_with_names() {
        let appointment = json!({
            "id": "a1",
            "patients": {"first_name": "יעל", "last_name": "מזרחי"},
            "services": {"name": "בדיקה שגרתית"},
        });

        let flat = flatten_appointment(&appointment);

        assert_eq!(flat["patient_name"], "יעל מזרחי");
        assert_eq!(flat["service_name"], "בדיקה שגרתית");
        assert!(flat.get("patients").is_none());
        assert!(flat.get("services").is_none());
    }

    #[test]
    fn flatten_appointment_defaults_to_empty_on_missing_joins() {
        let bare = json!({"id": "a1"});
        let flat = flatten_appointment(&bare);
        assert_eq!(flat["patient_name"], "");
        assert_eq!(flat["service_name"], "");

        let nulls = json!({"id": "a1", "patients": null, "services": 7});
        let flat = flatten_appointment(&nulls);
        assert_eq!(flat["patient_name"], "");
        assert_eq!(flat["service_name"], "");
    }

    #[test]
    fn flatten_appointment_is_idempotent() {
        let appointment = json!({
            "id": "a1",
            "patients": {"first_name": "יעל", "last_name": "מזרחי"},
            "services": {"name": "בדיקה שגרתית"},
        });

        let once = flatten_appointment(&appointment);
        let twice = flatten_appointment(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn flatten_invoice_uses_patient_join_only() {
        let invoice = json!({
            "id": "i1",
            "patients": {"first_name": "דוד", "last_name": "פרץ"},
        });

        let flat = flatten_invoice(&invoice);
        assert_eq!(flat["patient_name"], "דוד פרץ");
        assert!(flat.get("patients").is_none());
        assert_eq!(flatten_invoice(&flat), flat);
    }

    #[test]
    fn non_object_records_pass_through() {
        assert_eq!(with_full_name(&json!(null)), json!(null));
        assert_eq!(flatten_appointment(&json!("x")), json!("x"));
        assert_eq!(flatten_invoice(&json!(3)), json!(3));
    }

    #[test]
    fn map_page_data_projects_each_record() {
        let mut page = json!({
            "data": [
                {"first_name": "יעל", "last_name": "מזרחי"},
                {"first_name": "דוד", "last_name": "פרץ"},
            ],
            "total": 2,
            "page": 1,
            "limit": 10,
        });

        map_page_data(&mut page, with_full_name);

        assert_eq!(page["data"][0]["full_name"], "יעל מזרחי");
        assert_eq!(page["data"][1]["full_name"], "דוד פרץ");
        assert_eq!(page["total"], 2);
    }
}

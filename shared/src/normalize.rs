//! Field-name normalization for records arriving as loose JSON
//!
//! Storage rows use snake_case column names while the dashboard API speaks
//! camelCase. Records can reach the core in either convention (store
//! responses, seed files, browser-local fallbacks), so a fixed alias table
//! resolves both spellings, with the snake_case storage spelling winning
//! when a record carries both.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use uuid::Uuid;

use crate::models::Certification;

// Alias tables, storage spelling first. The store is authoritative, so the
// snake_case value wins when both spellings are present.
const ISSUE_DATE_FIELDS: &[&str] = &["issue_date", "issueDate"];
const EXPIRY_DATE_FIELDS: &[&str] = &["expiry_date", "expiryDate"];
const CERT_ID_FIELDS: &[&str] = &["cert_id", "certId", "reference"];
const CERT_URL_FIELDS: &[&str] = &["cert_url", "certUrl"];

/// Normalize a loose JSON record into the canonical certification shape.
///
/// Missing optional fields become `None`, never an error; unparsable dates
/// degrade the same way. A record without a usable id is assigned a fresh
/// one.
pub fn normalize(record: &Value) -> Certification {
    Certification {
        id: pick(record, &["id"])
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .unwrap_or_else(Uuid::new_v4),
        name: pick_text(record, &["name"]).unwrap_or_default(),
        provider: pick_text(record, &["provider"]),
        category: pick_text(record, &["category"]),
        issue_date: pick_date(record, ISSUE_DATE_FIELDS),
        expiry_date: pick_date(record, EXPIRY_DATE_FIELDS),
        cert_id: pick_text(record, CERT_ID_FIELDS),
        cert_url: pick_text(record, CERT_URL_FIELDS),
        notes: pick_text(record, &["notes"]),
    }
}

/// Normalize a list of loose JSON records
pub fn normalize_all(records: &[Value]) -> Vec<Certification> {
    records.iter().map(normalize).collect()
}

/// Lenient date parsing: plain ISO dates or RFC 3339 timestamps.
/// Anything else degrades to `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|stamp| stamp.date_naive())
        })
}

fn pick<'a>(record: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| record.get(name).filter(|value| !value.is_null()))
}

fn pick_text(record: &Value, names: &[&str]) -> Option<String> {
    pick(record, names)
        .and_then(Value::as_str)
        .filter(|raw| !raw.is_empty())
        .map(str::to_string)
}

fn pick_date(record: &Value, names: &[&str]) -> Option<NaiveDate> {
    pick(record, names).and_then(Value::as_str).and_then(parse_date)
}

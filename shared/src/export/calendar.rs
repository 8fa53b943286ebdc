//! iCalendar export of upcoming certification renewals
//!
//! Emits one all-day VEVENT per record with a present expiry that has not
//! passed; everything else is silently skipped. The timestamp is an explicit
//! parameter so documents are reproducible under test.

use chrono::{DateTime, NaiveDate, Utc};

use crate::insights::UNSPECIFIED_LABEL;
use crate::models::EnrichedCertification;

/// Base filename offered for the calendar download
pub const CALENDAR_EXPORT_FILENAME: &str = "certtrack-renewals.ics";

/// Domain suffix appended to record ids to form globally-unique event UIDs
pub const UID_DOMAIN: &str = "certtrack";

const PROD_ID: &str = "-//CertTrack//EN";

/// Encode upcoming renewals as a VCALENDAR document.
///
/// Returns `None` when no record is eligible (expiry present and days left
/// not negative), so callers can skip producing an empty calendar.
pub fn to_calendar(
    records: &[EnrichedCertification],
    now: DateTime<Utc>,
) -> Option<String> {
    let eligible: Vec<(&EnrichedCertification, NaiveDate)> = records
        .iter()
        .filter(|cert| cert.days_left.is_some_and(|days| days >= 0))
        .filter_map(|cert| cert.record.expiry_date.map(|expiry| (cert, expiry)))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let dt_stamp = now.format("%Y%m%dT%H%M%SZ").to_string();

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PROD_ID),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for (cert, expiry) in eligible {
        let record = &cert.record;

        let mut description_parts = vec![
            format!(
                "Provider: {}",
                escape_text(record.provider.as_deref().unwrap_or(UNSPECIFIED_LABEL))
            ),
            format!(
                "Category: {}",
                escape_text(record.category.as_deref().unwrap_or(UNSPECIFIED_LABEL))
            ),
        ];
        if let Some(reference) = record.cert_id.as_deref() {
            description_parts.push(format!("Reference: {}", escape_text(reference)));
        }
        description_parts.push("Generated by CertTrack".to_string());

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}@{}", record.id, UID_DOMAIN));
        lines.push(format!("DTSTAMP:{}", dt_stamp));
        lines.push(format!("DTSTART;VALUE=DATE:{}", expiry.format("%Y%m%d")));
        lines.push(format!("SUMMARY:Renew {}", escape_text(&record.name)));
        lines.push(format!("DESCRIPTION:{}", description_parts.join("\\n")));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    Some(lines.join("\r\n"))
}

/// Escape a value per the RFC 5545 TEXT rule so commas, semicolons,
/// backslashes and newlines cannot break the document structure.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    use crate::expiry::enrich;
    use crate::models::Certification;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap()
    }

    fn cert(name: &str, expiry: Option<NaiveDate>) -> EnrichedCertification {
        enrich(
            Certification {
                id: Uuid::new_v4(),
                name: name.to_string(),
                provider: Some("AWS".to_string()),
                category: Some("Cloud".to_string()),
                issue_date: None,
                expiry_date: expiry,
                cert_id: Some("AWS-123456".to_string()),
                cert_url: None,
                notes: None,
            },
            today(),
        )
    }

    #[test]
    fn no_eligible_records_produces_no_document() {
        let expired = cert("Old", NaiveDate::from_ymd_opt(2024, 1, 1));
        let undated = cert("Undated", None);
        assert!(to_calendar(&[expired, undated], now()).is_none());
    }

    #[test]
    fn one_vevent_per_eligible_record_with_unique_uids() {
        let records = vec![
            cert("AWS SA", NaiveDate::from_ymd_opt(2026, 5, 11)),
            cert("CKA", NaiveDate::from_ymd_opt(2025, 10, 5)),
            cert("Expired", NaiveDate::from_ymd_opt(2024, 1, 1)),
            cert("Undated", None),
        ];

        let document = to_calendar(&records, now()).unwrap();

        assert_eq!(document.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(document.matches("END:VEVENT").count(), 2);

        let uids: Vec<_> = document
            .lines()
            .filter(|line| line.starts_with("UID:"))
            .collect();
        assert_eq!(uids.len(), 2);
        assert_ne!(uids[0], uids[1]);
        assert!(uids.iter().all(|uid| uid.ends_with("@certtrack")));
    }

    #[test]
    fn event_carries_all_day_start_summary_and_stamp() {
        let records = vec![cert("AWS SA", NaiveDate::from_ymd_opt(2026, 5, 11))];
        let document = to_calendar(&records, now()).unwrap();

        assert!(document.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0"));
        assert!(document.ends_with("END:VCALENDAR"));
        assert!(document.contains("DTSTART;VALUE=DATE:20260511"));
        assert!(document.contains("DTSTAMP:20250615T093000Z"));
        assert!(document.contains("SUMMARY:Renew AWS SA"));
        assert!(document.contains("DESCRIPTION:Provider: AWS\\nCategory: Cloud\\nReference: AWS-123456\\nGenerated by CertTrack"));
    }

    #[test]
    fn expiring_today_is_still_eligible() {
        let records = vec![cert("Due today", Some(today()))];
        let document = to_calendar(&records, now()).unwrap();
        assert_eq!(document.matches("BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn text_fields_are_escaped() {
        let mut tricky = cert("Cloud, Pro; Level\\2", NaiveDate::from_ymd_opt(2026, 5, 11));
        tricky.record.provider = Some("A,B".to_string());

        let document = to_calendar(&[tricky], now()).unwrap();
        assert!(document.contains("SUMMARY:Renew Cloud\\, Pro\\; Level\\\\2"));
        assert!(document.contains("Provider: A\\,B"));
    }

    #[test]
    fn missing_provider_and_category_fall_back_to_unspecified() {
        let mut bare = cert("Bare", NaiveDate::from_ymd_opt(2026, 5, 11));
        bare.record.provider = None;
        bare.record.category = None;
        bare.record.cert_id = None;

        let document = to_calendar(&[bare], now()).unwrap();
        assert!(document.contains("DESCRIPTION:Provider: Unspecified\\nCategory: Unspecified\\nGenerated by CertTrack"));
    }
}

//! CSV export of the filtered dashboard view

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::expiry::format_display_date;
use crate::models::EnrichedCertification;

use super::ExportError;

/// Base filename offered for the CSV download
pub const CSV_EXPORT_FILENAME: &str = "certtrack-certifications.csv";

const CSV_HEADER: [&str; 9] = [
    "Name",
    "Provider",
    "Category",
    "Issue date",
    "Expiry date",
    "Status",
    "Days left",
    "Reference",
    "URL",
];

/// Encode the record list as a CRLF-terminated CSV document with every field
/// quoted. Returns `Ok(None)` when there is nothing to export, so callers can
/// skip producing a file instead of downloading an empty table.
pub fn to_csv(records: &[EnrichedCertification]) -> Result<Option<String>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for cert in records {
        let record = &cert.record;
        let issue = format_display_date(record.issue_date);
        let expiry = format_display_date(record.expiry_date);
        let status = cert.status.to_string();
        let days_left = cert
            .days_left
            .map(|days| days.to_string())
            .unwrap_or_default();

        writer.write_record([
            record.name.as_str(),
            record.provider.as_deref().unwrap_or_default(),
            record.category.as_deref().unwrap_or_default(),
            issue.as_str(),
            expiry.as_str(),
            status.as_str(),
            days_left.as_str(),
            record.cert_id.as_deref().unwrap_or_default(),
            record.cert_url.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::CsvWriter(err.to_string()))?;

    Ok(Some(String::from_utf8(bytes)?))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::expiry::enrich;
    use crate::models::Certification;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn cert(name: &str, expiry: Option<NaiveDate>) -> EnrichedCertification {
        enrich(
            Certification {
                id: Uuid::new_v4(),
                name: name.to_string(),
                provider: Some("AWS".to_string()),
                category: Some("Cloud".to_string()),
                issue_date: NaiveDate::from_ymd_opt(2023, 5, 11),
                expiry_date: expiry,
                cert_id: Some("AWS-123456".to_string()),
                cert_url: Some("https://example.com".to_string()),
                notes: None,
            },
            today(),
        )
    }

    #[test]
    fn empty_view_produces_no_document() {
        assert!(to_csv(&[]).unwrap().is_none());
    }

    #[test]
    fn one_line_per_record_plus_header() {
        let records = vec![
            cert("AWS SA", NaiveDate::from_ymd_opt(2026, 5, 11)),
            cert("CKA", None),
        ];
        let document = to_csv(&records).unwrap().unwrap();

        let lines: Vec<_> = document.lines().collect();
        assert_eq!(lines.len(), records.len() + 1);
        assert!(document.contains("\r\n"));
        assert!(lines[0].starts_with("\"Name\",\"Provider\""));

        // Every field is quoted, so each row splits into the header's width.
        for line in &lines {
            assert_eq!(line.split("\",\"").count(), CSV_HEADER.len());
        }
    }

    #[test]
    fn dates_render_for_display_and_missing_days_left_is_blank() {
        let records = vec![cert("CKA", None)];
        let document = to_csv(&records).unwrap().unwrap();
        let row = document.lines().nth(1).unwrap();

        assert!(row.contains("\"11 May 2023\""));
        // Missing expiry renders as "-" and days left as an empty field.
        assert!(row.contains("\"-\""));
        assert!(row.contains("\"Unknown\",\"\""));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut tricky = cert("Say \"hi\"", NaiveDate::from_ymd_opt(2026, 5, 11));
        tricky.record.provider = Some("A,B".to_string());
        let document = to_csv(&[tricky]).unwrap().unwrap();

        assert!(document.contains("\"Say \"\"hi\"\"\""));
        assert!(document.contains("\"A,B\""));
    }

    #[test]
    fn expired_records_are_still_exported() {
        let records = vec![cert("Old", NaiveDate::from_ymd_opt(2024, 1, 1))];
        let document = to_csv(&records).unwrap().unwrap();
        assert!(document.contains("\"Expired\""));
    }
}

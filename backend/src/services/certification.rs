//! Certification service: validation, normalization at the edge, and store
//! access

use chrono::NaiveDate;
use validator::Validate;

use shared::expiry::enrich_all;
use shared::models::{Certification, EnrichedCertification, NewCertification};

use crate::error::{AppError, AppResult};
use crate::services::store::CertificationStore;

/// Certification service for the record endpoints and derived views
#[derive(Clone)]
pub struct CertificationService {
    store: CertificationStore,
}

impl CertificationService {
    /// Create a new CertificationService instance
    pub fn new(store: CertificationStore) -> Self {
        Self { store }
    }

    /// List records in listing order (expiry ascending, undated last)
    pub async fn list_certifications(&self) -> AppResult<Vec<Certification>> {
        self.store.list().await
    }

    /// List records with derived expiry fields against a reference date
    pub async fn list_enriched(
        &self,
        today: NaiveDate,
    ) -> AppResult<Vec<EnrichedCertification>> {
        Ok(enrich_all(self.store.list().await?, today))
    }

    /// Create a record. `name` is the only required field; blank optional
    /// fields are stored as absent so the derived views treat them uniformly.
    pub async fn create_certification(
        &self,
        input: NewCertification,
    ) -> AppResult<Certification> {
        input.validate().map_err(|_| AppError::Validation {
            field: "name".to_string(),
            message: "name is required".to_string(),
        })?;

        let NewCertification {
            name,
            provider,
            category,
            issue_date,
            expiry_date,
            cert_id,
            cert_url,
            notes,
        } = input;

        let input = NewCertification {
            name,
            provider: blank_to_none(provider),
            category: blank_to_none(category),
            issue_date,
            expiry_date,
            cert_id: blank_to_none(cert_id),
            cert_url: blank_to_none(cert_url),
            notes: blank_to_none(notes),
        };

        self.store.create(input).await
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

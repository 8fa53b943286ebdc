//! Record store implementations
//!
//! The API is backed by one of two stores behind the same list/create
//! interface, selected by configuration: PostgreSQL for normal deployments,
//! and an in-process memory store for tests and storeless dashboard
//! deployments.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::models::{listing_order, Certification, NewCertification};

use crate::error::AppResult;

/// Record store selected at startup
#[derive(Clone)]
pub enum CertificationStore {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl CertificationStore {
    pub fn postgres(db: PgPool) -> Self {
        CertificationStore::Postgres(PgStore { db })
    }

    pub fn memory() -> Self {
        CertificationStore::Memory(MemoryStore::default())
    }

    /// List all records, expiry ascending with undated records last, then
    /// name ascending.
    pub async fn list(&self) -> AppResult<Vec<Certification>> {
        match self {
            CertificationStore::Postgres(store) => store.list().await,
            CertificationStore::Memory(store) => Ok(store.list().await),
        }
    }

    /// Persist a record and return it with its assigned id
    pub async fn create(&self, input: NewCertification) -> AppResult<Certification> {
        match self {
            CertificationStore::Postgres(store) => store.create(&input).await,
            CertificationStore::Memory(store) => Ok(store.create(&input).await),
        }
    }

    /// Cheap connectivity probe for the health endpoint
    pub async fn ping(&self) -> bool {
        match self {
            CertificationStore::Postgres(store) => {
                sqlx::query("SELECT 1").execute(&store.db).await.is_ok()
            }
            CertificationStore::Memory(_) => true,
        }
    }
}

// ============================================================================
// PostgreSQL store
// ============================================================================

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

/// Row shape of the certifications table
#[derive(Debug, FromRow)]
struct CertificationRow {
    id: Uuid,
    name: String,
    provider: Option<String>,
    category: Option<String>,
    issue_date: Option<NaiveDate>,
    expiry_date: Option<NaiveDate>,
    cert_id: Option<String>,
    cert_url: Option<String>,
    notes: Option<String>,
}

impl From<CertificationRow> for Certification {
    fn from(row: CertificationRow) -> Self {
        Certification {
            id: row.id,
            name: row.name,
            provider: row.provider,
            category: row.category,
            issue_date: row.issue_date,
            expiry_date: row.expiry_date,
            cert_id: row.cert_id,
            cert_url: row.cert_url,
            notes: row.notes,
        }
    }
}

impl PgStore {
    async fn list(&self) -> AppResult<Vec<Certification>> {
        let rows = sqlx::query_as::<_, CertificationRow>(
            r#"
            SELECT id, name, provider, category,
                   issue_date, expiry_date, cert_id, cert_url, notes
            FROM certifications
            ORDER BY expiry_date ASC NULLS LAST, name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Certification::from).collect())
    }

    async fn create(&self, input: &NewCertification) -> AppResult<Certification> {
        let row = sqlx::query_as::<_, CertificationRow>(
            r#"
            INSERT INTO certifications
                (name, provider, category, issue_date, expiry_date, cert_id, cert_url, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, provider, category,
                      issue_date, expiry_date, cert_id, cert_url, notes
            "#,
        )
        .bind(&input.name)
        .bind(&input.provider)
        .bind(&input.category)
        .bind(input.issue_date)
        .bind(input.expiry_date)
        .bind(&input.cert_id)
        .bind(&input.cert_url)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<Certification>>>,
}

impl MemoryStore {
    pub async fn list(&self) -> Vec<Certification> {
        let mut records = self.records.read().await.clone();
        records.sort_by(listing_order);
        records
    }

    pub async fn create(&self, input: &NewCertification) -> Certification {
        let record = Certification {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            provider: input.provider.clone(),
            category: input.category.clone(),
            issue_date: input.issue_date,
            expiry_date: input.expiry_date,
            cert_id: input.cert_id.clone(),
            cert_url: input.cert_url.clone(),
            notes: input.notes.clone(),
        };

        self.records.write().await.push(record.clone());
        record
    }
}

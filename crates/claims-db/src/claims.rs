//! Claim repository
//!
//! Persistence boundary for claims and their documents. Queries are issued
//! at runtime against the pool injected at construction; nothing in here is
//! process-global. The claim + document insert is one transaction, so a
//! failed submission never leaves a partially attached claim behind.

use chrono::{Datelike, Utc};
use claims_core::models::{Claim, ClaimStatus, ClaimWithDocuments, Document, NewClaim, NewDocument};
use claims_core::AppError;
use rand::Rng;
use sqlx::SqlitePool;

/// How many fresh identifiers to try when an insert hits the primary-key
/// constraint. Collisions are rare (4 random digits per year) but possible.
const MAX_ID_ATTEMPTS: u32 = 3;

/// Generate a candidate claim id: current year plus a random 4-digit suffix.
/// Uniqueness is enforced by the primary key, with a bounded retry on
/// collision in `create_with_documents`.
fn generate_claim_id() -> String {
    let year = Utc::now().year();
    let suffix: u32 = rand::rng().random_range(0..10_000);
    format!("CLM-{}-{:04}", year, suffix)
}

/// Optional, conjunctive filters for claim listings.
#[derive(Debug, Default, Clone)]
pub struct ClaimFilter {
    pub employee_id: Option<String>,
    pub claim_id: Option<String>,
    pub status: Option<ClaimStatus>,
}

#[derive(Clone)]
pub struct ClaimRepository {
    pool: SqlitePool,
}

impl ClaimRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a claim and all of its document rows in one transaction.
    /// Status starts as pending; both timestamps are the submission time.
    pub async fn create_with_documents(
        &self,
        new_claim: &NewClaim,
        documents: &[NewDocument],
    ) -> Result<ClaimWithDocuments, AppError> {
        self.create_with_id_source(new_claim, documents, generate_claim_id)
            .await
    }

    async fn create_with_id_source(
        &self,
        new_claim: &NewClaim,
        documents: &[NewDocument],
        mut next_id: impl FnMut() -> String,
    ) -> Result<ClaimWithDocuments, AppError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let claim_id = next_id();
            let now = Utc::now();
            let mut tx = self.pool.begin().await?;

            let inserted = sqlx::query(
                r#"
                INSERT INTO claims
                    (claim_id, employee_name, employee_email, employee_id, department,
                     claim_date, amount, description, claim_type, status, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
            )
            .bind(&claim_id)
            .bind(&new_claim.employee_name)
            .bind(&new_claim.employee_email)
            .bind(&new_claim.employee_id)
            .bind(&new_claim.department)
            .bind(new_claim.claim_date)
            .bind(new_claim.amount)
            .bind(&new_claim.description)
            .bind(&new_claim.claim_type)
            .bind(ClaimStatus::Pending)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await;

            match inserted {
                Ok(_) => {}
                Err(e)
                    if attempt < MAX_ID_ATTEMPTS
                        && e.as_database_error()
                            .is_some_and(|db| db.is_unique_violation()) =>
                {
                    tracing::warn!(
                        claim_id = %claim_id,
                        attempt,
                        "Claim id collision, regenerating"
                    );
                    tx.rollback().await?;
                    continue;
                }
                Err(e) => return Err(AppError::Database(e)),
            }

            let mut rows = Vec::with_capacity(documents.len());
            for doc in documents {
                let result = sqlx::query(
                    r#"
                    INSERT INTO documents (claim_id, file_name, file_path, uploaded_at)
                    VALUES (?1, ?2, ?3, ?4)
                    "#,
                )
                .bind(&claim_id)
                .bind(&doc.file_name)
                .bind(&doc.file_path)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                rows.push(Document {
                    id: result.last_insert_rowid(),
                    claim_id: claim_id.clone(),
                    file_name: doc.file_name.clone(),
                    file_path: doc.file_path.clone(),
                    uploaded_at: now,
                });
            }

            tx.commit().await?;

            tracing::info!(
                claim_id = %claim_id,
                document_count = rows.len(),
                "Claim persisted"
            );

            return Ok(ClaimWithDocuments {
                claim: Claim {
                    claim_id,
                    employee_name: new_claim.employee_name.clone(),
                    employee_email: new_claim.employee_email.clone(),
                    employee_id: new_claim.employee_id.clone(),
                    department: new_claim.department.clone(),
                    claim_date: new_claim.claim_date,
                    amount: new_claim.amount,
                    description: new_claim.description.clone(),
                    claim_type: new_claim.claim_type.clone(),
                    status: ClaimStatus::Pending,
                    created_at: now,
                    updated_at: now,
                },
                documents: rows,
            });
        }

        // Only reachable if every attempt collided; the last attempt returns
        // its database error above.
        Err(AppError::Internal(
            "Exhausted claim id generation attempts".to_string(),
        ))
    }

    /// List claims newest first, each enriched with its documents. One
    /// dependent document query per claim; fine at this service's scale.
    pub async fn list_claims(
        &self,
        filter: &ClaimFilter,
    ) -> Result<Vec<ClaimWithDocuments>, AppError> {
        let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "SELECT claim_id, employee_name, employee_email, employee_id, department, \
             claim_date, amount, description, claim_type, status, created_at, updated_at \
             FROM claims WHERE 1 = 1",
        );
        if let Some(employee_id) = &filter.employee_id {
            query.push(" AND employee_id = ").push_bind(employee_id);
        }
        if let Some(claim_id) = &filter.claim_id {
            query.push(" AND claim_id = ").push_bind(claim_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        query.push(" ORDER BY created_at DESC, claim_id DESC");

        let claims: Vec<Claim> = query.build_query_as().fetch_all(&self.pool).await?;

        let mut enriched = Vec::with_capacity(claims.len());
        for claim in claims {
            let documents = self.documents_of(&claim.claim_id).await?;
            enriched.push(ClaimWithDocuments { claim, documents });
        }
        Ok(enriched)
    }

    /// Documents of a claim; `NotFound` if the claim itself is absent.
    pub async fn list_documents(&self, claim_id: &str) -> Result<Vec<Document>, AppError> {
        if !self.claim_exists(claim_id).await? {
            return Err(AppError::NotFound(format!("Claim {} not found", claim_id)));
        }
        self.documents_of(claim_id).await
    }

    async fn documents_of(&self, claim_id: &str) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT id, claim_id, file_name, file_path, uploaded_at \
             FROM documents WHERE claim_id = ?1 ORDER BY id",
        )
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    pub async fn get_document(&self, document_id: i64) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>(
            "SELECT id, claim_id, file_name, file_path, uploaded_at \
             FROM documents WHERE id = ?1",
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(document)
    }

    async fn claim_exists(&self, claim_id: &str) -> Result<bool, AppError> {
        let row = sqlx::query_scalar::<_, i64>("SELECT 1 FROM claims WHERE claim_id = ?1")
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Apply a review decision. Only pending claims can transition; an
    /// existing non-pending claim yields `InvalidTransition` (409), an
    /// unknown claim `NotFound`.
    pub async fn update_status(
        &self,
        claim_id: &str,
        status: ClaimStatus,
    ) -> Result<Claim, AppError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE claims SET status = ?1, updated_at = ?2 \
             WHERE claim_id = ?3 AND status = ?4",
        )
        .bind(status)
        .bind(now)
        .bind(claim_id)
        .bind(ClaimStatus::Pending)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let current = sqlx::query_scalar::<_, ClaimStatus>(
                "SELECT status FROM claims WHERE claim_id = ?1",
            )
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?;

            return match current {
                None => Err(AppError::NotFound(format!("Claim {} not found", claim_id))),
                Some(current) => Err(AppError::InvalidTransition {
                    claim_id: claim_id.to_string(),
                    current: current.to_string(),
                }),
            };
        }

        let claim = sqlx::query_as::<_, Claim>(
            "SELECT claim_id, employee_name, employee_email, employee_id, department, \
             claim_date, amount, description, claim_type, status, created_at, updated_at \
             FROM claims WHERE claim_id = ?1",
        )
        .bind(claim_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(claim_id = %claim_id, status = %status, "Claim status updated");
        Ok(claim)
    }

    /// Remove a claim; document rows go with it via `ON DELETE CASCADE`.
    pub async fn delete_claim(&self, claim_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM claims WHERE claim_id = ?1")
            .bind(claim_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

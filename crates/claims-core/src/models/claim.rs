use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Review state of a claim. Stored as lowercase text; the only legal
/// transitions are pending -> approved and pending -> rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Parse a review decision from a PATCH body. `pending` is not a valid
    /// target state, so it parses as None like any other junk value.
    pub fn parse_decision(value: &str) -> Option<ClaimStatus> {
        match value {
            "approved" => Some(ClaimStatus::Approved),
            "rejected" => Some(ClaimStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted expense claim, keyed by its `CLM-<year>-<nnnn>` identifier.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Claim {
    pub claim_id: String,
    pub employee_name: String,
    pub employee_email: String,
    pub employee_id: String,
    pub department: String,
    pub claim_date: NaiveDate,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub claim_type: String,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated claim ready for persistence. Identity, status, and timestamps
/// are assigned by the repository at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaim {
    pub employee_name: String,
    pub employee_email: String,
    pub employee_id: String,
    pub department: String,
    pub claim_date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub claim_type: String,
}

/// A claim enriched with its documents, as returned by claim listings.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimWithDocuments {
    #[serde(flatten)]
    pub claim: Claim,
    pub documents: Vec<super::Document>,
}

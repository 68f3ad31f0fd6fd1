//! Claim submission validation
//!
//! Pure, side-effect-free checks over the raw multipart fields. Rules run in
//! a fixed order and the first failure wins: required fields, employee id
//! pattern, email domain, amount bounds, date window, document count.
//! Validation never touches storage; "today" is injected so the date window
//! is deterministic under test.

use crate::models::NewClaim;
use chrono::{Months, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Upper bound for a single claim, inclusive.
pub const MAX_AMOUNT: f64 = 50_000.0;

/// How far back a claim date may lie, in calendar months.
pub const CLAIM_DATE_WINDOW_MONTHS: u32 = 3;

// Employee ids are "ATS0" + a digit 1-9 + two digits, exactly 7 chars.
static EMPLOYEE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ATS0[1-9][0-9]{2}$").expect("employee id regex"));

// Only corporate-tolerated mail providers are accepted.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@(gmail|outlook)\.com$").expect("email regex"));

/// One stable, client-correctable error per rule. `UnsupportedType` and
/// `TooLarge` belong to the upload boundary but share this type so every
/// rejection renders the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid employee ID. Expected ATS0 followed by a digit 1-9 and two digits, e.g. ATS0123")]
    InvalidEmployeeId,

    #[error("Invalid email. Only gmail.com and outlook.com addresses are accepted")]
    InvalidEmail,

    #[error("Invalid amount. Must be greater than 0 and at most 50000")]
    InvalidAmount,

    #[error("Invalid claim date. Must not be in the future or older than 3 months")]
    InvalidDate,

    #[error("At least one supporting document is required")]
    NoDocuments,

    #[error("Unsupported file type: {0}. Only PDF, JPEG and PNG are accepted")]
    UnsupportedType(String),

    #[error("File {0} exceeds the {1} MiB size limit")]
    TooLarge(String, u64),
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "MISSING_FIELD",
            ValidationError::InvalidEmployeeId => "INVALID_EMPLOYEE_ID",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidAmount => "INVALID_AMOUNT",
            ValidationError::InvalidDate => "INVALID_DATE",
            ValidationError::NoDocuments => "NO_DOCUMENTS",
            ValidationError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
            ValidationError::TooLarge(_, _) => "TOO_LARGE",
        }
    }
}

/// Raw submission fields as they arrive from the multipart form. Every field
/// is optional here; presence is the first thing validation checks.
#[derive(Debug, Default, Clone)]
pub struct SubmissionForm {
    pub employee_name: Option<String>,
    pub employee_email: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub claim_date: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub claim_type: Option<String>,
}

fn require<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn validate_amount(raw: &str) -> Result<f64, ValidationError> {
    let amount: f64 = raw.parse().map_err(|_| ValidationError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount)
}

fn validate_claim_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date =
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?;
    let cutoff = today
        .checked_sub_months(Months::new(CLAIM_DATE_WINDOW_MONTHS))
        .ok_or(ValidationError::InvalidDate)?;
    if date > today || date < cutoff {
        return Err(ValidationError::InvalidDate);
    }
    Ok(date)
}

/// Run every rule in order against the raw form; the first failure wins.
/// On success, returns the typed claim ready for persistence.
pub fn validate_submission(
    form: &SubmissionForm,
    document_count: usize,
    today: NaiveDate,
) -> Result<NewClaim, ValidationError> {
    let employee_name = require(&form.employee_name, "empName")?;
    let employee_email = require(&form.employee_email, "empEmail")?;
    let employee_id = require(&form.employee_id, "empId")?;
    let department = require(&form.department, "department")?;
    let claim_date = require(&form.claim_date, "claimDate")?;
    let amount = require(&form.amount, "amount")?;
    let description = require(&form.description, "description")?;
    let claim_type = require(&form.claim_type, "type")?;

    if !EMPLOYEE_ID_RE.is_match(employee_id) {
        return Err(ValidationError::InvalidEmployeeId);
    }
    if !EMAIL_RE.is_match(employee_email) {
        return Err(ValidationError::InvalidEmail);
    }
    let amount = validate_amount(amount)?;
    let claim_date = validate_claim_date(claim_date, today)?;
    if document_count == 0 {
        return Err(ValidationError::NoDocuments);
    }

    Ok(NewClaim {
        employee_name: employee_name.to_string(),
        employee_email: employee_email.to_string(),
        employee_id: employee_id.to_string(),
        department: department.to_string(),
        claim_date,
        amount,
        description: description.to_string(),
        claim_type: claim_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_form() -> SubmissionForm {
        SubmissionForm {
            employee_name: Some("Asha Rao".to_string()),
            employee_email: Some("asha.rao@gmail.com".to_string()),
            employee_id: Some("ATS0123".to_string()),
            department: Some("Engineering".to_string()),
            claim_date: Some(today().format("%Y-%m-%d").to_string()),
            amount: Some("1250.50".to_string()),
            description: Some("Team offsite travel".to_string()),
            claim_type: Some("travel".to_string()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
    }

    #[test]
    fn accepts_a_fully_valid_form() {
        let claim = validate_submission(&valid_form(), 1, today()).unwrap();
        assert_eq!(claim.employee_id, "ATS0123");
        assert_eq!(claim.amount, 1250.50);
        assert_eq!(claim.claim_type, "travel");
    }

    #[test]
    fn first_missing_field_wins() {
        let mut form = valid_form();
        form.employee_name = None;
        form.amount = None;
        assert_eq!(
            validate_submission(&form, 1, today()),
            Err(ValidationError::MissingField("empName"))
        );
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let mut form = valid_form();
        form.department = Some("   ".to_string());
        assert_eq!(
            validate_submission(&form, 1, today()),
            Err(ValidationError::MissingField("department"))
        );
    }

    #[test]
    fn employee_id_pattern() {
        for (id, ok) in [
            ("ATS0123", true),
            ("ATS0999", true),
            ("ATS1123", false), // fourth char must be 0
            ("ATS0012", false), // fifth char must be 1-9
            ("ats0123", false), // case-sensitive
            ("ATS01234", false),
            ("ATS012", false),
        ] {
            let mut form = valid_form();
            form.employee_id = Some(id.to_string());
            let result = validate_submission(&form, 1, today());
            assert_eq!(result.is_ok(), ok, "employee id {id}");
            if !ok {
                assert_eq!(result, Err(ValidationError::InvalidEmployeeId));
            }
        }
    }

    #[test]
    fn email_domain_allowlist() {
        for (email, ok) in [
            ("a@gmail.com", true),
            ("a@outlook.com", true),
            ("a.b+c@gmail.com", true),
            ("a@yahoo.com", false),
            ("a@gmail.org", false),
            ("not-an-email", false),
        ] {
            let mut form = valid_form();
            form.employee_email = Some(email.to_string());
            let result = validate_submission(&form, 1, today());
            assert_eq!(result.is_ok(), ok, "email {email}");
            if !ok {
                assert_eq!(result, Err(ValidationError::InvalidEmail));
            }
        }
    }

    #[test]
    fn amount_bounds_are_inclusive_at_the_top() {
        for (amount, ok) in [
            ("50000", true),
            ("50000.01", false),
            ("0", false),
            ("-5", false),
            ("0.01", true),
            ("NaN", false),
            ("inf", false),
            ("twelve", false),
        ] {
            let mut form = valid_form();
            form.amount = Some(amount.to_string());
            let result = validate_submission(&form, 1, today());
            assert_eq!(result.is_ok(), ok, "amount {amount}");
            if !ok {
                assert_eq!(result, Err(ValidationError::InvalidAmount));
            }
        }
    }

    #[test]
    fn date_window_is_three_calendar_months() {
        let today = today();
        let cutoff = today.checked_sub_months(Months::new(3)).unwrap();

        for (date, ok) in [
            (today, true),
            (today + Duration::days(1), false), // future
            (cutoff + Duration::days(1), true), // 3 months minus a day ago
            (cutoff, true),                     // exactly on the boundary
            (cutoff - Duration::days(1), false), // 3 months plus a day ago
        ] {
            let mut form = valid_form();
            form.claim_date = Some(date.format("%Y-%m-%d").to_string());
            let result = validate_submission(&form, 1, today);
            assert_eq!(result.is_ok(), ok, "date {date}");
            if !ok {
                assert_eq!(result, Err(ValidationError::InvalidDate));
            }
        }
    }

    #[test]
    fn unparseable_date_rejected() {
        let mut form = valid_form();
        form.claim_date = Some("15/08/2026".to_string());
        assert_eq!(
            validate_submission(&form, 1, today()),
            Err(ValidationError::InvalidDate)
        );
    }

    #[test]
    fn zero_documents_rejected_even_when_fields_are_valid() {
        assert_eq!(
            validate_submission(&valid_form(), 0, today()),
            Err(ValidationError::NoDocuments)
        );
    }

    #[test]
    fn field_errors_take_precedence_over_missing_documents() {
        let mut form = valid_form();
        form.employee_id = Some("ATS1123".to_string());
        assert_eq!(
            validate_submission(&form, 0, today()),
            Err(ValidationError::InvalidEmployeeId)
        );
    }
}

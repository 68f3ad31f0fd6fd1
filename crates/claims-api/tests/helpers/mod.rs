pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use claims_core::Config;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// A fully initialized app over a temp-dir SQLite file and temp-dir blob
/// storage. Dropping it tears the whole thing down.
pub struct TestApp {
    pub server: TestServer,
    /// Directory promoted blobs are served from.
    pub uploads_dir: PathBuf,
    /// Staging directory for not-yet-promoted blobs.
    pub staging_dir: PathBuf,
    _tmp: TempDir,
}

pub async fn setup_test_app() -> TestApp {
    let tmp = TempDir::new().expect("create temp dir");
    let blob_root = tmp.path().join("blobs");

    let config = Config {
        database_url: format!(
            "sqlite://{}?mode=rwc",
            tmp.path().join("claims.db").display()
        ),
        upload_dir: blob_root.display().to_string(),
        db_connect_max_attempts: 3,
        db_connect_retry_interval: Duration::from_millis(50),
        ..Config::default()
    };

    let (_state, router) = claims_api::setup::initialize_app(config)
        .await
        .expect("initialize app");

    TestApp {
        server: TestServer::new(router).expect("test server"),
        uploads_dir: blob_root.join("uploads"),
        staging_dir: blob_root.join("staging"),
        _tmp: tmp,
    }
}

/// Today's date in the wire format the form expects.
pub fn today_str() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Build a submission form from defaults, with per-test field overrides.
/// An override with an empty value drops the field entirely.
pub fn claim_form(overrides: &[(&str, &str)], documents: Vec<Part>) -> MultipartForm {
    let today = today_str();
    let mut fields: BTreeMap<&str, String> = BTreeMap::from([
        ("empName", "Asha Rao".to_string()),
        ("empEmail", "asha.rao@gmail.com".to_string()),
        ("empId", "ATS0123".to_string()),
        ("department", "Engineering".to_string()),
        ("claimDate", today),
        ("amount", "1250.50".to_string()),
        ("description", "Team offsite travel".to_string()),
        ("type", "travel".to_string()),
    ]);
    for (key, value) in overrides {
        if value.is_empty() {
            fields.remove(key);
        } else {
            fields.insert(key, value.to_string());
        }
    }

    let mut form = MultipartForm::new();
    for (key, value) in fields {
        form = form.add_text(key, value);
    }
    for part in documents {
        form = form.add_part("documents", part);
    }
    form
}

/// Submit a valid claim with the given documents and return its claim id.
pub async fn submit_claim(app: &TestApp, documents: Vec<Part>) -> String {
    let response = app
        .server
        .post("/api/claims")
        .multipart(claim_form(&[], documents))
        .await;
    assert_eq!(response.status_code(), 201, "body: {}", response.text());
    let body: serde_json::Value = response.json();
    body["claimId"].as_str().expect("claimId").to_string()
}

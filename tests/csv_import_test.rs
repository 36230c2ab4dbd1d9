use anyhow::Result;
use faculty_hub::core::csv_import::{self, TEMPLATE, TEMPLATE_FILE_NAME};
use faculty_hub::core::render;
use faculty_hub::domain::ports::Storage;
use faculty_hub::{AdminConsole, ApiClient, ClientConfig, HubError, LocalStorage};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn admin_for(server: &MockServer) -> Result<AdminConsole<ApiClient>> {
    let config = ClientConfig {
        api_base_url: server.url("/api"),
        timeout_seconds: 5,
        ..Default::default()
    };
    Ok(AdminConsole::new(ApiClient::new(&config)?.with_token("secret-token")))
}

fn created(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "experience": [],
        "certifications": [],
        "projects": [],
        "publications": []
    })
}

/// 一筆失敗不影響其他列，最後回報成功與失敗數
#[tokio::test]
async fn test_import_continues_past_failed_rows() -> Result<()> {
    let server = MockServer::start_async().await;

    let ada_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/admin/faculty")
                .header("Authorization", "Bearer secret-token")
                .json_body_partial(r#"{"name": "Dr. Ada Lovelace", "department": "Mathematics"}"#);
            then.status(200).json_body(created(1, "Dr. Ada Lovelace"));
        })
        .await;
    let broken_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/admin/faculty")
                .json_body_partial(r#"{"name": "Dr. Broken"}"#);
            then.status(422).json_body(serde_json::json!({
                "detail": "value is not a valid email address"
            }));
        })
        .await;
    let grace_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/admin/faculty")
                .json_body_partial(r#"{"name": "Dr. Grace Hopper", "office_location": "Building C Room 12"}"#);
            then.status(200).json_body(created(2, "Dr. Grace Hopper"));
        })
        .await;

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        "name,department,email,office_location\n\
         Dr. Ada Lovelace,Mathematics,ada@uni.edu,\n\
         Dr. Broken,Physics,not-an-email,\n\
         ,Chemistry,,\n\
         Dr. Grace Hopper,Computer Science,,Building C Room 12\n"
    )?;

    let text = std::fs::read_to_string(file.path())?;
    let preview = csv_import::preview_csv(&text)?;
    assert_eq!(preview.total_rows, 4);

    let report = admin_for(&server)?.import_csv(&text).await?;

    ada_mock.assert_async().await;
    broken_mock.assert_async().await;
    grace_mock.assert_async().await;

    assert_eq!(report.successful, 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].name, "Dr. Broken");
    assert!(report.failures[0].error.contains("value is not a valid email address"));

    let summary = render::render_import_report(&report);
    assert!(summary.starts_with("Import complete!\nSuccessful: 2\nFailed: 1"));
    Ok(())
}

#[tokio::test]
async fn test_header_only_file_is_rejected_before_any_request() -> Result<()> {
    let server = MockServer::start_async().await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/admin/faculty");
            then.status(200).json_body(created(1, "nobody"));
        })
        .await;

    let err = admin_for(&server)?
        .import_csv("name,title,department\n")
        .await
        .unwrap_err();

    assert!(matches!(err, HubError::CsvImportError { .. }));
    create_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_template_is_written_and_importable() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = LocalStorage::new(dir.path().to_string_lossy().to_string());

    storage
        .write_file(TEMPLATE_FILE_NAME, TEMPLATE.as_bytes())
        .await?;

    let written = String::from_utf8(storage.read_file(TEMPLATE_FILE_NAME).await?)?;
    let records = csv_import::parse_faculty_csv(&written)?;

    assert!(dir.path().join(TEMPLATE_FILE_NAME).exists());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title.as_deref(), Some("Professor"));
    assert_eq!(records[1].name, "Dr. Jane Smith");
    Ok(())
}

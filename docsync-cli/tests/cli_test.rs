//! Command line tests for the docsync binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOC: &str = r#"{
  "swagger": "2.0",
  "info": {"title": "Orders", "description": "Order service", "version": "v1"},
  "definitions": {},
  "securityDefinitions": {},
  "paths": {
    "/orders/list": {
      "get": {"summary": "List orders", "responses": {"200": {"description": "Success"}}}
    }
  }
}"#;

/// The binary, run in `dir` with no Apifox variables inherited.
fn docsync(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docsync").unwrap();
    cmd.current_dir(dir)
        .env_remove("APIFOX_TOKEN")
        .env_remove("APIFOX_PROJECT_ID")
        .env_remove("APIFOX_BASE_URL")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    docsync(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_push_without_token_fails_before_network() {
    let dir = tempfile::tempdir().unwrap();
    docsync(dir.path())
        .args(["push", "--project", "42", "--base-url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing access token"));
}

#[test]
fn test_unknown_overwrite_mode_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    docsync(dir.path())
        .args(["push", "--api-overwrite", "replace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("replace"));
}

#[test]
fn test_export_rewrites_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), DOC).unwrap();

    docsync(dir.path())
        .args(["export", "--file", "in.json", "--out", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 paths"));

    let written = fs::read_to_string(dir.path().join("docs/openapi.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["info"]["title"], "Orders");
}

#[test]
fn test_export_rejects_invalid_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), "{not json").unwrap();

    docsync(dir.path())
        .args(["export", "--file", "in.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_push_to_root() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/42/import-data"))
        .and(body_partial_json(json!({"importFormat": "openapi", "apiOverwriteMode": "merge"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("openapi.json"), DOC).unwrap();

    docsync(dir.path())
        .args(["push", "--file", "openapi.json", "--project", "42", "--api-overwrite", "merge"])
        .args(["--base-url", &server.uri()])
        .env("APIFOX_TOKEN", "secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported into project root"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plan_reads_settings_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/42/api-detail-folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 1, "name": "backend", "parentId": "0"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("docsync.toml"),
        format!(
            "[apifox]\nbase_url = \"{}\"\n\n[sync]\nproject_id = \"42\"\naccess_token = \"secret\"\napi_folder_path = \"backend/orders\"\n",
            server.uri()
        ),
    )
    .unwrap();

    docsync(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("needs 1 new folder"))
        .stdout(predicate::str::contains("orders"));
}

#[test]
fn test_plan_without_folder_makes_no_calls() {
    let dir = tempfile::tempdir().unwrap();
    docsync(dir.path())
        .args(["plan", "--project", "42", "--token", "secret", "--base-url", "http://127.0.0.1:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project root"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_flag_turns_off_settings_switch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/42/import-data"))
        .and(body_partial_json(json!({"syncApiFolder": false, "importBasePath": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("openapi.json"), DOC).unwrap();
    fs::write(
        dir.path().join("docsync.toml"),
        format!(
            "[apifox]\nbase_url = \"{}\"\n\n[sync]\nproject_id = \"42\"\naccess_token = \"secret\"\nsync_api_folder = true\nimport_base_path = true\n",
            server.uri()
        ),
    )
    .unwrap();

    docsync(dir.path())
        .args(["push", "--file", "openapi.json", "--sync-folder=false"])
        .assert()
        .success();
}

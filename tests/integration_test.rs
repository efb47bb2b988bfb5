/// End-to-end tests of the `mania` binary using the in-process mock client
/// and an unreachable loopback endpoint.
use std::path::Path;
use std::process::{Command, Output};

use mania_config::catalog;
use mania_dialogflow::{EntityType, EntityTypesClient, MockClient};

/// Run the binary in an isolated directory so no user config layer leaks in.
fn run_mania(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mania"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("MANIA_PROJECT_ID")
        .env_remove("MANIA_DIALOGFLOW_URL")
        .env_remove("RUST_LOG")
        .env_remove("GOOGLE_OAUTH_ACCESS_TOKEN")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .output()
        .expect("failed to run mania binary")
}

fn write_config(dir: &Path, text: &str) {
    std::fs::write(dir.join("mania.toml"), text).unwrap();
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).into_owned()
}

/// A loopback port with nothing listening on it.
fn closed_port() -> u16 {
    let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    l.local_addr().unwrap().port()
}

#[test]
fn mock_run_prints_one_confirmation_per_entity_type() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "[dialogflow]\nclient = \"mock\"\n");

    let out = run_mania(dir.path(), &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "Created new entity type: projects/mania-25a3b/agent/entityTypes/mock-1",
            "Created new entity type: projects/mania-25a3b/agent/entityTypes/mock-2",
        ]
    );
}

#[test]
fn unreachable_api_exits_with_failure_by_default() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        &format!(
            "[dialogflow]\nbase_url = \"http://127.0.0.1:{}\"\naccess_token = \"t\"\nuse_gcloud = false\n",
            closed_port()
        ),
    );

    let out = run_mania(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    let err = stderr(&out);
    let report: Vec<&str> = err
        .lines()
        .filter(|l| l.starts_with("Error creating entity type:"))
        .collect();
    assert_eq!(report.len(), 1, "stderr: {err}");
    assert!(report[0].contains("`category` (step 1 of 2)"), "{}", report[0]);
}

#[test]
fn exit_policy_success_keeps_status_zero_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        &format!(
            "[dialogflow]\nbase_url = \"http://127.0.0.1:{}\"\naccess_token = \"t\"\nuse_gcloud = false\n",
            closed_port()
        ),
    );

    let out = run_mania(dir.path(), &["--exit-policy", "success"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stderr(&out).contains("Error creating entity type:"));
}

#[test]
fn missing_token_reports_a_single_stderr_line() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        &format!(
            "[dialogflow]\nbase_url = \"http://127.0.0.1:{}\"\naccess_token_env = \"MANIA_TEST_TOKEN_NEVER_SET\"\nuse_gcloud = false\n",
            closed_port()
        ),
    );

    let out = run_mania(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    let lines: Vec<&str> = err.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {err}");
    assert!(lines[0].starts_with("Error creating entity type: entity type `category` (step 1 of 2)"));
    assert!(lines[0].contains("authentication failed"), "{}", lines[0]);
}

#[test]
fn invalid_entity_types_abort_before_any_request() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let port = listener.local_addr().unwrap().port();

    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        &format!(
            r#"
[dialogflow]
base_url = "http://127.0.0.1:{port}"
access_token = "t"
use_gcloud = false

[[entity_types]]
display_name = "category"
entities = [{{ value = "New York", synonyms = ["NYC"] }}]
"#
        ),
    );

    let out = run_mania(dir.path(), &[]);
    assert!(!out.status.success());
    assert!(!stdout(&out).contains("Created new entity type:"));
    assert!(stderr(&out).contains("must list itself as a synonym"), "{}", stderr(&out));

    // Any connection the binary made would be queued in the backlog by now.
    match listener.accept() {
        Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
        Ok((_, peer)) => panic!("unexpected connection from {peer}"),
        Err(e) => panic!("accept failed: {e}"),
    }
}

#[test]
fn dry_run_prints_requests_without_calling_api() {
    let dir = tempfile::tempdir().unwrap();
    // An unreachable endpoint proves nothing is sent.
    write_config(
        dir.path(),
        &format!("[dialogflow]\nbase_url = \"http://127.0.0.1:{}\"\n", closed_port()),
    );

    let out = run_mania(dir.path(), &["--dry-run", "--project", "demo"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert_eq!(text.matches("POST projects/demo/agent/entityTypes").count(), 2);
    assert!(text.contains("\"displayName\": \"category\""));
    assert!(text.contains("\"displayName\": \"item\""));
}

#[test]
fn validate_rejects_value_missing_from_its_synonyms() {
    let dir = tempfile::tempdir().unwrap();
    write_config(
        dir.path(),
        r#"
[[entity_types]]
display_name = "category"
entities = [{ value = "New York", synonyms = ["NYC"] }]
"#,
    );

    let out = run_mania(dir.path(), &["validate"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("must list itself as a synonym"), "{}", stderr(&out));
}

#[test]
fn validate_summarises_builtin_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_mania(dir.path(), &["validate"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Agent:   projects/mania-25a3b/agent"));
    assert!(text.contains("1. category"));
    assert!(text.contains("Los Angeles = Los Angeles, LA, L.A."));
    assert!(text.contains("2. item"));
}

#[test]
fn show_config_reflects_cli_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_mania(dir.path(), &["show-config", "--project", "elsewhere"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("project_id: elsewhere"));
}

#[tokio::test]
async fn mock_client_round_trips_catalog_entries() {
    let client = MockClient::default();
    let ty = EntityType::from(&catalog::category());
    let stored = client
        .create_entity_type("projects/mania-25a3b/agent", &ty)
        .await
        .unwrap();
    assert_eq!(stored.display_name, ty.display_name);
    assert_eq!(stored.entities, ty.entities);
    assert!(stored.name.is_some());
}

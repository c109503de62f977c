//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn querydeck() -> Command {
    let mut cmd = Command::cargo_bin("querydeck").unwrap();
    cmd.env_remove("DATABASE_URL").env_remove("RUST_LOG");
    cmd
}

// === Help Output ===

#[test]
fn test_top_level_help() {
    querydeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("routes"))
        .stdout(predicate::str::contains("query"));
}

#[test]
fn test_serve_help() {
    querydeck()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Port to listen on"))
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--connection-limit"));
}

#[test]
fn test_query_help() {
    querydeck()
        .arg("query")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME=VALUE"));
}

// === Routes Command ===

#[test]
fn test_routes_lists_every_endpoint() {
    querydeck()
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/api/query6/emergency-dispatch-summary"))
        .stdout(predicate::str::contains("vitals.high_risk_patients@v2"))
        .stdout(predicate::str::contains("/api/works-on/hours-worked"));
}

#[test]
fn test_routes_json() {
    let output = querydeck().arg("routes").arg("--json").output().unwrap();
    assert!(output.status.success());

    let routes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(routes.len(), 21);
    let html: Vec<_> = routes
        .iter()
        .filter(|route| route["renderer"] == "html")
        .map(|route| route["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        html,
        [
            "/api/query1/patient-authorization-summary",
            "/api/query6/emergency-dispatch-summary",
        ]
    );
}

// === Query Command ===

#[test]
fn test_query_list() {
    querydeck()
        .arg("query")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("company.employee_details@v1"))
        .stdout(predicate::str::contains("SSN:text"));
}

#[test]
fn test_query_unknown_name() {
    querydeck()
        .arg("query")
        .arg("company.nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no query named 'company.nope'"));
}

#[test]
fn test_query_missing_parameter() {
    querydeck()
        .arg("query")
        .arg("company.employee_details")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SSN is required"));
}

#[test]
fn test_query_malformed_parameter() {
    querydeck()
        .arg("query")
        .arg("company.employee_details")
        .arg("--param")
        .arg("SSN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn test_query_unsupported_backend() {
    querydeck()
        .arg("query")
        .arg("company.employees")
        .arg("--database-url")
        .arg("postgres://localhost/company")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid database configuration"));
}

#[test]
fn test_query_against_missing_tables_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    let url = format!("sqlite://{}?mode=rwc", path.display());

    querydeck()
        .arg("query")
        .arg("company.employees")
        .arg("--database-url")
        .arg(url)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query company.employees@v1 failed"));
}

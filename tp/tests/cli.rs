//! Integration tests for the `tp` binary

mod common;

use std::path::Path;

use assert_cmd::Command;
use common::{StubReply, StubServer, closed_port_url, sample_response};
use predicates::prelude::*;
use tempfile::TempDir;

/// Write a config pointing at the given backend
fn write_config(dir: &Path, base_url: &str) -> std::path::PathBuf {
    let path = dir.join("travemle.yml");
    let yaml = format!(
        "log-level: DEBUG\nbackend:\n  base-url: {base_url}\n  plan-path: /api/plan-trip/\n  timeout-ms: 5000\ntrip:\n  city: Galle\n  currency: LKR\n"
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

/// `tp` with logs redirected into the temp dir
fn tp(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tp").unwrap();
    cmd.env("XDG_DATA_HOME", dir.path()).env("HOME", dir.path());
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    tp(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--log-level"));
}

#[test]
fn test_config_prints_effective_yaml() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    tp(&dir)
        .arg("-c")
        .arg(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("base-url:"))
        .stdout(predicate::str::contains("127.0.0.1:9"))
        .stdout(predicate::str::contains("city: Galle"))
        .stdout(predicate::str::contains("origin: Colombo"));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "ftp://example.org");

    tp(&dir)
        .arg("-c")
        .arg(&config)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("travemle.yml");
    std::fs::write(&config, "backend:\n  base-url: http://127.0.0.1:9\n  timeout-ms: 0\n").unwrap();

    tp(&dir)
        .arg("-c")
        .arg(&config)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_plan_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    tp(&dir)
        .arg("-c")
        .arg(&config)
        .args(["plan", "--start", "20-12-2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --start date"));
}

#[tokio::test]
async fn test_plan_against_unreachable_backend_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &closed_port_url().await);

    let assert = tokio::task::spawn_blocking(move || {
        tp(&dir).arg("-c").arg(&config).arg("plan").assert()
    })
    .await
    .unwrap();

    assert
        .failure()
        .stderr(predicate::str::contains("Error connecting to server. Check if backend is running."));
}

#[tokio::test]
async fn test_plan_prints_itinerary() {
    let server = StubServer::start(StubReply::Respond("200 OK", sample_response())).await;
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.base_url);

    let assert = tokio::task::spawn_blocking(move || {
        tp(&dir)
            .env("NO_COLOR", "1")
            .arg("-c")
            .arg(&config)
            .args(["plan", "--start", "2025-12-20", "-i", "Beach", "--mode", "train"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Kandy Heritage Escape"))
        .stdout(predicate::str::contains("28°C"))
        .stdout(predicate::str::contains("Temple of the Tooth"))
        .stdout(predicate::str::contains("Lodging: 10000 LKR"))
        .stdout(predicate::str::contains("LKR 18000"));

    let body: serde_json::Value = serde_json::from_str(&server.request.await.unwrap()).unwrap();
    assert_eq!(body["city"], "Galle");
    assert_eq!(body["start_date"], "2025-12-20");
    assert_eq!(body["end_date"], "2025-12-23");
    assert_eq!(body["interests"], "Beach");
    assert_eq!(body["travel_mode"], "Train");
}

#[tokio::test]
async fn test_plan_json_output() {
    let server = StubServer::start(StubReply::Respond("200 OK", sample_response())).await;
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.base_url);

    let output = tokio::task::spawn_blocking(move || {
        tp(&dir)
            .arg("-c")
            .arg(&config)
            .args(["plan", "--format", "json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["plan"]["title"], "Kandy Heritage Escape");
    assert_eq!(json["weather"], "Clouds, 28°C");
    assert_eq!(json["map_url"], "https://www.google.com/maps/dir/Colombo/Kandy");
}

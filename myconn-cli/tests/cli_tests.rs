//! Integration tests for the myconn CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get the myconn binary
#[allow(deprecated)]
fn myconn_cmd() -> Command {
    let mut cmd = Command::cargo_bin("myconn").unwrap();
    cmd.env_remove("MYCONN_CONFIG")
        .env_remove("MYCONN_DEBUG")
        .env_remove("MYCONN_LOG_LEVEL");
    cmd
}

fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const CLUSTER_JSON: &str = r#"{
    "cluster": "desaenv08",
    "schema": "app",
    "connections": [
        { "name": "writer", "is_master": true, "parameters": "parseTime=true" },
        { "name": "reader", "is_read_only": true }
    ]
}"#;

#[test]
fn test_help_command() {
    myconn_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("MySQL connection registry tool"))
        .stdout(predicate::str::contains("Usage: myconn"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version_command() {
    myconn_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_requires_config() {
    myconn_cmd()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn test_validate_cluster_json() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "db.json", CLUSTER_JSON);

    myconn_cmd()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("cluster"))
        .stdout(predicate::str::contains("desaenv08"))
        .stdout(predicate::str::contains("writer (master, read-write)"))
        .stdout(predicate::str::contains("reader (replica, read-only)"))
        .stdout(predicate::str::contains("Configuration is valid (2 connections)"));
}

#[test]
fn test_validate_direct_toml_with_pool() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "db.toml",
        r#"
dsn = "root:secret@tcp(localhost:3306)/app"

[[connections]]
name = "main"

[connections.connection_pool]
conn_max_lifetime = "10m"
max_open_connections = 20
"#,
    );

    myconn_cmd()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("main (direct)"))
        .stdout(predicate::str::contains("10m"))
        .stdout(predicate::str::contains("20"));
}

#[test]
fn test_validate_config_from_env() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "db.json", CLUSTER_JSON);

    myconn_cmd()
        .arg("validate")
        .env("MYCONN_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "db.json",
        r#"{ "dsn": "root@tcp(localhost)/app", "cluster": "c", "connections": [{ "name": "a" }] }"#,
    );

    myconn_cmd()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "invalid MySQL config: DSN is mutually exclusive with Cluster and HACluster",
        ));
}

#[test]
fn test_validate_rejects_replica_writer() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "db.json",
        r#"{ "cluster": "c", "schema": "s", "connections": [{ "name": "bad" }] }"#,
    );

    myconn_cmd()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write to a replica"));
}

#[test]
fn test_validate_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "db.yaml", "dsn: x");

    myconn_cmd()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported config format"));
}

#[test]
fn test_validate_missing_file() {
    let dir = TempDir::new().unwrap();

    myconn_cmd()
        .args(["validate", "--config"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_resolve_masks_passwords() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "db.json", CLUSTER_JSON);

    myconn_cmd()
        .args(["resolve", "--config"])
        .arg(&path)
        .env("DB_MYSQL_DESAENV08_APP_APP_ENDPOINT", "primary:3306")
        .env("DB_MYSQL_DESAENV08_APP_APP_LOCAL_REPLICA_ENDPOINT", "replica:3306")
        .env("DB_MYSQL_DESAENV08_APP_APP_WPROD", "w-secret")
        .env("DB_MYSQL_DESAENV08_APP_APP_RPROD", "r-secret")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "app_WPROD:***@tcp(primary:3306)/app?parseTime=true",
        ))
        .stdout(predicate::str::contains("app_RPROD:***@tcp(replica:3306)/app"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn test_resolve_missing_variable() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "db.json", CLUSTER_JSON);

    myconn_cmd()
        .args(["resolve", "--config"])
        .arg(&path)
        .env_remove("DB_MYSQL_DESAENV08_APP_APP_ENDPOINT")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DB_MYSQL_DESAENV08_APP_APP_ENDPOINT"));
}

#[test]
fn test_check_unreachable_server() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "db.json",
        r#"{ "dsn": "root:pw@tcp(127.0.0.1:1)/app", "connections": [{ "name": "main" }] }"#,
    );

    myconn_cmd()
        .args(["check", "--config"])
        .arg(&path)
        .timeout(std::time::Duration::from_secs(60))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to ping connections: main:"));
}

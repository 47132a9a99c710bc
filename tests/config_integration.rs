//! Integration tests for configuration parsing and handling.
//!
//! These tests verify that configuration files in either supported format
//! load into the same model and validate the way the registry expects.

use std::time::Duration;

use myconn::registry::{ConfigDuration, LoadError, Topology, validate};
use myconn::{Config, ConfigError, ConnectionSpec, PoolSettings};
use pretty_assertions::assert_eq;

const FULL_TOML: &str = r#"
    ha_cluster = "desaenv08"
    schema = "orders"

    [[connections]]
    name = "writer"
    is_master = true
    parameters = "timeout=100ms&parseTime=true"

    [connections.connection_pool]
    conn_max_lifetime = "10m"
    max_idle_connections = 100
    max_open_connections = 101
    conn_max_idle_time = "1m30s"

    [[connections]]
    name = "reader"
    is_read_only = true
"#;

const FULL_JSON: &str = r#"{
    "ha_cluster": "desaenv08",
    "schema": "orders",
    "connections": [
        {
            "name": "writer",
            "is_master": true,
            "parameters": "timeout=100ms&parseTime=true",
            "connection_pool": {
                "conn_max_lifetime": "10m",
                "max_idle_connections": 100,
                "max_open_connections": 101,
                "conn_max_idle_time": "1m30s"
            }
        },
        { "name": "reader", "is_read_only": true }
    ]
}"#;

fn expected_full() -> Config {
    Config::ha_cluster("desaenv08", "orders")
        .connection(
            ConnectionSpec::new("writer")
                .master()
                .parameters("timeout=100ms&parseTime=true")
                .pool(PoolSettings {
                    conn_max_lifetime: Some(ConfigDuration::new(Duration::from_secs(600))),
                    max_idle_connections: Some(100),
                    max_open_connections: Some(101),
                    conn_max_idle_time: Some(ConfigDuration::new(Duration::from_secs(90))),
                }),
        )
        .connection(ConnectionSpec::new("reader").read_only())
}

/// Test minimal configuration
#[test]
fn test_config_minimal() {
    let config = Config::from_toml_str(
        r#"
        dsn = "root@tcp(localhost:3306)/test"

        [[connections]]
        name = "main"
    "#,
    )
    .expect("Failed to parse config");

    assert_eq!(config.dsn, "root@tcp(localhost:3306)/test");
    assert_eq!(config.connections.len(), 1);
    assert!(config.connections[0].connection_pool.is_empty());
    assert_eq!(
        validate(&config).unwrap(),
        Topology::Direct {
            dsn: "root@tcp(localhost:3306)/test"
        }
    );
}

/// Test full configuration with all options
#[test]
fn test_config_full_toml() {
    let config = Config::from_toml_str(FULL_TOML).expect("Failed to parse config");
    assert_eq!(config, expected_full());

    // Plain serde entry point agrees with the helper.
    let config: Config = toml::from_str(FULL_TOML).expect("Failed to parse config");
    assert_eq!(config, expected_full());
}

/// Both formats describe the same model
#[test]
fn test_config_full_json() {
    let config = Config::from_json_str(FULL_JSON).expect("Failed to parse config");
    assert_eq!(config, expected_full());
    assert_eq!(
        validate(&config).unwrap(),
        Topology::HaCluster {
            cluster: "desaenv08",
            schema: "orders"
        }
    );
}

#[test]
fn test_config_json_round_trip() {
    let config = expected_full();
    let json = config.to_json_pretty().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "ha_cluster": "desaenv08",
            "schema": "orders",
            "connections": [
                {
                    "name": "writer",
                    "is_master": true,
                    "is_read_only": false,
                    "parameters": "timeout=100ms&parseTime=true",
                    "connection_pool": {
                        "conn_max_lifetime": "10m",
                        "max_idle_connections": 100,
                        "max_open_connections": 101,
                        "conn_max_idle_time": "1m30s"
                    }
                },
                {
                    "name": "reader",
                    "is_master": false,
                    "is_read_only": true,
                    "connection_pool": {}
                }
            ]
        })
    );
    assert_eq!(Config::from_json_str(&json).unwrap(), config);

    // TOML serialization reads back to the same model.
    let toml_text = toml::to_string(&config).unwrap();
    assert_eq!(Config::from_toml_str(&toml_text).unwrap(), config);
}

#[test]
fn test_config_load_files() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("db.toml");
    let json_path = dir.path().join("DB.JSON");
    std::fs::write(&toml_path, FULL_TOML).unwrap();
    std::fs::write(&json_path, FULL_JSON).unwrap();

    assert_eq!(Config::load(&toml_path).unwrap(), expected_full());
    assert_eq!(Config::load(&json_path).unwrap(), expected_full());

    let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_config_invalid_duration() {
    let err = Config::from_toml_str(
        r#"
        dsn = "root@/test"

        [[connections]]
        name = "main"
        connection_pool = { conn_max_lifetime = "ten minutes" }
    "#,
    )
    .unwrap_err();

    assert!(matches!(err, LoadError::Toml(_)));
    assert!(err.to_string().contains("invalid duration"));
}

#[test]
fn test_config_unknown_fields_ignored() {
    let config = Config::from_json_str(
        r#"{ "dsn": "root@/test", "owner": "payments", "connections": [{ "name": "a", "comment": "x" }] }"#,
    )
    .unwrap();
    assert_eq!(config.connections[0].name, "a");
}

#[test]
fn test_config_empty_sections() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(validate(&config).unwrap_err(), ConfigError::NoTopology);
}

#[test]
fn test_config_cluster_without_schema() {
    let config = Config::from_json_str(
        r#"{ "cluster": "desaenv08", "connections": [{ "name": "a", "is_master": true }] }"#,
    )
    .unwrap();
    assert_eq!(validate(&config).unwrap_err(), ConfigError::MissingSchema);
}

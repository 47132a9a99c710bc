//! Configuration invariants, checked before any connection is attempted.

use std::collections::HashSet;

use crate::config::Config;
use crate::error::ConfigError;

/// How connection strings are obtained for a validated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology<'a> {
    /// Every connection uses the same explicit DSN.
    Direct { dsn: &'a str },
    /// Endpoints and credentials come from the single-cluster environment convention.
    Cluster { cluster: &'a str, schema: &'a str },
    /// Endpoints and credentials come from the HA-cluster environment convention.
    HaCluster { cluster: &'a str, schema: &'a str },
}

impl Topology<'_> {
    /// Short label used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Direct { .. } => "direct",
            Self::Cluster { .. } => "cluster",
            Self::HaCluster { .. } => "ha_cluster",
        }
    }

    /// The explicit DSN of a direct topology.
    pub fn direct_dsn(&self) -> Option<&str> {
        match *self {
            Self::Direct { dsn } => Some(dsn),
            _ => None,
        }
    }

    /// Returns `true` for either cluster mode.
    pub fn is_cluster(&self) -> bool {
        !matches!(self, Self::Direct { .. })
    }
}

/// Check every configuration invariant and return the selected topology.
///
/// Checks run in a fixed order and the first violation is returned:
/// topology exclusivity, schema presence, a non-empty connection list,
/// unique names, and finally that cluster connections never pair replica
/// endpoints with write credentials.
pub fn validate(config: &Config) -> Result<Topology<'_>, ConfigError> {
    let has_dsn = !config.dsn.is_empty();
    let has_cluster = !config.cluster.is_empty();
    let has_ha_cluster = !config.ha_cluster.is_empty();
    let has_schema = !config.schema.is_empty();

    if !has_dsn && !has_cluster && !has_ha_cluster {
        return Err(ConfigError::NoTopology);
    }
    if has_dsn && (has_cluster || has_ha_cluster) {
        return Err(ConfigError::DsnWithCluster);
    }
    if has_cluster && has_ha_cluster {
        return Err(ConfigError::ClusterWithHaCluster);
    }
    if has_dsn && has_schema {
        return Err(ConfigError::DsnWithSchema);
    }
    if !has_dsn && !has_schema {
        return Err(ConfigError::MissingSchema);
    }

    if config.connections.is_empty() {
        return Err(ConfigError::NoConnections);
    }

    let mut seen = HashSet::with_capacity(config.connections.len());
    for spec in &config.connections {
        if !seen.insert(spec.name.as_str()) {
            return Err(ConfigError::DuplicateName(spec.name.clone()));
        }
    }

    let topology = if has_dsn {
        Topology::Direct { dsn: &config.dsn }
    } else if has_cluster {
        Topology::Cluster {
            cluster: &config.cluster,
            schema: &config.schema,
        }
    } else {
        Topology::HaCluster {
            cluster: &config.ha_cluster,
            schema: &config.schema,
        }
    };

    if topology.is_cluster() {
        if let Some(spec) = config
            .connections
            .iter()
            .find(|spec| !spec.is_master && !spec.is_read_only)
        {
            return Err(ConfigError::WriteToReplica(spec.name.clone()));
        }
    }

    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionSpec;

    fn with_connections(config: Config, names: &[&str]) -> Config {
        names
            .iter()
            .fold(config, |config, name| config.connection(ConnectionSpec::new(*name).master()))
    }

    #[test]
    fn test_preconditions_in_order() {
        let cases = vec![
            ("nothing set", Config::default(), ConfigError::NoTopology),
            (
                "dsn and cluster",
                Config {
                    dsn: "foo".into(),
                    cluster: "bar".into(),
                    ..Default::default()
                },
                ConfigError::DsnWithCluster,
            ),
            (
                "dsn and ha cluster",
                Config {
                    dsn: "foo".into(),
                    ha_cluster: "bar".into(),
                    ..Default::default()
                },
                ConfigError::DsnWithCluster,
            ),
            (
                "cluster and ha cluster",
                Config {
                    cluster: "foo".into(),
                    ha_cluster: "bar".into(),
                    ..Default::default()
                },
                ConfigError::ClusterWithHaCluster,
            ),
            (
                "dsn and schema",
                Config {
                    dsn: "foo".into(),
                    schema: "schema".into(),
                    ..Default::default()
                },
                ConfigError::DsnWithSchema,
            ),
            (
                "cluster without schema",
                Config {
                    cluster: "foo".into(),
                    ..Default::default()
                },
                ConfigError::MissingSchema,
            ),
            ("no connections", Config::direct("foo"), ConfigError::NoConnections),
            (
                "duplicate names",
                with_connections(Config::direct("foo"), &["foo", "foo"]),
                ConfigError::DuplicateName("foo".into()),
            ),
            (
                "write to replica",
                Config::cluster("DB_MYSQL_DESAENV08_FOO", "bar").connection(ConnectionSpec::new("foo")),
                ConfigError::WriteToReplica("foo".into()),
            ),
        ];

        for (name, config, expected) in cases {
            assert_eq!(validate(&config).unwrap_err(), expected, "case: {name}");
        }
    }

    #[test]
    fn test_first_violation_wins() {
        // Schema conflict, no connections and a replica writer all at once.
        let config = Config {
            dsn: "foo".into(),
            schema: "bar".into(),
            ..Default::default()
        };
        assert_eq!(validate(&config).unwrap_err(), ConfigError::DsnWithSchema);

        // Duplicates are reported before the replica writer that follows them.
        let config = Config::cluster("c", "s")
            .connection(ConnectionSpec::new("a").master())
            .connection(ConnectionSpec::new("a").master())
            .connection(ConnectionSpec::new("b"));
        assert_eq!(
            validate(&config).unwrap_err(),
            ConfigError::DuplicateName("a".into())
        );
    }

    #[test]
    fn test_direct_ignores_role_flags() {
        let config = Config::direct("root@tcp(localhost)/foo").connection(ConnectionSpec::new("plain"));
        assert_eq!(
            validate(&config).unwrap(),
            Topology::Direct {
                dsn: "root@tcp(localhost)/foo"
            }
        );
    }

    #[test]
    fn test_cluster_topologies() {
        let config = Config::cluster("c1", "s1").connection(ConnectionSpec::new("r").read_only());
        let topology = validate(&config).unwrap();
        assert_eq!(
            topology,
            Topology::Cluster {
                cluster: "c1",
                schema: "s1"
            }
        );
        assert_eq!(topology.kind(), "cluster");

        let config = Config::ha_cluster("c2", "s2").connection(ConnectionSpec::new("m").master());
        let topology = validate(&config).unwrap();
        assert_eq!(
            topology,
            Topology::HaCluster {
                cluster: "c2",
                schema: "s2"
            }
        );
        assert!(topology.is_cluster());
    }

    #[test]
    fn test_validate_is_repeatable() {
        let config = Config::direct("foo").connection(ConnectionSpec::new("a"));
        assert_eq!(validate(&config), validate(&config));
    }
}

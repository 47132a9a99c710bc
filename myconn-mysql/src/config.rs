//! Translation of data source names into `mysql_async` options.

use mysql_async::{OptsBuilder, SslOpts};
use myconn_core::Dsn;
use tracing::debug;

use crate::error::{MysqlError, MysqlResult};

/// Port used when a tcp address carries none.
pub const DEFAULT_PORT: u16 = 3306;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_SOCKET: &str = "/tmp/mysql.sock";

/// Where the server is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// TCP host and port.
    Tcp { host: String, port: u16 },
    /// Unix domain socket path.
    Socket(String),
}

/// TLS setting taken from the `tls` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Plain connection.
    #[default]
    Disabled,
    /// TLS with certificate verification.
    Verified,
    /// TLS accepting any server certificate.
    SkipVerify,
}

/// Connection options for one handle, parsed from a DSN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MysqlConfig {
    /// Server location.
    pub endpoint: Endpoint,
    /// Database name.
    pub database: String,
    /// Username for authentication.
    pub username: Option<String>,
    /// Password for authentication.
    pub password: Option<String>,
    /// TLS mode.
    pub tls: TlsMode,
    /// Statements run on every new connection.
    pub init: Vec<String>,
    /// Parameters the adapter does not act on.
    pub ignored: Vec<(String, String)>,
}

impl MysqlConfig {
    /// Parse a DSN such as `user:pass@tcp(host:3306)/db?charset=utf8mb4`.
    ///
    /// `charset`, `collation` and `tls` are honored; other parameters are
    /// kept in [`MysqlConfig::ignored`].
    pub fn from_dsn(dsn: &str) -> MysqlResult<Self> {
        Self::from_parsed(&Dsn::parse(dsn)?)
    }

    /// Build the configuration from an already parsed DSN.
    pub fn from_parsed(dsn: &Dsn) -> MysqlResult<Self> {
        let endpoint = match dsn.net.as_str() {
            "" | "tcp" => {
                let (host, port) = split_host_port(&dsn.addr)?;
                Endpoint::Tcp { host, port }
            }
            "unix" if dsn.addr.is_empty() => Endpoint::Socket(DEFAULT_SOCKET.to_string()),
            "unix" => Endpoint::Socket(dsn.addr.clone()),
            other => return Err(MysqlError::UnsupportedNetwork(other.to_string())),
        };

        let mut config = Self {
            endpoint,
            database: dsn.database.clone(),
            username: Some(dsn.user.clone()).filter(|u| !u.is_empty()),
            password: dsn.password.clone(),
            tls: TlsMode::Disabled,
            init: Vec::new(),
            ignored: Vec::new(),
        };

        for (key, value) in &dsn.params {
            match key.as_str() {
                "charset" => {
                    // Go drivers accept a fallback list; the first entry wins.
                    let charset = value.split(',').next().unwrap_or_default();
                    config
                        .init
                        .push(format!("SET NAMES {}", identifier(key, charset)?));
                }
                "collation" => config.init.push(format!(
                    "SET collation_connection = {}",
                    identifier(key, value)?
                )),
                "tls" => {
                    config.tls = match value.as_str() {
                        "true" => TlsMode::Verified,
                        "skip-verify" => TlsMode::SkipVerify,
                        "false" => TlsMode::Disabled,
                        _ => return Err(invalid_param(key, value)),
                    }
                }
                _ => {
                    debug!(parameter = %key, "Ignoring DSN parameter");
                    config.ignored.push((key.clone(), value.clone()));
                }
            }
        }

        Ok(config)
    }

    /// Convert to a `mysql_async` options builder.
    pub fn to_opts_builder(&self) -> OptsBuilder {
        let mut builder = OptsBuilder::default()
            .user(self.username.clone())
            .pass(self.password.clone())
            .db_name(Some(self.database.clone()).filter(|db| !db.is_empty()));

        builder = match &self.endpoint {
            Endpoint::Tcp { host, port } => builder
                .ip_or_hostname(host.clone())
                .tcp_port(*port)
                .prefer_socket(false),
            Endpoint::Socket(path) => builder.socket(Some(path.clone())),
        };

        if !self.init.is_empty() {
            builder = builder.init(self.init.clone());
        }

        match self.tls {
            TlsMode::Disabled => builder,
            TlsMode::Verified => builder.ssl_opts(SslOpts::default()),
            TlsMode::SkipVerify => {
                builder.ssl_opts(SslOpts::default().with_danger_accept_invalid_certs(true))
            }
        }
    }
}

fn split_host_port(addr: &str) -> MysqlResult<(String, u16)> {
    if addr.is_empty() {
        return Ok((DEFAULT_HOST.to_string(), DEFAULT_PORT));
    }

    // [v6addr] or [v6addr]:port
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| MysqlError::InvalidAddress(addr.to_string()))?;
        let port = match tail {
            "" => DEFAULT_PORT,
            tail => tail
                .strip_prefix(':')
                .and_then(|p| p.parse().ok())
                .ok_or_else(|| MysqlError::InvalidAddress(addr.to_string()))?,
        };
        return Ok((host.to_string(), port));
    }

    match addr.split_once(':') {
        None => Ok((addr.to_string(), DEFAULT_PORT)),
        Some((host, port)) if !port.contains(':') && !host.is_empty() => {
            let port = port
                .parse()
                .map_err(|_| MysqlError::InvalidAddress(addr.to_string()))?;
            Ok((host.to_string(), port))
        }
        Some(_) => Err(MysqlError::InvalidAddress(addr.to_string())),
    }
}

fn identifier<'a>(key: &str, value: &'a str) -> MysqlResult<&'a str> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(value)
    } else {
        Err(invalid_param(key, value))
    }
}

fn invalid_param(key: &str, value: &str) -> MysqlError {
    MysqlError::InvalidParameter {
        key: key.to_string(),
        value: value.to_string(),
    }
}

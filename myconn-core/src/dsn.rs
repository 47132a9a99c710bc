//! MySQL data source names.
//!
//! The grammar is `[user[:password]@][net[(addr)]]/dbname[?param1=value1&...&paramN=valueN]`,
//! for example `root:secret@tcp(localhost:3306)/app?parseTime=true`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const REDACTED: &str = "***";

/// Errors raised by [`Dsn::parse`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DsnError {
    #[error("invalid DSN: missing the slash separating the database name")]
    MissingSlash,

    #[error("invalid DSN: network address not terminated (missing closing brace)")]
    UnterminatedAddress,

    #[error("invalid DSN: parameter {0:?} is not of the form key=value")]
    InvalidParameter(String),
}

/// A parsed data source name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dsn {
    /// User name, possibly empty.
    pub user: String,
    /// Password, `None` when the DSN carries no `:` in its credentials.
    pub password: Option<String>,
    /// Network type, usually `tcp` or `unix`. Empty when not given.
    pub net: String,
    /// Network address: `host:port` for tcp, a socket path for unix.
    pub addr: String,
    /// Database (schema) name.
    pub database: String,
    /// Driver parameters in declaration order.
    pub params: Vec<(String, String)>,
}

impl Dsn {
    /// Parse a DSN.
    pub fn parse(input: &str) -> Result<Self, DsnError> {
        let slash = input.rfind('/').ok_or(DsnError::MissingSlash)?;
        let (prefix, rest) = (&input[..slash], &input[slash + 1..]);

        let mut dsn = Dsn::default();

        let location = match prefix.rfind('@') {
            Some(at) => {
                let credentials = &prefix[..at];
                match credentials.split_once(':') {
                    Some((user, password)) => {
                        dsn.user = user.to_string();
                        dsn.password = Some(password.to_string());
                    }
                    None => dsn.user = credentials.to_string(),
                }
                &prefix[at + 1..]
            }
            None => prefix,
        };

        match location.find('(') {
            Some(open) => {
                let addr = location[open + 1..]
                    .strip_suffix(')')
                    .ok_or(DsnError::UnterminatedAddress)?;
                dsn.net = location[..open].to_string();
                dsn.addr = addr.to_string();
            }
            None => dsn.net = location.to_string(),
        }

        let (database, query) = rest.split_once('?').unwrap_or((rest, ""));
        dsn.database = database.to_string();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| DsnError::InvalidParameter(pair.to_string()))?;
            dsn.params.push((key.to_string(), value.to_string()));
        }

        Ok(dsn)
    }

    /// Value of the first parameter named `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render the DSN with the password masked.
    pub fn redacted(&self) -> String {
        let mut masked = self.clone();
        if masked.password.is_some() {
            masked.password = Some(REDACTED.to_string());
        }
        masked.to_string()
    }
}

impl FromStr for Dsn {
    type Err = DsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.user.is_empty() || self.password.is_some() {
            f.write_str(&self.user)?;
            if let Some(ref password) = self.password {
                write!(f, ":{}", password)?;
            }
            f.write_str("@")?;
        }

        f.write_str(&self.net)?;
        if !self.addr.is_empty() {
            write!(f, "({})", self.addr)?;
        }

        write!(f, "/{}", self.database)?;

        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

/// Compose the tcp DSN used for cluster connections.
///
/// `parameters` is appended verbatim after a `?` when non-empty.
pub fn compose(user: &str, password: &str, host: &str, schema: &str, parameters: &str) -> String {
    let mut dsn = format!("{}:{}@tcp({})/{}", user, password, host, schema);
    if !parameters.is_empty() {
        dsn.push('?');
        dsn.push_str(parameters);
    }
    dsn
}

/// Mask the password of a raw DSN for logging.
pub fn redact(raw: &str) -> String {
    match Dsn::parse(raw) {
        Ok(dsn) => dsn.redacted(),
        Err(_) => "<invalid dsn>".to_string(),
    }
}

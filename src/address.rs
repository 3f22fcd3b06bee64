//! Server address
//!
//! Value type identifying one cluster member.

use std::fmt;

use serde::Deserialize;

use crate::error::{RoutingError, RoutingResult};

/// Port used when an address omits one
pub const DEFAULT_PORT: u16 = 7687;

const SCHEMES: [&str; 6] = [
    "bolt://",
    "bolt+s://",
    "bolt+ssc://",
    "zeta4g://",
    "zeta4g+s://",
    "zeta4g+ssc://",
];

/// Server address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ServerAddress {
    /// Host
    pub host: String,
    /// Port
    pub port: u16,
}

impl ServerAddress {
    /// Create a new server address
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse from `host`, `host:port` or a `bolt://` / `zeta4g://` URI
    pub fn from_uri(uri: &str) -> RoutingResult<Self> {
        let rest = SCHEMES
            .iter()
            .find_map(|scheme| uri.strip_prefix(scheme))
            .unwrap_or(uri)
            .trim();

        let parts: Vec<&str> = rest.split(':').collect();
        match parts.as_slice() {
            [host] if !host.is_empty() => Ok(Self::new(*host, DEFAULT_PORT)),
            [host, port] if !host.is_empty() => {
                let port = port
                    .parse()
                    .map_err(|_| RoutingError::configuration(format!("Invalid port in '{}'", uri)))?;
                Ok(Self::new(*host, port))
            }
            _ => Err(RoutingError::configuration(format!(
                "Invalid server address '{}'",
                uri
            ))),
        }
    }

    /// Socket address string
    pub fn to_socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl Default for ServerAddress {
    fn default() -> Self {
        Self::new("localhost", DEFAULT_PORT)
    }
}

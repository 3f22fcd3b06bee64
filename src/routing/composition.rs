//! Cluster composition
//!
//! One discovery result: addresses per role and the instant they stop being trusted.

use serde::Deserialize;

use super::table::ServerRole;
use crate::address::ServerAddress;
use crate::error::{RoutingError, RoutingResult};

/// Topology snapshot consumed by [`RoutingTable::update`](super::RoutingTable::update)
pub trait TopologySnapshot {
    /// Read servers
    fn readers(&self) -> &[ServerAddress];
    /// Write servers
    fn writers(&self) -> &[ServerAddress];
    /// Routing servers
    fn routers(&self) -> &[ServerAddress];
    /// Absolute expiration in clock milliseconds
    fn expiration_timestamp(&self) -> i64;
}

// ============================================================================
// Discovery response
// ============================================================================

/// Routing record as returned by a ROUTE request
///
/// ```json
/// { "ttl": 300, "servers": [ { "role": "ROUTE", "addresses": ["server1:7687"] } ] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutingRecord {
    /// Time-to-live in seconds
    pub ttl: i64,
    /// Role entries
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

/// Addresses serving one role
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEntry {
    /// `ROUTE`, `WRITE` or `READ`
    pub role: String,
    /// `host:port` strings
    #[serde(default)]
    pub addresses: Vec<String>,
}

// ============================================================================
// ClusterComposition
// ============================================================================

/// Cluster composition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterComposition {
    expiration_timestamp: i64,
    readers: Vec<ServerAddress>,
    writers: Vec<ServerAddress>,
    routers: Vec<ServerAddress>,
}

impl ClusterComposition {
    /// Create a composition from explicit role lists
    pub fn new(
        expiration_timestamp: i64,
        readers: Vec<ServerAddress>,
        writers: Vec<ServerAddress>,
        routers: Vec<ServerAddress>,
    ) -> Self {
        Self {
            expiration_timestamp,
            readers,
            writers,
            routers,
        }
    }

    /// Build a composition from a routing record received at `now` milliseconds.
    ///
    /// Unknown roles are skipped. A TTL that overflows the clock range never expires.
    pub fn parse(record: &RoutingRecord, now: i64) -> RoutingResult<Self> {
        let mut composition = Self {
            expiration_timestamp: expiration_timestamp(now, record.ttl),
            ..Self::default()
        };

        for entry in &record.servers {
            let Some(role) = ServerRole::from_str(&entry.role) else {
                tracing::trace!(role = %entry.role, "skipping unknown server role");
                continue;
            };

            let addresses = entry
                .addresses
                .iter()
                .map(|a| {
                    ServerAddress::from_uri(a).map_err(|_| {
                        RoutingError::protocol(format!(
                            "Invalid {} address '{}'",
                            role.as_str(),
                            a
                        ))
                    })
                })
                .collect::<RoutingResult<Vec<_>>>()?;

            match role {
                ServerRole::Route => composition.routers.extend(addresses),
                ServerRole::Write => composition.writers.extend(addresses),
                ServerRole::Read => composition.readers.extend(addresses),
            }
        }

        Ok(composition)
    }

    /// Whether any writer was reported
    pub fn has_writers(&self) -> bool {
        !self.writers.is_empty()
    }

    /// Whether both routers and readers were reported
    pub fn has_routers_and_readers(&self) -> bool {
        !self.routers.is_empty() && !self.readers.is_empty()
    }
}

impl TopologySnapshot for ClusterComposition {
    fn readers(&self) -> &[ServerAddress] {
        &self.readers
    }

    fn writers(&self) -> &[ServerAddress] {
        &self.writers
    }

    fn routers(&self) -> &[ServerAddress] {
        &self.routers
    }

    fn expiration_timestamp(&self) -> i64 {
        self.expiration_timestamp
    }
}

fn expiration_timestamp(now: i64, ttl_seconds: i64) -> i64 {
    ttl_seconds
        .max(0)
        .checked_mul(1000)
        .and_then(|ttl| now.checked_add(ttl))
        .unwrap_or(i64::MAX)
}

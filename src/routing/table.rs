//! Routing table
//!
//! Tracks the servers of each role in the cluster and decides when that view is stale.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::address_set::RoundRobinAddressSet;
use super::composition::TopologySnapshot;
use crate::address::ServerAddress;
use crate::clock::Clock;
use crate::config::RoutingSettings;

/// A fresh table needs more than this many routers
pub const MIN_ROUTERS: usize = 1;

/// Server role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerRole {
    /// Serves routing table requests
    Route,
    /// Serves write transactions (leader)
    Write,
    /// Serves read transactions (followers)
    Read,
}

impl ServerRole {
    /// Parse a role name, ignoring case
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ROUTE" => Some(Self::Route),
            "WRITE" => Some(Self::Write),
            "READ" => Some(Self::Read),
            _ => None,
        }
    }

    /// Role name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Route => "ROUTE",
            Self::Write => "WRITE",
            Self::Read => "READ",
        }
    }
}

impl fmt::Display for ServerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RoutingTable
// ============================================================================

#[derive(Debug, Default)]
struct TableState {
    expiration_timeout: i64,
    readers: RoundRobinAddressSet,
    writers: RoundRobinAddressSet,
    routers: RoundRobinAddressSet,
}

impl TableState {
    fn set_mut(&mut self, role: ServerRole) -> &mut RoundRobinAddressSet {
        match role {
            ServerRole::Route => &mut self.routers,
            ServerRole::Write => &mut self.writers,
            ServerRole::Read => &mut self.readers,
        }
    }

    fn set(&self, role: ServerRole) -> &RoundRobinAddressSet {
        match role {
            ServerRole::Route => &self.routers,
            ServerRole::Write => &self.writers,
            ServerRole::Read => &self.readers,
        }
    }
}

/// Routing table
///
/// All state sits behind one lock; every operation, rotation included, takes it.
/// Share between sessions with `Arc<RoutingTable>`.
pub struct RoutingTable {
    clock: Arc<dyn Clock>,
    state: Mutex<TableState>,
}

impl RoutingTable {
    /// Create an empty table. It starts out stale.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let expiration_timeout = clock.millis().saturating_sub(1);
        Self {
            clock,
            state: Mutex::new(TableState {
                expiration_timeout,
                ..TableState::default()
            }),
        }
    }

    /// Create a table seeded with bootstrap routers
    ///
    /// There are no readers or writers yet, so the table stays stale until discovery succeeds.
    pub fn with_routers(
        clock: Arc<dyn Clock>,
        routers: impl IntoIterator<Item = ServerAddress>,
    ) -> Self {
        let table = Self::new(clock);
        let routers: Vec<ServerAddress> = routers.into_iter().collect();
        table.state.lock().routers.update(&routers, &mut HashSet::new());
        table
    }

    /// Create a table seeded with the routers from `settings`
    pub fn from_settings(clock: Arc<dyn Clock>, settings: &RoutingSettings) -> Self {
        Self::with_routers(clock, settings.bootstrap.iter().cloned())
    }

    /// Whether the table must be refreshed before use
    pub fn is_stale(&self) -> bool {
        let state = self.state.lock();
        self.clock.millis() >= state.expiration_timeout
            || state.routers.size() <= MIN_ROUTERS
            || state.readers.is_empty()
            || state.writers.is_empty()
    }

    /// Apply a discovery result.
    ///
    /// Returns every address dropped from any role so the caller can close its connections.
    pub fn update<S>(&self, snapshot: &S) -> HashSet<ServerAddress>
    where
        S: TopologySnapshot + ?Sized,
    {
        let mut state = self.state.lock();
        let mut removed = HashSet::new();

        state.expiration_timeout = snapshot.expiration_timestamp();
        state.readers.update(snapshot.readers(), &mut removed);
        state.writers.update(snapshot.writers(), &mut removed);
        state.routers.update(snapshot.routers(), &mut removed);

        tracing::debug!(
            expiration = state.expiration_timeout,
            routers = state.routers.size(),
            writers = state.writers.size(),
            readers = state.readers.size(),
            removed = removed.len(),
            "routing table updated"
        );

        removed
    }

    /// Stop using `address` for reads and writes. It stays a router so rediscovery still works.
    pub fn forget(&self, address: &ServerAddress) {
        let mut state = self.state.lock();
        let reader = state.readers.remove(address);
        let writer = state.writers.remove(address);
        if reader || writer {
            tracing::debug!(%address, "forgot server");
        }
    }

    /// Drop `address` from the writers only
    pub fn remove_writer(&self, address: &ServerAddress) {
        if self.state.lock().writers.remove(address) {
            tracing::debug!(%address, "removed writer");
        }
    }

    /// Drop `address` from the routers only
    pub fn remove_router(&self, address: &ServerAddress) {
        if self.state.lock().routers.remove(address) {
            tracing::debug!(%address, "removed router");
        }
    }

    /// Read servers
    pub fn readers(&self) -> RoleAddresses<'_> {
        RoleAddresses {
            table: self,
            role: ServerRole::Read,
        }
    }

    /// Write servers
    pub fn writers(&self) -> RoleAddresses<'_> {
        RoleAddresses {
            table: self,
            role: ServerRole::Write,
        }
    }

    /// Next router to ask for a fresh table
    pub fn next_router(&self) -> Option<ServerAddress> {
        self.next(ServerRole::Route)
    }

    /// Number of known routers
    pub fn router_size(&self) -> usize {
        self.state.lock().routers.size()
    }

    /// Absolute expiration in clock milliseconds
    pub fn expiration_timeout(&self) -> i64 {
        self.state.lock().expiration_timeout
    }

    /// Every address known in any role
    pub fn servers(&self) -> HashSet<ServerAddress> {
        let state = self.state.lock();
        state
            .routers
            .as_slice()
            .iter()
            .chain(state.writers.as_slice())
            .chain(state.readers.as_slice())
            .cloned()
            .collect()
    }

    fn next(&self, role: ServerRole) -> Option<ServerAddress> {
        let next = self.state.lock().set_mut(role).next();
        if next.is_none() {
            tracing::trace!(%role, "no server available");
        }
        next
    }
}

impl fmt::Display for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        write!(
            f,
            "Ttl {}, currentTime {}, routers {}, writers {}, readers {}",
            state.expiration_timeout,
            self.clock.millis(),
            state.routers,
            state.writers,
            state.readers
        )
    }
}

impl fmt::Debug for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingTable")
            .field("state", &*self.state.lock())
            .finish()
    }
}

// ============================================================================
// RoleAddresses
// ============================================================================

/// Live view of one role's servers
///
/// Borrows the table; every call goes through the table lock.
#[derive(Clone, Copy)]
pub struct RoleAddresses<'a> {
    table: &'a RoutingTable,
    role: ServerRole,
}

impl RoleAddresses<'_> {
    /// Role this view covers
    pub fn role(&self) -> ServerRole {
        self.role
    }

    /// Number of servers
    pub fn size(&self) -> usize {
        self.table.state.lock().set(self.role).size()
    }

    /// Whether no server is known
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Next server in rotation, `None` when empty
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Option<ServerAddress> {
        self.table.next(self.role)
    }

    /// Current servers in rotation order
    pub fn snapshot(&self) -> Vec<ServerAddress> {
        self.table.state.lock().set(self.role).as_slice().to_vec()
    }
}

impl fmt::Debug for RoleAddresses<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleAddresses")
            .field("role", &self.role)
            .field("servers", &self.snapshot())
            .finish()
    }
}

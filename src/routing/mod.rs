//! Routing module
//!
//! Client-side view of a cluster's topology.
//!
//! # Overview
//!
//! A [`RoutingTable`] keeps the readers, writers and routers of a cluster, each in a
//! [`RoundRobinAddressSet`]. Discovery feeds it [`ClusterComposition`]s; sessions ask it
//! whether it is stale and which server to use next.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use zeta4g_routing::{ClusterComposition, RoutingTable, ServerAddress, SystemClock};
//!
//! let table = RoutingTable::with_routers(
//!     Arc::new(SystemClock),
//!     vec![ServerAddress::new("server1", 7687)],
//! );
//! assert!(table.is_stale());
//!
//! let router = table.next_router().unwrap();
//! assert_eq!(router.host, "server1");
//!
//! let removed = table.update(&ClusterComposition::new(
//!     i64::MAX,
//!     vec![ServerAddress::new("server2", 7687)],
//!     vec![ServerAddress::new("server1", 7687)],
//!     vec![ServerAddress::new("server1", 7687), ServerAddress::new("server2", 7687)],
//! ));
//! assert!(removed.is_empty());
//! assert!(!table.is_stale());
//! assert_eq!(table.writers().next(), Some(ServerAddress::new("server1", 7687)));
//! ```

mod address_set;
mod composition;
mod table;

pub use address_set::{diff_and_apply, RoundRobinAddressSet};
pub use composition::{ClusterComposition, RoutingRecord, ServerEntry, TopologySnapshot};
pub use table::{RoleAddresses, RoutingTable, ServerRole, MIN_ROUTERS};

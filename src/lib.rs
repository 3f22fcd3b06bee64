//! # Zeta4G Routing
//!
//! Cluster routing table for the [Zeta4G](https://github.com/zeta9044/zeta4g) driver.
//!
//! ## Features
//!
//! - **Role-scoped server sets** - readers, writers and routers tracked separately
//! - **Staleness** - TTL plus minimum population per role decides when to rediscover
//! - **Round-robin selection** - fair, repeatable rotation over equally capable servers
//! - **Differential updates** - discovery results are merged, dropped servers reported back
//! - **Thread safe** - one lock per table, share it with `Arc`
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use zeta4g_routing::{RoutingSettings, RoutingTable, SystemClock};
//!
//! let settings = RoutingSettings::from_uri("zeta4g://server1:7687,server2:7687").unwrap();
//! let table = RoutingTable::from_settings(Arc::new(SystemClock), &settings);
//!
//! // Bootstrap routers only: discovery is needed first
//! assert!(table.is_stale());
//! assert_eq!(table.router_size(), 2);
//! ```
//!
//! ## Discovery Results
//!
//! ROUTE responses are parsed into a [`ClusterComposition`]:
//!
//! ```rust
//! use zeta4g_routing::{ClusterComposition, RoutingRecord, ServerEntry, TopologySnapshot};
//!
//! let record = RoutingRecord {
//!     ttl: 300,
//!     servers: vec![ServerEntry {
//!         role: "WRITE".to_string(),
//!         addresses: vec!["server1:7687".to_string()],
//!     }],
//! };
//!
//! let composition = ClusterComposition::parse(&record, 0).unwrap();
//! assert_eq!(composition.expiration_timestamp(), 300_000);
//! assert!(composition.has_writers());
//! ```
//!
//! ## Error Handling
//!
//! Only parsing returns [`RoutingResult`]. Table operations never fail; an empty role
//! yields `None` from `next()`.
//!
//! ```rust
//! use zeta4g_routing::{RoutingError, ServerAddress};
//!
//! match ServerAddress::from_uri("server1:port") {
//!     Ok(addr) => println!("{}", addr),
//!     Err(RoutingError::Configuration(msg)) => eprintln!("bad address: {}", msg),
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`routing`] - Routing table, address sets and cluster compositions
//! - [`config`] - Bootstrap settings and routing URIs
//! - [`clock`] - Time sources

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod address;
pub mod clock;
pub mod config;
pub mod error;
pub mod routing;

// Re-exports for convenience
pub use address::{ServerAddress, DEFAULT_PORT};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{is_routing_uri, parse_routing_uri, RoutingSettings, RoutingSettingsBuilder};
pub use error::{RoutingError, RoutingResult};
pub use routing::{
    ClusterComposition, RoleAddresses, RoundRobinAddressSet, RoutingRecord, RoutingTable,
    ServerEntry, ServerRole, TopologySnapshot, MIN_ROUTERS,
};

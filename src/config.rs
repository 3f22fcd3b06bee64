//! Routing settings
//!
//! Bootstrap routers come from a `zeta4g://` URI, a builder, or a config file.

use serde::Deserialize;

use crate::address::ServerAddress;
use crate::error::{RoutingError, RoutingResult};

const ROUTING_SCHEMES: [&str; 3] = ["zeta4g://", "zeta4g+s://", "zeta4g+ssc://"];

// ============================================================================
// RoutingSettings
// ============================================================================

/// Routing settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoutingSettings {
    /// Routers contacted before the first discovery
    #[serde(default)]
    pub bootstrap: Vec<ServerAddress>,
}

impl RoutingSettings {
    /// Settings from a routing URI such as `zeta4g://server1:7687,server2:7687`
    pub fn from_uri(uri: &str) -> RoutingResult<Self> {
        Ok(Self {
            bootstrap: parse_routing_uri(uri)?,
        })
    }

    /// Start a builder
    pub fn builder() -> RoutingSettingsBuilder {
        RoutingSettingsBuilder {
            settings: Self::default(),
        }
    }
}

/// Routing settings builder
#[derive(Debug, Clone)]
pub struct RoutingSettingsBuilder {
    settings: RoutingSettings,
}

impl RoutingSettingsBuilder {
    /// Add a bootstrap router
    pub fn with_router(mut self, address: ServerAddress) -> Self {
        if !self.settings.bootstrap.contains(&address) {
            self.settings.bootstrap.push(address);
        }
        self
    }

    /// Add several bootstrap routers
    pub fn with_routers(self, addresses: impl IntoIterator<Item = ServerAddress>) -> Self {
        addresses.into_iter().fold(self, |builder, a| builder.with_router(a))
    }

    /// Build the settings, requiring at least one router
    pub fn build(self) -> RoutingResult<RoutingSettings> {
        if self.settings.bootstrap.is_empty() {
            return Err(RoutingError::configuration("At least one router is required"));
        }
        Ok(self.settings)
    }
}

/// Whether `uri` uses a routing scheme
pub fn is_routing_uri(uri: &str) -> bool {
    ROUTING_SCHEMES.iter().any(|scheme| uri.starts_with(scheme))
}

/// Parse the comma separated router list of a routing URI
pub fn parse_routing_uri(uri: &str) -> RoutingResult<Vec<ServerAddress>> {
    let hosts = ROUTING_SCHEMES
        .iter()
        .find_map(|scheme| uri.strip_prefix(scheme))
        .ok_or_else(|| RoutingError::configuration(format!("Not a routing URI: '{}'", uri)))?;

    let mut routers = Vec::new();
    for part in hosts.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let address = ServerAddress::from_uri(part)?;
        if !routers.contains(&address) {
            routers.push(address);
        }
    }

    if routers.is_empty() {
        return Err(RoutingError::configuration("No routers specified"));
    }

    Ok(routers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_routing_uri() {
        assert!(is_routing_uri("zeta4g://localhost:7687"));
        assert!(is_routing_uri("zeta4g+s://localhost:7687"));
        assert!(is_routing_uri("zeta4g+ssc://localhost:7687"));
        assert!(!is_routing_uri("bolt://localhost:7687"));
    }

    #[test]
    fn test_parse_routing_uri() {
        let routers = parse_routing_uri("zeta4g://server1:7687, server2:7688,server1:7687").unwrap();
        assert_eq!(
            routers,
            vec![ServerAddress::new("server1", 7687), ServerAddress::new("server2", 7688)]
        );
    }

    #[test]
    fn test_parse_routing_uri_default_port() {
        let routers = parse_routing_uri("zeta4g://server1,server2:7688").unwrap();
        assert_eq!(routers[0].port, 7687);
        assert_eq!(routers[1].port, 7688);
    }

    #[test]
    fn test_parse_routing_uri_errors() {
        assert!(parse_routing_uri("zeta4g://").is_err());
        assert!(parse_routing_uri("bolt://server1:7687").is_err());
        assert!(parse_routing_uri("zeta4g://server1:abc").is_err());
    }

    #[test]
    fn test_builder() {
        let settings = RoutingSettings::builder()
            .with_router(ServerAddress::new("server1", 7687))
            .with_routers(vec![
                ServerAddress::new("server1", 7687),
                ServerAddress::new("server2", 7687),
            ])
            .build()
            .unwrap();

        assert_eq!(settings.bootstrap.len(), 2);
        assert!(RoutingSettings::builder().build().is_err());
    }

    #[test]
    fn test_from_uri_matches_builder() {
        let from_uri = RoutingSettings::from_uri("zeta4g://server1:7687").unwrap();
        let built = RoutingSettings::builder()
            .with_router(ServerAddress::new("server1", 7687))
            .build()
            .unwrap();
        assert_eq!(from_uri, built);
    }

    #[test]
    fn test_deserialize() {
        let settings: RoutingSettings = serde_json::from_str(
            r#"{ "bootstrap": [ { "host": "server1", "port": 7687 } ] }"#,
        )
        .unwrap();
        assert_eq!(settings.bootstrap, vec![ServerAddress::new("server1", 7687)]);

        let empty: RoutingSettings = serde_json::from_str("{}").unwrap();
        assert!(empty.bootstrap.is_empty());
    }
}

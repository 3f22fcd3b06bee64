//! Routing Error Types
//!
//! Errors raised while parsing addresses, settings and discovery responses.
//! The routing table itself never fails; absence of an address is `None`.

use thiserror::Error;

// ============================================================================
// RoutingError
// ============================================================================

/// Routing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// Invalid settings or address
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed discovery response
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl RoutingError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Whether the error came from a discovery response
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

/// Routing result type
pub type RoutingResult<T> = Result<T, RoutingError>;

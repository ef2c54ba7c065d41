/// Shared utilities and types used across all layers
///
/// This module contains:
/// - Request and outcome types (orders, match reports)
/// - Error types
/// - Metrics

pub mod error;
pub mod metrics;
pub mod protocol;

// Re-export commonly used types
pub use error::{ConfigError, EngineError};
pub use protocol::{
    MatchOutcome, MatchReport, NewOrderRequest, NoMatchReason, OrderType, TickerId,
};

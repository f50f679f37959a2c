//! Error types.
//!
//! Invalid binding is the only caller-visible failure in this crate.
//! Per-client send anomalies are absorbed where they occur: a disconnected
//! target is skipped silently while removing a client that was never
//! subscribed is reported at debug level and treated as success.

use crate::protocol::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarError {
    #[error("entity {entity} can not be bound: it is closed or flagged for removal")]
    InvalidBinding { entity: EntityId },
}

pub type Result<T> = std::result::Result<T, BarError>;
